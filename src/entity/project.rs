//! Project entities
//!
//! A `Project` exclusively owns its materials and steps (keyed by `project_id`)
//! and references shared categories through the `project_category` table.
//! Child collections are empty until loaded by `ProjectDao::fetch_project_by_id`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A DIY project row plus its (lazily loaded) child rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Generated identity; `None` until inserted
    pub project_id: Option<i64>,
    pub project_name: String,
    pub estimated_hours: Option<Decimal>,
    pub actual_hours: Option<Decimal>,
    /// Small integer rating, conventionally 1-5
    pub difficulty: Option<i32>,
    pub notes: Option<String>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Project {
    /// Create an unsaved project with only a name
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Default::default()
        }
    }

    /// True when every scalar column matches, ignoring identity and children
    pub fn same_details(&self, other: &Project) -> bool {
        self.project_name == other.project_name
            && self.estimated_hours == other.estimated_hours
            && self.actual_hours == other.actual_hours
            && self.difficulty == other.difficulty
            && self.notes == other.notes
    }

    /// One-line summary without child rows
    pub fn summary(&self) -> String {
        format!(
            "{}: {} (difficulty {}, estimated {}h, actual {}h)",
            display_id(self.project_id),
            self.project_name,
            display_opt(&self.difficulty),
            display_opt(&self.estimated_hours),
            display_opt(&self.actual_hours),
        )
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        if let Some(notes) = &self.notes {
            writeln!(f, "  Notes: {}", notes)?;
        }

        writeln!(f, "  Materials:")?;
        for material in &self.materials {
            writeln!(f, "    {}", material)?;
        }

        writeln!(f, "  Steps:")?;
        for step in &self.steps {
            writeln!(f, "    {}", step)?;
        }

        writeln!(f, "  Categories:")?;
        for category in &self.categories {
            writeln!(f, "    {}", category)?;
        }
        Ok(())
    }
}

/// A material needed by exactly one project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub material_id: Option<i64>,
    pub project_id: Option<i64>,
    pub material_name: String,
    pub num_required: Option<i32>,
    pub cost: Option<Decimal>,
}

impl Material {
    pub fn new(material_name: impl Into<String>) -> Self {
        Self {
            material_name: material_name.into(),
            ..Default::default()
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", display_id(self.material_id), self.material_name)?;
        if let Some(count) = self.num_required {
            write!(f, " x{}", count)?;
        }
        if let Some(cost) = self.cost {
            write!(f, " @ {}", cost)?;
        }
        Ok(())
    }
}

/// An ordered instruction belonging to exactly one project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub step_id: Option<i64>,
    pub project_id: Option<i64>,
    pub step_text: String,
    pub step_order: i32,
}

impl Step {
    pub fn new(step_text: impl Into<String>, step_order: i32) -> Self {
        Self {
            step_text: step_text.into(),
            step_order,
            ..Default::default()
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.step_order, self.step_text)
    }
}

/// A category shared between any number of projects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: Option<i64>,
    pub category_name: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", display_id(self.category_id), self.category_name)
    }
}

fn display_id(id: Option<i64>) -> String {
    match id {
        Some(id) => format!("ID={}", id),
        None => "ID=-".to_string(),
    }
}

fn display_opt<T: fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
