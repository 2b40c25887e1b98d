use crate::entity::Project;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct ProjectRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Difficulty")]
    pub difficulty: String,
    #[tabled(rename = "Est. hours")]
    pub estimated_hours: String,
    #[tabled(rename = "Actual hours")]
    pub actual_hours: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: or_dash(project.project_id),
            name: project.project_name.clone(),
            difficulty: or_dash(project.difficulty),
            estimated_hours: or_dash(project.estimated_hours),
            actual_hours: or_dash(project.actual_hours),
        }
    }
}

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            field: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

/// One row per project, in the order given
pub fn projects_table(projects: &[Project]) -> String {
    let rows: Vec<ProjectRow> = projects.iter().map(ProjectRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Scalar fields of one project
pub fn details_table(project: &Project) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("ID", &or_dash(project.project_id));
    builder.add_row("Difficulty", &or_dash(project.difficulty));
    builder.add_row("Estimated hours", &or_dash(project.estimated_hours));
    builder.add_row("Actual hours", &or_dash(project.actual_hours));
    builder.add_row("Materials", &project.materials.len().to_string());
    builder.add_row("Steps", &project.steps.len().to_string());
    builder.build()
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projects_table_lists_names_in_order() {
        let projects = vec![
            Project { project_id: Some(2), ..Project::new("Attic insulation") },
            Project { project_id: Some(1), difficulty: Some(3), ..Project::new("Build a deck") },
        ];

        let table = projects_table(&projects);
        let attic = table.find("Attic insulation").unwrap();
        let deck = table.find("Build a deck").unwrap();
        assert!(attic < deck);
        assert!(table.contains("Difficulty"));
    }

    #[test]
    fn test_details_table_counts_children() {
        let mut project = Project::new("Shelf");
        project.steps.push(crate::entity::Step::new("Cut", 1));

        let table = details_table(&project);
        assert!(table.contains("Estimated hours"));
        assert!(table.contains("Steps"));
    }
}
