//! Transactional CRUD for projects and their child rows
//!
//! Every public operation follows the same lifecycle:
//! acquire connection -> begin -> statements -> commit | rollback -> release.
//! Child rows are only loaded by `fetch_project_by_id`, inside the same
//! transaction as the project row, so the result is one consistent snapshot.

use rusqlite::{Connection, OptionalExtension, Row, params};
use crate::entity::{Category, Material, Project, Step};
use crate::{Error, Result};
use super::connection::DbConnection;
use super::dao::{decimal_column, decimal_to_sql, in_transaction, last_insert_id};
use super::schema::{
    CATEGORY_TABLE, MATERIAL_TABLE, PROJECT_CATEGORY_TABLE, PROJECT_TABLE, STEP_TABLE,
};

const PROJECT_COLUMNS: &str =
    "project_id, project_name, estimated_hours, actual_hours, difficulty, notes";
const MATERIAL_COLUMNS: &str = "material_id, project_id, material_name, num_required, cost";
const STEP_COLUMNS: &str = "step_id, project_id, step_text, step_order";

/// Data-access object for the `project` table and its children
#[derive(Debug, Clone)]
pub struct ProjectDao {
    db: DbConnection,
}

impl ProjectDao {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    // ========== Project Operations ==========

    /// Insert a project and return it with its generated identity.
    ///
    /// Child collections on the input are not written.
    pub fn insert_project(&self, mut project: Project) -> Result<Project> {
        let sql = format!(
            "INSERT INTO {PROJECT_TABLE} \
             (project_name, estimated_hours, actual_hours, difficulty, notes) \
             VALUES (?1, ?2, ?3, ?4, ?5)"
        );

        let mut conn = self.db.get_connection()?;
        let project_id = in_transaction(&mut conn, "insert_project", |tx| {
            tx.execute(
                &sql,
                params![
                    project.project_name,
                    decimal_to_sql(project.estimated_hours),
                    decimal_to_sql(project.actual_hours),
                    project.difficulty,
                    project.notes,
                ],
            )?;
            last_insert_id(tx, PROJECT_TABLE)
        })?;

        tracing::info!("Inserted project {} ({})", project_id, project.project_name);
        project.project_id = Some(project_id);
        Ok(project)
    }

    /// All projects ordered by name, without child rows
    pub fn fetch_all_projects(&self) -> Result<Vec<Project>> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM {PROJECT_TABLE} ORDER BY project_name");

        let mut conn = self.db.get_connection()?;
        let projects = in_transaction(&mut conn, "fetch_all_projects", |tx| {
            let mut stmt = tx.prepare(&sql)?;
            let projects = stmt
                .query_map([], row_to_project)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(projects)
        })?;

        tracing::debug!("Fetched {} projects", projects.len());
        Ok(projects)
    }

    /// Look up one project with its materials, steps and categories.
    ///
    /// Returns `Ok(None)` when no row has this id.
    pub fn fetch_project_by_id(&self, project_id: i64) -> Result<Option<Project>> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM {PROJECT_TABLE} WHERE project_id = ?1");

        let mut conn = self.db.get_connection()?;
        in_transaction(&mut conn, "fetch_project_by_id", |tx| {
            let project = tx
                .query_row(&sql, [project_id], row_to_project)
                .optional()?;

            let Some(mut project) = project else {
                tracing::debug!("Project {} not found", project_id);
                return Ok(None);
            };

            project.materials = fetch_materials_for_project(tx, project_id)?;
            project.steps = fetch_steps_for_project(tx, project_id)?;
            project.categories = fetch_categories_for_project(tx, project_id)?;
            Ok(Some(project))
        })
    }

    /// Overwrite the scalar columns of an existing project.
    ///
    /// Returns `false` when no row has the project's id.
    pub fn modify_project_details(&self, project: &Project) -> Result<bool> {
        let project_id = project.project_id.ok_or_else(|| {
            Error::InvalidInput("cannot modify a project without an id".to_string())
        })?;

        let sql = format!(
            "UPDATE {PROJECT_TABLE} SET \
             project_name = ?1, estimated_hours = ?2, actual_hours = ?3, \
             difficulty = ?4, notes = ?5 \
             WHERE project_id = ?6"
        );

        let mut conn = self.db.get_connection()?;
        let updated = in_transaction(&mut conn, "modify_project_details", |tx| {
            let changed = tx.execute(
                &sql,
                params![
                    project.project_name,
                    decimal_to_sql(project.estimated_hours),
                    decimal_to_sql(project.actual_hours),
                    project.difficulty,
                    project.notes,
                    project_id,
                ],
            )?;
            Ok(changed == 1)
        })?;

        if updated {
            tracing::info!("Modified project {}", project_id);
        }
        Ok(updated)
    }

    /// Delete a project; its materials, steps and category links cascade.
    ///
    /// Returns `false` when no row has this id.
    pub fn delete_project(&self, project_id: i64) -> Result<bool> {
        let sql = format!("DELETE FROM {PROJECT_TABLE} WHERE project_id = ?1");

        let mut conn = self.db.get_connection()?;
        let deleted = in_transaction(&mut conn, "delete_project", |tx| {
            Ok(tx.execute(&sql, [project_id])? == 1)
        })?;

        if deleted {
            tracing::info!("Deleted project {}", project_id);
        }
        Ok(deleted)
    }

    // ========== Child Row Operations ==========

    /// Insert materials for a project, all or nothing
    pub fn add_materials(&self, project_id: i64, materials: &[Material]) -> Result<Vec<Material>> {
        let sql = format!(
            "INSERT INTO {MATERIAL_TABLE} (project_id, material_name, num_required, cost) \
             VALUES (?1, ?2, ?3, ?4)"
        );

        let mut conn = self.db.get_connection()?;
        let saved = in_transaction(&mut conn, "add_materials", |tx| {
            let mut stmt = tx.prepare(&sql)?;
            let mut saved = Vec::with_capacity(materials.len());
            for material in materials {
                stmt.execute(params![
                    project_id,
                    material.material_name,
                    material.num_required,
                    decimal_to_sql(material.cost),
                ])?;
                saved.push(Material {
                    material_id: Some(last_insert_id(tx, MATERIAL_TABLE)?),
                    project_id: Some(project_id),
                    ..material.clone()
                });
            }
            Ok(saved)
        })?;

        tracing::info!("Added {} materials to project {}", saved.len(), project_id);
        Ok(saved)
    }

    /// Insert steps for a project, all or nothing
    pub fn add_steps(&self, project_id: i64, steps: &[Step]) -> Result<Vec<Step>> {
        let sql = format!(
            "INSERT INTO {STEP_TABLE} (project_id, step_text, step_order) VALUES (?1, ?2, ?3)"
        );

        let mut conn = self.db.get_connection()?;
        let saved = in_transaction(&mut conn, "add_steps", |tx| {
            let mut stmt = tx.prepare(&sql)?;
            let mut saved = Vec::with_capacity(steps.len());
            for step in steps {
                stmt.execute(params![project_id, step.step_text, step.step_order])?;
                saved.push(Step {
                    step_id: Some(last_insert_id(tx, STEP_TABLE)?),
                    project_id: Some(project_id),
                    ..step.clone()
                });
            }
            Ok(saved)
        })?;

        tracing::info!("Added {} steps to project {}", saved.len(), project_id);
        Ok(saved)
    }

    /// Link a category (created on first use) to a project
    pub fn add_category_to_project(&self, project_id: i64, category_name: &str) -> Result<Category> {
        let find_sql = format!("SELECT category_id FROM {CATEGORY_TABLE} WHERE category_name = ?1");
        let create_sql = format!("INSERT INTO {CATEGORY_TABLE} (category_name) VALUES (?1)");
        let link_sql = format!(
            "INSERT INTO {PROJECT_CATEGORY_TABLE} (project_id, category_id) VALUES (?1, ?2)"
        );

        let mut conn = self.db.get_connection()?;
        let category = in_transaction(&mut conn, "add_category_to_project", |tx| {
            let existing: Option<i64> = tx
                .query_row(&find_sql, [category_name], |row| row.get(0))
                .optional()?;

            let category_id = match existing {
                Some(id) => id,
                None => {
                    tx.execute(&create_sql, [category_name])?;
                    last_insert_id(tx, CATEGORY_TABLE)?
                }
            };

            tx.execute(&link_sql, params![project_id, category_id])?;
            Ok(Category {
                category_id: Some(category_id),
                category_name: category_name.to_string(),
            })
        })?;

        tracing::info!("Linked category '{}' to project {}", category_name, project_id);
        Ok(category)
    }

    /// Every known category ordered by name
    pub fn fetch_all_categories(&self) -> Result<Vec<Category>> {
        let sql = format!(
            "SELECT category_id, category_name FROM {CATEGORY_TABLE} ORDER BY category_name"
        );

        let mut conn = self.db.get_connection()?;
        in_transaction(&mut conn, "fetch_all_categories", |tx| {
            let mut stmt = tx.prepare(&sql)?;
            let categories = stmt
                .query_map([], row_to_category)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(categories)
        })
    }
}

// ========== Child Fetch Helpers ==========
// Run on the caller's open transaction; rows come back in result-set order.

fn fetch_materials_for_project(conn: &Connection, project_id: i64) -> Result<Vec<Material>> {
    let sql = format!("SELECT {MATERIAL_COLUMNS} FROM {MATERIAL_TABLE} WHERE project_id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let materials = stmt
        .query_map([project_id], row_to_material)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(materials)
}

fn fetch_steps_for_project(conn: &Connection, project_id: i64) -> Result<Vec<Step>> {
    let sql = format!("SELECT {STEP_COLUMNS} FROM {STEP_TABLE} WHERE project_id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let steps = stmt
        .query_map([project_id], row_to_step)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(steps)
}

fn fetch_categories_for_project(conn: &Connection, project_id: i64) -> Result<Vec<Category>> {
    let sql = format!(
        "SELECT c.category_id, c.category_name FROM {CATEGORY_TABLE} c \
         JOIN {PROJECT_CATEGORY_TABLE} pc USING (category_id) \
         WHERE pc.project_id = ?1"
    );
    let mut stmt = conn.prepare(&sql)?;
    let categories = stmt
        .query_map([project_id], row_to_category)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(categories)
}

// ========== Row Mapping ==========

fn row_to_project(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        project_id: row.get(0)?,
        project_name: row.get(1)?,
        estimated_hours: decimal_column(row, 2)?,
        actual_hours: decimal_column(row, 3)?,
        difficulty: row.get(4)?,
        notes: row.get(5)?,
        materials: Vec::new(),
        steps: Vec::new(),
        categories: Vec::new(),
    })
}

fn row_to_material(row: &Row) -> rusqlite::Result<Material> {
    Ok(Material {
        material_id: row.get(0)?,
        project_id: row.get(1)?,
        material_name: row.get(2)?,
        num_required: row.get(3)?,
        cost: decimal_column(row, 4)?,
    })
}

fn row_to_step(row: &Row) -> rusqlite::Result<Step> {
    Ok(Step {
        step_id: row.get(0)?,
        project_id: row.get(1)?,
        step_text: row.get(2)?,
        step_order: row.get(3)?,
    })
}

fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        category_id: row.get(0)?,
        category_name: row.get(1)?,
    })
}
