//! Storage Layer - SQLite-backed persistence
//!
//! Tables:
//! - project(project_id, project_name, estimated_hours, actual_hours, difficulty, notes)
//! - material(material_id, project_id, material_name, num_required, cost)
//! - step(step_id, project_id, step_text, step_order)
//! - category(category_id, category_name)
//! - project_category(project_id, category_id)

pub mod connection;
pub mod dao;
pub mod project_dao;
pub mod schema;

pub use connection::DbConnection;
pub use project_dao::ProjectDao;
