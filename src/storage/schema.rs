//! Database schema definitions
//!
//! Decimal columns (hours, cost) are TEXT so the decimal scale survives a
//! round trip unchanged.

/// Table names, shared by the schema and the DAO statements
pub const PROJECT_TABLE: &str = "project";
pub const MATERIAL_TABLE: &str = "material";
pub const STEP_TABLE: &str = "step";
pub const CATEGORY_TABLE: &str = "category";
pub const PROJECT_CATEGORY_TABLE: &str = "project_category";

/// SQL to create the project table
pub const CREATE_PROJECT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS project (
    project_id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_name TEXT NOT NULL,
    estimated_hours TEXT,
    actual_hours TEXT,
    difficulty INTEGER,
    notes TEXT
)
"#;

/// SQL to create the material table (owned by one project)
pub const CREATE_MATERIAL_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS material (
    material_id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL REFERENCES project (project_id) ON DELETE CASCADE,
    material_name TEXT NOT NULL,
    num_required INTEGER,
    cost TEXT
)
"#;

/// SQL to create the step table (owned by one project)
pub const CREATE_STEP_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS step (
    step_id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL REFERENCES project (project_id) ON DELETE CASCADE,
    step_text TEXT NOT NULL,
    step_order INTEGER NOT NULL
)
"#;

/// SQL to create the category table (shared between projects)
pub const CREATE_CATEGORY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS category (
    category_id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_name TEXT NOT NULL UNIQUE
)
"#;

/// SQL to create the project/category association table
pub const CREATE_PROJECT_CATEGORY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS project_category (
    project_id INTEGER NOT NULL REFERENCES project (project_id) ON DELETE CASCADE,
    category_id INTEGER NOT NULL REFERENCES category (category_id) ON DELETE CASCADE,
    UNIQUE (project_id, category_id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_material_project ON material(project_id)",
    "CREATE INDEX IF NOT EXISTS idx_step_project ON step(project_id)",
    "CREATE INDEX IF NOT EXISTS idx_project_category_project ON project_category(project_id)",
    "CREATE INDEX IF NOT EXISTS idx_project_category_category ON project_category(category_id)",
];

/// All schema creation statements, parents before children
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_PROJECT_TABLE,
        CREATE_MATERIAL_TABLE,
        CREATE_STEP_TABLE,
        CREATE_CATEGORY_TABLE,
        CREATE_PROJECT_CATEGORY_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
