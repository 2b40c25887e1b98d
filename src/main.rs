//! Projects CLI - create, list and inspect DIY projects

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use projects::config::{self, ProjectsConfig};
use projects::ui::{self, Icons};
use projects::{DbConnection, Material, Project, ProjectDao, Step};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "projects")]
#[command(version)]
#[command(about = "Track DIY projects with their materials, steps and categories")]
#[command(long_about = r#"
Stores DIY projects in a local SQLite database. Every command runs in its own
transaction: it either fully applies or leaves the database untouched.

Example usage:
  projects init
  projects add --name "Build a deck" --estimated-hours 40 --difficulty 3
  projects add-material 1 --name "2x6 board" --count 20 --cost 7.25
  projects show 1
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn is_human(self) -> bool {
        self == OutputFormat::Text
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file and create the database schema
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Create a new project
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(long)]
        estimated_hours: Option<Decimal>,

        #[arg(long)]
        actual_hours: Option<Decimal>,

        /// Difficulty rating (1-5)
        #[arg(long)]
        difficulty: Option<i32>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List all projects ordered by name
    List,

    /// Show one project with its materials, steps and categories
    Show {
        id: i64,
    },

    /// Change the details of a project; omitted fields keep their value
    Update {
        id: i64,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(long)]
        estimated_hours: Option<Decimal>,

        #[arg(long)]
        actual_hours: Option<Decimal>,

        #[arg(long)]
        difficulty: Option<i32>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a project and everything it owns
    Delete {
        id: i64,
    },

    /// Add a material to a project
    AddMaterial {
        id: i64,

        #[arg(short, long)]
        name: String,

        /// Quantity required
        #[arg(long)]
        count: Option<i32>,

        /// Cost per unit
        #[arg(long)]
        cost: Option<Decimal>,
    },

    /// Append a step to a project
    AddStep {
        id: i64,

        #[arg(short, long)]
        text: String,

        /// Position of the step (defaults to after the last one)
        #[arg(long)]
        order: Option<i32>,
    },

    /// Put a project in a category, creating the category if needed
    AddCategory {
        id: i64,

        #[arg(short, long)]
        name: String,
    },

    /// List all categories
    Categories,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let loaded = config::load_config(&config_path)?;
    let db_path = resolve_database(cli.database.as_deref(), loaded.as_ref());
    let output = cli.format;

    match cli.command {
        Commands::Init { force } => {
            if loaded.is_none() || force {
                let cfg = ProjectsConfig {
                    database: Some(db_path.to_string_lossy().to_string()),
                };
                config::write_config(&config_path, &cfg, force)?;
            }
            open_dao(&db_path)?;

            if output.is_human() {
                ui::success("Project database ready");
                ui::info("Config", &config_path.display().to_string());
                ui::info("Database", &db_path.display().to_string());
            } else {
                emit(&serde_json::json!({
                    "config": config_path,
                    "database": db_path,
                }))?;
            }
        }

        Commands::Add { name, estimated_hours, actual_hours, difficulty, notes } => {
            let dao = open_dao(&db_path)?;
            let project = dao.insert_project(Project {
                estimated_hours,
                actual_hours,
                difficulty,
                notes,
                ..Project::new(name)
            })?;

            if output.is_human() {
                ui::success(&format!("Created {}", project.summary()));
            } else {
                emit(&project)?;
            }
        }

        Commands::List => {
            let dao = open_dao(&db_path)?;
            let projects = dao.fetch_all_projects()?;

            if !output.is_human() {
                emit(&projects)?;
            } else if projects.is_empty() {
                ui::warn("No projects yet.");
            } else {
                ui::header(&format!("{} projects", projects.len()));
                println!("{}", ui::projects_table(&projects));
            }
        }

        Commands::Show { id } => {
            let dao = open_dao(&db_path)?;
            match dao.fetch_project_by_id(id)? {
                Some(project) if output.is_human() => print_project(&project),
                Some(project) => emit(&project)?,
                None if output.is_human() => ui::warn(&format!("Project {} not found", id)),
                None => emit(&serde_json::Value::Null)?,
            }
        }

        Commands::Update { id, name, estimated_hours, actual_hours, difficulty, notes } => {
            let dao = open_dao(&db_path)?;
            let Some(mut project) = dao.fetch_project_by_id(id)? else {
                anyhow::bail!("project {} not found", id);
            };

            if let Some(name) = name {
                project.project_name = name;
            }
            project.estimated_hours = estimated_hours.or(project.estimated_hours);
            project.actual_hours = actual_hours.or(project.actual_hours);
            project.difficulty = difficulty.or(project.difficulty);
            project.notes = notes.or(project.notes);

            if !dao.modify_project_details(&project)? {
                anyhow::bail!("project {} disappeared before it could be updated", id);
            }

            if output.is_human() {
                ui::success(&format!("Updated {}", project.summary()));
            } else {
                emit(&project)?;
            }
        }

        Commands::Delete { id } => {
            let dao = open_dao(&db_path)?;
            let deleted = dao.delete_project(id)?;

            if !output.is_human() {
                emit(&serde_json::json!({ "id": id, "deleted": deleted }))?;
            } else if deleted {
                ui::success(&format!("Deleted project {}", id));
            } else {
                ui::warn(&format!("Project {} not found", id));
            }
        }

        Commands::AddMaterial { id, name, count, cost } => {
            let dao = open_dao(&db_path)?;
            let material = Material {
                num_required: count,
                cost,
                ..Material::new(name)
            };
            let saved = dao.add_materials(id, &[material])?;

            if output.is_human() {
                for material in &saved {
                    ui::success(&format!("Added material {}", material));
                }
            } else {
                emit(&saved)?;
            }
        }

        Commands::AddStep { id, text, order } => {
            let dao = open_dao(&db_path)?;
            let order = match order {
                Some(order) => order,
                None => next_step_order(&dao, id)?,
            };
            let saved = dao.add_steps(id, &[Step::new(text, order)])?;

            if output.is_human() {
                for step in &saved {
                    ui::success(&format!("Added step {}", step));
                }
            } else {
                emit(&saved)?;
            }
        }

        Commands::AddCategory { id, name } => {
            let dao = open_dao(&db_path)?;
            let category = dao.add_category_to_project(id, &name)?;

            if output.is_human() {
                ui::success(&format!("Project {} is now in {}", id, category));
            } else {
                emit(&category)?;
            }
        }

        Commands::Categories => {
            let dao = open_dao(&db_path)?;
            let categories = dao.fetch_all_categories()?;

            if !output.is_human() {
                emit(&categories)?;
            } else if categories.is_empty() {
                ui::warn("No categories yet.");
            } else {
                ui::section("Categories");
                for category in categories {
                    println!("  {} {}", Icons::TAG, category);
                }
            }
        }
    }

    Ok(())
}

/// `--database` wins over the config file, which wins over the default
fn resolve_database(flag: Option<&Path>, config: Option<&ProjectsConfig>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    match config {
        Some(cfg) => DbConnection::from_config(cfg).path().to_path_buf(),
        None => config::default_database_path(),
    }
}

fn open_dao(db_path: &Path) -> anyhow::Result<ProjectDao> {
    config::ensure_db_dir(db_path)?;
    let db = DbConnection::new(db_path);
    db.initialize_schema()?;
    Ok(ProjectDao::new(db))
}

fn next_step_order(dao: &ProjectDao, project_id: i64) -> anyhow::Result<i32> {
    let Some(project) = dao.fetch_project_by_id(project_id)? else {
        anyhow::bail!("project {} not found", project_id);
    };
    Ok(project.steps.iter().map(|s| s.step_order).max().unwrap_or(0) + 1)
}

fn emit<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_project(project: &Project) {
    ui::header(&project.project_name);
    println!("{}", ui::details_table(project));

    if let Some(notes) = &project.notes {
        ui::info("Notes", notes);
    }

    ui::section("Materials");
    if project.materials.is_empty() {
        println!("  {}", ui::muted("none"));
    }
    for material in &project.materials {
        println!("  {} {}", Icons::PACKAGE, material);
    }

    ui::section("Steps");
    if project.steps.is_empty() {
        println!("  {}", ui::muted("none"));
    }
    for step in &project.steps {
        println!("  {}", step);
    }

    ui::section("Categories");
    if project.categories.is_empty() {
        println!("  {}", ui::muted("none"));
    }
    for category in &project.categories {
        println!("  {} {}", Icons::TAG, category);
    }
}
