//! Entity types - plain values mapped from table rows
//!
//! Project side (persisted by `ProjectDao`):
//! - `Project`: owns `Material` and `Step` rows, links shared `Category` rows
//!
//! Recipe side (value holders with display rendering only):
//! - `Ingredient`, `RecipeStep`, `Unit`

pub mod fraction;
pub mod project;
pub mod recipe;

pub use fraction::to_fraction;
pub use project::{Category, Material, Project, Step};
pub use recipe::{Ingredient, RecipeStep, Unit};
