pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{header, info, muted, section, success, warn};
pub use table::{details_table, projects_table};
pub use theme::{theme, Theme};
