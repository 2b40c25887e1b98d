pub struct Icons;

impl Icons {
    pub const CHECK: &str = "✅";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const HAMMER: &str = "🔨";
    pub const PACKAGE: &str = "📦";
    pub const TAG: &str = "🏷️";
}
