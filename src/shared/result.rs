/// Result alias used by the application and adapter layers.
/// Domain services return `PlanningError` directly; it converts into `anyhow::Error` via `?`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
