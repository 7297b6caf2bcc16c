/// Formatter adapters for the build plan output formats
mod details_formatter;
mod json_formatter;
mod text_formatter;

pub use details_formatter::DetailsFormatter;
pub use json_formatter::JsonFormatter;
pub use text_formatter::TextFormatter;
