use crate::adapters::outbound::formatters::{DetailsFormatter, JsonFormatter, TextFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::PlanFormatter;

/// Factory for creating plan formatters
///
/// Selects the formatter adapter for an output format. It belongs in the
/// application layer because the choice is driven by the request.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use rambo::application::dto::OutputFormat;
    /// use rambo::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Details);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn PlanFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextFormatter::new()),
            OutputFormat::Details => Box::new(DetailsFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use rambo::application::dto::OutputFormat;
    /// use rambo::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Writing build plan as JSON...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Text => "📝 Writing build order...",
            OutputFormat::Details => "📝 Writing detailed build order...",
            OutputFormat::Json => "📝 Writing build plan as JSON...",
        }
    }
}
