//! Output formatter trait

use decision_log_application::DecisionFrame;
use decision_log_domain::OutputFormat;

/// Trait for formatting decision frames
pub trait OutputFormatter {
    /// Format the complete frame
    fn format(&self, frame: &DecisionFrame) -> String;

    /// Format as JSON
    fn format_json(&self, frame: &DecisionFrame) -> String;

    /// One line per decision
    fn format_summary(&self, frame: &DecisionFrame) -> String;

    /// Dispatch on `format`
    fn render(&self, frame: &DecisionFrame, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(frame),
            OutputFormat::Summary => self.format_summary(frame),
            OutputFormat::Json => self.format_json(frame),
        }
    }
}
