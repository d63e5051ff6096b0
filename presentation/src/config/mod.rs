//! Presentation-level configuration
//!
//! Resolved output settings: command-line flags over the `[output]` section.

use crate::cli::commands::OutputFormat as CliOutputFormat;
use decision_log_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show live progress while watching
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    pub fn new(format: Option<OutputFormat>, color: bool) -> Self {
        Self {
            format: format.unwrap_or_default(),
            color,
            ..Self::default()
        }
    }

    /// Apply the color setting process-wide.
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }

    /// Apply command-line overrides. Unset flags keep the file value.
    pub fn with_cli(mut self, format: Option<CliOutputFormat>, no_color: bool, quiet: bool) -> Self {
        if let Some(format) = format {
            self.format = format.into();
        }
        if no_color {
            self.color = false;
        }
        if quiet {
            self.show_progress = false;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_file() {
        let config = OutputConfig::new(Some(OutputFormat::Summary), true)
            .with_cli(Some(CliOutputFormat::Json), true, false);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.color);
        assert!(config.show_progress);
    }

    #[test]
    fn test_unset_flags_keep_file_values() {
        let config = OutputConfig::new(Some(OutputFormat::Summary), true).with_cli(None, false, true);
        assert_eq!(config.format, OutputFormat::Summary);
        assert!(config.color);
        assert!(!config.show_progress);
    }
}
