//! Text output formatter for human-readable display
//!
//! Renders the ordered event sequence one line per event, colored by
//! severity: warnings yellow, errors red.

use crate::output::{CommandOutput, OutputConfig, OutputFormatter, Severity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    config: OutputConfig,
}

impl TextFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    fn render(&self, event: &CommandOutput) -> String {
        let message = event.to_string();
        if !self.config.color {
            return message;
        }
        match event.severity() {
            Severity::Info => message,
            Severity::Warning => message.yellow().to_string(),
            Severity::Error => message.red().to_string(),
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, output: &[CommandOutput], writer: &mut dyn Write) -> std::io::Result<()> {
        for event in output {
            if self.config.quiet && event.severity() == Severity::Info {
                continue;
            }
            writeln!(writer, "{}", self.render(event))?;
        }
        Ok(())
    }
}
