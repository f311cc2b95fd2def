//! JSON output formatter for machine processing
//!
//! Emits the event sequence as a JSON array, one object per event with a
//! `type` discriminant and the event's structured payload.

use crate::output::{CommandOutput, OutputFormatter};
use serde_json::{json, Value};
use std::io::Write;

/// JSON formatter
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn to_value(event: &CommandOutput) -> Value {
        match event {
            CommandOutput::Result(message) => json!({
                "type": "result",
                "message": message,
            }),
            CommandOutput::Warning(message) => json!({
                "type": "warning",
                "message": message,
            }),
            CommandOutput::Error(message) => json!({
                "type": "error",
                "message": message,
            }),
            CommandOutput::DependencyConflict { name, packages } => json!({
                "type": "dependency_conflict",
                "name": name,
                "packages": packages
                    .iter()
                    .map(|p| json!({ "name": p.name, "version": p.version }))
                    .collect::<Vec<_>>(),
                "message": event.to_string(),
            }),
            CommandOutput::DependencyNotFound {
                dependency,
                repositories_searched,
            } => json!({
                "type": "dependency_not_found",
                "dependency": dependency.to_string(),
                "repositories_searched": repositories_searched,
                "message": event.to_string(),
            }),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, output: &[CommandOutput], writer: &mut dyn Write) -> std::io::Result<()> {
        let events: Vec<Value> = output.iter().map(Self::to_value).collect();
        let document = json!({ "events": events });
        serde_json::to_writer_pretty(&mut *writer, &document)?;
        writeln!(writer)?;
        Ok(())
    }
}
