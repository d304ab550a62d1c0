//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    /// Pretty-printed JSON array, for scripting.
    Json,
}

/// Print rows as a table, or as JSON.
pub fn print_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    match (format, rows.is_empty()) {
        (OutputFormat::Table, true) => println!("Nothing matched."),
        (OutputFormat::Table, false) => println!("{}", Table::new(rows)),
        (OutputFormat::Json, _) => match serde_json::to_string_pretty(rows) {
            Ok(json) => println!("{json}"),
            Err(e) => print_error(&format!("Could not render JSON: {e}")),
        },
    }
}

pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Indented `key: value` line, keys padded to one column.
pub fn print_kv(key: &str, value: &str) {
    let key = format!("{key}:");
    println!("  {key:<16}{value}");
}
