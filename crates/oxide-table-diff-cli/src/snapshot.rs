//! Loading table snapshots from JSON files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use oxide_table_diff::Table;
use tracing::{debug, warn};

/// Reads, validates and verifies the snapshot stored at `path`.
pub fn load_table(path: &Path) -> Result<Table> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    parse_table(&raw).with_context(|| format!("Invalid snapshot {}", path.display()))
}

/// Parses a snapshot and recomputes its supported flag.
pub fn parse_table(raw: &str) -> Result<Table> {
    let mut table: Table = serde_json::from_str(raw).context("Malformed table JSON")?;
    table.validate()?;

    if !table.detect_unsupported() {
        return Ok(table);
    }
    if table.create_statement.is_empty() {
        warn!(table = %table.name, "No CREATE TABLE statement captured; treating table as unsupported");
    } else {
        let generated = table.generated_create_statement();
        debug!(
            table = %table.name,
            line = first_mismatch(&table.create_statement, &generated),
            "Generated CREATE TABLE differs from captured statement"
        );
    }
    Ok(table)
}

/// 1-based number of the first line where the two statements differ.
pub fn first_mismatch(captured: &str, generated: &str) -> usize {
    let mut captured_lines = captured.lines();
    let mut generated_lines = generated.lines();
    let mut line = 1;
    loop {
        match (captured_lines.next(), generated_lines.next()) {
            (Some(a), Some(b)) if a == b => line += 1,
            _ => return line,
        }
    }
}
