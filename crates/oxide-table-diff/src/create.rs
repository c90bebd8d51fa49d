//! Canonical `CREATE TABLE` generation.
//!
//! The output follows MySQL's `SHOW CREATE TABLE` layout so a generated
//! statement can be compared byte for byte with a captured one.

use crate::sql::{quote_identifier, quote_string};
use crate::table::Table;

/// Renders `table` as a `CREATE TABLE` statement.
///
/// Definitions are listed as columns, then the primary key, then secondary
/// indexes. `AUTO_INCREMENT=n` is only emitted when the table has an
/// auto-increment column and `n` is above 1.
#[must_use]
pub fn generate_create_statement(table: &Table) -> String {
    let mut defs: Vec<String> = table.columns.iter().map(|c| c.definition()).collect();
    if let Some(ref pk) = table.primary_key {
        defs.push(pk.definition());
    }
    defs.extend(table.secondary_indexes.iter().map(|i| i.definition()));

    format!(
        "CREATE TABLE {} (\n  {}\n) {}",
        quote_identifier(&table.name),
        defs.join(",\n  "),
        table_options(table)
    )
}

fn table_options(table: &Table) -> String {
    let mut options = vec![format!("ENGINE={}", table.engine)];
    if table.has_auto_increment() && table.next_auto_increment > 1 {
        options.push(format!("AUTO_INCREMENT={}", table.next_auto_increment));
    }
    options.push(format!("DEFAULT CHARSET={}", table.char_set));
    if let Some(ref collation) = table.collation {
        options.push(format!("COLLATE={collation}"));
    }
    if let Some(ref comment) = table.comment {
        options.push(format!("COMMENT={}", quote_string(comment)));
    }
    options.join(" ")
}
