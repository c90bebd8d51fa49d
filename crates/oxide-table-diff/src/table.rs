//! Table model.
//!
//! A [`Table`] is a snapshot of one table at a point in time: its ordered
//! columns, primary key, secondary indexes, auto-increment counter and the
//! `CREATE TABLE` statement the database reported for it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::alter::TableAlter;
use crate::column::Column;
use crate::create::generate_create_statement;
use crate::diff::diff_table;
use crate::error::{Result, SchemaError};
use crate::index::Index;

fn default_engine() -> String {
    String::from("InnoDB")
}

fn default_char_set() -> String {
    String::from("utf8mb4")
}

/// Snapshot of a table's structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Storage engine.
    #[serde(default = "default_engine")]
    pub engine: String,
    /// Default character set.
    #[serde(default = "default_char_set")]
    pub char_set: String,
    /// Default collation, when it is not the character set's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    /// Table comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Columns in physical order.
    pub columns: Vec<Column>,
    /// Primary key, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<Index>,
    /// Secondary indexes in definition order.
    #[serde(default)]
    pub secondary_indexes: Vec<Index>,
    /// Next auto-increment value; 0 when the table has no such column.
    #[serde(default)]
    pub next_auto_increment: u64,
    /// `CREATE TABLE` statement as reported by the database.
    #[serde(default)]
    pub create_statement: String,
    /// Set when the generated statement does not match `create_statement`.
    #[serde(skip)]
    pub unsupported_ddl: bool,
}

impl Table {
    /// Creates an empty InnoDB table using `utf8mb4`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            engine: default_engine(),
            char_set: default_char_set(),
            collation: None,
            comment: None,
            columns: Vec::new(),
            primary_key: None,
            secondary_indexes: Vec::new(),
            next_auto_increment: 0,
            create_statement: String::new(),
            unsupported_ddl: false,
        }
    }

    /// Sets the storage engine.
    #[must_use]
    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Sets the default character set.
    #[must_use]
    pub fn char_set(mut self, char_set: impl Into<String>) -> Self {
        self.char_set = char_set.into();
        self
    }

    /// Sets the default collation.
    #[must_use]
    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Sets the table comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Appends a column.
    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Sets the primary key. The index is flagged as primary.
    #[must_use]
    pub fn primary_key(mut self, mut index: Index) -> Self {
        index.primary_key = true;
        index.unique = true;
        index.name.clear();
        self.primary_key = Some(index);
        self
    }

    /// Appends a secondary index.
    #[must_use]
    pub fn index(mut self, index: Index) -> Self {
        self.secondary_indexes.push(index);
        self
    }

    /// Sets the next auto-increment value.
    #[must_use]
    pub fn next_auto_increment(mut self, next: u64) -> Self {
        self.next_auto_increment = next;
        self
    }

    /// Records the statement the database reported for this table and
    /// checks it against the generated one.
    #[must_use]
    pub fn captured(mut self, create_statement: impl Into<String>) -> Self {
        self.create_statement = create_statement.into();
        self.detect_unsupported();
        self
    }

    /// Gets a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the `AUTO_INCREMENT` column, if any.
    #[must_use]
    pub fn auto_increment_column(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.auto_increment)
    }

    /// Returns whether some column is `AUTO_INCREMENT`.
    #[must_use]
    pub fn has_auto_increment(&self) -> bool {
        self.auto_increment_column().is_some()
    }

    /// Returns whether the model fully describes this table. Unsupported
    /// tables never produce change clauses.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !self.unsupported_ddl
    }

    /// Renders the canonical `CREATE TABLE` statement for this table.
    #[must_use]
    pub fn generated_create_statement(&self) -> String {
        generate_create_statement(self)
    }

    /// Compares the generated statement with the captured one and updates
    /// the supported flag. Returns `true` when the table is unsupported.
    ///
    /// A table with no captured statement cannot be verified and is marked
    /// unsupported. Tables that never go through this check stay supported.
    pub fn detect_unsupported(&mut self) -> bool {
        self.unsupported_ddl = self.create_statement.is_empty()
            || self.generated_create_statement() != self.create_statement;
        self.unsupported_ddl
    }

    /// Returns the clauses that transform `self` into `to`.
    ///
    /// See [`diff_table`](crate::diff::diff_table).
    #[must_use]
    pub fn diff<'a>(&'a self, to: &'a Self) -> Vec<TableAlter<'a>> {
        diff_table(self, to)
    }

    /// Checks the structural invariants of the snapshot.
    ///
    /// # Errors
    ///
    /// Returns every violation found: a single [`SchemaError`] when there is
    /// one, [`SchemaError::Multiple`] otherwise.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                errors.push(SchemaError::DuplicateColumn {
                    table: self.name.clone(),
                    column: column.name.clone(),
                });
            }
        }

        if let Some(ref pk) = self.primary_key {
            self.validate_index(pk, true, &seen, &mut errors);
        }
        for index in &self.secondary_indexes {
            self.validate_index(index, false, &seen, &mut errors);
        }

        if self.columns.iter().filter(|c| c.auto_increment).count() > 1 {
            errors.push(SchemaError::MultipleAutoIncrement {
                table: self.name.clone(),
            });
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(SchemaError::Multiple(errors)),
        }
    }

    fn validate_index(
        &self,
        index: &Index,
        in_primary_slot: bool,
        columns: &HashSet<&str>,
        errors: &mut Vec<SchemaError>,
    ) {
        if index.primary_key != in_primary_slot {
            errors.push(SchemaError::MisplacedPrimaryKey {
                table: self.name.clone(),
                index: index.to_string(),
            });
        }
        if index.parts.is_empty() {
            errors.push(SchemaError::EmptyIndex {
                table: self.name.clone(),
                index: index.to_string(),
            });
        }
        for name in index.column_names() {
            if !columns.contains(name) {
                errors.push(SchemaError::UnknownIndexColumn {
                    table: self.name.clone(),
                    index: index.to_string(),
                    column: name.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnDefault;

    fn widgets() -> Table {
        Table::new("widgets")
            .column(Column::new("id", "int(10) unsigned").not_null().auto_increment())
            .column(Column::new("label", "varchar(64)").default(ColumnDefault::Null))
            .primary_key(Index::primary().column("id"))
            .index(Index::new("idx_label").column("label"))
            .next_auto_increment(4)
    }

    #[test]
    fn lookup_helpers() {
        let table = widgets();
        assert_eq!(table.get_column("label").map(|c| c.type_in_db.as_str()), Some("varchar(64)"));
        assert!(table.get_column("missing").is_none());
        assert_eq!(table.auto_increment_column().map(|c| c.name.as_str()), Some("id"));
        assert!(table.has_auto_increment());
        assert!(!Table::new("t").has_auto_increment());
    }

    #[test]
    fn primary_key_builder_sets_flags() {
        let table = Table::new("t")
            .column(Column::new("a", "int").not_null())
            .primary_key(Index::new("ignored").column("a"));
        let pk = table.primary_key.as_ref().unwrap();
        assert!(pk.primary_key);
        assert!(pk.unique);
        assert!(pk.name.is_empty());
    }

    #[test]
    fn captured_matching_statement_is_supported() {
        let statement = widgets().generated_create_statement();
        let table = widgets().captured(statement);
        assert!(table.is_supported());
    }

    #[test]
    fn captured_mismatching_statement_is_unsupported() {
        let statement = widgets().generated_create_statement();
        let table = widgets().captured(statement.replace("ENGINE=InnoDB", "ENGINE=MyISAM"));
        assert!(!table.is_supported());
    }

    #[test]
    fn detect_unsupported_without_capture() {
        let mut table = widgets();
        assert!(table.is_supported());
        assert!(table.detect_unsupported());
        assert!(!table.is_supported());
        assert!(!widgets().captured("").is_supported());
    }

    #[test]
    fn detect_unsupported_is_recomputed() {
        let mut table = widgets().captured("CREATE TABLE `widgets` ()");
        assert!(!table.is_supported());
        table.create_statement = table.generated_create_statement();
        assert!(!table.detect_unsupported());
        assert!(table.is_supported());
    }

    #[test]
    fn validate_accepts_well_formed_table() {
        assert!(widgets().validate().is_ok());
    }

    #[test]
    fn validate_reports_single_error() {
        let table = widgets().column(Column::new("label", "text"));
        assert_eq!(
            table.validate(),
            Err(SchemaError::DuplicateColumn {
                table: "widgets".into(),
                column: "label".into(),
            })
        );
    }

    #[test]
    fn validate_collects_all_errors() {
        let mut table = widgets()
            .column(Column::new("other_id", "int").auto_increment())
            .index(Index::new("idx_empty"))
            .index(Index::new("idx_ghost").column("ghost"));
        table.secondary_indexes.push(Index::primary().column("id"));

        let Err(SchemaError::Multiple(errors)) = table.validate() else {
            panic!("expected multiple errors");
        };
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&SchemaError::EmptyIndex {
            table: "widgets".into(),
            index: "index `idx_empty`".into(),
        }));
        assert!(errors.contains(&SchemaError::UnknownIndexColumn {
            table: "widgets".into(),
            index: "index `idx_ghost`".into(),
            column: "ghost".into(),
        }));
        assert!(errors.contains(&SchemaError::MisplacedPrimaryKey {
            table: "widgets".into(),
            index: "primary key".into(),
        }));
        assert!(errors.contains(&SchemaError::MultipleAutoIncrement {
            table: "widgets".into(),
        }));
    }

    #[test]
    fn serde_defaults_and_skipped_flag() {
        let json = r#"{
            "name": "t",
            "columns": [{"name": "a", "type_in_db": "int"}]
        }"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.engine, "InnoDB");
        assert_eq!(table.char_set, "utf8mb4");
        assert!(table.primary_key.is_none());
        assert_eq!(table.next_auto_increment, 0);
        assert!(table.is_supported());
        assert!(table.columns[0].nullable);

        let mut unsupported = widgets().captured("bogus");
        assert!(!unsupported.is_supported());
        let round_tripped: Table =
            serde_json::from_str(&serde_json::to_string(&unsupported).unwrap()).unwrap();
        assert!(round_tripped.is_supported());
        assert!(unsupported.detect_unsupported());
    }
}
