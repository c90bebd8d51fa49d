//! Error types for table model validation.
//!
//! Diffing and DDL generation are total and never fail. Errors only arise
//! when a collaborator hands over a [`Table`](crate::Table) that breaks the
//! model's structural invariants.

/// Errors reported by [`Table::validate`](crate::Table::validate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two columns share a name.
    #[error("Table '{table}' defines column '{column}' more than once")]
    DuplicateColumn {
        /// Table name.
        table: String,
        /// The repeated column name.
        column: String,
    },

    /// An index names a column the table does not have.
    #[error("Table '{table}': {index} references unknown column '{column}'")]
    UnknownIndexColumn {
        /// Table name.
        table: String,
        /// Identity of the offending index.
        index: String,
        /// The missing column name.
        column: String,
    },

    /// An index covers no columns.
    #[error("Table '{table}': {index} has no columns")]
    EmptyIndex {
        /// Table name.
        table: String,
        /// Identity of the offending index.
        index: String,
    },

    /// The primary key flag disagrees with the slot the index is held in.
    #[error("Table '{table}': {index} is stored in the wrong slot for its primary key flag")]
    MisplacedPrimaryKey {
        /// Table name.
        table: String,
        /// Identity of the offending index.
        index: String,
    },

    /// More than one column is marked `AUTO_INCREMENT`.
    #[error("Table '{table}' has more than one AUTO_INCREMENT column")]
    MultipleAutoIncrement {
        /// Table name.
        table: String,
    },

    /// Multiple errors occurred.
    #[error("Multiple errors occurred:\n{}", .0.iter().map(|e| format!("  - {e}")).collect::<Vec<_>>().join("\n"))]
    Multiple(Vec<SchemaError>),
}

/// Result type for table model validation.
pub type Result<T> = std::result::Result<T, SchemaError>;
