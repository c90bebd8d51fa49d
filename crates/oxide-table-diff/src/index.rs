//! Index model.
//!
//! Secondary indexes and the primary key share the [`Index`] type. The
//! primary key lives in its own slot on [`Table`](crate::Table) and is
//! flagged with `primary_key`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sql::quote_identifier;

/// One column participating in an index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexPart {
    /// Column name.
    pub column: String,
    /// Prefix length, for indexes on the leading part of a value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_part: Option<u16>,
}

impl IndexPart {
    /// Creates a part covering the whole column.
    #[must_use]
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            sub_part: None,
        }
    }

    /// Creates a part covering the first `len` characters of the column.
    #[must_use]
    pub fn prefix(column: impl Into<String>, len: u16) -> Self {
        Self {
            column: column.into(),
            sub_part: Some(len),
        }
    }

    fn definition(&self) -> String {
        match self.sub_part {
            Some(len) if len > 0 => format!("{}({len})", quote_identifier(&self.column)),
            _ => quote_identifier(&self.column),
        }
    }
}

/// A secondary index or primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name; empty for the primary key.
    #[serde(default)]
    pub name: String,
    /// Indexed columns, in order.
    pub parts: Vec<IndexPart>,
    /// Whether this is a UNIQUE index.
    #[serde(default)]
    pub unique: bool,
    /// Whether this is the primary key.
    #[serde(default)]
    pub primary_key: bool,
}

impl Index {
    /// Creates a new, empty, non-unique secondary index.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
            unique: false,
            primary_key: false,
        }
    }

    /// Creates an empty primary key.
    #[must_use]
    pub fn primary() -> Self {
        Self {
            name: String::new(),
            parts: Vec::new(),
            unique: true,
            primary_key: true,
        }
    }

    /// Appends a whole-column part.
    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.parts.push(IndexPart::new(column));
        self
    }

    /// Appends a prefix part.
    #[must_use]
    pub fn prefix(mut self, column: impl Into<String>, len: u16) -> Self {
        self.parts.push(IndexPart::prefix(column, len));
        self
    }

    /// Makes this a unique index.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Returns the names of the indexed columns, in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.column.as_str())
    }

    /// Two indexes are equivalent if they cover the same columns with the
    /// same sub-parts and uniqueness. Names are ignored.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.parts == other.parts
            && self.unique == other.unique
            && self.primary_key == other.primary_key
    }

    /// Renders the index definition used inside `CREATE TABLE` and
    /// `ADD ...` clauses.
    #[must_use]
    pub fn definition(&self) -> String {
        let parts: Vec<String> = self.parts.iter().map(IndexPart::definition).collect();
        let kind_and_name = if self.primary_key {
            String::from("PRIMARY KEY")
        } else if self.unique {
            format!("UNIQUE KEY {}", quote_identifier(&self.name))
        } else {
            format!("KEY {}", quote_identifier(&self.name))
        };
        format!("{kind_and_name} ({})", parts.join(","))
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.primary_key {
            f.write_str("primary key")
        } else if self.unique {
            write!(f, "unique index {}", quote_identifier(&self.name))
        } else {
            write!(f, "index {}", quote_identifier(&self.name))
        }
    }
}
