//! Change clauses produced by the diff engine.
//!
//! Every clause borrows the tables, columns and indexes it describes from the
//! two snapshots that were compared. Rendering a clause yields the fragment
//! that follows `ALTER TABLE <name>`; [`alter_statement`] joins a list of
//! them into a full statement.

use std::fmt;

use crate::column::Column;
use crate::index::Index;
use crate::sql::quote_identifier;
use crate::table::Table;

/// Where a column lands after an add or modify.
#[derive(Debug, Clone, Copy)]
pub enum ColumnPosition<'a> {
    /// Placed before every other column.
    First,
    /// Placed right after the given column.
    After(&'a Column),
}

impl ColumnPosition<'_> {
    fn suffix(self) -> String {
        match self {
            Self::First => String::from(" FIRST"),
            Self::After(col) => format!(" AFTER {}", quote_identifier(&col.name)),
        }
    }
}

fn position_suffix(position: Option<ColumnPosition<'_>>) -> String {
    position.map(ColumnPosition::suffix).unwrap_or_default()
}

// ---- Payloads ----

/// Adds a column present only in the target table.
#[derive(Debug, Clone, Copy)]
pub struct AddColumn<'a> {
    /// The target table.
    pub table: &'a Table,
    /// The new column, owned by the target table.
    pub column: &'a Column,
    /// `None` appends the column at the end.
    pub position: Option<ColumnPosition<'a>>,
}

/// Drops a column present only in the source table.
#[derive(Debug, Clone, Copy)]
pub struct DropColumn<'a> {
    /// The source table, which owns `column`.
    pub table: &'a Table,
    /// The column being removed.
    pub column: &'a Column,
}

/// Changes a column's definition, its position, or both.
#[derive(Debug, Clone, Copy)]
pub struct ModifyColumn<'a> {
    /// The target table.
    pub table: &'a Table,
    /// The column as it exists in the source table.
    pub original: &'a Column,
    /// The column as it exists in the target table.
    pub new: &'a Column,
    /// `None` when only the definition changed.
    pub position: Option<ColumnPosition<'a>>,
}

/// Adds a secondary index or primary key.
#[derive(Debug, Clone, Copy)]
pub struct AddIndex<'a> {
    /// The target table.
    pub table: &'a Table,
    /// The new index, owned by the target table.
    pub index: &'a Index,
}

/// Drops a secondary index or primary key.
#[derive(Debug, Clone, Copy)]
pub struct DropIndex<'a> {
    /// The target table.
    pub table: &'a Table,
    /// The index being removed, owned by the source table.
    pub index: &'a Index,
}

/// Changes the table's next auto-increment value.
#[derive(Debug, Clone, Copy)]
pub struct ChangeAutoIncrement<'a> {
    /// The target table.
    pub table: &'a Table,
    /// Counter in the source table.
    pub old_next_auto_increment: u64,
    /// Counter in the target table.
    pub new_next_auto_increment: u64,
}

macro_rules! impl_position_accessors {
    ($($ty:ident),*) => {$(
        impl<'a> $ty<'a> {
            /// Returns whether the column is placed first.
            #[must_use]
            pub const fn position_first(&self) -> bool {
                matches!(self.position, Some(ColumnPosition::First))
            }

            /// Returns the column this one is placed after, if any.
            #[must_use]
            pub const fn position_after(&self) -> Option<&'a Column> {
                match self.position {
                    Some(ColumnPosition::After(col)) => Some(col),
                    _ => None,
                }
            }
        }
    )*};
}

impl_position_accessors!(AddColumn, ModifyColumn);

impl ChangeAutoIncrement<'_> {
    /// Returns whether the counter moves upward.
    #[must_use]
    pub const fn is_increase(&self) -> bool {
        self.new_next_auto_increment > self.old_next_auto_increment
    }
}

// ---- Clause ----

/// One structural change to a table.
#[derive(Debug, Clone, Copy)]
pub enum TableAlter<'a> {
    /// `ADD COLUMN`.
    AddColumn(AddColumn<'a>),
    /// `DROP COLUMN`.
    DropColumn(DropColumn<'a>),
    /// `MODIFY COLUMN`, for a changed or moved column.
    ModifyColumn(ModifyColumn<'a>),
    /// `ADD` of a key or the primary key.
    AddIndex(AddIndex<'a>),
    /// `DROP KEY` or `DROP PRIMARY KEY`.
    DropIndex(DropIndex<'a>),
    /// `AUTO_INCREMENT = n` table option.
    ChangeAutoIncrement(ChangeAutoIncrement<'a>),
}

impl<'a> TableAlter<'a> {
    /// Returns the table the clause refers to: the source table for column
    /// drops, the target table otherwise.
    #[must_use]
    pub const fn table(&self) -> &'a Table {
        match self {
            Self::AddColumn(c) => c.table,
            Self::DropColumn(c) => c.table,
            Self::ModifyColumn(c) => c.table,
            Self::AddIndex(c) => c.table,
            Self::DropIndex(c) => c.table,
            Self::ChangeAutoIncrement(c) => c.table,
        }
    }

    /// Renders the clause as an `ALTER TABLE` fragment.
    #[must_use]
    pub fn clause(&self) -> String {
        match self {
            Self::AddColumn(c) => format!(
                "ADD COLUMN {}{}",
                c.column.definition(),
                position_suffix(c.position)
            ),
            Self::DropColumn(c) => format!("DROP COLUMN {}", quote_identifier(&c.column.name)),
            Self::ModifyColumn(c) => format!(
                "MODIFY COLUMN {}{}",
                c.new.definition(),
                position_suffix(c.position)
            ),
            Self::AddIndex(c) => format!("ADD {}", c.index.definition()),
            Self::DropIndex(c) => {
                if c.index.primary_key {
                    String::from("DROP PRIMARY KEY")
                } else {
                    format!("DROP KEY {}", quote_identifier(&c.index.name))
                }
            }
            Self::ChangeAutoIncrement(c) => {
                format!("AUTO_INCREMENT = {}", c.new_next_auto_increment)
            }
        }
    }
}

impl fmt::Display for TableAlter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.clause())
    }
}

/// Joins clauses into one `ALTER TABLE` statement for `table`.
///
/// Returns `None` when there is nothing to change.
#[must_use]
pub fn alter_statement(table: &Table, clauses: &[TableAlter<'_>]) -> Option<String> {
    if clauses.is_empty() {
        return None;
    }
    let rendered: Vec<String> = clauses.iter().map(TableAlter::clause).collect();
    Some(format!(
        "ALTER TABLE {} {}",
        quote_identifier(&table.name),
        rendered.join(", ")
    ))
}
