//! # oxide-table-diff
//!
//! Structural diffing for MySQL table definitions.
//!
//! Given two snapshots of a table, this crate computes the ordered list of
//! `ALTER TABLE` clauses that turns the first into the second. It can also
//! regenerate a canonical `CREATE TABLE` statement from a snapshot, which is
//! used to check that the model captures everything the database reported.
//!
//! ## Example
//!
//! ```rust
//! use oxide_table_diff::{alter_statement, Column, Index, Table};
//!
//! let from = Table::new("users")
//!     .column(Column::new("id", "int(10) unsigned").not_null().auto_increment())
//!     .column(Column::new("email", "varchar(255)").not_null())
//!     .primary_key(Index::primary().column("id"));
//!
//! let to = from
//!     .clone()
//!     .column(Column::new("nickname", "varchar(40)"))
//!     .index(Index::new("idx_email").column("email").unique());
//!
//! let clauses = from.diff(&to);
//! assert_eq!(
//!     alter_statement(&to, &clauses).as_deref(),
//!     Some(
//!         "ALTER TABLE `users` ADD COLUMN `nickname` varchar(40), \
//!          ADD UNIQUE KEY `idx_email` (`email`)"
//!     )
//! );
//! ```
//!
//! ## Unsupported tables
//!
//! A snapshot records the `CREATE TABLE` text the database reported. When the
//! generated statement differs from it, the table uses features the model
//! does not describe and [`Table::is_supported`] returns `false`. Diffing an
//! unsupported table yields no clauses.

#![warn(missing_docs)]

pub mod alter;
pub mod column;
pub mod create;
pub mod diff;
pub mod error;
pub mod index;
pub mod sql;
pub mod table;

pub use alter::{
    alter_statement, AddColumn, AddIndex, ChangeAutoIncrement, ColumnPosition, DropColumn,
    DropIndex, ModifyColumn, TableAlter,
};
pub use column::{Column, ColumnDefault};
pub use create::generate_create_statement;
pub use diff::diff_table;
pub use error::{Result, SchemaError};
pub use index::{Index, IndexPart};
pub use table::Table;
