//! Column model.
//!
//! A [`Column`] mirrors one line of the column section of MySQL's
//! `SHOW CREATE TABLE` output and can render itself back into that form.

use serde::{Deserialize, Serialize};

use crate::sql::{quote_identifier, quote_string};

/// Default value of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ColumnDefault {
    /// No default clause.
    #[default]
    None,
    /// `DEFAULT NULL`.
    Null,
    /// A literal value, rendered single-quoted (`DEFAULT '0'`).
    Value(String),
    /// An expression rendered verbatim (`DEFAULT CURRENT_TIMESTAMP`).
    Expression(String),
}

impl ColumnDefault {
    /// Creates a literal default.
    #[must_use]
    pub fn value(value: impl Into<String>) -> Self {
        Self::Value(value.into())
    }

    /// Creates an expression default.
    #[must_use]
    pub fn expression(expr: impl Into<String>) -> Self {
        Self::Expression(expr.into())
    }

    /// Returns the `DEFAULT ...` clause, or `None` when there is nothing to
    /// render.
    #[must_use]
    pub fn clause(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Null => Some(String::from("DEFAULT NULL")),
            Self::Value(value) => Some(format!("DEFAULT {}", quote_string(value))),
            Self::Expression(expr) => Some(format!("DEFAULT {expr}")),
        }
    }
}

const fn default_nullable() -> bool {
    true
}

/// One column of a table snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Type exactly as the database reports it, e.g. `smallint(5) unsigned`.
    pub type_in_db: String,
    /// Whether the column allows NULL values.
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Whether the column is `AUTO_INCREMENT`.
    #[serde(default)]
    pub auto_increment: bool,
    /// Default value.
    #[serde(default)]
    pub default: ColumnDefault,
    /// Column-level character set, when it differs from the table's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_set: Option<String>,
    /// Column-level collation, when it differs from the table's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    /// Trailing modifiers such as `ON UPDATE CURRENT_TIMESTAMP`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    /// Column comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Column {
    /// Creates a nullable column with no default.
    #[must_use]
    pub fn new(name: impl Into<String>, type_in_db: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_in_db: type_in_db.into(),
            nullable: true,
            auto_increment: false,
            default: ColumnDefault::None,
            char_set: None,
            collation: None,
            extra: None,
            comment: None,
        }
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the column as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the column as `AUTO_INCREMENT`.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, default: ColumnDefault) -> Self {
        self.default = default;
        self
    }

    /// Sets a column-level character set.
    #[must_use]
    pub fn char_set(mut self, char_set: impl Into<String>) -> Self {
        self.char_set = Some(char_set.into());
        self
    }

    /// Sets a column-level collation.
    #[must_use]
    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Sets trailing modifiers (e.g. `ON UPDATE CURRENT_TIMESTAMP`).
    #[must_use]
    pub fn extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    /// Sets the column comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Returns whether the column's type may carry a default value at all.
    /// BLOB, TEXT, JSON and spatial types may not.
    #[must_use]
    pub fn can_have_default(&self) -> bool {
        let base = self
            .type_in_db
            .split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let no_default = base.ends_with("blob")
            || base.ends_with("text")
            || matches!(
                base.as_str(),
                "json"
                    | "geometry"
                    | "point"
                    | "linestring"
                    | "polygon"
                    | "multipoint"
                    | "multilinestring"
                    | "multipolygon"
                    | "geometrycollection"
            );
        !no_default
    }

    fn emits_default(&self) -> bool {
        if self.auto_increment || !self.can_have_default() {
            return false;
        }
        // A NOT NULL column never shows DEFAULT NULL.
        self.nullable || self.default != ColumnDefault::Null
    }

    /// Renders the column definition used inside `CREATE TABLE`,
    /// `ADD COLUMN` and `MODIFY COLUMN`.
    #[must_use]
    pub fn definition(&self) -> String {
        let mut parts = vec![quote_identifier(&self.name), self.type_in_db.clone()];

        if let Some(ref char_set) = self.char_set {
            parts.push(format!("CHARACTER SET {char_set}"));
        }
        if let Some(ref collation) = self.collation {
            parts.push(format!("COLLATE {collation}"));
        }
        if !self.nullable {
            parts.push("NOT NULL".to_string());
        }
        if self.auto_increment {
            parts.push("AUTO_INCREMENT".to_string());
        }
        if self.emits_default() {
            if let Some(clause) = self.default.clause() {
                parts.push(clause);
            }
        }
        if let Some(ref extra) = self.extra {
            parts.push(extra.clone());
        }
        if let Some(ref comment) = self.comment {
            parts.push(format!("COMMENT {}", quote_string(comment)));
        }

        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_clauses() {
        assert_eq!(ColumnDefault::None.clause(), None);
        assert_eq!(ColumnDefault::Null.clause().as_deref(), Some("DEFAULT NULL"));
        assert_eq!(
            ColumnDefault::value("0").clause().as_deref(),
            Some("DEFAULT '0'")
        );
        assert_eq!(
            ColumnDefault::expression("CURRENT_TIMESTAMP").clause().as_deref(),
            Some("DEFAULT CURRENT_TIMESTAMP")
        );
    }

    #[test]
    fn builder_defaults_to_nullable() {
        let col = Column::new("age", "int unsigned");
        assert!(col.nullable);
        assert!(!col.auto_increment);
        assert_eq!(col.default, ColumnDefault::None);
        assert!(!col.not_null().nullable);
    }

    #[test]
    fn definition_of_auto_increment_column() {
        let col = Column::new("actor_id", "smallint(5) unsigned")
            .not_null()
            .auto_increment()
            .default(ColumnDefault::value("7"));
        assert_eq!(
            col.definition(),
            "`actor_id` smallint(5) unsigned NOT NULL AUTO_INCREMENT"
        );
    }

    #[test]
    fn definition_with_every_attribute() {
        let col = Column::new("code", "char(8)")
            .char_set("latin1")
            .collation("latin1_bin")
            .not_null()
            .default(ColumnDefault::value(""))
            .comment("short code");
        assert_eq!(
            col.definition(),
            "`code` char(8) CHARACTER SET latin1 COLLATE latin1_bin NOT NULL DEFAULT '' COMMENT 'short code'"
        );
    }

    #[test]
    fn definition_with_on_update_extra() {
        let col = Column::new("last_updated", "timestamp(3)")
            .not_null()
            .default(ColumnDefault::expression("CURRENT_TIMESTAMP(3)"))
            .extra("ON UPDATE CURRENT_TIMESTAMP(3)");
        assert_eq!(
            col.definition(),
            "`last_updated` timestamp(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3)"
        );
    }

    #[test]
    fn null_default_hidden_on_not_null_column() {
        let nullable = Column::new("rating", "decimal(4,2)").default(ColumnDefault::Null);
        assert_eq!(nullable.definition(), "`rating` decimal(4,2) DEFAULT NULL");

        let not_null = nullable.not_null();
        assert_eq!(not_null.definition(), "`rating` decimal(4,2) NOT NULL");
    }

    #[test]
    fn blob_and_text_types_never_render_defaults() {
        for type_in_db in ["text", "mediumtext", "tinyblob", "longblob", "json", "point"] {
            let col = Column::new("c", type_in_db).default(ColumnDefault::Null);
            assert!(!col.can_have_default(), "{type_in_db}");
            assert_eq!(col.definition(), format!("`c` {type_in_db}"));
        }
        assert!(Column::new("c", "varchar(255)").can_have_default());
        assert!(Column::new("c", "int(10) unsigned").can_have_default());
    }

    #[test]
    fn equality_covers_every_attribute() {
        let a = Column::new("ssn", "char(10)").not_null();
        let mut b = a.clone();
        assert_eq!(a, b);
        b.type_in_db = "varchar(10)".to_string();
        assert_ne!(a, b);
        let c = a.clone().comment("tax id");
        assert_ne!(a, c);
    }
}
