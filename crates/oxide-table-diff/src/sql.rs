//! Quoting helpers shared by the DDL renderers.

/// Quotes an identifier with backticks, doubling any embedded backtick.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Quotes a string literal with single quotes, doubling any embedded quote.
#[must_use]
pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
