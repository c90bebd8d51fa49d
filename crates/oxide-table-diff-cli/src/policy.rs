//! Caller-side filtering of auto-increment clauses.

use clap::ValueEnum;
use oxide_table_diff::TableAlter;

/// Which `AUTO_INCREMENT` changes to keep in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AutoIncrementPolicy {
    /// Drop every counter change.
    Ignore,
    /// Keep only counter increases.
    #[default]
    IncreaseOnly,
    /// Keep every counter change.
    All,
}

impl AutoIncrementPolicy {
    /// Removes the counter changes this policy suppresses.
    pub fn apply<'a>(self, clauses: Vec<TableAlter<'a>>) -> Vec<TableAlter<'a>> {
        clauses
            .into_iter()
            .filter(|clause| match clause {
                TableAlter::ChangeAutoIncrement(change) => match self {
                    Self::Ignore => false,
                    Self::IncreaseOnly => change.is_increase(),
                    Self::All => true,
                },
                _ => true,
            })
            .collect()
    }
}
