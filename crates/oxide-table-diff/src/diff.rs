//! Table diff engine.
//!
//! Compares two snapshots of the same table and produces the ordered list
//! of [`TableAlter`] clauses that turns the first into the second:
//!
//! 1. column drops
//! 2. column modifications (definition changes and moves)
//! 3. column additions
//! 4. index drops, primary key first
//! 5. index additions, primary key first
//! 6. auto-increment change
//!
//! Modifications run before additions, so a moved column is positioned
//! relative to the columns both tables share.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::alter::{
    AddColumn, AddIndex, ChangeAutoIncrement, ColumnPosition, DropColumn, DropIndex, ModifyColumn,
    TableAlter,
};
use crate::column::Column;
use crate::table::Table;

/// Returns the clauses that transform `from` into `to`.
///
/// Produces nothing when either table is unsupported. Clauses borrow from
/// both tables: [`DropColumn`] refers to `from`, every other clause to `to`.
#[must_use]
pub fn diff_table<'a>(from: &'a Table, to: &'a Table) -> Vec<TableAlter<'a>> {
    if !from.is_supported() || !to.is_supported() {
        debug!(
            from = %from.name,
            to = %to.name,
            from_supported = from.is_supported(),
            to_supported = to.is_supported(),
            "skipping diff of unsupported table"
        );
        return Vec::new();
    }

    debug!(table = %to.name, "diffing table");
    let mut clauses = ColumnComparison::new(from, to).clauses();
    clauses.extend(diff_indexes(from, to));
    clauses.extend(diff_auto_increment(from, to));

    for clause in &clauses {
        trace!(table = %to.name, %clause, "emitting clause");
    }
    clauses
}

// ---- Columns ----

struct ColumnComparison<'a> {
    from: &'a Table,
    to: &'a Table,
    from_names: BTreeSet<&'a str>,
    to_names: BTreeSet<&'a str>,
}

impl<'a> ColumnComparison<'a> {
    fn new(from: &'a Table, to: &'a Table) -> Self {
        Self {
            from,
            to,
            from_names: from.columns.iter().map(|c| c.name.as_str()).collect(),
            to_names: to.columns.iter().map(|c| c.name.as_str()).collect(),
        }
    }

    fn clauses(&self) -> Vec<TableAlter<'a>> {
        let mut clauses = self.drops();
        clauses.extend(self.modifications());
        clauses.extend(self.additions());
        clauses
    }

    fn drops(&self) -> Vec<TableAlter<'a>> {
        self.from
            .columns
            .iter()
            .filter(|c| !self.to_names.contains(c.name.as_str()))
            .map(|column| {
                TableAlter::DropColumn(DropColumn {
                    table: self.from,
                    column,
                })
            })
            .collect()
    }

    fn modifications(&self) -> Vec<TableAlter<'a>> {
        let shared_from: Vec<&str> = self
            .from
            .columns
            .iter()
            .map(|c| c.name.as_str())
            .filter(|name| self.to_names.contains(name))
            .collect();
        let shared_to: Vec<&'a Column> = self
            .to
            .columns
            .iter()
            .filter(|c| self.from_names.contains(c.name.as_str()))
            .collect();
        let target: Vec<&str> = shared_to.iter().map(|c| c.name.as_str()).collect();
        let changed: BTreeSet<&str> = shared_to
            .iter()
            .filter(|new| self.from.get_column(&new.name) != Some(**new))
            .map(|c| c.name.as_str())
            .collect();
        let moved = moved_columns(&shared_from, &target, &changed);

        let mut clauses = Vec::new();
        let mut previous: Option<&'a Column> = None;
        for &new in &shared_to {
            if let Some(original) = self.from.get_column(&new.name) {
                let position = moved.contains(new.name.as_str()).then(|| {
                    previous.map_or(ColumnPosition::First, ColumnPosition::After)
                });
                if position.is_some() || original != new {
                    clauses.push(TableAlter::ModifyColumn(ModifyColumn {
                        table: self.to,
                        original,
                        new,
                        position,
                    }));
                }
            }
            previous = Some(new);
        }
        clauses
    }

    fn additions(&self) -> Vec<TableAlter<'a>> {
        let last = self.to.columns.len().saturating_sub(1);
        let mut clauses = Vec::new();
        let mut previous: Option<&'a Column> = None;
        for (pos, column) in self.to.columns.iter().enumerate() {
            if !self.from_names.contains(column.name.as_str()) {
                let position = match previous {
                    None => Some(ColumnPosition::First),
                    Some(_) if pos == last => None,
                    Some(prev) => Some(ColumnPosition::After(prev)),
                };
                clauses.push(TableAlter::AddColumn(AddColumn {
                    table: self.to,
                    column,
                    position,
                }));
            }
            previous = Some(column);
        }
        clauses
    }
}

/// Picks the columns to reposition so that `source` takes the order of
/// `target`. Both slices hold the same names.
///
/// The columns left in place are the longest run of `source` that is already
/// in target order, and every other column moves once. A column whose
/// predecessor is the same in both orders only moves along with that
/// predecessor. Between runs of equal length, the one keeping more
/// unchanged columns wins, so a column that needs a `MODIFY` anyway is the
/// preferred mover; remaining ties keep the later source columns. The set of
/// candidate runs is the same in both directions, so reversing the diff
/// moves as many columns.
fn moved_columns<'n>(
    source: &[&'n str],
    target: &[&'n str],
    changed: &BTreeSet<&str>,
) -> BTreeSet<&'n str> {
    let entries: Vec<(&'n str, usize)> = source
        .iter()
        .filter_map(|&name| {
            target
                .iter()
                .position(|&t| t == name)
                .map(|rank| (name, rank))
        })
        .collect();

    // Best run ending at each entry: (kept columns, kept unchanged columns).
    let mut scores: Vec<(usize, usize)> = Vec::with_capacity(entries.len());
    let mut links: Vec<Option<usize>> = Vec::with_capacity(entries.len());
    for (i, &(name, rank)) in entries.iter().enumerate() {
        let unchanged = usize::from(!changed.contains(name));
        let mut best = (1, unchanged);
        let mut link = None;
        for (j, (&(_, earlier), &score)) in entries[..i].iter().zip(&scores).enumerate() {
            let candidate = (score.0 + 1, score.1 + unchanged);
            if earlier < rank && candidate >= best {
                best = candidate;
                link = Some(j);
            }
        }
        scores.push(best);
        links.push(link);
    }

    let mut kept = BTreeSet::new();
    let mut cursor = scores
        .iter()
        .enumerate()
        .max_by_key(|(_, score)| **score)
        .map(|(i, _)| i);
    while let Some(i) = cursor {
        if let Some(&(name, _)) = entries.get(i) {
            kept.insert(name);
        }
        cursor = links.get(i).copied().flatten();
    }

    entries
        .iter()
        .map(|&(name, _)| name)
        .filter(|name| !kept.contains(name))
        .collect()
}

// ---- Indexes ----

fn diff_indexes<'a>(from: &'a Table, to: &'a Table) -> Vec<TableAlter<'a>> {
    let mut drops = Vec::new();
    let mut adds = Vec::new();

    match (&from.primary_key, &to.primary_key) {
        (Some(old), Some(new)) if !old.equivalent(new) => {
            drops.push(TableAlter::DropIndex(DropIndex { table: to, index: old }));
            adds.push(TableAlter::AddIndex(AddIndex { table: to, index: new }));
        }
        (Some(old), None) => {
            drops.push(TableAlter::DropIndex(DropIndex { table: to, index: old }));
        }
        (None, Some(new)) => {
            adds.push(TableAlter::AddIndex(AddIndex { table: to, index: new }));
        }
        _ => {}
    }

    // Each target index absorbs at most one source index.
    let mut matched = vec![false; to.secondary_indexes.len()];
    for old in &from.secondary_indexes {
        let slot = to
            .secondary_indexes
            .iter()
            .zip(matched.iter_mut())
            .find(|(new, taken)| !**taken && old.equivalent(new))
            .map(|(_, taken)| taken);
        match slot {
            Some(taken) => *taken = true,
            None => drops.push(TableAlter::DropIndex(DropIndex { table: to, index: old })),
        }
    }
    for (new, taken) in to.secondary_indexes.iter().zip(&matched) {
        if !taken {
            adds.push(TableAlter::AddIndex(AddIndex { table: to, index: new }));
        }
    }

    drops.extend(adds);
    drops
}

// ---- Auto-increment ----

fn diff_auto_increment<'a>(from: &'a Table, to: &'a Table) -> Option<TableAlter<'a>> {
    if !to.has_auto_increment() {
        return None;
    }

    let changed = if from.has_auto_increment() {
        from.next_auto_increment != to.next_auto_increment
    } else {
        to.next_auto_increment > 1
    };

    changed.then_some(TableAlter::ChangeAutoIncrement(ChangeAutoIncrement {
        table: to,
        old_next_auto_increment: from.next_auto_increment,
        new_next_auto_increment: to.next_auto_increment,
    }))
}
