#![allow(dead_code)]

use oxide_table_diff::{Column, ColumnDefault, Index, Table, TableAlter};

/// `SHOW CREATE TABLE` output for [`actor_table`].
pub fn actor_statement(next_auto_increment: u64) -> String {
    let auto_increment = if next_auto_increment > 1 {
        format!(" AUTO_INCREMENT={next_auto_increment}")
    } else {
        String::new()
    };
    format!(
        "CREATE TABLE `actor` (
  `actor_id` smallint(5) unsigned NOT NULL AUTO_INCREMENT,
  `first_name` varchar(45) NOT NULL,
  `last_name` varchar(45) NOT NULL,
  `last_updated` timestamp(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3),
  `ssn` char(10) NOT NULL,
  `alive` tinyint(1) NOT NULL DEFAULT '1',
  PRIMARY KEY (`actor_id`),
  UNIQUE KEY `idx_ssn` (`ssn`),
  KEY `idx_actor_name` (`last_name`(10),`first_name`(1))
) ENGINE=InnoDB{auto_increment} DEFAULT CHARSET=utf8"
    )
}

fn actor_model(next_auto_increment: u64) -> Table {
    Table::new("actor")
        .char_set("utf8")
        .column(
            Column::new("actor_id", "smallint(5) unsigned")
                .not_null()
                .auto_increment(),
        )
        .column(Column::new("first_name", "varchar(45)").not_null())
        .column(Column::new("last_name", "varchar(45)").not_null())
        .column(
            Column::new("last_updated", "timestamp(3)")
                .not_null()
                .default(ColumnDefault::expression("CURRENT_TIMESTAMP(3)"))
                .extra("ON UPDATE CURRENT_TIMESTAMP(3)"),
        )
        .column(Column::new("ssn", "char(10)").not_null())
        .column(
            Column::new("alive", "tinyint(1)")
                .not_null()
                .default(ColumnDefault::value("1")),
        )
        .primary_key(Index::primary().column("actor_id"))
        .index(Index::new("idx_ssn").column("ssn").unique())
        .index(
            Index::new("idx_actor_name")
                .prefix("last_name", 10)
                .prefix("first_name", 1),
        )
        .next_auto_increment(next_auto_increment)
}

/// A supported table with an auto-increment primary key, a unique index and
/// a prefix index.
pub fn actor_table(next_auto_increment: u64) -> Table {
    actor_model(next_auto_increment).captured(actor_statement(next_auto_increment))
}

/// The actor table as reported by a server that also has a FULLTEXT index
/// the model cannot describe.
pub fn unsupported_table() -> Table {
    let statement = actor_statement(1).replace(
        "\n) ENGINE",
        ",\n  FULLTEXT KEY `ft_name` (`last_name`)\n) ENGINE",
    );
    actor_model(1).captured(statement)
}

/// `SHOW CREATE TABLE` output for [`grab_bag_table`].
pub const GRAB_BAG_STATEMENT: &str = "CREATE TABLE `grab_bag` (
  `owner_id` int(10) unsigned NOT NULL,
  `slot` tinyint(3) unsigned NOT NULL DEFAULT '0',
  `label` varchar(100) CHARACTER SET latin1 COLLATE latin1_swedish_ci NOT NULL DEFAULT '',
  `notes` text,
  `price` decimal(10,2) DEFAULT NULL,
  `created_at` datetime NOT NULL DEFAULT CURRENT_TIMESTAMP,
  `flags` set('a','b','c') DEFAULT NULL COMMENT 'feature flags',
  PRIMARY KEY (`owner_id`,`slot`),
  KEY `idx_label` (`label`(20))
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci COMMENT='assorted column types'";

/// A supported table without auto-increment, exercising most column and
/// table options.
pub fn grab_bag_table() -> Table {
    Table::new("grab_bag")
        .collation("utf8mb4_unicode_ci")
        .comment("assorted column types")
        .column(Column::new("owner_id", "int(10) unsigned").not_null())
        .column(
            Column::new("slot", "tinyint(3) unsigned")
                .not_null()
                .default(ColumnDefault::value("0")),
        )
        .column(
            Column::new("label", "varchar(100)")
                .char_set("latin1")
                .collation("latin1_swedish_ci")
                .not_null()
                .default(ColumnDefault::value("")),
        )
        .column(Column::new("notes", "text").default(ColumnDefault::Null))
        .column(Column::new("price", "decimal(10,2)").default(ColumnDefault::Null))
        .column(
            Column::new("created_at", "datetime")
                .not_null()
                .default(ColumnDefault::expression("CURRENT_TIMESTAMP")),
        )
        .column(
            Column::new("flags", "set('a','b','c')")
                .default(ColumnDefault::Null)
                .comment("feature flags"),
        )
        .primary_key(Index::primary().column("owner_id").column("slot"))
        .index(Index::new("idx_label").prefix("label", 20))
        .captured(GRAB_BAG_STATEMENT)
}

/// Position of the named column in `table`.
pub fn column_index(table: &Table, name: &str) -> usize {
    table
        .columns
        .iter()
        .position(|c| c.name == name)
        .unwrap_or_else(|| panic!("no column {name} in {}", table.name))
}

/// Renders each clause as its `ALTER TABLE` fragment.
pub fn rendered(clauses: &[TableAlter<'_>]) -> Vec<String> {
    clauses.iter().map(TableAlter::clause).collect()
}
