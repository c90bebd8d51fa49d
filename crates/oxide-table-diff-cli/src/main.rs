//! oxide-table-diff CLI
//!
//! Command-line tool for comparing MySQL table snapshots.

mod policy;
mod snapshot;

use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use oxide_table_diff::alter_statement;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::policy::AutoIncrementPolicy;
use crate::snapshot::load_table;

/// Computes ALTER TABLE statements between two table snapshots.
#[derive(Parser)]
#[command(name = "oxide-table-diff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ALTER TABLE statement turning one snapshot into another.
    Diff {
        /// Snapshot of the current table.
        #[arg(short, long)]
        from: PathBuf,

        /// Snapshot of the desired table.
        #[arg(short, long)]
        to: PathBuf,

        /// Which AUTO_INCREMENT changes to include.
        #[arg(
            long,
            value_enum,
            env = "OXIDE_TABLE_DIFF_AUTO_INCREMENT",
            default_value_t = AutoIncrementPolicy::IncreaseOnly
        )]
        auto_increment: AutoIncrementPolicy,
    },

    /// Print the canonical CREATE TABLE statement for a snapshot.
    ShowCreate {
        /// Snapshot file.
        #[arg(short, long)]
        table: PathBuf,
    },

    /// Check that a snapshot regenerates its captured CREATE TABLE statement.
    Verify {
        /// Snapshot file.
        #[arg(short, long)]
        table: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Diff {
            from,
            to,
            auto_increment,
        } => {
            let from = load_table(&from)?;
            let to = load_table(&to)?;
            let clauses = auto_increment.apply(from.diff(&to));

            if let Some(statement) = alter_statement(&to, &clauses) {
                println!("{statement};");
            } else if !from.is_supported() || !to.is_supported() {
                warn!(
                    "Table `{}` could not be verified against its captured CREATE TABLE; no statement generated.",
                    to.name
                );
            } else {
                info!("No differences found for table `{}`.", to.name);
            }
        }

        Commands::ShowCreate { table } => {
            let table = load_table(&table)?;
            println!("{};", table.generated_create_statement());
        }

        Commands::Verify { table } => {
            let table = load_table(&table)?;
            if table.create_statement.is_empty() {
                bail!("Snapshot for `{}` has no captured CREATE TABLE statement", table.name);
            }
            if !table.is_supported() {
                bail!(
                    "Table `{}` is unsupported: generated CREATE TABLE differs from captured statement",
                    table.name
                );
            }
            info!("Table `{}` is supported.", table.name);
        }
    }

    Ok(())
}
