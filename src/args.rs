use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Import transactions from a finance API into Actual Budget.
#[derive(Parser, Debug)]
pub struct Args {
    /// Enable verbose logging
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download transactions from the finance API and import them into Actual Budget
    Import(ImportArgs),

    /// Display accounts from both systems to help with the account mapping
    SyncAccounts,
}

#[derive(Debug, clap::Args)]
pub struct ImportArgs {
    /// Start date for the import (YYYY-MM-DD). Defaults to 30 days ago.
    #[clap(long, value_parser = parse_date)]
    pub start_date: Option<NaiveDate>,

    /// End date for the import (YYYY-MM-DD). Defaults to today.
    #[clap(long, value_parser = parse_date)]
    pub end_date: Option<NaiveDate>,

    /// Show what would be imported without touching Actual Budget
    #[clap(long)]
    pub dry_run: bool,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|err| format!("{err}"))
}

pub fn parse() -> Args {
    Args::parse()
}
