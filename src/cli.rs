use anyhow::Result;
use chrono::{Days, Local, NaiveDate};
use console::{style, StyledObject};

use crate::actual_api::ActualBudget;
use crate::args::{Args, Command, ImportArgs};
use crate::config::Config;
use crate::error::ImportError;
use crate::finance_api::{DateRange, FinanceApi};
use crate::importer::{AccountListing, ImportStats, Importer, RunMode};
use crate::terminal::{BulletPointPrinter, LineWriter};

const DEFAULT_IMPORT_DAYS: u64 = 30;

pub async fn main(args: Args) -> Result<()> {
    let config = Config::from_env().map_err(ImportError::from)?;
    let cli = Cli::new(&config).await?;
    match args.command {
        Command::Import(import_args) => cli.main_import(import_args).await?,
        Command::SyncAccounts => cli.main_sync_accounts().await?,
    }
    Ok(())
}

pub struct Cli<'a> {
    config: &'a Config,
    finance_api: FinanceApi,
    actual: ActualBudget,
}

impl<'a> Cli<'a> {
    pub async fn new(config: &'a Config) -> Result<Self> {
        let finance_api = FinanceApi::connect(&config.finance_api)
            .await
            .map_err(ImportError::SourceFetch)?;
        let actual = ActualBudget::new(&config.actual)?;
        Ok(Self {
            config,
            finance_api,
            actual,
        })
    }

    fn importer(&self) -> Importer<'_, FinanceApi, ActualBudget> {
        Importer::new(
            &self.finance_api,
            &self.actual,
            &self.config.account_mapping,
        )
    }

    pub async fn main_import(&self, args: ImportArgs) -> Result<()> {
        let range = import_range(&args, Local::now().date_naive());
        let mode = if args.dry_run {
            log::info!("DRY RUN MODE - No transactions will be imported");
            RunMode::DryRun
        } else {
            RunMode::Live
        };
        if self.config.account_mapping.is_empty() {
            log::info!("No account mapping configured, using finance API account ids as-is");
        } else {
            log::debug!(
                "Using account mapping with {} accounts",
                self.config.account_mapping.len()
            );
        }

        let stats = self.importer().import_transactions(range, mode).await?;

        print_stats(&BulletPointPrinter::new_stdout(), &stats, mode);
        Ok(())
    }

    pub async fn main_sync_accounts(&self) -> Result<()> {
        log::info!("Syncing accounts...");
        let listing = self.importer().sync_accounts().await?;
        print_accounts(&BulletPointPrinter::new_stdout(), &listing);
        Ok(())
    }
}

/// Fill in missing bounds: the import covers the last 30 days up to today by default.
fn import_range(args: &ImportArgs, today: NaiveDate) -> DateRange {
    let start = args.start_date.unwrap_or_else(|| {
        let start = today - Days::new(DEFAULT_IMPORT_DAYS);
        log::info!("No start date provided, using: {start}");
        start
    });
    let end = args.end_date.unwrap_or_else(|| {
        log::info!("No end date provided, using: {today}");
        today
    });
    log::info!("Importing transactions from {start} to {end}");
    DateRange::new(start, end)
}

fn print_stats<W: LineWriter + Clone>(
    printer: &BulletPointPrinter<W>,
    stats: &ImportStats,
    mode: RunMode,
) {
    printer.print_line(style_header("Import summary:"));
    printer.print_item(format!("SUCCESS: {}", style_count(stats.success).green()));
    printer.print_item(format!("FAILED: {}", style_count(stats.failed).red()));
    printer.print_item(format!("SKIPPED: {}", style_count(stats.skipped).yellow()));
    if mode == RunMode::DryRun {
        printer.print_item(format!("DRY_RUN: {}", style_count(stats.dry_run).cyan()));
    }
}

fn print_accounts<W: LineWriter + Clone>(printer: &BulletPointPrinter<W>, listing: &AccountListing) {
    printer.print_line(style_header("Finance API accounts:"));
    if listing.finance_accounts.is_empty() {
        printer.print_item(style("(none)").italic());
    }
    for account in &listing.finance_accounts {
        printer.print_item(format!(
            "ID: {}, Name: {}",
            style_id(account.id.as_deref().unwrap_or("N/A")),
            style_account(account.name.as_deref().unwrap_or("N/A")),
        ));
    }

    printer.print_line("");
    printer.print_line(style_header("Actual Budget accounts:"));
    if listing.actual_accounts.is_empty() {
        printer.print_item(style("(none)").italic());
    }
    for account in &listing.actual_accounts {
        printer.print_item(format!(
            "ID: {}, Name: {}",
            style_id(&account.id.0),
            style_account(&account.name),
        ));
    }

    printer.print_line("");
    printer.print_line("Use these IDs to configure ACCOUNT_MAPPING in your .env file");
    printer.print_line(format!(
        "Format: {}",
        style("ACCOUNT_MAPPING=finance_id1:actual_id1,finance_id2:actual_id2").bold()
    ));
}

fn style_header(header: &str) -> StyledObject<&str> {
    style(header).bold().underlined()
}

fn style_count(count: usize) -> StyledObject<usize> {
    style(count).bold()
}

fn style_id(id: &str) -> StyledObject<&str> {
    style(id).cyan()
}

fn style_account(name: &str) -> StyledObject<&str> {
    style(name).magenta()
}
