use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use expense_ledger::app::App;
use expense_ledger::cli::{
    handle_add, handle_delete, handle_export, handle_history, handle_list, handle_plot,
    handle_summary, DeleteArgs, ExportFormat, SortArgs,
};
use expense_ledger::config::{LedgerPaths, Settings};
use expense_ledger::logging::init_tracing;
use expense_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense tracker",
    long_about = "Record dated, categorized expenses in a plain-text ledger, \
                  list and sort them, and see where the money went by category."
)]
struct Cli {
    /// Ledger file to use instead of the configured one
    #[arg(long, global = true, env = "EXPENSE_LEDGER_FILE")]
    file: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new expense
    Add {
        /// Date of the expense (YYYY-MM-DD)
        date: String,
        /// Category label
        category: String,
        /// Amount (negative for refunds)
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// List expenses with their total
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        sort: SortArgs,
    },

    /// Delete an expense by value or by row number
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Show totals per category
    Summary,

    /// Plot totals per category
    Plot {
        /// Print text bars instead of opening the chart viewer
        #[arg(long)]
        text: bool,
    },

    /// Export the ledger to a file
    Export {
        /// Output file path (defaults to the configured export file)
        output: Option<PathBuf>,

        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = match cli.file {
        Some(file) => Storage::with_ledger_file(paths, file, &settings)?,
        None => Storage::open(paths, &settings)?,
    };
    debug!(ledger = %storage.ledger.path().display(), "storage opened");

    let symbol = settings.currency_symbol.as_str();
    let mut app = App::new(&storage);

    match cli.command {
        Some(Commands::Add {
            date,
            category,
            amount,
        }) => handle_add(&mut app, &date, &category, &amount)?,
        Some(Commands::List { sort }) => handle_list(&mut app, &sort, symbol)?,
        Some(Commands::Delete(args)) => handle_delete(&mut app, &args)?,
        Some(Commands::Summary) => handle_summary(&app, symbol)?,
        Some(Commands::Plot { text }) => handle_plot(&mut app, text, symbol)?,
        Some(Commands::Export {
            output,
            format,
            pretty,
        }) => {
            let output = output.unwrap_or_else(|| settings.export_file.clone());
            handle_export(&mut app, &output, format, pretty)?;
        }
        Some(Commands::History { limit }) => handle_history(&storage, limit)?,
        Some(Commands::Config) => {
            let paths = storage.paths();
            println!("Expense Ledger Configuration");
            println!("============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Ledger file:    {}", storage.ledger.path().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Malformed lines: {:?}", settings.malformed_lines);
            println!("  Currency symbol: {:?}", settings.currency_symbol);
            println!("  Export file:     {}", settings.export_file.display());
        }
        None => {
            println!("Expense Ledger - personal expense tracker");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense add 2024-03-15 Food 12.50' to record an expense.");
        }
    }

    Ok(())
}
