use anyhow::Result;
use clap::{Parser, Subcommand};

use my_expenses::cli::{
    handle_audit_command, handle_category_command, handle_expense_command,
    handle_export_command, handle_method_command, handle_person_command, handle_report_command,
    AuditArgs, CategoryCommands, ExpenseCommands, ExportArgs, MethodCommands, PersonCommands,
    ReportArgs,
};
use my_expenses::config::{paths::ExpensePaths, settings::Settings};
use my_expenses::storage::init::DEFAULT_PAYMENT_METHODS;
use my_expenses::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Track household expenses from the command line",
    long_about = "my-expenses records what you owe, when it is due and whether it is \
                  paid, and summarizes totals per category."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory with default payment methods
    Init,

    /// Show or change configuration
    Config {
        /// Currency symbol shown after amounts
        #[arg(long)]
        currency: Option<String>,
        /// Date format (strftime), e.g. "%d/%m/%Y"
        #[arg(long)]
        date_format: Option<String>,
    },

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Payment method management commands
    #[command(subcommand)]
    Method(MethodCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Person management commands
    #[command(subcommand)]
    Person(PersonCommands),

    /// Summarize expenses: totals, unpaid sum and per-category breakdown
    Report(ReportArgs),

    /// Export expenses to CSV or JSON
    Export(ExportArgs),

    /// Show the audit log
    Audit(AuditArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing my-expenses at: {}", paths.base_dir().display());
            my_expenses::storage::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default payment methods: {}", DEFAULT_PAYMENT_METHODS.join(", "));
            println!("Run 'expenses expense add --help' to record your first expense.");
        }
        Some(Commands::Config {
            currency,
            date_format,
        }) => {
            if currency.is_some() || date_format.is_some() {
                if let Some(currency) = currency {
                    settings.currency_symbol = currency;
                }
                if let Some(date_format) = date_format {
                    settings.set_date_format(date_format)?;
                }
                settings.save(&paths)?;
                println!("Settings updated.");
                println!();
            }

            println!("my-expenses Configuration");
            println!("=========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Initialized:    {}", if paths.is_initialized() { "yes" } else { "no" });
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
        }
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Method(cmd)) => handle_method_command(&storage, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Person(cmd)) => handle_person_command(&storage, cmd)?,
        Some(Commands::Report(args)) => handle_report_command(&storage, &settings, args)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, args)?,
        Some(Commands::Audit(args)) => handle_audit_command(&storage, args)?,
        None => {
            println!("my-expenses - household expense tracker");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses init' to get started.");
        }
    }

    Ok(())
}
