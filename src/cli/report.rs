//! Dashboard report command

use clap::Args;

use crate::config::Settings;
use crate::display::format_analysis;
use crate::error::ExpenseResult;
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::expense::FilterArgs;

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,
}

/// Analyze the selected expenses and print the summary
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    args: ReportArgs,
) -> ExpenseResult<()> {
    let expenses = args.filter.select(storage)?;
    let analysis = ExpenseService::new(storage).analyze(&expenses)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", format_analysis(&analysis, &settings.currency_symbol));
    }

    Ok(())
}
