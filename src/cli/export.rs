//! CLI command for data export

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_expenses_csv, export_json, ExpenseExport};
use crate::storage::Storage;

use super::expense::{reference_names, FilterArgs};

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// One row per expense
    Csv,
    /// Expenses with every payment method, category and person
    Json,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output file path
    pub output: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Write the selected expenses to a file
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> ExpenseResult<()> {
    let expenses = args.filter.select(storage)?;
    let count = expenses.len();

    let file = File::create(&args.output).map_err(|e| {
        ExpenseError::Export(format!(
            "Failed to create file {}: {}",
            args.output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    match args.format {
        ExportFormat::Csv => {
            let names = reference_names(storage)?;
            export_expenses_csv(&expenses, &names, &mut writer)?;
        }
        ExportFormat::Json => {
            let export = ExpenseExport::new(storage, expenses)?;
            export_json(&export, &mut writer, args.pretty)?;
        }
    }

    println!("Exported {} expense(s) to: {}", count, args.output.display());
    Ok(())
}
