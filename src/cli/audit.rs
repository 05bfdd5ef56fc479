//! Audit log command

use clap::Args;

use crate::error::ExpenseResult;
use crate::storage::Storage;

#[derive(Args)]
pub struct AuditArgs {
    /// Number of entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,

    /// Print raw JSON lines
    #[arg(long)]
    pub json: bool,
}

/// Show the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, args: AuditArgs) -> ExpenseResult<()> {
    let entries = storage.audit().read_recent(args.limit)?;

    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    for entry in &entries {
        if args.json {
            println!("{}", serde_json::to_string(entry)?);
        } else {
            println!("{}", entry.format_human_readable());
        }
    }

    Ok(())
}
