//! Payment method CLI commands

use clap::Subcommand;

use crate::display::format_payment_method_list;
use crate::error::ExpenseResult;
use crate::services::PaymentMethodService;
use crate::storage::Storage;

/// Payment method subcommands
#[derive(Subcommand)]
pub enum MethodCommands {
    /// Add a payment method
    Add {
        /// Title (must be unique)
        title: String,
    },
    /// List all payment methods
    List,
    /// Rename a payment method
    Rename {
        /// Payment method title or ID
        method: String,
        /// New title
        title: String,
    },
    /// Delete a payment method; expenses using it are kept
    Delete {
        /// Payment method title or ID
        method: String,
    },
}

/// Handle a payment method command
pub fn handle_method_command(storage: &Storage, cmd: MethodCommands) -> ExpenseResult<()> {
    let service = PaymentMethodService::new(storage);

    match cmd {
        MethodCommands::Add { title } => {
            let method = service.create(&title)?;
            println!("Created payment method: {}", method.title);
            println!("  ID: {}", method.id.as_uuid());
        }
        MethodCommands::List => {
            print!("{}", format_payment_method_list(&service.list()?));
        }
        MethodCommands::Rename { method, title } => {
            let existing = service.require(&method)?;
            let renamed = service.rename(existing.id, &title)?;
            println!("Renamed payment method: {} -> {}", existing.title, renamed.title);
        }
        MethodCommands::Delete { method } => {
            let existing = service.require(&method)?;
            let (deleted, cleared) = service.delete(existing.id)?;
            println!("Deleted payment method: {}", deleted.title);
            if cleared > 0 {
                println!("  Cleared from {} expense(s)", cleared);
            }
        }
    }

    Ok(())
}
