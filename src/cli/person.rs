//! Person CLI commands

use clap::Subcommand;

use crate::display::format_person_list;
use crate::error::ExpenseResult;
use crate::services::PersonService;
use crate::storage::Storage;

/// Person subcommands
#[derive(Subcommand)]
pub enum PersonCommands {
    /// Add a person
    Add {
        /// Name (must be unique)
        name: String,
    },
    /// List all people
    List,
    /// Delete a person; their expenses are kept
    Delete {
        /// Person name or ID
        person: String,
    },
}

pub fn handle_person_command(storage: &Storage, cmd: PersonCommands) -> ExpenseResult<()> {
    let service = PersonService::new(storage);

    match cmd {
        PersonCommands::Add { name } => {
            let person = service.create(&name)?;
            println!("Added person: {}", person.name);
            println!("  ID: {}", person.id.as_uuid());
        }
        PersonCommands::List => {
            print!("{}", format_person_list(&service.list()?));
        }
        PersonCommands::Delete { person } => {
            let existing = service.require(&person)?;
            let (deleted, cleared) = service.delete(existing.id)?;
            println!("Deleted person: {}", deleted.name);
            if cleared > 0 {
                println!("  Unassigned from {} expense(s)", cleared);
            }
        }
    }

    Ok(())
}
