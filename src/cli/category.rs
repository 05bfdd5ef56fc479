//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::ExpenseResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Add a category
    Add {
        /// Title (must be unique)
        title: String,
    },
    /// List all categories
    List,
    /// Rename a category
    Rename {
        /// Category title or ID
        category: String,
        /// New title
        title: String,
    },
    /// Delete a category; its expenses become uncategorized
    Delete {
        /// Category title or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> ExpenseResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Add { title } => {
            let category = service.create(&title)?;
            println!("Created category: {}", category.title);
            println!("  ID: {}", category.id.as_uuid());
        }
        CategoryCommands::List => {
            print!("{}", format_category_list(&service.list()?));
        }
        CategoryCommands::Rename { category, title } => {
            let existing = service.require(&category)?;
            let renamed = service.rename(existing.id, &title)?;
            println!("Renamed category: {} -> {}", existing.title, renamed.title);
        }
        CategoryCommands::Delete { category } => {
            let existing = service.require(&category)?;
            let (deleted, cleared) = service.delete(existing.id)?;
            println!("Deleted category: {}", deleted.title);
            if cleared > 0 {
                println!("  {} expense(s) are now uncategorized", cleared);
            }
        }
    }

    Ok(())
}
