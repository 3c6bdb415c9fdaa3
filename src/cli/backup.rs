//! Backup CLI commands
//!
//! Shows and restores the single backup kept next to a ledger file.

use clap::Subcommand;

use super::LedgerContext;
use crate::backup::validate_backup;
use crate::error::PassbookResult;
use crate::prompt::Prompter;
use crate::services::restore_backup;

/// Backup subcommands
#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Show the backup of the selected ledger
    Info,

    /// Replace the ledger with its backup
    Restore {
        /// Skip the preview and restore immediately
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
///
/// Neither command loads the ledger, so the backup is not refreshed first.
pub fn handle_backup_command(
    ctx: &LedgerContext,
    cmd: BackupCommands,
    prompter: &mut dyn Prompter,
) -> PassbookResult<()> {
    let store = ctx.store()?;

    match cmd {
        BackupCommands::Info => {
            let Some(info) = store.backups().info(store.path()) else {
                println!("No backup found for {}.", ctx.name());
                println!("A backup is written each time an existing ledger is opened.");
                return Ok(());
            };

            println!("Backup Details");
            println!("==============");
            println!("File: {}", info.path.display());
            println!("Size: {}", format_size(info.size_bytes));
            if let Some(modified) = info.modified_at {
                println!("Written: {}", modified.format("%Y-%m-%d %H:%M:%S"));
            }
            match validate_backup(store.backups(), store.path(), store.currency()) {
                Ok(validation) => println!("Status: {}", validation.summary()),
                Err(e) => println!("Status: unreadable ({})", e),
            }
        }

        BackupCommands::Restore { force } => {
            let validation = validate_backup(store.backups(), store.path(), store.currency())?;

            println!("Backup Information");
            println!("==================");
            println!("File: {}", store.backups().backup_path(store.path()).display());
            println!("Status: {}", validation.summary());
            println!();

            if !force {
                println!("WARNING: This will overwrite {}!", store.path().display());
                println!("To proceed, run again with --force flag:");
                println!("  passbook backup restore --force");
                return Ok(());
            }

            let result = restore_backup(&ctx.name(), &store, &ctx.audit(), prompter)?;
            println!("Restore complete!");
            println!("{}", result.summary());
        }
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
