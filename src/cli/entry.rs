//! Ledger entry CLI commands
//!
//! Deposits, withdrawals, removal of the last entry, and read-only views.

use clap::{Args, Subcommand};

use super::LedgerContext;
use crate::display::{
    format_append_outcome, format_chain_check, format_entry_table, format_tag_list,
    overdraft_warning,
};
use crate::error::PassbookResult;
use crate::prompt::Prompter;
use crate::services::{EntryInput, LedgerService};

/// Entry fields; any left out are asked for interactively
#[derive(Args, Debug, Clone, Default)]
pub struct EntryArgs {
    /// Entry date (yy-mm-dd)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Amount in the currency's notation (e.g. 1,500.00)
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<String>,

    /// Free-text tag used to group entries in reports
    #[arg(short, long)]
    pub tag: Option<String>,
}

impl From<EntryArgs> for EntryInput {
    fn from(args: EntryArgs) -> Self {
        Self {
            date: args.date,
            amount: args.amount,
            tag: args.tag,
        }
    }
}

/// Ledger subcommands
#[derive(Subcommand, Debug)]
pub enum LedgerCommands {
    /// Record a deposit
    Deposit(EntryArgs),

    /// Record a withdrawal
    Withdraw(EntryArgs),

    /// Remove the most recent entry
    RemoveLast {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the most recent entries
    View {
        /// Number of entries to show (default from settings)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// List distinct tags in order of first use
    Tags,

    /// Check that every balance follows from the one before it
    Check,
}

/// Handle a ledger command
pub fn handle_ledger_command(
    ctx: &LedgerContext,
    cmd: LedgerCommands,
    prompter: &mut dyn Prompter,
) -> PassbookResult<()> {
    let mut service = ctx.open(prompter)?;

    match cmd {
        LedgerCommands::Deposit(args) => {
            add_entry(ctx, &mut service, "deposit", args.into(), prompter)?;
        }
        LedgerCommands::Withdraw(args) => {
            add_entry(ctx, &mut service, "withdraw", args.into(), prompter)?;
        }
        LedgerCommands::RemoveLast { yes } => {
            remove_last(ctx, &mut service, yes, prompter)?;
        }
        LedgerCommands::View { count } => {
            view_recent(ctx, &service, count);
        }
        LedgerCommands::Tags => {
            print!("{}", format_tag_list(&service.tags()));
        }
        LedgerCommands::Check => {
            let result = service.verify();
            println!(
                "{}",
                format_chain_check(&result, service.ledger().len(), service.currency())
            );
        }
    }

    Ok(())
}

/// Append an entry and report the outcome
pub fn add_entry(
    ctx: &LedgerContext,
    service: &mut LedgerService,
    action: &str,
    input: EntryInput,
    prompter: &mut dyn Prompter,
) -> PassbookResult<()> {
    let outcome = service.add_entry(action, input, prompter)?;
    println!("{}", format_append_outcome(&outcome, &ctx.currency));
    if outcome.overdrawn {
        prompter.say(&overdraft_warning(outcome.entry.balance, &ctx.currency));
    }
    Ok(())
}

/// Show the recent entries, then remove the last one if confirmed
pub fn remove_last(
    ctx: &LedgerContext,
    service: &mut LedgerService,
    skip_confirm: bool,
    prompter: &mut dyn Prompter,
) -> PassbookResult<()> {
    view_recent(ctx, service, None);
    if let Some(removed) = service.remove_last(prompter, skip_confirm)? {
        println!(
            "removed {} {} ({}) on {}.",
            removed.action,
            ctx.currency.format_with_symbol(removed.amount),
            removed.tag,
            removed.date
        );
    }
    Ok(())
}

/// Print the last `count` entries (settings default when `None`)
pub fn view_recent(ctx: &LedgerContext, service: &LedgerService, count: Option<usize>) {
    let count = count.unwrap_or(ctx.settings.recent_count);
    println!("* CURRENT ACCOUNT (LAST {} ENTRIES) *", count);
    print!("{}", format_entry_table(service.recent(count), &ctx.currency));
}
