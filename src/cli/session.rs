//! Interactive session
//!
//! A numbered menu over one ledger. Errors abort the chosen action and are
//! reported; the session itself keeps going until the operator ends it.

use super::entry::{add_entry, remove_last, view_recent};
use super::report::{monthly_report, yearly_report};
use super::LedgerContext;
use crate::config::{PassbookPaths, Settings};
use crate::display::format_tag_list;
use crate::error::PassbookResult;
use crate::prompt::Prompter;
use crate::reports::{MonthPeriod, YearPeriod};
use crate::services::{EntryInput, LedgerService};

const ACTIONS: [&str; 7] = [
    "deposit",
    "withdraw",
    "generate monthly report",
    "generate yearly report",
    "view tags",
    "remove (last) entry",
    "end session",
];

/// Pick the ledger for a session, asking for whatever was not given
pub fn select_ledger(
    paths: PassbookPaths,
    settings: Settings,
    account: Option<String>,
    currency: Option<String>,
    prompter: &mut dyn Prompter,
) -> PassbookResult<LedgerContext> {
    let account = match account {
        Some(account) => Some(account),
        None => Some(prompter.ask(&format!(
            "select your account (default: {}): ",
            settings.default_account
        ))?),
    };
    let currency = match currency {
        Some(currency) => Some(currency),
        None => Some(prompter.ask(&format!(
            "select your currency (default: {}): ",
            settings.default_currency
        ))?),
    };

    LedgerContext::new(paths, settings, account, currency)
}

/// Run the menu loop until the operator ends the session
pub fn run_session(ctx: &LedgerContext, prompter: &mut dyn Prompter) -> PassbookResult<()> {
    let mut service = ctx.open(prompter)?;
    view_recent(ctx, &service, None);

    loop {
        println!("what would you like to do? ");
        for (idx, action) in ACTIONS.iter().enumerate() {
            println!("{}. {}", idx + 1, action);
        }
        let choice = prompter.ask("your choice: ")?;

        if choice == "7" {
            view_recent(ctx, &service, None);
            break;
        }

        if let Err(e) = run_action(ctx, &mut service, &choice, prompter) {
            prompter.say(&format!("error: {}", e));
        }

        let again = prompter.ask("would you like to choose another action (y/n)? ")?;
        if again.eq_ignore_ascii_case("n") {
            break;
        }
    }

    Ok(())
}

fn run_action(
    ctx: &LedgerContext,
    service: &mut LedgerService,
    choice: &str,
    prompter: &mut dyn Prompter,
) -> PassbookResult<()> {
    match choice {
        "1" | "2" => {
            add_entry(ctx, service, choice, EntryInput::default(), prompter)?;
            view_recent(ctx, service, None);
        }
        "3" => {
            let period = MonthPeriod::parse(&prompter.ask("choose a year and month (yy-mm): ")?)?;
            monthly_report(ctx, service, period)?;
        }
        "4" => {
            let period = YearPeriod::parse(&prompter.ask("choose a year (yy): ")?)?;
            yearly_report(ctx, service, period)?;
        }
        "5" => {
            println!("* CURRENT TAGS *");
            print!("{}", format_tag_list(&service.tags()));
        }
        "6" => {
            remove_last(ctx, service, false, prompter)?;
            view_recent(ctx, service, None);
        }
        other => {
            prompter.say(&format!("unknown choice '{}'", other));
        }
    }
    Ok(())
}
