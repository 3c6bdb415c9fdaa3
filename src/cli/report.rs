//! CLI commands for reports
//!
//! Generates monthly and yearly chart images in the account directory and
//! prints a text summary of the same numbers.

use clap::Subcommand;

use super::LedgerContext;
use crate::display::{format_monthly_summary, format_yearly_summary};
use crate::error::PassbookResult;
use crate::prompt::Prompter;
use crate::reports::{MonthPeriod, YearPeriod};
use crate::services::LedgerService;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Pie charts of deposits and withdrawals per tag for one month
    Monthly {
        /// Month to report on (yy-mm)
        period: String,
    },

    /// Line charts of deposits and withdrawals per month for one year
    Yearly {
        /// Year to report on (yy)
        year: String,
    },
}

/// Handle a report command
pub fn handle_report_command(
    ctx: &LedgerContext,
    cmd: ReportCommands,
    prompter: &mut dyn Prompter,
) -> PassbookResult<()> {
    match cmd {
        ReportCommands::Monthly { period } => {
            let period = MonthPeriod::parse(&period)?;
            let service = ctx.open(prompter)?;
            monthly_report(ctx, &service, period)
        }
        ReportCommands::Yearly { year } => {
            let period = YearPeriod::parse(&year)?;
            let service = ctx.open(prompter)?;
            yearly_report(ctx, &service, period)
        }
    }
}

pub fn monthly_report(
    ctx: &LedgerContext,
    service: &LedgerService,
    period: MonthPeriod,
) -> PassbookResult<()> {
    println!(
        "getting all entries between {} and {}",
        period.start()?,
        period.end()?
    );
    let summary = service.monthly_summary(period)?;
    print!("{}", format_monthly_summary(&summary, &ctx.currency));

    let path = ctx.renderer().render_monthly(&summary)?;
    println!("report saved at {}", path.display());
    Ok(())
}

pub fn yearly_report(
    ctx: &LedgerContext,
    service: &LedgerService,
    period: YearPeriod,
) -> PassbookResult<()> {
    println!(
        "getting all entries between {} and {}",
        period.start()?,
        period.end()?
    );
    let summary = service.yearly_summary(period)?;
    print!("{}", format_yearly_summary(&summary, &ctx.currency));

    let path = ctx.renderer().render_yearly(&summary)?;
    println!("report saved at {}", path.display());
    Ok(())
}
