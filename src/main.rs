use anyhow::Result;
use clap::{Parser, Subcommand};

use passbook::cli::{
    handle_backup_command, handle_ledger_command, handle_report_command, run_session,
    select_ledger, show_history, BackupCommands, LedgerCommands, LedgerContext, ReportCommands,
};
use passbook::config::{PassbookPaths, Settings};
use passbook::prompt::ConsolePrompter;

#[derive(Parser)]
#[command(
    name = "passbook",
    version,
    about = "Personal bank-account ledger with chart reports",
    long_about = "passbook records deposits and withdrawals in a CSV ledger per \
                  account and currency, keeps the running balance, and renders \
                  monthly and yearly charts of where the money went."
)]
struct Cli {
    /// Account name (default from settings)
    #[arg(short, long, global = true, env = "PASSBOOK_ACCOUNT")]
    account: Option<String>,

    /// Currency code (default from settings)
    #[arg(short, long, global = true, env = "PASSBOOK_CURRENCY")]
    currency: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Ledger(LedgerCommands),

    /// Generate chart reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Inspect or restore the ledger backup
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of changes to show
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,

        /// Include every ledger, not just the selected one
        #[arg(long)]
        all: bool,
    },

    /// Interactive menu (default when no command is given)
    Session,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = PassbookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let mut prompter = ConsolePrompter::stdin();

    match cli.command {
        Some(Commands::Ledger(cmd)) => {
            let ctx = LedgerContext::new(paths, settings, cli.account, cli.currency)?;
            handle_ledger_command(&ctx, cmd, &mut prompter)?;
        }
        Some(Commands::Report(cmd)) => {
            let ctx = LedgerContext::new(paths, settings, cli.account, cli.currency)?;
            handle_report_command(&ctx, cmd, &mut prompter)?;
        }
        Some(Commands::Backup(cmd)) => {
            let ctx = LedgerContext::new(paths, settings, cli.account, cli.currency)?;
            handle_backup_command(&ctx, cmd, &mut prompter)?;
        }
        Some(Commands::History { count, all }) => {
            let ctx = LedgerContext::new(paths, settings, cli.account, cli.currency)?;
            show_history(&ctx, count, all)?;
        }
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }
            println!("passbook Configuration");
            println!("======================");
            println!("Data directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!("Accounts:        {}", paths.accounts_dir().display());
            println!();
            println!("Settings:");
            println!("  Default account:  {}", settings.default_account);
            println!("  Default currency: {}", settings.default_currency);
            println!("  Backup suffix:    {}", settings.backup_suffix);
            println!("  Recent entries:   {}", settings.recent_count);
            println!(
                "  Report format:    {} ({}x{})",
                settings.report_format.extension(),
                settings.report_size.width,
                settings.report_size.height
            );
            println!("  Currencies:");
            for (code, format) in &settings.currencies {
                println!(
                    "    {:<5} {}  ({} fraction digits)",
                    code, format.symbol, format.fraction_digits
                );
            }
        }
        Some(Commands::Session) | None => {
            let ctx = select_ledger(paths, settings, cli.account, cli.currency, &mut prompter)?;
            run_session(&ctx, &mut prompter)?;
        }
    }

    Ok(())
}
