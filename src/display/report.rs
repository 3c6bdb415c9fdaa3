//! Text summaries printed alongside generated report images

use crate::models::{Action, CurrencyFormat};
use crate::reports::{panel_title, pie_slices, MonthlySummary, YearlySummary};

const WIDTH: usize = 60;
const BAR_WIDTH: usize = 20;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to `max_len` characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

fn section_name(action: Action) -> &'static str {
    match action {
        Action::Deposit => "Deposits",
        Action::Withdraw => "Withdrawals",
    }
}

/// Per-tag breakdown of a month, one section per action
pub fn format_monthly_summary(summary: &MonthlySummary, currency: &CurrencyFormat) -> String {
    let mut output = format!("Monthly report for {}\n", summary.period);
    output.push_str(&separator(WIDTH));
    output.push('\n');

    for action in [Action::Deposit, Action::Withdraw] {
        let total = summary.totals.total(action);
        output.push_str(&panel_title(action, currency, total));
        output.push('\n');

        let slices = pie_slices(summary.totals.for_action(action));
        if slices.is_empty() {
            output.push_str("  no entries\n");
            continue;
        }
        for slice in &slices {
            output.push_str(&format!(
                "  {:<18} {:>14} {:>6} {}\n",
                truncate(&slice.tag, 18),
                currency.format(slice.amount),
                format_percentage(slice.percentage),
                format_bar(slice.percentage, 100.0, BAR_WIDTH)
            ));
        }
    }

    output
}

/// Month-by-month totals of a year
pub fn format_yearly_summary(summary: &YearlySummary, currency: &CurrencyFormat) -> String {
    let deposits = summary.series(Action::Deposit);
    let withdrawals = summary.series(Action::Withdraw);

    let mut output = format!("Yearly report for {}\n", summary.period);
    output.push_str(&format!(
        "{:<6} {:>16} {:>16}\n",
        "Month",
        section_name(Action::Deposit),
        section_name(Action::Withdraw)
    ));
    output.push_str(&separator(40));
    output.push('\n');

    for ((month, deposit), (_, withdraw)) in deposits.iter().zip(&withdrawals) {
        output.push_str(&format!(
            "{:<6} {:>16} {:>16}\n",
            format!("{:02}", month),
            currency.format(*deposit),
            currency.format(*withdraw)
        ));
    }

    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format!(
        "{:<6} {:>16} {:>16}\n",
        "Total",
        currency.format(summary.totals.total(Action::Deposit)),
        currency.format(summary.totals.total(Action::Withdraw))
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryDate, Ledger, Money, NewEntry};
    use crate::reports::{MonthPeriod, YearPeriod};

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("groceries and more", 9), "grocer...");
        assert_eq!(truncate("rent", 9), "rent");
    }

    fn ledger() -> Ledger {
        let won = CurrencyFormat::won();
        let mut ledger = Ledger::seeded(
            EntryDate::parse("25-01-01").unwrap(),
            Money::from_cents(100000),
            &won,
        )
        .unwrap();
        ledger
            .append(
                NewEntry {
                    date: EntryDate::parse("25-01-05").unwrap(),
                    amount: Money::from_cents(50000),
                    tag: "salary".into(),
                    action: Action::Deposit,
                },
                &won,
            )
            .unwrap();
        ledger
    }

    #[test]
    fn test_monthly_summary_text() {
        let won = CurrencyFormat::won();
        let summary =
            MonthlySummary::generate(&ledger(), MonthPeriod::parse("25-01").unwrap()).unwrap();

        let text = format_monthly_summary(&summary, &won);
        assert!(text.starts_with("Monthly report for 25-01\n"));
        assert!(text.contains("Deposits (₩) Total: 500\n"));
        assert!(text.contains("salary"));
        assert!(text.contains("100%"));
        assert!(text.contains("Withdrawals (₩) Total: 0\n  no entries\n"));
    }

    #[test]
    fn test_yearly_summary_text() {
        let won = CurrencyFormat::won();
        let summary = YearlySummary::generate(&ledger(), YearPeriod::parse("25").unwrap()).unwrap();

        let text = format_yearly_summary(&summary, &won);
        assert!(text.starts_with("Yearly report for 25\n"));
        assert!(text.lines().any(|l| l.starts_with("01") && l.contains("500")));
        assert!(text.lines().any(|l| l.starts_with("12")));
        assert!(text.lines().last().unwrap().starts_with("Total"));
    }
}
