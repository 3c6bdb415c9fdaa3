//! Currency formatting context
//!
//! Ledger files store amounts the way the account's currency writes them
//! (grouping separators, fixed fraction digits, no symbol). Each ledger gets
//! its own explicit `CurrencyFormat` instead of relying on process locale.

use serde::{Deserialize, Serialize};

use super::money::{Money, MoneyParseError};

/// Formatting rules for one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Symbol shown in chart titles and terminal output
    pub symbol: String,
    /// Separator between whole units and the fraction
    pub decimal_separator: char,
    /// Separator between groups of three digits
    pub grouping_separator: char,
    /// Number of digits after the decimal separator (0-2)
    pub fraction_digits: u8,
}

impl CurrencyFormat {
    /// South Korean won: no minor units
    pub fn won() -> Self {
        Self {
            symbol: "₩".to_string(),
            decimal_separator: '.',
            grouping_separator: ',',
            fraction_digits: 0,
        }
    }

    /// US dollar
    pub fn usd() -> Self {
        Self {
            symbol: "$".to_string(),
            decimal_separator: '.',
            grouping_separator: ',',
            fraction_digits: 2,
        }
    }

    /// Euro, continental style
    pub fn eur() -> Self {
        Self {
            symbol: "€".to_string(),
            decimal_separator: ',',
            grouping_separator: '.',
            fraction_digits: 2,
        }
    }

    /// Check the separators and precision are usable
    pub fn validate(&self) -> Result<(), String> {
        if self.decimal_separator == self.grouping_separator {
            return Err(format!(
                "decimal and grouping separators must differ (both '{}')",
                self.decimal_separator
            ));
        }
        if self.decimal_separator.is_ascii_digit() || self.grouping_separator.is_ascii_digit() {
            return Err("separators cannot be digits".to_string());
        }
        if self.decimal_separator == '-' || self.grouping_separator == '-' {
            return Err("separators cannot be '-'".to_string());
        }
        if self.fraction_digits > 2 {
            return Err(format!(
                "at most 2 fraction digits are supported, got {}",
                self.fraction_digits
            ));
        }
        Ok(())
    }

    /// Round an amount to this currency's precision
    ///
    /// `None` when the rounded amount is out of range.
    pub fn round(&self, amount: Money) -> Option<Money> {
        amount.round_to(self.fraction_digits)
    }

    /// Format an amount with grouping and no symbol, e.g. `1,500.00` or `-500`
    pub fn format(&self, amount: Money) -> String {
        let rounded = self.round(amount).unwrap_or(amount);
        let magnitude = rounded.cents().unsigned_abs();
        let whole = group_digits(magnitude / 100, self.grouping_separator);

        let mut out = String::new();
        if rounded.is_negative() {
            out.push('-');
        }
        out.push_str(&whole);

        let cents = magnitude % 100;
        match self.fraction_digits {
            0 => {}
            1 => {
                out.push(self.decimal_separator);
                out.push_str(&(cents / 10).to_string());
            }
            _ => {
                out.push(self.decimal_separator);
                out.push_str(&format!("{:02}", cents));
            }
        }
        out
    }

    /// Format an amount with the currency symbol in front
    pub fn format_with_symbol(&self, amount: Money) -> String {
        let plain = self.format(amount);
        match plain.strip_prefix('-') {
            Some(rest) => format!("-{}{}", self.symbol, rest),
            None => format!("{}{}", self.symbol, plain),
        }
    }

    /// Parse a localized amount such as `1,500.00`, `-500` or `₩1,000`
    pub fn parse(&self, input: &str) -> Result<Money, MoneyParseError> {
        let trimmed = input.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix(self.symbol.as_str()).unwrap_or(rest);

        let mut plain = String::with_capacity(rest.len() + 1);
        if negative {
            plain.push('-');
        }
        for c in rest.chars() {
            if c == self.grouping_separator {
                continue;
            }
            if c == self.decimal_separator {
                plain.push('.');
            } else {
                plain.push(c);
            }
        }

        Money::parse(&plain).map_err(|_| MoneyParseError::InvalidFormat(input.to_string()))
    }

    /// Parse an amount read back from a ledger file
    ///
    /// Unlike [`CurrencyFormat::parse`], nonzero digits past this currency's
    /// precision are an error instead of being rounded away, so a loaded
    /// value is exactly what gets written back.
    pub fn parse_stored(&self, input: &str) -> Result<Money, MoneyParseError> {
        let amount = self.parse(input)?;
        let mut extra_digits = input
            .trim()
            .split_once(self.decimal_separator)
            .map_or("", |(_, fraction)| fraction)
            .chars()
            .skip(usize::from(self.fraction_digits));
        if extra_digits.any(|c| c != '0') {
            return Err(MoneyParseError::TooPrecise {
                input: input.to_string(),
                fraction_digits: self.fraction_digits,
            });
        }
        Ok(amount)
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::won()
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
