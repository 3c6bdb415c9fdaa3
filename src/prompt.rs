//! Operator input boundary
//!
//! Everything that needs a human (seed values, entry fields, confirmations,
//! "close the file and press enter") goes through [`Prompter`], so the
//! ledger logic runs the same against a terminal or a scripted test.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::{PassbookError, PassbookResult};
use crate::models::{CurrencyFormat, EntryDate, Money};

/// Source of operator input and sink for operator-facing messages
pub trait Prompter {
    /// Show `prompt` and return the operator's answer, trimmed
    fn ask(&mut self, prompt: &str) -> PassbookResult<String>;

    /// Show an informational message or warning
    fn say(&mut self, message: &str);

    /// Ask a yes/no question; only `y`/`yes` count as yes
    fn confirm(&mut self, prompt: &str) -> PassbookResult<bool> {
        let answer = self.ask(prompt)?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }
}

/// Ask for a `yy-mm-dd` date
pub fn ask_date(prompter: &mut dyn Prompter, prompt: &str) -> PassbookResult<EntryDate> {
    let raw = prompter.ask(prompt)?;
    EntryDate::parse(&raw).map_err(|e| PassbookError::Validation(e.to_string()))
}

/// Ask for an amount in the currency's notation
pub fn ask_money(
    prompter: &mut dyn Prompter,
    prompt: &str,
    currency: &CurrencyFormat,
) -> PassbookResult<Money> {
    let raw = prompter.ask(prompt)?;
    currency
        .parse(&raw)
        .map_err(|e| PassbookError::Validation(e.to_string()))
}

/// Ask for a strictly positive amount
pub fn ask_positive_money(
    prompter: &mut dyn Prompter,
    prompt: &str,
    currency: &CurrencyFormat,
) -> PassbookResult<Money> {
    let raw = prompter.ask(prompt)?;
    parse_positive_money(&raw, currency)
}

/// Parse an amount that must be greater than zero
pub fn parse_positive_money(raw: &str, currency: &CurrencyFormat) -> PassbookResult<Money> {
    let amount = currency
        .parse(raw)
        .map_err(|e| PassbookError::Validation(e.to_string()))?;
    if !amount.is_positive() {
        return Err(PassbookError::Validation(format!(
            "Amount must be greater than zero, got {}",
            currency.format(amount)
        )));
    }
    Ok(amount)
}

/// Prompter backed by stdin/stdout; messages go to stderr
pub struct ConsolePrompter<R> {
    input: R,
}

impl ConsolePrompter<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> ConsolePrompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Prompter for ConsolePrompter<R> {
    fn ask(&mut self, prompt: &str) -> PassbookResult<String> {
        print!("{}", prompt);
        io::stdout().flush().map_err(|e| PassbookError::Io(e.to_string()))?;

        let mut input = String::new();
        let read = self
            .input
            .read_line(&mut input)
            .map_err(|e| PassbookError::Io(e.to_string()))?;
        if read == 0 {
            return Err(PassbookError::Io("Input closed".into()));
        }

        Ok(input.trim().to_string())
    }

    fn say(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Prompter that replays canned answers and records everything shown
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Prompts asked, in order
    pub prompts: Vec<String>,
    /// Messages shown, in order
    pub messages: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> PassbookResult<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .map(|a| a.trim().to_string())
            .ok_or_else(|| PassbookError::Io(format!("No scripted answer for: {}", prompt)))
    }

    fn say(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
