//! CSV codec for ledger files
//!
//! Columns are fixed: `DATE,AMT,BAL,ACTION,TAG`. Amounts are written in the
//! currency's localized notation, so a `1,500.00` cell is quoted by the
//! writer and unquoted again by the reader.

use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::{PassbookError, PassbookResult};
use crate::models::{Action, CurrencyFormat, Entry, EntryDate, Ledger};

/// Header row of every ledger file
pub const HEADER: [&str; 5] = ["DATE", "AMT", "BAL", "ACTION", "TAG"];

/// Parse a whole ledger file
///
/// Row numbers in errors count data rows from 1 (the header is row 0).
pub fn read_ledger<R: Read>(reader: R, currency: &CurrencyFormat) -> PassbookResult<Ledger> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().map_err(|e| PassbookError::parse(0, e.to_string()))?;
    check_headers(headers)?;

    let mut entries = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| PassbookError::parse(row, e.to_string()))?;
        entries.push(parse_record(&record, row, currency)?);
    }

    if entries.is_empty() {
        return Err(PassbookError::parse(0, "ledger file has no entries"));
    }

    Ledger::from_entries(entries)
}

/// Serialize every entry, header first
pub fn write_ledger<W: Write>(
    writer: W,
    ledger: &Ledger,
    currency: &CurrencyFormat,
) -> PassbookResult<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    let write_err = |e: csv::Error| PassbookError::Storage(format!("Failed to write ledger: {}", e));

    writer.write_record(HEADER).map_err(write_err)?;
    for entry in ledger.entries() {
        writer
            .write_record([
                entry.date.to_string(),
                currency.format(entry.amount),
                currency.format(entry.balance),
                entry.action.as_str().to_string(),
                entry.tag.clone(),
            ])
            .map_err(write_err)?;
    }

    writer
        .flush()
        .map_err(|e| PassbookError::Storage(format!("Failed to flush ledger: {}", e)))
}

fn check_headers(headers: &StringRecord) -> PassbookResult<()> {
    let found: Vec<&str> = headers.iter().map(str::trim).collect();
    if found != HEADER {
        return Err(PassbookError::parse(
            0,
            format!(
                "expected columns {} but found {}",
                HEADER.join(","),
                found.join(",")
            ),
        ));
    }
    Ok(())
}

fn parse_record(
    record: &StringRecord,
    row: usize,
    currency: &CurrencyFormat,
) -> PassbookResult<Entry> {
    if record.len() != HEADER.len() {
        return Err(PassbookError::parse(
            row,
            format!("expected {} columns, found {}", HEADER.len(), record.len()),
        ));
    }

    let field = |i: usize| record.get(i).unwrap_or_default().trim();

    let date = EntryDate::parse(field(0)).map_err(|e| PassbookError::parse(row, e.to_string()))?;
    let amount = currency
        .parse_stored(field(1))
        .map_err(|e| PassbookError::parse(row, format!("AMT: {}", e)))?;
    let balance = currency
        .parse_stored(field(2))
        .map_err(|e| PassbookError::parse(row, format!("BAL: {}", e)))?;
    let action = match field(3) {
        "deposit" => Action::Deposit,
        "withdraw" => Action::Withdraw,
        other => {
            return Err(PassbookError::parse(
                row,
                format!("unknown ACTION '{}'", other),
            ))
        }
    };

    Ok(Entry {
        date,
        amount,
        balance,
        action,
        tag: field(4).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewEntry};

    const SAMPLE: &str = "DATE,AMT,BAL,ACTION,TAG\n\
        25-01-01,0,\"1,000.00\",deposit,init deposit\n\
        25-01-05,500.00,\"1,500.00\",deposit,salary\n\
        25-01-10,\"2,000.00\",-500.00,withdraw,rent\n";

    #[test]
    fn test_read_sample() {
        let ledger = read_ledger(SAMPLE.as_bytes(), &CurrencyFormat::usd()).unwrap();

        assert_eq!(ledger.len(), 3);
        let seed = &ledger.entries()[0];
        assert_eq!(seed.amount, Money::zero());
        assert_eq!(seed.balance.cents(), 100000);
        assert_eq!(seed.tag, "init deposit");

        let rent = &ledger.entries()[2];
        assert_eq!(rent.action, Action::Withdraw);
        assert_eq!(rent.amount.cents(), 200000);
        assert_eq!(rent.balance.cents(), -50000);
        assert!(ledger.verify_chain().is_ok());
    }

    #[test]
    fn test_write_quotes_grouped_amounts() {
        let usd = CurrencyFormat::usd();
        let mut ledger = Ledger::seeded(
            EntryDate::parse("25-01-01").unwrap(),
            Money::from_cents(100000),
            &usd,
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
                &usd,
            )
            .unwrap();

        let mut out = Vec::new();
        write_ledger(&mut out, &ledger, &usd).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "DATE,AMT,BAL,ACTION,TAG\n\
             25-01-01,0.00,\"1,000.00\",deposit,init deposit\n\
             25-01-05,500.00,\"1,500.00\",deposit,salary\n"
        );
    }

    #[test]
    fn test_round_trip_is_stable() {
        let usd = CurrencyFormat::usd();
        let first = read_ledger(SAMPLE.as_bytes(), &usd).unwrap();

        let mut out = Vec::new();
        write_ledger(&mut out, &first, &usd).unwrap();
        let second = read_ledger(out.as_slice(), &usd).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_tag_with_comma_survives() {
        let usd = CurrencyFormat::usd();
        let text = "DATE,AMT,BAL,ACTION,TAG\n25-01-01,0,10.00,deposit,\"food, drinks\"\n";
        let ledger = read_ledger(text.as_bytes(), &usd).unwrap();
        assert_eq!(ledger.entries()[0].tag, "food, drinks");
    }

    #[test]
    fn test_wrong_header() {
        let text = "DATE,AMOUNT,BAL,ACTION,TAG\n25-01-01,0,10.00,deposit,x\n";
        let err = read_ledger(text.as_bytes(), &CurrencyFormat::usd()).unwrap_err();
        assert!(matches!(err, PassbookError::Parse { line: 0, .. }));
    }

    #[test]
    fn test_missing_column() {
        let text = "DATE,AMT,BAL,ACTION,TAG\n25-01-01,0,10.00,deposit\n";
        let err = read_ledger(text.as_bytes(), &CurrencyFormat::usd()).unwrap_err();
        assert!(matches!(err, PassbookError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_malformed_values() {
        let usd = CurrencyFormat::usd();
        for bad in [
            "2025-01-01,0,10.00,deposit,x",
            "25-01-01,abc,10.00,deposit,x",
            "25-01-01,0,ten,deposit,x",
            "25-01-01,0,10.00,transfer,x",
        ] {
            let text = format!("DATE,AMT,BAL,ACTION,TAG\n{}\n", bad);
            let err = read_ledger(text.as_bytes(), &usd).unwrap_err();
            assert!(err.is_parse(), "expected parse error for {}", bad);
        }
    }

    #[test]
    fn test_values_finer_than_currency_rejected() {
        let won = CurrencyFormat::won();
        let text = "DATE,AMT,BAL,ACTION,TAG\n25-01-01,0,\"1,000.50\",deposit,init deposit\n";
        let err = read_ledger(text.as_bytes(), &won).unwrap_err();
        assert!(
            matches!(err, PassbookError::Parse { line: 1, ref reason } if reason.starts_with("BAL")),
            "unexpected error: {}",
            err
        );

        let text = "DATE,AMT,BAL,ACTION,TAG\n25-01-01,0,\"1,000.00\",deposit,init deposit\n";
        let ledger = read_ledger(text.as_bytes(), &won).unwrap();
        assert_eq!(ledger.balance().cents(), 100000);

        let usd = CurrencyFormat::usd();
        let text = "DATE,AMT,BAL,ACTION,TAG\n25-01-01,0.001,10.00,deposit,x\n";
        let err = read_ledger(text.as_bytes(), &usd).unwrap_err();
        assert!(matches!(
            err,
            PassbookError::Parse { line: 1, ref reason } if reason.starts_with("AMT")
        ));
    }

    #[test]
    fn test_header_only_is_rejected() {
        let err = read_ledger("DATE,AMT,BAL,ACTION,TAG\n".as_bytes(), &CurrencyFormat::usd())
            .unwrap_err();
        assert!(err.is_parse());
    }
}
