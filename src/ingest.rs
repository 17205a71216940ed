// CSV boundary for the CLI. The engine's contract starts at
// `(headers, rows)`; everything about files and delimiters ends here.
use crate::types::{RawRow, RawValue};
use csv::ReaderBuilder;
use std::error::Error;
use tracing::debug;

/// Read a bookings export into untyped rows plus the header list, in file
/// order. Cells are dynamically typed the way the upstream tokenizer types
/// them: a cell that reads cleanly as a number is delivered as a number,
/// everything else stays a string, and an empty cell is null.
pub fn read_csv(path: &str) -> Result<(Vec<String>, Vec<RawRow>), Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows: Vec<RawRow> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row = RawRow::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            let cell = record.get(i).unwrap_or("");
            row.insert(header.clone(), dynamic_type(cell));
        }
        rows.push(row);
    }
    debug!(rows = rows.len(), columns = headers.len(), path, "read csv");
    Ok((headers, rows))
}

/// Number detection mirrors the upstream tokenizer: plain decimal or
/// scientific notation only, so ids like `CNR593` and words like `NaN` stay
/// strings.
fn dynamic_type(cell: &str) -> RawValue {
    if cell.is_empty() {
        return RawValue::Null;
    }
    let t = cell.trim();
    let starts_numeric = t
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '+' || c == '.');
    let plain = t
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'));
    if starts_numeric && plain {
        if let Ok(n) = t.parse::<f64>() {
            return RawValue::Number(n);
        }
    }
    RawValue::Text(cell.to_string())
}
