//! Reads one bank statement and turns it into report lines.

use crate::filter::{Decision, RecordFilter};
use crate::model::{Bank, Record};
use crate::{report, Result};
use anyhow::{bail, Context};
use csv::StringRecord;
use std::path::Path;
use tracing::{debug, info};

/// The placeholder trailer written at the end of each statement's block. No sum is computed.
const SUBTOTAL_LINE: &str = "\nSubtotal,,\n\n";

/// Opens a statement file and parses its full contents as CSV, returning every row in file
/// order, the header row included. No trimming, no filtering, no type conversion.
pub(crate) fn read_rows(path: &Path) -> Result<Vec<StringRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Unable to open statement file {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new().has_headers(false).from_reader(file);
    let mut rows = Vec::new();
    for row in reader.records() {
        rows.push(
            row.with_context(|| format!("Unable to parse CSV data from {}", path.display()))?,
        );
    }
    Ok(rows)
}

/// Processes one statement file: classifies the bank from the filename, reads the rows, trims
/// the bank's preamble, skips the header, filters the remaining rows and appends the survivors
/// to the report. Returns the number of lines written.
pub(crate) fn process(path: &Path, filter: &RecordFilter) -> Result<usize> {
    let filename = match path.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => bail!("Statement path {} has no filename", path.display()),
    };
    let bank = Bank::classify(&filename);
    if bank == Bank::Unknown {
        bail!("Unable to determine the bank for filename {filename}");
    }
    debug!("Classified {filename} as {bank}");

    let rows = read_rows(path)?;
    let layout = bank.layout()?;

    if rows.len() < layout.preamble_rows() {
        bail!(
            "Statement {filename} has {} rows, fewer than its {} preamble rows",
            rows.len(),
            layout.preamble_rows()
        );
    }
    if layout.preamble_rows() > 0 {
        info!(
            "Skipping {} preamble rows of {filename}",
            layout.preamble_rows()
        );
    }
    let rows = &rows[layout.preamble_rows()..];

    let mut lines = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        // The first remaining row is assumed to be the CSV header.
        if index == 0 {
            debug!("Skipping header row of {filename}");
            continue;
        }
        match filter.decide(row, layout) {
            Decision::Skip(reason) => {
                info!("Skipping record {row:?}: {reason}");
            }
            Decision::Keep => {
                let record = Record::from_row(row, layout)?;
                lines.push(format!("{record}\n"));
            }
        }
    }
    lines.push(SUBTOTAL_LINE.to_string());

    report::append(path, &lines)
}
