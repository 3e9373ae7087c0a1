//! CSV export of joined records.
//!
//! One row per joined record: the original columns in input order, followed
//! by the normalized IP and the matched range.

use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;
use std::path::Path;

use crate::dataset::Row;
use crate::join::JoinedRecord;

use super::types::join_columns;
use super::writer::open_output;

fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes joined records as CSV to any writer.
///
/// Unmatched rows (left joins) leave the bound and country cells empty.
pub fn write_csv<W: Write>(
    writer: W,
    headers: &[String],
    rows: &[JoinedRecord<'_, Row>],
) -> Result<usize> {
    let mut writer = Writer::from_writer(writer);

    let header_row: Vec<&str> = headers
        .iter()
        .map(String::as_str)
        .chain(join_columns())
        .collect();
    writer.write_record(&header_row)?;

    let mut record_count = 0;
    for row in rows {
        let mut cells: Vec<String> = row.record().data().clone();
        cells.push(row.ip_int().to_string());
        cells.push(optional_cell(row.lower_bound()));
        cells.push(optional_cell(row.upper_bound()));
        cells.push(optional_cell(row.country()));
        writer.write_record(&cells)?;
        record_count += 1;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(record_count)
}

/// Exports joined records to CSV.
///
/// # Arguments
///
/// * `headers` - Header row of the records input
/// * `rows` - Joined records, in output order
/// * `output` - Output file path (or stdout if None)
///
/// # Returns
///
/// Returns the number of records exported, or an error if export fails.
pub fn export_csv(
    headers: &[String],
    rows: &[JoinedRecord<'_, Row>],
    output: Option<&Path>,
) -> Result<usize> {
    let sink = open_output(output)?;
    write_csv(sink, headers, rows).context("Failed to write CSV output")
}
