//! Export of joined records.
//!
//! Writes the enriched rows as CSV (flat, spreadsheet friendly) or JSONL
//! (one object per line) to a file or stdout.

mod csv;
mod jsonl;
mod types;
mod writer;

use anyhow::Result;

use crate::config::OutputFormat;
use crate::dataset::Row;
use crate::join::JoinedRecord;

pub use self::csv::{export_csv, write_csv};
pub use self::jsonl::{export_jsonl, write_jsonl};
pub use self::types::ExportOptions;

/// Exports joined records in the format selected by `opts`.
///
/// Returns the number of records written.
pub fn export(
    headers: &[String],
    rows: &[JoinedRecord<'_, Row>],
    opts: &ExportOptions,
) -> Result<usize> {
    let output = opts.output.as_deref();
    match opts.format {
        OutputFormat::Csv => export_csv(headers, rows, output),
        OutputFormat::Jsonl => export_jsonl(headers, rows, output),
    }
}
