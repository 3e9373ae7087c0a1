//! JSONL export of joined records.
//!
//! Each line is one JSON object: the original columns as strings, in input
//! order, then `ip_address_int`, the matched bounds and the country. Unmatched
//! rows carry `null` for the last three.

use anyhow::{Context, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::io::Write;
use std::path::Path;

use crate::config::{
    OUTPUT_COUNTRY_COLUMN, OUTPUT_IP_INT_COLUMN, OUTPUT_LOWER_BOUND_COLUMN,
    OUTPUT_UPPER_BOUND_COLUMN,
};
use crate::dataset::Row;
use crate::join::JoinedRecord;

use super::writer::open_output;

/// Serializes one joined record as an ordered JSON object.
struct JsonRow<'r, 'a> {
    headers: &'r [String],
    row: &'r JoinedRecord<'a, Row>,
}

impl Serialize for JsonRow<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let cells = self.row.record().data();
        let mut map = serializer.serialize_map(Some(self.headers.len() + 4))?;
        for (header, cell) in self.headers.iter().zip(cells) {
            map.serialize_entry(header, cell)?;
        }
        map.serialize_entry(OUTPUT_IP_INT_COLUMN, &self.row.ip_int())?;
        map.serialize_entry(OUTPUT_LOWER_BOUND_COLUMN, &self.row.lower_bound())?;
        map.serialize_entry(OUTPUT_UPPER_BOUND_COLUMN, &self.row.upper_bound())?;
        map.serialize_entry(OUTPUT_COUNTRY_COLUMN, &self.row.country())?;
        map.end()
    }
}

/// Writes joined records as JSON Lines to any writer.
pub fn write_jsonl<W: Write>(
    mut writer: W,
    headers: &[String],
    rows: &[JoinedRecord<'_, Row>],
) -> Result<usize> {
    let mut record_count = 0;
    for row in rows {
        serde_json::to_writer(&mut writer, &JsonRow { headers, row })
            .context("Failed to serialize JSONL row")?;
        writer.write_all(b"\n")?;
        record_count += 1;
    }
    writer.flush().context("Failed to flush JSONL output")?;
    Ok(record_count)
}

/// Exports joined records to JSONL format (JSON Lines).
///
/// This format is ideal for piping to `jq` or loading into other tools.
///
/// # Returns
///
/// Returns the number of records exported, or an error if export fails.
pub fn export_jsonl(
    headers: &[String],
    rows: &[JoinedRecord<'_, Row>],
    output: Option<&Path>,
) -> Result<usize> {
    let sink = open_output(output)?;
    write_jsonl(sink, headers, rows).context("Failed to write JSONL output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JoinMode, RangeValidation};
    use crate::dataset::read_records;
    use crate::join::{join_with, JoinOptions};
    use crate::ranges::{IpRange, RangeTable};
    use serde_json::Value;

    #[test]
    fn test_write_jsonl_keeps_column_order_and_types() {
        let set = read_records(
            "user_id,ip_address\n7,1.0.0.5\n8,9.9.9.9\n".as_bytes(),
            "ip_address",
        )
        .expect("should read");
        let table = RangeTable::new(
            vec![IpRange::new(16_777_216, 16_777_471, "Australia")],
            RangeValidation::Strict,
        )
        .expect("valid table");
        let outcome = join_with(
            set.records(),
            &table,
            &JoinOptions {
                mode: JoinMode::Left,
                ..Default::default()
            },
        );

        let mut out = Vec::new();
        let count = write_jsonl(&mut out, set.headers(), &outcome.rows).expect("should write");
        assert_eq!(count, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            r#"{"user_id":"7","ip_address":"1.0.0.5","ip_address_int":16777221,"lower_bound_ip_address":16777216,"upper_bound_ip_address":16777471,"country":"Australia"}"#
        );

        let unmatched: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(unmatched["user_id"], "8");
        assert_eq!(unmatched["ip_address_int"], 151_587_081u64);
        assert!(unmatched["country"].is_null());
        assert!(unmatched["lower_bound_ip_address"].is_null());
    }

    #[test]
    fn test_write_jsonl_empty() {
        let mut out = Vec::new();
        let count = write_jsonl(&mut out, &["ip_address".to_string()], &[]).expect("should write");
        assert_eq!(count, 0);
        assert!(out.is_empty());
    }
}
