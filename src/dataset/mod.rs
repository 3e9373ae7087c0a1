//! Records dataset loading.
//!
//! Reads a CSV of transaction records, types the IP column and annotates every
//! row with its normalized IP. All other columns are carried through untouched.

use std::io::{self, Read};
use std::path::Path;

use csv::ReaderBuilder;
use log::{debug, info};

use crate::config::{LOGGING_INTERVAL, STDIO_PATH};
use crate::error_handling::DatasetError;
use crate::normalize::{infer_column, Record};

/// Original cells of one CSV row, in header order.
pub type Row = Vec<String>;

/// A records CSV with every row annotated.
#[derive(Debug, Clone)]
pub struct RecordSet {
    headers: Vec<String>,
    ip_column: usize,
    records: Vec<Record<Row>>,
}

impl RecordSet {
    /// Header row of the input, in order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Position of the IP column within [`headers`](Self::headers).
    pub fn ip_column(&self) -> usize {
        self.ip_column
    }

    /// Annotated records, in input order.
    pub fn records(&self) -> &[Record<Row>] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the input had no data rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows whose IP failed to normalize.
    pub fn unparseable(&self) -> usize {
        self.records.iter().filter(|r| !r.ip_parsed()).count()
    }
}

/// Reads records from CSV data with a header row.
///
/// The IP column is typed as a whole (see [`infer_column`]) before the rows
/// are normalized.
///
/// # Errors
///
/// Returns [`DatasetError::MissingColumn`] if `ip_column` is not in the header
/// and [`DatasetError::Csv`] for unreadable or ragged rows.
pub fn read_records<R: Read>(reader: R, ip_column: &str) -> Result<RecordSet, DatasetError> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let ip_idx = headers
        .iter()
        .position(|h| h == ip_column)
        .ok_or_else(|| DatasetError::MissingColumn(ip_column.to_string()))?;

    let mut rows: Vec<Row> = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        rows.push(row.iter().map(str::to_string).collect());
        if rows.len() % LOGGING_INTERVAL == 0 {
            info!("Read {} records...", rows.len());
        }
    }

    let ip_cells: Vec<&str> = rows.iter().map(|r| r[ip_idx].as_str()).collect();
    let ip_values = infer_column(&ip_cells);

    let records: Vec<Record<Row>> = ip_values
        .into_iter()
        .zip(rows)
        .map(|(ip, row)| Record::new(ip, row))
        .collect();

    let set = RecordSet {
        headers,
        ip_column: ip_idx,
        records,
    };
    debug!(
        "Read {} records ({} with unparseable IPs)",
        set.len(),
        set.unparseable()
    );
    Ok(set)
}

/// Reads records from a CSV file, or from stdin when `path` is `-`.
pub fn read_records_csv(path: &Path, ip_column: &str) -> Result<RecordSet, DatasetError> {
    if path.as_os_str() == STDIO_PATH {
        info!("Reading records from stdin");
        return read_records(io::stdin().lock(), ip_column);
    }
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    read_records(file, ip_column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::IpValue;

    #[test]
    fn test_read_records_numeric_ip_column() {
        let data = "\
user_id,purchase_value,ip_address,class
22058,34,732758368.79972,0
333320,16,350311387.865908,0
";
        let set = read_records(data.as_bytes(), "ip_address").expect("should read");
        assert_eq!(set.headers(), ["user_id", "purchase_value", "ip_address", "class"]);
        assert_eq!(set.ip_column(), 2);
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[0].ip_int(), 732_758_368);
        assert_eq!(set.records()[1].ip_int(), 350_311_387);
        assert_eq!(set.records()[0].data()[0], "22058");
        assert_eq!(set.unparseable(), 0);
    }

    #[test]
    fn test_read_records_textual_ip_column() {
        let data = "ip_address,note\n1.0.0.5,a\nnot-an-ip,b\n,c\n";
        let set = read_records(data.as_bytes(), "ip_address").expect("should read");
        assert_eq!(set.records()[0].ip_int(), 16_777_221);
        assert_eq!(*set.records()[1].ip(), IpValue::Text("not-an-ip".to_string()));
        assert!(!set.records()[1].ip_parsed());
        assert_eq!(*set.records()[2].ip(), IpValue::Missing);
        assert_eq!(set.unparseable(), 2);
    }

    #[test]
    fn test_read_records_keeps_original_cells() {
        let data = "ip_address,device\n16777221.5,QVPSPJUOCKZAR\n";
        let set = read_records(data.as_bytes(), "ip_address").expect("should read");
        assert_eq!(
            set.records()[0].data(),
            &vec!["16777221.5".to_string(), "QVPSPJUOCKZAR".to_string()]
        );
    }

    #[test]
    fn test_read_records_na_cell_keeps_float_ips() {
        let data = "ip_address,id\n16777221.5,a\nNA,b\n";
        let set = read_records(data.as_bytes(), "ip_address").expect("should read");
        assert_eq!(*set.records()[0].ip(), IpValue::Float(16_777_221.5));
        assert_eq!(set.records()[0].ip_int(), 16_777_221);
        assert!(set.records()[0].ip_parsed());
        assert_eq!(*set.records()[1].ip(), IpValue::Missing);
        assert_eq!(set.unparseable(), 1);
        // Passthrough cells are kept verbatim, NA token included
        assert_eq!(
            set.records()[1].clone().into_data(),
            vec!["NA".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_read_records_missing_ip_column() {
        let data = "user_id,device\n1,x\n";
        let err = read_records(data.as_bytes(), "ip_address").unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(ref c) if c == "ip_address"));
    }

    #[test]
    fn test_read_records_header_only() {
        let set = read_records("ip_address\n".as_bytes(), "ip_address").expect("should read");
        assert!(set.is_empty());
    }

    #[test]
    fn test_read_records_ragged_row() {
        let data = "ip_address,note\n1.0.0.5\n";
        let err = read_records(data.as_bytes(), "ip_address").unwrap_err();
        assert!(matches!(err, DatasetError::Csv(_)));
    }
}
