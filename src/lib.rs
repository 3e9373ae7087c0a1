//! ip_geo_join library: country enrichment of records by IP range join
//!
//! This library normalizes the IP of every record to an integer and joins the
//! records against a table of disjoint `(lower_bound, upper_bound, country)`
//! ranges with a sorted backward-nearest search plus an upper-bound
//! containment filter.
//!
//! # Example
//!
//! ```
//! use ip_geo_join::{join, IpRange, RangeTable, RangeValidation, Record};
//!
//! let table = RangeTable::new(
//!     vec![IpRange::new(16_777_216, 16_777_471, "AU")],
//!     RangeValidation::Strict,
//! )?;
//! let records = vec![Record::new("1.0.0.5", "txn-1"), Record::new("9.9.9.9", "txn-2")];
//!
//! let rows = join(&records, &table);
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].country(), Some("AU"));
//! # Ok::<(), ip_geo_join::RangeTableError>(())
//! ```
//!
//! The whole pipeline (CSV in, enriched CSV/JSONL out) is available through
//! [`run_join`].

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod dataset;
mod error_handling;
pub mod export;
pub mod initialization;
pub mod join;
pub mod normalize;
pub mod ranges;
mod utils;

// Re-export public API
pub use config::{
    Config, FailOn, JoinMode, LogFormat, LogLevel, OutputFormat, RangeValidation,
    UnparseablePolicy,
};
pub use error_handling::{DatasetError, InitializationError, JoinStats, MissReason, RangeTableError};
pub use join::{join, join_with, resolve, JoinOptions, JoinOutcome, JoinedRecord};
pub use normalize::{normalize, try_normalize, IpInt, IpValue, Record, SENTINEL};
pub use ranges::{IpRange, RangeColumns, RangeTable};
pub use run::{run_join, JoinReport};

// Internal run module (reads both inputs, joins, exports)
mod run {
    use anyhow::{Context, Result};
    use log::info;
    use std::path::PathBuf;

    use crate::app::{print_join_statistics, print_simple_summary};
    use crate::config::Config;
    use crate::dataset::read_records_csv;
    use crate::error_handling::JoinStats;
    use crate::export::{export, ExportOptions};
    use crate::join::{join_with, JoinOptions};
    use crate::ranges::{read_ranges_csv, RangeColumns, RangeTable};
    use crate::utils::{Phase, TimingStats};

    /// Results of a join run.
    #[derive(Debug, Clone)]
    pub struct JoinReport {
        /// Records read from the input
        pub total_records: usize,
        /// Records a range claimed
        pub matched: usize,
        /// Records left without a country
        pub unmatched: usize,
        /// Records whose IP failed to normalize
        pub unparseable: usize,
        /// Rows written to the output
        pub written: usize,
        /// Ranges in the validated table
        pub ranges: usize,
        /// Output file, `None` for stdout
        pub output: Option<PathBuf>,
        /// Full statistics of the join
        pub stats: JoinStats,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs the full pipeline described by `config`.
    ///
    /// Reads the records and the range table, validates the table, joins and
    /// writes the enriched rows.
    ///
    /// # Errors
    ///
    /// Fails without writing anything if either input cannot be read, a
    /// required column is missing, a range bound is not an integer, or (with
    /// strict validation) the range table has inverted or overlapping ranges.
    /// Export failures are reported after the join.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ip_geo_join::{run_join, Config};
    /// use std::path::PathBuf;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = Config {
    ///     records: PathBuf::from("Fraud_Data.csv"),
    ///     ranges: PathBuf::from("IpAddress_to_Country.csv"),
    ///     output: Some(PathBuf::from("fraud_with_country.csv")),
    ///     ..Default::default()
    /// };
    /// let report = run_join(&config)?;
    /// println!("{} of {} records matched", report.matched, report.total_records);
    /// # Ok(())
    /// # }
    /// ```
    pub fn run_join(config: &Config) -> Result<JoinReport> {
        let start_time = std::time::Instant::now();
        let mut timing = TimingStats::new();

        let records = timing
            .time(Phase::ReadRecords, || {
                read_records_csv(&config.records, &config.ip_column)
            })
            .with_context(|| format!("Failed to read records from {}", config.records.display()))?;
        info!(
            "Read {} records from {}",
            records.len(),
            config.records.display()
        );

        let columns = RangeColumns {
            lower_bound: config.lower_column.clone(),
            upper_bound: config.upper_column.clone(),
            country: config.country_column.clone(),
        };
        let table = timing
            .time(Phase::LoadRanges, || {
                read_ranges_csv(&config.ranges, &columns)
                    .and_then(|rows| RangeTable::new(rows, config.range_validation))
            })
            .with_context(|| format!("Failed to load ranges from {}", config.ranges.display()))?;
        info!(
            "Loaded {} ranges from {}",
            table.len(),
            config.ranges.display()
        );

        let options = JoinOptions {
            mode: config.join_mode,
            unparseable: config.unparseable,
        };
        let outcome = timing.time(Phase::Join, || {
            join_with(records.records(), &table, &options)
        });

        let export_opts = ExportOptions {
            output: config.output.clone(),
            format: config.format,
        };
        let written = timing
            .time(Phase::Export, || {
                export(records.headers(), &outcome.rows, &export_opts)
            })
            .context("Failed to export joined records")?;

        let stats = outcome.stats;
        print_join_statistics(&stats);
        if config.show_timing {
            timing.log_summary();
        }

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        print_simple_summary(stats.records(), written, elapsed_seconds);

        Ok(JoinReport {
            total_records: stats.records(),
            matched: stats.matched(),
            unmatched: stats.total_misses(),
            unparseable: stats.unparseable(),
            written,
            ranges: table.len(),
            output: config.output.clone(),
            stats,
            elapsed_seconds,
        })
    }
}
