//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_COUNTRY_COLUMN, DEFAULT_IP_COLUMN, DEFAULT_LOWER_BOUND_COLUMN,
    DEFAULT_UPPER_BOUND_COLUMN,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Format of the enriched output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// CSV with the original columns followed by the join columns
    Csv,
    /// One JSON object per line
    Jsonl,
}

/// What happens to records that no range contains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum JoinMode {
    /// Drop unmatched records (filtering semantics)
    #[default]
    Inner,
    /// Keep every record; unmatched ones carry no country
    Left,
}

/// How records whose IP failed to normalize take part in the join.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum UnparseablePolicy {
    /// Join with the sentinel value `0`, like any other address. A range whose
    /// lower bound is `0` will claim these records.
    #[default]
    Sentinel,
    /// Treat the record as unmatched before the range search
    Unmatched,
}

/// How the range table reacts to inverted or overlapping ranges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RangeValidation {
    /// Reject the table
    #[default]
    Strict,
    /// Log a warning and keep the rows
    Lenient,
}

/// Exit code policy applied after a successful run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Always exit 0 when the run completes
    #[default]
    Never,
    /// Exit 2 if any record went unmatched
    AnyUnmatched,
    /// Exit 2 if the unmatched percentage exceeds `--fail-on-pct-threshold`
    PctGreaterThan,
}

/// Library and CLI configuration.
///
/// Parsed by `clap` in the binary; library callers can build it directly.
///
/// # Examples
///
/// ```no_run
/// use ip_geo_join::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     records: PathBuf::from("Fraud_Data.csv"),
///     ranges: PathBuf::from("IpAddress_to_Country.csv"),
///     output: Some(PathBuf::from("fraud_with_country.csv")),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ip_geo_join",
    about = "Adds a country column to records by range-joining their IP addresses."
)]
pub struct Config {
    /// Records CSV (use "-" for stdin)
    #[arg(value_parser)]
    pub records: PathBuf,

    /// IP range CSV with lower bound, upper bound and country columns
    #[arg(value_parser)]
    pub ranges: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output format: csv|jsonl
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Name of the column holding the IP in the records CSV
    #[arg(long, default_value = DEFAULT_IP_COLUMN)]
    pub ip_column: String,

    /// Name of the lower bound column in the range CSV
    #[arg(long, default_value = DEFAULT_LOWER_BOUND_COLUMN)]
    pub lower_column: String,

    /// Name of the upper bound column in the range CSV
    #[arg(long, default_value = DEFAULT_UPPER_BOUND_COLUMN)]
    pub upper_column: String,

    /// Name of the country column in the range CSV
    #[arg(long, default_value = DEFAULT_COUNTRY_COLUMN)]
    pub country_column: String,

    /// Join mode: inner drops unmatched records, left keeps them
    #[arg(long, value_enum, default_value_t = JoinMode::Inner)]
    pub join_mode: JoinMode,

    /// Handling of IPs that fail to normalize: sentinel|unmatched
    #[arg(long, value_enum, default_value_t = UnparseablePolicy::Sentinel)]
    pub unparseable: UnparseablePolicy,

    /// Range table validation: strict|lenient
    #[arg(long, value_enum, default_value_t = RangeValidation::Strict)]
    pub range_validation: RangeValidation,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Show per-phase timing at the end of the run
    #[arg(long)]
    pub show_timing: bool,

    /// Exit code policy: never|any-unmatched|pct-greater-than
    #[arg(long, value_enum, default_value_t = FailOn::Never)]
    pub fail_on: FailOn,

    /// Unmatched percentage above which `pct-greater-than` fails the run
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub fail_on_pct_threshold: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            records: PathBuf::from("Fraud_Data.csv"),
            ranges: PathBuf::from("IpAddress_to_Country.csv"),
            output: None,
            format: OutputFormat::Csv,
            ip_column: DEFAULT_IP_COLUMN.to_string(),
            lower_column: DEFAULT_LOWER_BOUND_COLUMN.to_string(),
            upper_column: DEFAULT_UPPER_BOUND_COLUMN.to_string(),
            country_column: DEFAULT_COUNTRY_COLUMN.to_string(),
            join_mode: JoinMode::Inner,
            unparseable: UnparseablePolicy::Sentinel,
            range_validation: RangeValidation::Strict,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            show_timing: false,
            fail_on: FailOn::Never,
            fail_on_pct_threshold: 10,
        }
    }
}
