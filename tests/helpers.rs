// Shared test helpers for writing CSV fixtures and building configs.

use std::path::{Path, PathBuf};

use ip_geo_join::Config;
use tempfile::TempDir;

/// Header of the range fixtures, matching the default column names.
#[allow(dead_code)] // Used by other test files
pub const RANGE_HEADER: &str = "lower_bound_ip_address,upper_bound_ip_address,country";

/// Writes `contents` to `name` inside `dir` and returns the path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture");
    path
}

/// Creates a temp dir holding `records.csv` and `ranges.csv`, and a config
/// pointing at them with output going to `out.csv`.
#[allow(dead_code)] // Used by other test files
pub fn fixture_config(records: &str, ranges: &str) -> (TempDir, Config) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let records_path = write_fixture(dir.path(), "records.csv", records);
    let ranges_path = write_fixture(dir.path(), "ranges.csv", ranges);
    let config = Config {
        records: records_path,
        ranges: ranges_path,
        output: Some(dir.path().join("out.csv")),
        ..Default::default()
    };
    (dir, config)
}

/// Reads the output file of a config back as a string.
#[allow(dead_code)] // Used by other test files
pub fn read_output(config: &Config) -> String {
    let path = config.output.as_ref().expect("config should have an output path");
    std::fs::read_to_string(path).expect("Failed to read output")
}
