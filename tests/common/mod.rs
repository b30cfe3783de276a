//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use std::path::PathBuf;
use std::time::Duration;

/// Create a test timeout duration for loader round trips
pub fn test_timeout() -> Duration {
    Duration::from_secs(5)
}

/// Path to a file under `tests/fixtures`
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Stage names in normalized order
pub fn stage_names(stages: &[p4lens::StageDescriptor]) -> Vec<&str> {
    stages.iter().map(|s| s.name.as_str()).collect()
}
