//! Where documents come from.

use std::path::Path;

use crate::error::{Result, ResultExt};

/// Fetches raw document text for a location.
#[cfg_attr(test, mockall::automock)]
pub trait StructureSource: Send {
    fn fetch(&self, location: &Path) -> Result<String>;
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl StructureSource for FileSource {
    fn fetch(&self, location: &Path) -> Result<String> {
        std::fs::read_to_string(location).with_context(|| format!("Failed to read {:?}", location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_source_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("program.json");
        std::fs::write(&path, "{}").unwrap();
        assert_eq!(FileSource.fetch(&path).unwrap(), "{}");
    }

    #[test]
    fn test_file_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource.fetch(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }
}
