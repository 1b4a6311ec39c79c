//! File validation utilities for ensuring input files can be read.
//!
//! Checks run before a file is opened so that each failure carries a precise
//! message naming the offending path.

use crate::error::{LoglensError, Result};
use std::fs::File;
use std::path::Path;

/// Validate that a file path is accessible and suitable for reading
///
/// # Validations Performed
/// - Path exists
/// - Path is a regular file (not a directory)
/// - File size is reasonable for a log loaded fully into memory
/// - File is readable by the current process
///
/// Empty files are accepted; they simply decode to no records.
pub fn validate_file_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(LoglensError::file_error(
            format!("File does not exist: {}", path.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "File not found"),
        ));
    }

    let metadata = std::fs::metadata(path).map_err(|e| {
        LoglensError::file_error(format!("Failed to read metadata: {}", path.display()), e)
    })?;

    if !metadata.is_file() {
        return Err(LoglensError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    // Whole file is held in memory
    const MAX_REASONABLE_SIZE: u64 = 4 * 1024 * 1024 * 1024; // 4GB
    let file_size = metadata.len();
    if file_size > MAX_REASONABLE_SIZE {
        return Err(LoglensError::file_error(
            format!(
                "File is too large to load ({}GB): {}",
                file_size / (1024 * 1024 * 1024),
                path.display()
            ),
            std::io::Error::new(std::io::ErrorKind::InvalidData, "File too large"),
        ));
    }

    File::open(path).map_err(|e| {
        LoglensError::file_error(format!("Cannot open file for reading: {}", path.display()), e)
    })?;

    Ok(())
}
