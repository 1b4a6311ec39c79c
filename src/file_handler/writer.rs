//! Writing output text to files.

use crate::error::{LoglensError, Result};
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write `text` to `path`, creating the file or truncating an existing one
pub fn write_output(path: &Path, text: &str) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        LoglensError::file_error(format!("Cannot create output file {}", path.display()), e)
    })?;
    file.write_all(text.as_bytes()).map_err(|e| {
        LoglensError::file_error(format!("Failed to write {}", path.display()), e)
    })?;
    info!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}
