//! Reading input log files into provenance-tagged blocks.

use crate::codec::SourceBlock;
use crate::error::{LoglensError, Result};
use crate::file_handler::validation::validate_file_path;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Blocks read successfully plus one error per file that could not be read.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub blocks: Vec<SourceBlock>,
    pub failures: Vec<LoglensError>,
}

impl LoadOutcome {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Validate and read one file; the block is tagged with the path as given
pub fn read_source(path: &Path) -> Result<SourceBlock> {
    validate_file_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|e| {
        LoglensError::file_error(format!("Failed to read {}", path.display()), e)
    })?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(SourceBlock::new(path.display().to_string(), text))
}

/// Read every path in order.
///
/// A file that fails does not stop the batch: its error is collected and
/// the remaining files are still read.
pub fn load_sources<P: AsRef<Path>>(paths: &[P]) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();
    for path in paths {
        let path = path.as_ref();
        match read_source(path) {
            Ok(block) => outcome.blocks.push(block),
            Err(err) => {
                warn!("Skipping {}: {}", path.display(), err);
                outcome.failures.push(err);
            }
        }
    }
    outcome
}

/// Split a comma-separated list of paths typed by the user
pub fn parse_path_list(input: &str) -> Vec<PathBuf> {
    input
        .split(',')
        .map(|part| part.trim().trim_matches('"'))
        .filter(|part| !part.is_empty())
        .map(PathBuf::from)
        .collect()
}
