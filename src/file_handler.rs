//! File access for input logs and output reports.
//!
//! Input files are validated and read whole into provenance-tagged
//! [`SourceBlock`](crate::codec::SourceBlock)s; output text is written to a
//! created or truncated file.

pub mod reader;
pub mod validation;
pub mod writer;

pub use reader::{load_sources, parse_path_list, read_source, LoadOutcome};
pub use validation::validate_file_path;
pub use writer::write_output;
