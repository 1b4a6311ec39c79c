//! The presentation seam between the interactive session and the terminal.

use crate::error::Result;

/// How a block of text should be framed and colored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    /// Unframed text, e.g. rendered records
    Plain,
    Info,
    Error,
    Success,
    Header,
}

/// User interaction needed by the interactive session
pub trait Prompter {
    /// Show a single-choice menu; `None` means the user cancelled
    fn prompt_choice(&mut self, title: &str, options: &[String]) -> Result<Option<usize>>;

    /// Ask for one line of free text (without the line terminator)
    fn prompt_line(&mut self, label: &str) -> Result<String>;

    /// Print a framed block of text
    fn print_block(&mut self, text: &str, style: BlockStyle) -> Result<()>;
}
