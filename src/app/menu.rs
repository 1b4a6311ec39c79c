//! Menu entries of the interactive session.

/// Entries of the main menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainCommand {
    LoadFiles,
    ConfigureFormat,
    Filter,
    Sort,
    Statistics,
    Output,
    Exit,
}

impl MainCommand {
    pub const ALL: [MainCommand; 7] = [
        MainCommand::LoadFiles,
        MainCommand::ConfigureFormat,
        MainCommand::Filter,
        MainCommand::Sort,
        MainCommand::Statistics,
        MainCommand::Output,
        MainCommand::Exit,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            MainCommand::LoadFiles => "Load log files",
            MainCommand::ConfigureFormat => "Configure log format",
            MainCommand::Filter => "Filter logs",
            MainCommand::Sort => "Sort logs",
            MainCommand::Statistics => "Show statistics",
            MainCommand::Output => "Print or save logs",
            MainCommand::Exit => "Exit",
        }
    }
}

/// Where a collection or report goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    Console,
    File,
}

impl OutputTarget {
    pub const ALL: [OutputTarget; 2] = [OutputTarget::Console, OutputTarget::File];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputTarget::Console => "Print to console",
            OutputTarget::File => "Save to file",
        }
    }
}

/// Numbered menu labels: `1. Load log files`
pub fn numbered<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .enumerate()
        .map(|(index, label)| format!("{}. {}", index + 1, label.as_ref()))
        .collect()
}
