//! Terminal UI module with ratatui
//!
//! The interactive session talks to the user only through the [`Prompter`]
//! trait. [`TerminalUI`] implements it on a real terminal; tests script it
//! with a mock.

pub mod prompter;
pub mod state;
pub mod terminal;
pub mod theme;

// Re-export public API
pub use prompter::{BlockStyle, Prompter};
pub use ratatui::style::{Color, Style};
pub use state::{MenuAction, MenuOutcome, MenuState};
pub use terminal::TerminalUI;
pub use theme::ColorTheme;

#[cfg(test)]
pub use prompter::tests::MockPrompter;
