//! Color theme and styling definitions using ratatui colors
//!
//! The same theme styles the selection menu (drawn with ratatui) and the
//! framed message blocks printed between menus.

use crate::ui::BlockStyle;
use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Menu title line
    pub title: Style,

    /// Highlighted menu entry
    pub selection: Style,

    /// Menu entries that are not highlighted
    pub unselected: Style,

    /// Key hints under the menu
    pub hint: Color,

    /// Unframed output
    pub plain_text: Color,

    /// Error blocks
    pub error_text: Color,

    /// Success blocks
    pub success_text: Color,

    /// Informational blocks
    pub info_text: Color,

    /// Section headers
    pub header_text: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selection: Style::default().fg(Color::White).bg(Color::Blue),
            unselected: Style::default().fg(Color::DarkGray),
            hint: Color::Gray,
            plain_text: Color::Reset,
            error_text: Color::Red,
            success_text: Color::Green,
            info_text: Color::Cyan,
            header_text: Color::Yellow,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            selection: Style::default().fg(Color::Black).bg(Color::White),
            unselected: Style::default(),
            hint: Color::White,
            plain_text: Color::Reset,
            error_text: Color::White,
            success_text: Color::White,
            info_text: Color::White,
            header_text: Color::White,
        }
    }

    /// Foreground color for a message block
    pub fn block_color(&self, style: BlockStyle) -> Color {
        match style {
            BlockStyle::Plain => self.plain_text,
            BlockStyle::Info => self.info_text,
            BlockStyle::Error => self.error_text,
            BlockStyle::Success => self.success_text,
            BlockStyle::Header => self.header_text,
        }
    }
}
