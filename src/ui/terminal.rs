//! Terminal implementation of [`Prompter`] using ratatui
//!
//! Menus are drawn with ratatui on the alternate screen in raw mode. Line
//! input and message blocks use the normal screen so that printed output
//! stays in the scrollback after the session ends.

use crate::error::{LoglensError, Result};
use crate::ui::{BlockStyle, ColorTheme, MenuAction, MenuOutcome, MenuState, Prompter};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color as CColor, Print, ResetColor, SetForegroundColor},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io::{self, BufRead, Stdout, Write};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

const MENU_HINT: &str = "[ ↑/↓ ] Navigate   [ Enter ] Select   [ Esc ] Back";

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    /// Create a new terminal UI instance with the default theme
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme: ColorTheme::default(),
        })
    }

    /// Create terminal UI with custom theme
    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    /// Convert key events to menu actions
    fn key_to_action(&self, key: KeyCode, modifiers: KeyModifiers) -> Option<MenuAction> {
        match (key, modifiers) {
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Some(MenuAction::Up),
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                Some(MenuAction::Down)
            }
            (KeyCode::Enter, _) => Some(MenuAction::Select),
            (KeyCode::Esc, _)
            | (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(MenuAction::Cancel),
            _ => None,
        }
    }

    /// Enter raw mode and the alternate screen
    pub fn initialize(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            return Ok(());
        }
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    /// Restore the terminal state
    pub fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.terminal = None;
        }
        Ok(())
    }

    fn run_menu(&mut self, state: &mut MenuState) -> Result<Option<usize>> {
        self.initialize()?;
        loop {
            if let Some(ref mut terminal) = self.terminal {
                let theme = &self.theme;
                terminal.draw(|frame| Self::render_menu(frame, state, theme))?;
            }

            let Event::Key(key_event) = event::read()? else {
                continue;
            };
            if key_event.kind != KeyEventKind::Press {
                continue;
            }
            let Some(action) = self.key_to_action(key_event.code, key_event.modifiers) else {
                continue;
            };
            match state.apply(action) {
                MenuOutcome::Pending => {}
                MenuOutcome::Selected(index) => return Ok(Some(index)),
                MenuOutcome::Cancelled => return Ok(None),
            }
        }
    }

    fn render_menu(frame: &mut Frame, state: &MenuState, theme: &ColorTheme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(frame.size());

        let items: Vec<ListItem> = state
            .options
            .iter()
            .map(|option| ListItem::new(option.as_str()).style(theme.unselected))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Line::styled(format!(" {} ", state.title), theme.title)),
            )
            .highlight_style(theme.selection)
            .highlight_symbol("▸ ");
        let mut list_state = ListState::default().with_selected(Some(state.selected()));
        frame.render_stateful_widget(list, chunks[0], &mut list_state);

        Self::render_hint(frame, chunks[1], theme);
    }

    fn render_hint(frame: &mut Frame, area: Rect, theme: &ColorTheme) {
        let hint = Paragraph::new(MENU_HINT).style(Style::default().fg(theme.hint));
        frame.render_widget(hint, area);
    }
}

impl TerminalUI {
    fn read_line(&mut self, label: &str) -> Result<String> {
        self.cleanup()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(to_crossterm(self.theme.info_text)),
            Print(label),
            ResetColor,
            Print(" ")
        )?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(LoglensError::ui("standard input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn write_block(&mut self, text: &str, style: BlockStyle) -> Result<()> {
        self.cleanup()?;
        let mut stdout = io::stdout();
        queue!(stdout, SetForegroundColor(to_crossterm(self.theme.block_color(style))))?;
        for line in frame_block(text, style) {
            queue!(stdout, Print(line), Print("\n"))?;
        }
        queue!(stdout, ResetColor)?;
        stdout.flush()?;
        Ok(())
    }
}

impl Prompter for TerminalUI {
    fn prompt_choice(&mut self, title: &str, options: &[String]) -> Result<Option<usize>> {
        let mut state = MenuState::new(title, options.to_vec());
        let result = self.run_menu(&mut state);
        self.cleanup().map_err(terminal_error)?;
        result.map_err(terminal_error)
    }

    fn prompt_line(&mut self, label: &str) -> Result<String> {
        self.read_line(label).map_err(terminal_error)
    }

    fn print_block(&mut self, text: &str, style: BlockStyle) -> Result<()> {
        self.write_block(text, style).map_err(terminal_error)
    }
}

/// Terminal I/O failures surface as UI errors rather than file errors
fn terminal_error(err: LoglensError) -> LoglensError {
    match err {
        LoglensError::FileError { message, source } => {
            LoglensError::ui(format!("{message}: {source}"))
        }
        other => other,
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Frame `text` with box-drawing characters for the given style
pub fn frame_block(text: &str, style: BlockStyle) -> Vec<String> {
    if style == BlockStyle::Plain {
        return text.lines().map(str::to_string).collect();
    }

    let lines: Vec<&str> = if text.is_empty() { vec![""] } else { text.lines().collect() };

    if style == BlockStyle::Header {
        return lines
            .iter()
            .map(|line| format!("══════════ {} ══════════", line.to_uppercase()))
            .collect();
    }

    let prefix_width = if style == BlockStyle::Error { 2 } else { 0 };
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + prefix_width;
    let (top_left, top_right, bottom_left, bottom_right, horizontal, vertical) = match style {
        BlockStyle::Error => ('╔', '╗', '╚', '╝', '═', '║'),
        _ => ('╭', '╮', '╰', '╯', '─', '│'),
    };
    let rule = horizontal.to_string().repeat(width + 2);

    let mut framed = Vec::with_capacity(lines.len() + 2);
    framed.push(format!("{top_left}{rule}{top_right}"));
    for (index, line) in lines.iter().enumerate() {
        let content = match (style, index) {
            (BlockStyle::Error, 0) => format!("! {line}"),
            (BlockStyle::Error, _) => format!("  {line}"),
            _ => line.to_string(),
        };
        let padding = width - content.chars().count();
        framed.push(format!("{vertical} {content}{} {vertical}", " ".repeat(padding)));
    }
    framed.push(format!("{bottom_left}{rule}{bottom_right}"));
    framed
}

fn to_crossterm(color: Color) -> CColor {
    match color {
        Color::Reset => CColor::Reset,
        Color::Black => CColor::Black,
        Color::Red => CColor::DarkRed,
        Color::Green => CColor::DarkGreen,
        Color::Yellow => CColor::DarkYellow,
        Color::Blue => CColor::DarkBlue,
        Color::Magenta => CColor::DarkMagenta,
        Color::Cyan => CColor::DarkCyan,
        Color::Gray => CColor::Grey,
        Color::DarkGray => CColor::DarkGrey,
        Color::LightRed => CColor::Red,
        Color::LightGreen => CColor::Green,
        Color::LightYellow => CColor::Yellow,
        Color::LightBlue => CColor::Blue,
        Color::LightMagenta => CColor::Magenta,
        Color::LightCyan => CColor::Cyan,
        Color::White => CColor::White,
        Color::Rgb(r, g, b) => CColor::Rgb { r, g, b },
        Color::Indexed(i) => CColor::AnsiValue(i),
    }
}
