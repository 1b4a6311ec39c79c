//! Selection state of a single-choice menu.

/// Navigation and selection keys, independent of the terminal backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Up,
    Down,
    Select,
    Cancel,
}

/// What a menu action led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Pending,
    Selected(usize),
    Cancelled,
}

/// Title, entries and the highlighted entry. Movement wraps around.
#[derive(Debug, Clone)]
pub struct MenuState {
    pub title: String,
    pub options: Vec<String>,
    selected: usize,
}

impl MenuState {
    pub fn new(title: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            title: title.into(),
            options,
            selected: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn apply(&mut self, action: MenuAction) -> MenuOutcome {
        let count = self.options.len();
        match action {
            MenuAction::Cancel => MenuOutcome::Cancelled,
            // Nothing to pick from
            _ if count == 0 => MenuOutcome::Cancelled,
            MenuAction::Up => {
                self.selected = if self.selected == 0 { count - 1 } else { self.selected - 1 };
                MenuOutcome::Pending
            }
            MenuAction::Down => {
                self.selected = (self.selected + 1) % count;
                MenuOutcome::Pending
            }
            MenuAction::Select => MenuOutcome::Selected(self.selected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> MenuState {
        MenuState::new(
            "Pick",
            vec!["one".to_string(), "two".to_string(), "three".to_string()],
        )
    }

    #[test]
    fn test_navigation_wraps() {
        let mut state = menu();
        assert_eq!(state.apply(MenuAction::Up), MenuOutcome::Pending);
        assert_eq!(state.selected(), 2);
        state.apply(MenuAction::Down);
        assert_eq!(state.selected(), 0);
        state.apply(MenuAction::Down);
        assert_eq!(state.apply(MenuAction::Select), MenuOutcome::Selected(1));
    }

    #[test]
    fn test_cancel() {
        let mut state = menu();
        assert_eq!(state.apply(MenuAction::Cancel), MenuOutcome::Cancelled);
    }

    #[test]
    fn test_empty_menu_cannot_select() {
        let mut state = MenuState::new("Empty", Vec::new());
        assert_eq!(state.apply(MenuAction::Down), MenuOutcome::Cancelled);
        assert_eq!(state.apply(MenuAction::Select), MenuOutcome::Cancelled);
    }
}
