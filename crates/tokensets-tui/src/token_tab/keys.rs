//! Key bindings for the token-set tabs
//!
//! - **Tabs**: Tab, ←/→ or 1/2 to switch, mouse click on a title
//! - **Rows**: ↑/↓ (j/k), Home/End to move, Enter or click to open
//! - **Table**: s cycles the sort column, S flips direction, r refreshes
//! - **App**: l toggles the log panel, q/Esc quits

use {
    super::state::{AppState, TabKey},
    crossterm::event::KeyCode,
};

/// What a key press asks the event loop to do beyond mutating state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    None,
    /// Open the selected row in the browser
    OpenSelected,
}

/// Short help string for the footer
pub fn help_text() -> &'static str {
    "Tab: Switch | ↑/↓: Move | Enter: Open | s/S: Sort | r: Refresh | l: Logs | q: Quit"
}

/// Apply a key press to the app state.
pub fn handle_key(app: &mut AppState, code: KeyCode) -> KeyAction {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab | KeyCode::Right => app.switch_tab(app.active_tab.next()),
        KeyCode::BackTab | KeyCode::Left => app.switch_tab(app.active_tab.prev()),
        KeyCode::Char('1') => app.switch_tab(TabKey::Portfolios),
        KeyCode::Char('2') => app.switch_tab(TabKey::RebalancingSets),
        KeyCode::Down | KeyCode::Char('j') => app.active_mut().select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.active_mut().select_prev(),
        KeyCode::Home | KeyCode::Char('g') => app.active_mut().select_first(),
        KeyCode::End | KeyCode::Char('G') => app.active_mut().select_last(),
        KeyCode::Char('s') => app.active_mut().cycle_sort(),
        KeyCode::Char('S') => app.active_mut().toggle_sort_direction(),
        KeyCode::Char('r') => app.active_mut().refresh(),
        KeyCode::Char('l') => app.show_logs = !app.show_logs,
        KeyCode::Enter => return KeyAction::OpenSelected,
        _ => {},
    }
    KeyAction::None
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{i18n::Locale, token_tab::state::LogBuffer},
        std::{
            collections::VecDeque,
            sync::{Arc, Mutex},
        },
    };

    fn app() -> AppState {
        let logs: LogBuffer = Arc::new(Mutex::new(VecDeque::new()));
        AppState::new(TabKey::Portfolios, Locale::En, 120, logs)
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = self::app();
        handle_key(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn tab_switching_keys() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Tab);
        assert_eq!(app.active_tab, TabKey::RebalancingSets);
        handle_key(&mut app, KeyCode::Tab);
        assert_eq!(app.active_tab, TabKey::Portfolios);
        handle_key(&mut app, KeyCode::Left);
        assert_eq!(app.active_tab, TabKey::RebalancingSets);
        handle_key(&mut app, KeyCode::Char('1'));
        assert_eq!(app.active_tab, TabKey::Portfolios);
        handle_key(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_tab, TabKey::RebalancingSets);
    }

    #[test]
    fn enter_requests_open() {
        let mut app = app();
        assert_eq!(handle_key(&mut app, KeyCode::Enter), KeyAction::OpenSelected);
        assert_eq!(handle_key(&mut app, KeyCode::Char('x')), KeyAction::None);
    }

    #[test]
    fn log_panel_toggle() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('l'));
        assert!(app.show_logs);
        handle_key(&mut app, KeyCode::Char('l'));
        assert!(!app.show_logs);
    }
}
