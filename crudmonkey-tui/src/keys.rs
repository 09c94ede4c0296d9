//! Keybinding definitions for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// How key presses are interpreted on the active page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Menu and list pages.
    Browse,
    /// Form pages: printable keys go into the focused input.
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Browse mode
    /// Quit from the menu; back on a list.
    Quit,
    /// Quit from any browse page.
    ForceQuit,
    Back,
    MoveUp,
    MoveDown,
    Select,
    NewItem,
    Refresh,
    OpenHelp,
    JumpTo(usize),

    // Edit mode
    Insert(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    NextFocus,
    PrevFocus,
    Activate,
    Save,
    Cancel,
}

pub fn map_key(event: KeyEvent, mode: InputMode) -> Option<KeyAction> {
    match mode {
        InputMode::Browse => map_browse_key(event),
        InputMode::Edit => map_edit_key(event),
    }
}

fn map_browse_key(event: KeyEvent) -> Option<KeyAction> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(KeyAction::ForceQuit),
            KeyCode::Char('r') => Some(KeyAction::Refresh),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(KeyAction::Quit),
        KeyCode::Char('?') => Some(KeyAction::OpenHelp),
        KeyCode::Char('n') => Some(KeyAction::NewItem),
        KeyCode::Char('r') => Some(KeyAction::Refresh),
        KeyCode::Enter => Some(KeyAction::Select),
        KeyCode::Esc => Some(KeyAction::Back),
        KeyCode::Up | KeyCode::Char('k') => Some(KeyAction::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(KeyAction::MoveDown),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .map(|digit| KeyAction::JumpTo(digit as usize - 1)),
        _ => None,
    }
}

fn map_edit_key(event: KeyEvent) -> Option<KeyAction> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('s') => Some(KeyAction::Save),
            KeyCode::Char('c') => Some(KeyAction::Cancel),
            _ => None,
        };
    }
    if modifiers.contains(KeyModifiers::ALT) {
        return None;
    }

    match code {
        KeyCode::Esc => Some(KeyAction::Cancel),
        KeyCode::Enter => Some(KeyAction::Activate),
        KeyCode::Tab | KeyCode::Down => Some(KeyAction::NextFocus),
        KeyCode::BackTab | KeyCode::Up => Some(KeyAction::PrevFocus),
        KeyCode::Left => Some(KeyAction::CursorLeft),
        KeyCode::Right => Some(KeyAction::CursorRight),
        KeyCode::Home => Some(KeyAction::CursorHome),
        KeyCode::End => Some(KeyAction::CursorEnd),
        KeyCode::Backspace => Some(KeyAction::Backspace),
        KeyCode::Delete => Some(KeyAction::Delete),
        KeyCode::Char(c) => Some(KeyAction::Insert(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_browse_letters_are_commands() {
        assert_eq!(map_key(key(KeyCode::Char('n')), InputMode::Browse), Some(KeyAction::NewItem));
        assert_eq!(map_key(key(KeyCode::Char('q')), InputMode::Browse), Some(KeyAction::Quit));
        assert_eq!(map_key(key(KeyCode::Esc), InputMode::Browse), Some(KeyAction::Back));
    }

    #[test]
    fn test_edit_letters_are_text() {
        assert_eq!(map_key(key(KeyCode::Char('n')), InputMode::Edit), Some(KeyAction::Insert('n')));
        assert_eq!(map_key(key(KeyCode::Char('q')), InputMode::Edit), Some(KeyAction::Insert('q')));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT), InputMode::Edit),
            Some(KeyAction::Insert('B'))
        );
    }

    #[test]
    fn test_edit_escape_cancels_and_ctrl_s_saves() {
        assert_eq!(map_key(key(KeyCode::Esc), InputMode::Edit), Some(KeyAction::Cancel));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL), InputMode::Edit),
            Some(KeyAction::Save)
        );
    }

    #[test]
    fn test_ctrl_c_force_quits_in_browse_and_cancels_in_edit() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, InputMode::Browse), Some(KeyAction::ForceQuit));
        assert_eq!(map_key(ctrl_c, InputMode::Edit), Some(KeyAction::Cancel));
    }

    #[test]
    fn test_digit_zero_is_unmapped() {
        assert_eq!(map_key(key(KeyCode::Char('0')), InputMode::Browse), None);
    }
}
