use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use scrollkit_core::Clock;

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollLeft,
    ScrollRight,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextSection,
    PrevSection,
    ToggleSection,    // Enter/space: fold the section at the top of the viewport
    CycleHeaderMode,  // 'm': default -> locking -> stacking
    GrowGutter,       // '>': widen the left gutter
    ShrinkGutter,     // '<': narrow the left gutter
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event<K: Clock>(key: KeyEvent, app: &App<K>) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,

        // Line scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::ScrollLeft,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::ScrollRight,
        (KeyCode::Left, KeyModifiers::NONE) => Action::ScrollLeft,
        (KeyCode::Right, KeyModifiers::NONE) => Action::ScrollRight,

        // Page scrolling (animated)
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::ScrollPageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::ScrollPageUp,
        (KeyCode::PageDown, _) => Action::ScrollPageDown,
        (KeyCode::PageUp, _) => Action::ScrollPageUp,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpToBottom,
        (KeyCode::Char('G'), KeyModifiers::NONE) => Action::JumpToBottom,
        (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::End, _) => Action::JumpToBottom,

        // Sections
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::NextSection,
        (KeyCode::Char('N'), KeyModifiers::SHIFT) => Action::PrevSection,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::PrevSection,
        (KeyCode::Enter, KeyModifiers::NONE) => Action::ToggleSection,
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::ToggleSection,
        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::CycleHeaderMode,

        // Gutters
        (KeyCode::Char('>'), _) => Action::GrowGutter,
        (KeyCode::Char('<'), _) => Action::ShrinkGutter,

        _ => Action::None,
    }
}
