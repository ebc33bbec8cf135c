use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;

/// Handle a key event.
///
/// Release events (reported by kitty-protocol terminals) are dropped so a
/// navigation step fires once per press or repeat; everything outside the
/// navigation surface is ignored.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    match key.code {
        KeyCode::Left => app.select_drive(-1),
        KeyCode::Right => app.select_drive(1),
        KeyCode::Up => app.select_entry(-1),
        KeyCode::Down => app.select_entry(1),
        KeyCode::Enter => app.enter_dir(),
        KeyCode::Backspace => app.go_to_parent(),
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        _ => {}
    }
}
