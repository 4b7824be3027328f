//! Terminal input translation.
//!
//! Turns crossterm events into the game's [`InputEvent`]s. Only key
//! presses count (repeats and releases are dropped), and a mouse press
//! only flaps when it lands on the canvas.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;

use crate::core::input::{InputEvent, Key};
use crate::ui::contains;

/// What the host should do with one terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostInput {
    /// Forward to the game loop.
    Game(InputEvent),
    /// Leave the game screen.
    Home,
    Ignored,
}

pub fn translate(event: &Event, canvas: Rect) -> HostInput {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse, canvas),
        _ => HostInput::Ignored,
    }
}

fn translate_key(key: &KeyEvent) -> HostInput {
    if key.kind != KeyEventKind::Press {
        return HostInput::Ignored;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => HostInput::Home,
            _ => HostInput::Ignored,
        };
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => HostInput::Home,
        KeyCode::Char(' ') => HostInput::Game(InputEvent::Key(Key::Space)),
        KeyCode::Up => HostInput::Game(InputEvent::Key(Key::Up)),
        KeyCode::Enter => HostInput::Game(InputEvent::Key(Key::Enter)),
        KeyCode::Char(c) => HostInput::Game(InputEvent::Key(Key::Char(c))),
        _ => HostInput::Game(InputEvent::Key(Key::Other)),
    }
}

fn translate_mouse(mouse: &MouseEvent, canvas: Rect) -> HostInput {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if contains(canvas, mouse.column, mouse.row) => {
            HostInput::Game(InputEvent::PointerDown)
        }
        _ => HostInput::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    const CANVAS: Rect = Rect {
        x: 10,
        y: 2,
        width: 48,
        height: 40,
    };

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16, kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_flap_keys() {
        assert_eq!(
            translate(&press(KeyCode::Char(' ')), CANVAS),
            HostInput::Game(InputEvent::Key(Key::Space))
        );
        assert_eq!(
            translate(&press(KeyCode::Up), CANVAS),
            HostInput::Game(InputEvent::Key(Key::Up))
        );
        assert_eq!(
            translate(&press(KeyCode::Enter), CANVAS),
            HostInput::Game(InputEvent::Key(Key::Enter))
        );
    }

    #[test]
    fn test_restart_key_passes_through() {
        assert_eq!(
            translate(&press(KeyCode::Char('R')), CANVAS),
            HostInput::Game(InputEvent::Key(Key::Char('R')))
        );
    }

    #[test]
    fn test_home_keys() {
        assert_eq!(translate(&press(KeyCode::Esc), CANVAS), HostInput::Home);
        assert_eq!(translate(&press(KeyCode::Char('q')), CANVAS), HostInput::Home);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(&ctrl_c, CANVAS), HostInput::Home);
    }

    #[test]
    fn test_release_and_repeat_ignored() {
        for kind in [KeyEventKind::Release, KeyEventKind::Repeat] {
            let event = Event::Key(KeyEvent {
                code: KeyCode::Char(' '),
                modifiers: KeyModifiers::NONE,
                kind,
                state: KeyEventState::NONE,
            });
            assert_eq!(translate(&event, CANVAS), HostInput::Ignored);
        }
    }

    #[test]
    fn test_click_inside_canvas_flaps() {
        let down = MouseEventKind::Down(MouseButton::Left);
        assert_eq!(
            translate(&click(10, 2, down), CANVAS),
            HostInput::Game(InputEvent::PointerDown)
        );
        assert_eq!(
            translate(&click(57, 41, down), CANVAS),
            HostInput::Game(InputEvent::PointerDown)
        );
    }

    #[test]
    fn test_click_outside_canvas_or_other_buttons_ignored() {
        let down = MouseEventKind::Down(MouseButton::Left);
        assert_eq!(translate(&click(9, 2, down), CANVAS), HostInput::Ignored);
        assert_eq!(translate(&click(58, 10, down), CANVAS), HostInput::Ignored);
        assert_eq!(
            translate(&click(20, 10, MouseEventKind::Down(MouseButton::Right)), CANVAS),
            HostInput::Ignored
        );
        assert_eq!(
            translate(&click(20, 10, MouseEventKind::Up(MouseButton::Left)), CANVAS),
            HostInput::Ignored
        );
    }

    #[test]
    fn test_resize_ignored() {
        assert_eq!(translate(&Event::Resize(80, 24), CANVAS), HostInput::Ignored);
    }
}
