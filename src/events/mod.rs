use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::broadcast;

pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Clone, Debug)]
pub enum FrameworkEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<FrameworkEvent>,
}

impl EventBus {
    pub fn new(buffer: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer);
        Self { tx }
    }

    pub fn publish(&self, event: FrameworkEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FrameworkEvent> {
        self.tx.subscribe()
    }
}

/// Terminal input the page reacts to. Mouse, focus and paste events are
/// dropped; key releases too, so every key acts once.
pub fn map_terminal_event(event: CrosstermEvent) -> Option<FrameworkEvent> {
    match event {
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => {
            Some(FrameworkEvent::Key(key))
        }
        CrosstermEvent::Resize(cols, rows) => Some(FrameworkEvent::Resize(cols, rows)),
        _ => None,
    }
}

pub fn pressed_key(event: &FrameworkEvent) -> Option<&KeyEvent> {
    match event {
        FrameworkEvent::Key(key) => Some(key),
        _ => None,
    }
}

pub fn is_ctrl_c(event: &FrameworkEvent) -> bool {
    is_ctrl(event, 'c')
}

/// `Ctrl` plus the given letter, in either case.
pub fn is_ctrl(event: &FrameworkEvent, letter: char) -> bool {
    match pressed_key(event) {
        Some(key) => match key.code {
            KeyCode::Char(ch) => {
                ch.eq_ignore_ascii_case(&letter) && key.modifiers.contains(KeyModifiers::CONTROL)
            }
            _ => false,
        },
        None => false,
    }
}
