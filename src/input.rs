use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use glam::Vec2;
use ratatui::layout::Rect;
use std::time::Duration;

use crate::config::GameConfig;
use crate::entities::{GameState, HeldKeys};
use crate::session::FrameInput;

/// How long a key counts as held after its last press or repeat when the
/// terminal cannot report releases. Must outlast the OS key-repeat delay.
pub const KEY_REPEAT_GRACE: Duration = Duration::from_millis(300);

/// Discrete, one-shot input events produced once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Fire,
    Quit,
}

/// Latch for one directional key
#[derive(Debug, Default, Clone, Copy)]
struct KeyLatch {
    last_seen: Option<Duration>,
}

impl KeyLatch {
    fn press(&mut self, now: Duration) {
        self.last_seen = Some(now);
    }

    fn release(&mut self) {
        self.last_seen = None;
    }

    fn is_held(&self, now: Duration, grace: Option<Duration>) -> bool {
        match (self.last_seen, grace) {
            (Some(_), None) => true,
            (Some(seen), Some(grace)) => now.saturating_sub(seen) <= grace,
            (None, _) => false,
        }
    }
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    up: KeyLatch,
    down: KeyLatch,
    left: KeyLatch,
    right: KeyLatch,
}

impl KeyState {
    fn latch_mut(&mut self, code: KeyCode) -> Option<&mut KeyLatch> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(&mut self.up),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(&mut self.down),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(&mut self.left),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(&mut self.right),
            _ => None,
        }
    }

    fn release_all(&mut self) {
        *self = Self::default();
    }
}

/// Manages input polling and translates raw terminal events into held keys,
/// a world-space pointer and a list of one-shot events.
pub struct InputManager {
    key_state: KeyState,
    events: Vec<InputEvent>,
    pointer: Vec2,
    /// Terminal area the playfield is drawn into
    viewport: Rect,
    world: Vec2,
    /// `None` when the terminal reports key releases
    release_grace: Option<Duration>,
}

impl InputManager {
    pub fn new(config: &GameConfig, reports_releases: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            events: Vec::new(),
            pointer: Vec2::new(config.width / 2.0, config.height / 2.0),
            viewport: Rect::default(),
            world: Vec2::new(config.width, config.height),
            release_grace: if reports_releases {
                None
            } else {
                Some(KEY_REPEAT_GRACE)
            },
        }
    }

    /// Updates the terminal area used to map mouse cells into world space
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Drains every pending terminal event without blocking.
    /// Should be called once per frame before taking the frame input.
    pub fn poll_events(&mut self, game_state: GameState, now: Duration) -> color_eyre::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            self.handle_event(event, game_state, now);
        }
        Ok(())
    }

    /// Applies a single terminal event
    pub fn handle_event(&mut self, event: Event, game_state: GameState, now: Duration) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event, game_state, now),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event, game_state),
            Event::FocusLost => self.key_state.release_all(),
            _ => {}
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, game_state: GameState, now: Duration) {
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if is_quit_key(&key_event) {
                    self.events.push(InputEvent::Quit);
                    return;
                }
                if game_state.is_playing() {
                    if let Some(latch) = self.key_state.latch_mut(key_event.code) {
                        latch.press(now);
                    }
                }
            }
            KeyEventKind::Release => {
                if let Some(latch) = self.key_state.latch_mut(key_event.code) {
                    latch.release();
                }
            }
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent, game_state: GameState) {
        if let Some(pointer) = self.cell_to_world(mouse_event.column, mouse_event.row) {
            self.pointer = pointer;
        }

        if mouse_event.kind == MouseEventKind::Down(MouseButton::Right) && game_state.is_playing() {
            self.events.push(InputEvent::Fire);
        }
    }

    /// Maps the center of a terminal cell into playfield coordinates
    fn cell_to_world(&self, column: u16, row: u16) -> Option<Vec2> {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.viewport;
        if width == 0 || height == 0 {
            return None;
        }

        let col = f32::from(column.saturating_sub(x).min(width - 1));
        let row = f32::from(row.saturating_sub(y).min(height - 1));
        Some(Vec2::new(
            (col + 0.5) / f32::from(width) * self.world.x,
            (row + 0.5) / f32::from(height) * self.world.y,
        ))
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Continuous input for the current frame
    pub fn frame_input(&self, now: Duration) -> FrameInput {
        let grace = self.release_grace;
        FrameInput {
            held: HeldKeys {
                up: self.key_state.up.is_held(now, grace),
                down: self.key_state.down.is_held(now, grace),
                left: self.key_state.left.is_held(now, grace),
                right: self.key_state.right.is_held(now, grace),
            },
            pointer: self.pointer,
        }
    }

    /// Hands over this frame's one-shot events, oldest first
    pub fn take_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}

fn is_quit_key(key_event: &KeyEvent) -> bool {
    matches!(
        key_event.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key_event.modifiers.contains(KeyModifiers::CONTROL))
}
