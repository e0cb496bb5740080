//! Keypad application state and event handling.

use std::time::Instant;

use calc_core::keyboard::focus::FocusScope;
use calc_core::keyboard::{CalculatorAction, KeyboardDispatcher};
use calc_core::{Keypad, Settings};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use super::buttons::Button;
use super::keys;

/// Most recent results kept in the history panel
const HISTORY_LEN: usize = 50;

pub struct App {
    pub keypad: Keypad,
    pub keys: KeyboardDispatcher,
    /// Completed calculations, newest last
    pub history: Vec<String>,
    pub status: String,
    /// Keypad panel as last drawn; clicks inside it focus the keypad
    pub keypad_area: Rect,
    /// Button hit boxes as last drawn
    pub button_areas: Vec<(Rect, Button)>,
    /// Whether the keypad had focus when the terminal lost it
    refocus_on_gain: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        let mut keys = settings.keyboard_dispatcher(FocusScope::Container);
        keys.gate_mut().on_focus();
        App {
            keypad: Keypad::new().with_angle_mode(settings.angle_mode),
            keys,
            history: Vec::new(),
            status: String::new(),
            keypad_area: Rect::default(),
            button_areas: Vec::new(),
            refocus_on_gain: false,
            should_quit: false,
        }
    }

    /// Whether typed keys currently reach the keypad
    pub fn is_focused(&mut self, now: Instant) -> bool {
        self.keys.gate_mut().accepts_keys(now)
    }

    /// Expire pending blurs between events
    pub fn tick(&mut self, now: Instant) {
        self.keys.gate_mut().poll(now);
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::FocusLost => {
                self.refocus_on_gain = self.is_focused(now);
                self.keys.gate_mut().on_blur(now);
            }
            Event::FocusGained => {
                if self.refocus_on_gain {
                    self.keys.gate_mut().on_focus();
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if keys::is_quit(&key) {
            self.should_quit = true;
            return;
        }

        // Keys the dispatcher has no action for
        match key.code {
            KeyCode::Backspace if self.is_focused(now) => {
                self.keypad.backspace();
                return;
            }
            KeyCode::F(2) if self.is_focused(now) => {
                self.keypad.toggle_angle_mode();
                self.status = format!("Angle mode: {}", self.keypad.angle_mode().label());
                return;
            }
            _ => {}
        }

        let Some(input) = keys::to_key_input(&key) else {
            return;
        };
        let before = self.snapshot();
        let outcome = self.keys.handle(&input, now, &mut self.keypad);
        match outcome.action {
            Some(action) => self.after_action(before, action == CalculatorAction::Equals),
            None if !self.is_focused(now) => {
                self.status = "Keypad not focused - click it to type".to_string();
            }
            None => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let position = Position::new(mouse.column, mouse.row);
        let inside = self.keypad_area.contains(position);
        self.keys.gate_mut().on_click(inside);
        if !inside {
            // Focus moves to whatever was clicked outside the keypad
            self.keys.gate_mut().on_blur(now);
            return;
        }

        let pressed = self
            .button_areas
            .iter()
            .find(|(area, _)| area.contains(position))
            .map(|(_, button)| *button);
        if let Some(button) = pressed {
            self.press(button);
        }
    }

    /// Press an on-screen button
    pub fn press(&mut self, button: Button) {
        let before = self.snapshot();
        button.press(&mut self.keypad);
        self.after_action(before, button.is_equals());
    }

    fn snapshot(&self) -> (Option<String>, String) {
        (self.keypad.pending_expression(), self.keypad.display().to_string())
    }

    fn after_action(&mut self, before: (Option<String>, String), equals: bool) {
        if let Some(error) = self.keypad.last_error() {
            self.status = format!("Error: {}", error);
            return;
        }
        self.status.clear();
        if let (true, (Some(pending), operand)) = (equals, before) {
            self.history.push(format!("{} {} = {}", pending, operand, self.keypad.display()));
            if self.history.len() > HISTORY_LEN {
                self.history.remove(0);
            }
        }
    }
}
