#![warn(missing_docs)]
//! Pointer and keyboard state tracked across a frame.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Input state tracking for a single frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently pressed.
    keys_pressed: HashSet<KeyCode>,
    /// Keys pressed this frame (edge-triggered).
    keys_just_pressed: HashSet<KeyCode>,

    /// Mouse buttons currently pressed.
    mouse_buttons: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_just_pressed: HashSet<MouseButton>,

    /// Last cursor position in physical pixels, `None` once the cursor leaves the window.
    cursor_position: Option<(f64, f64)>,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event to update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(keycode),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    if self.keys_pressed.insert(*keycode) {
                        self.keys_just_pressed.insert(*keycode);
                    }
                }
                ElementState::Released => {
                    self.keys_pressed.remove(keycode);
                }
            },
            WindowEvent::MouseInput { state, button, .. } => self.set_mouse_button(*button, *state),
            WindowEvent::CursorMoved { position, .. } => {
                self.set_cursor_position(position.x, position.y);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor_position = None;
            }
            _ => {}
        }
    }

    /// Record a mouse button transition.
    pub fn set_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.mouse_buttons.insert(button) {
                    self.mouse_just_pressed.insert(button);
                }
            }
            ElementState::Released => {
                self.mouse_buttons.remove(&button);
            }
        }
    }

    /// Record the cursor position in physical pixels.
    pub fn set_cursor_position(&mut self, x: f64, y: f64) {
        self.cursor_position = Some((x, y));
    }

    /// Reset per-frame state (call once the frame's clicks have been handled).
    pub fn begin_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.mouse_just_pressed.clear();
    }

    /// Cursor position in physical pixels.
    pub fn cursor_position(&self) -> Option<(f64, f64)> {
        self.cursor_position
    }

    /// Cursor position converted to logical points for the given scale factor.
    pub fn cursor_position_logical(&self, scale_factor: f64) -> Option<(f32, f32)> {
        let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        self.cursor_position
            .map(|(x, y)| ((x / scale) as f32, (y / scale) as f32))
    }

    /// Check if a key was just pressed this frame.
    pub fn key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Check if a mouse button is currently pressed.
    pub fn mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    /// Check if a mouse button was just pressed this frame.
    pub fn mouse_button_just_pressed(&self, button: MouseButton) -> bool {
        self.mouse_just_pressed.contains(&button)
    }

    /// Whether a quit key (`Q` or `Escape`) was pressed this frame.
    pub fn quit_requested(&self) -> bool {
        self.key_just_pressed(KeyCode::KeyQ) || self.key_just_pressed(KeyCode::Escape)
    }
}
