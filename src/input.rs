//! Pointer and keyboard state for the viewport.
//!
//! `Input` turns raw window events into per-frame queries: how far the
//! pointer moved while a button was held, how many wheel notches were
//! scrolled, which keys went down, and whether a double-click happened.
//! Call [`Input::begin_frame`] after each rendered frame to clear the
//! per-frame part.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Longest gap between two clicks that still counts as a double-click.
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(400);
/// Largest pointer travel (logical pixels) between the two clicks.
pub const DOUBLE_CLICK_DISTANCE: f32 = 4.0;

/// Input state tracking for keyboard and pointer.
#[derive(Debug)]
pub struct Input {
    mouse_held: HashSet<MouseButton>,
    keys_pressed: HashSet<KeyCode>,

    // Pointer position in logical pixels
    cursor: Option<Vec2>,
    cursor_delta: Vec2,
    scroll_delta: f32,

    last_click: Option<(Instant, Vec2)>,
    double_clicked: bool,

    scale_factor: f64,
}

impl Input {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            mouse_held: HashSet::new(),
            keys_pressed: HashSet::new(),
            cursor: None,
            cursor_delta: Vec2::ZERO,
            scroll_delta: 0.0,
            last_click: None,
            double_clicked: false,
            scale_factor,
        }
    }

    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Whether `key` went down this frame. Key repeat is ignored.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Pointer travel since the last frame, in logical pixels.
    pub fn cursor_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    /// Wheel notches scrolled this frame. Positive is away from the user.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Whether a left double-click completed this frame.
    pub fn double_clicked(&self) -> bool {
        self.double_clicked
    }

    /// Clear per-frame state. Held buttons and cursor position persist.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.cursor_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
        self.double_clicked = false;
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    /// Forget held buttons, e.g. when the window loses focus mid-drag.
    pub fn release_all(&mut self) {
        self.mouse_held.clear();
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        self.keys_pressed.insert(code);
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => {
                    self.mouse_held.insert(*button);
                    if *button == MouseButton::Left {
                        if let Some(position) = self.cursor {
                            self.register_click(Instant::now(), position);
                        }
                    }
                }
                ElementState::Released => {
                    self.mouse_held.remove(button);
                }
            },

            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(self.scale_factor);
                self.move_cursor(Vec2::new(logical.x, logical.y));
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
            }

            WindowEvent::Focused(false) => self.release_all(),

            _ => {}
        }
    }

    fn move_cursor(&mut self, position: Vec2) {
        if let Some(previous) = self.cursor {
            self.cursor_delta += position - previous;
        }
        self.cursor = Some(position);
    }

    /// Record a left press; completes a double-click when close enough in
    /// time and space to the previous one.
    fn register_click(&mut self, at: Instant, position: Vec2) {
        let is_double = self.last_click.is_some_and(|(time, pos)| {
            at.saturating_duration_since(time) <= DOUBLE_CLICK_INTERVAL
                && pos.distance(position) <= DOUBLE_CLICK_DISTANCE
        });

        if is_double {
            self.double_clicked = true;
            // A third click starts a new pair
            self.last_click = None;
        } else {
            self.last_click = Some((at, position));
        }
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new(1.0)
    }
}
