//! Keyboard and mouse state collected between frames

use std::collections::HashSet;

use winit::{
    event::{ElementState, MouseScrollDelta},
    keyboard::KeyCode,
};

/// Pixels of trackpad scrolling that count as one wheel notch
const PIXELS_PER_LINE: f32 = 20.0;

/// Held keys plus the mouse motion and scrolling accumulated this frame
#[derive(Debug, Default, Clone)]
pub struct InputState {
    held: HashSet<KeyCode>,
    mouse_delta: (f32, f32),
    scroll: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.held.insert(key);
            }
            ElementState::Released => {
                self.held.remove(&key);
            }
        }
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    pub fn add_mouse_motion(&mut self, dx: f64, dy: f64) {
        self.mouse_delta.0 += dx as f32;
        self.mouse_delta.1 += dy as f32;
    }

    pub fn add_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, lines) => lines,
            MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
        };
    }

    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Clears per-frame motion; held keys persist
    pub fn end_frame(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.scroll = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_keys_are_held_until_released() {
        let mut input = InputState::new();
        input.process_key(KeyCode::KeyW, ElementState::Pressed);
        input.process_key(KeyCode::ArrowUp, ElementState::Pressed);
        assert!(input.is_held(KeyCode::KeyW));

        input.process_key(KeyCode::KeyW, ElementState::Released);
        assert!(!input.is_held(KeyCode::KeyW));
        assert!(input.is_held(KeyCode::ArrowUp));

        input.end_frame();
        assert!(input.is_held(KeyCode::ArrowUp));
    }

    #[test]
    fn test_motion_accumulates_and_resets() {
        let mut input = InputState::new();
        input.add_mouse_motion(3.0, -1.0);
        input.add_mouse_motion(2.0, -1.0);
        input.add_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        let pixels = PhysicalPosition::new(0.0, 40.0);
        input.add_scroll(MouseScrollDelta::PixelDelta(pixels));

        assert_eq!(input.mouse_delta(), (5.0, -2.0));
        assert_eq!(input.scroll(), 3.0);

        input.end_frame();
        assert_eq!(input.mouse_delta(), (0.0, 0.0));
        assert_eq!(input.scroll(), 0.0);
    }
}
