//! Input handling for the scene window.
//!
//! Tracks the pointer (position, NDC, drag delta, click edge), the scroll
//! wheel, and the two keyboard bindings the scene uses. Events are folded in
//! as they arrive; the frame loop reads the accumulated state once per frame
//! and calls [`Input::begin_frame`] to clear the per-frame edges.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keyboard bindings the scene reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Space: toggle camera auto-rotate.
    ToggleAutoRotate,
    /// R: reset the camera pose.
    ResetCamera,
}

/// Per-frame input state for the scene.
#[derive(Debug, Default)]
pub struct Input {
    // Pointer
    mouse_position: Vec2,
    mouse_ndc: Vec2,
    drag_delta: Vec2,
    left_held: bool,
    clicked: bool,

    // Scroll
    scroll_delta: f32,

    // Keys pressed this frame
    pressed: Vec<Binding>,

    // Window size for NDC calculation
    window_size: (u32, u32),
}

impl Input {
    /// Create a new input tracker.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            window_size: (width, height),
            ..Default::default()
        }
    }

    /// Pointer position in screen pixels.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Pointer position in normalized device coordinates (-1 to 1, Y up).
    pub fn mouse_ndc(&self) -> Vec2 {
        self.mouse_ndc
    }

    /// Pixels dragged with the left button held since the last frame.
    pub fn drag_delta(&self) -> Vec2 {
        self.drag_delta
    }

    /// Whether the left button went down this frame.
    pub fn clicked(&self) -> bool {
        self.clicked
    }

    /// Whether the left button is currently held.
    pub fn left_held(&self) -> bool {
        self.left_held
    }

    /// Scroll wheel delta this frame. Positive is forward.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Whether a binding was pressed this frame.
    pub fn pressed(&self, binding: Binding) -> bool {
        self.pressed.contains(&binding)
    }

    /// Clear per-frame edges. Call once per frame after reading state.
    pub fn begin_frame(&mut self) {
        self.clicked = false;
        self.drag_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
        self.pressed.clear();
    }

    /// Update window size for NDC calculations.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// Fold in a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        match code {
                            KeyCode::Space => self.pressed.push(Binding::ToggleAutoRotate),
                            KeyCode::KeyR => self.pressed.push(Binding::ResetCamera),
                            _ => {}
                        }
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => {
                            self.clicked = true;
                            self.left_held = true;
                        }
                        ElementState::Released => {
                            self.left_held = false;
                        }
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = Vec2::new(position.x as f32, position.y as f32);
                if self.left_held {
                    self.drag_delta += new_pos - self.mouse_position;
                }
                self.mouse_position = new_pos;

                let (w, h) = self.window_size;
                if w > 0 && h > 0 {
                    self.mouse_ndc = Vec2::new(
                        (new_pos.x / w as f32) * 2.0 - 1.0,
                        1.0 - (new_pos.y / h as f32) * 2.0, // Y flipped
                    );
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_edge_clears_on_begin_frame() {
        let mut input = Input::new(800, 600);
        input.clicked = true;
        input.left_held = true;

        assert!(input.clicked());
        input.begin_frame();
        assert!(!input.clicked());
        // Held state persists across frames.
        assert!(input.left_held());
    }

    #[test]
    fn test_mouse_ndc_center() {
        let mut input = Input::new(800, 600);
        input.mouse_position = Vec2::new(400.0, 300.0);
        input.mouse_ndc = Vec2::new(
            (400.0 / 800.0) * 2.0 - 1.0,
            1.0 - (300.0 / 600.0) * 2.0,
        );
        assert!(input.mouse_ndc().length() < 0.01);
    }

    #[test]
    fn test_drag_accumulates_only_while_held() {
        let mut input = Input::new(800, 600);
        input.mouse_position = Vec2::new(100.0, 100.0);
        input.drag_delta = Vec2::ZERO;

        // Not held: no drag recorded.
        assert_eq!(input.drag_delta(), Vec2::ZERO);

        input.left_held = true;
        input.drag_delta += Vec2::new(5.0, -3.0);
        assert_eq!(input.drag_delta(), Vec2::new(5.0, -3.0));

        input.begin_frame();
        assert_eq!(input.drag_delta(), Vec2::ZERO);
    }
}
