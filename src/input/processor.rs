//! Converts raw platform events into navigation calls.
//!
//! The `InputProcessor` owns all transient input state (cursor position,
//! held buttons, held keys, viewport size). It is the only thing that sits
//! between raw window events and the [`Navigator`].

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyboardState;
use crate::nav::{NavOps, Navigator};

/// Converts raw window events into [`Navigator`] calls.
///
/// Left drag rotates, right drag pans, middle drag zooms; the wheel dollies
/// toward the point under the cursor.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if processor.handle_event(event, &mut navigator) {
///     window.request_redraw();
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    /// Last cursor position in physical pixels.
    cursor: Vec2,
    /// Viewport size in physical pixels.
    viewport: Vec2,
    /// Operations requested by the held buttons.
    buttons: NavOps,
    /// Held physical keys.
    keys: KeyboardState,
}

impl InputProcessor {
    /// Create a processor for a `width × height` pixel viewport.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Vec2::new(width as f32, height as f32),
            ..Self::default()
        }
    }

    /// Cursor position in normalized screen space, `(-1, -1)` bottom-left.
    #[must_use]
    pub fn cursor_nss(&self) -> Vec2 {
        if self.viewport.min_element() <= 0.0 {
            return Vec2::ZERO;
        }
        let unit = self.cursor / self.viewport;
        Vec2::new(2.0 * unit.x - 1.0, 1.0 - 2.0 * unit.y)
    }

    /// Operations requested by the currently held buttons.
    #[must_use]
    pub fn held_ops(&self) -> NavOps {
        self.buttons
    }

    /// Currently held keys.
    #[must_use]
    pub fn keys(&self) -> &KeyboardState {
        &self.keys
    }

    /// Process a raw input event. Returns whether the camera moved.
    pub fn handle_event(&mut self, event: InputEvent, nav: &mut Navigator) -> bool {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.cursor = Vec2::new(x, y);
                self.drag(nav, false)
            }
            InputEvent::MouseButton { button, pressed } => {
                self.buttons.set(button_op(button), pressed);
                // Press and release both re-anchor; release also commits
                // the finished gesture.
                self.drag(nav, true)
            }
            InputEvent::Scroll { delta } => {
                let point = self.cursor_nss();
                nav.mouse_control_z(point, delta, true, true, &self.keys)
            }
            InputEvent::Key { code, pressed } => {
                // Modifier changes mid-drag are picked up by the navigator's
                // accuracy check on the next sample.
                self.keys.set(code, pressed) && self.drag(nav, false)
            }
            InputEvent::Resized { width, height } => {
                self.viewport = Vec2::new(width as f32, height as f32);
                if width == 0 || height == 0 {
                    return false;
                }
                nav.camera_mut()
                    .set_aspect(width as f32 / height as f32)
                    .is_ok()
            }
            InputEvent::FocusLost => {
                self.keys.clear();
                if self.buttons.is_empty() {
                    return false;
                }
                self.buttons = NavOps::empty();
                log::debug!("focus lost mid-gesture, committing");
                nav.commit();
                false
            }
        }
    }

    fn drag(&self, nav: &mut Navigator, is_reference_sample: bool) -> bool {
        if self.buttons.is_empty() && !is_reference_sample {
            return false;
        }
        nav.mouse_control(self.cursor_nss(), self.buttons, is_reference_sample, &self.keys)
    }
}

fn button_op(button: MouseButton) -> NavOps {
    match button {
        MouseButton::Left => NavOps::ROTATE,
        MouseButton::Right => NavOps::TRANSLATE,
        MouseButton::Middle => NavOps::ZOOM,
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::CameraState;
    use crate::input::{KeyCode, KeyState};

    fn setup() -> (InputProcessor, Navigator) {
        let mut processor = InputProcessor::new(200, 100);
        let mut nav = Navigator::new(CameraState::default());
        assert!(processor.handle_event(
            InputEvent::Resized {
                width: 200,
                height: 100
            },
            &mut nav
        ));
        let _ = processor.handle_event(InputEvent::CursorMoved { x: 100.0, y: 50.0 }, &mut nav);
        (processor, nav)
    }

    #[test]
    fn cursor_maps_to_nss() {
        let (mut processor, mut nav) = setup();
        assert_eq!(processor.cursor_nss(), Vec2::ZERO);
        let _ = processor.handle_event(InputEvent::CursorMoved { x: 0.0, y: 100.0 }, &mut nav);
        assert_eq!(processor.cursor_nss(), Vec2::new(-1.0, -1.0));
        let _ = processor.handle_event(InputEvent::CursorMoved { x: 200.0, y: 0.0 }, &mut nav);
        assert_eq!(processor.cursor_nss(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn right_drag_pans_and_release_commits() {
        let (mut processor, mut nav) = setup();
        assert_eq!(nav.camera().aspect(), 2.0);
        let press = InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        };
        let _ = processor.handle_event(press, &mut nav);
        assert_eq!(processor.held_ops(), NavOps::TRANSLATE);

        assert!(processor.handle_event(InputEvent::CursorMoved { x: 150.0, y: 50.0 }, &mut nav));
        let expected = -0.5 * (0.5 * nav.camera().fov_y()).tan() * 2.0;
        assert!((nav.camera().position().x - expected).abs() < 1e-5);

        let release = InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: false,
        };
        let _ = processor.handle_event(release, &mut nav);
        assert!(processor.held_ops().is_empty());
        assert_eq!(nav.baseline().pose(), nav.camera().pose());

        // Hover without buttons does nothing.
        let before = nav.camera().clone();
        assert!(!processor.handle_event(InputEvent::CursorMoved { x: 10.0, y: 10.0 }, &mut nav));
        assert_eq!(nav.camera(), &before);
    }

    #[test]
    fn wheel_dollies_toward_focus() {
        let (mut processor, mut nav) = setup();
        assert!(processor.handle_event(InputEvent::Scroll { delta: 120.0 }, &mut nav));
        assert!((nav.camera().focus_dist() - 0.9).abs() < 1e-5);
        assert!(nav.camera().focus_point().abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn wheel_with_alt_keeps_focus_dist() {
        let (mut processor, mut nav) = setup();
        let alt = InputEvent::Key {
            code: KeyCode::ALT,
            pressed: true,
        };
        assert!(!processor.handle_event(alt, &mut nav));
        assert!(processor.handle_event(InputEvent::Scroll { delta: 120.0 }, &mut nav));
        assert_eq!(nav.camera().focus_dist(), 1.0);
        assert!(nav.camera().position().abs_diff_eq(Vec3::new(0.0, 0.0, -0.1), 1e-5));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let (mut processor, mut nav) = setup();
        let _ = processor.handle_event(
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            },
            &mut nav,
        );
        let _ = processor.handle_event(
            InputEvent::Key {
                code: KeyCode::SHIFT,
                pressed: true,
            },
            &mut nav,
        );
        let _ = processor.handle_event(InputEvent::CursorMoved { x: 120.0, y: 50.0 }, &mut nav);
        assert!(!processor.handle_event(InputEvent::FocusLost, &mut nav));
        assert!(processor.held_ops().is_empty());
        assert!(!processor.keys().is_key_down(KeyCode::SHIFT));
        assert_eq!(nav.baseline().pose(), nav.camera().pose());
    }

    #[test]
    fn zero_size_resize_is_ignored() {
        let (mut processor, mut nav) = setup();
        assert!(!processor.handle_event(
            InputEvent::Resized {
                width: 0,
                height: 0
            },
            &mut nav
        ));
        assert_eq!(nav.camera().aspect(), 2.0);
        assert_eq!(processor.cursor_nss(), Vec2::ZERO);
    }
}
