use super::keyboard::KeyCode;

/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// turns them into navigation calls on a
/// [`Navigator`](crate::nav::Navigator).
///
/// # Example
///
/// ```ignore
/// let moved = processor.handle_event(
///     InputEvent::CursorMoved { x: 100.0, y: 200.0 },
///     &mut navigator,
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels, from the left edge.
        x: f32,
        /// Vertical position in physical pixels, from the top edge.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel (positive = toward the scene).
    Scroll {
        /// Raw wheel delta; one notch is
        /// [`NavOptions::wheel_notch`](crate::options::NavOptions::wheel_notch).
        delta: f32,
    },
    /// Key pressed or released.
    Key {
        /// Physical key.
        code: KeyCode,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Viewport resized.
    Resized {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
    /// Window lost focus; every held button and key is released.
    FocusLost,
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

#[cfg(feature = "winit")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}
