//! Input handling: event types, key state and bindings, and the input
//! processor that converts raw window events into navigation calls.

/// Platform-agnostic input events.
pub mod event;
/// Logical navigation keys and their physical bindings.
pub mod keybindings;
/// Physical key codes and held-key state.
pub mod keyboard;
/// Converts raw events into navigation calls.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use keybindings::{KeyBindings, KeyPreset, NavKey};
pub use keyboard::{KeyCode, KeyState, KeyboardState};
pub use processor::InputProcessor;
