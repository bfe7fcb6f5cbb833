use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Opaque physical key code. The named constants follow the Windows
/// virtual-key numbering; hosts using another scheme rebind through
/// [`KeyBindings::with`](super::KeyBindings::with).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    /// Shift.
    pub const SHIFT: Self = Self(0x10);
    /// Control.
    pub const CONTROL: Self = Self(0x11);
    /// Alt.
    pub const ALT: Self = Self(0x12);
    /// Space bar.
    pub const SPACE: Self = Self(0x20);
    /// Page Up.
    pub const PAGE_UP: Self = Self(0x21);
    /// Page Down.
    pub const PAGE_DOWN: Self = Self(0x22);
    /// Left arrow.
    pub const LEFT: Self = Self(0x25);
    /// Up arrow.
    pub const UP: Self = Self(0x26);
    /// Right arrow.
    pub const RIGHT: Self = Self(0x27);
    /// Down arrow.
    pub const DOWN: Self = Self(0x28);

    /// Code for an upper-case ASCII letter or digit key.
    #[must_use]
    pub const fn letter(ch: u8) -> Self {
        Self(ch.to_ascii_uppercase() as u32)
    }
}

/// Query for which physical keys are held.
///
/// Injected into every navigation call so nothing here polls a platform
/// input API.
pub trait KeyState {
    /// Whether `key` is currently held.
    fn is_key_down(&self, key: KeyCode) -> bool;
}

impl<F> KeyState for F
where
    F: Fn(KeyCode) -> bool,
{
    fn is_key_down(&self, key: KeyCode) -> bool {
        self(key)
    }
}

/// Held-key set fed from key press/release events.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: FxHashSet<KeyCode>,
}

impl KeyboardState {
    /// Create an empty key state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release. Returns whether the state changed.
    pub fn set(&mut self, key: KeyCode, pressed: bool) -> bool {
        if pressed {
            self.held.insert(key)
        } else {
            self.held.remove(&key)
        }
    }

    /// Release every key (e.g. on focus loss).
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl KeyState for KeyboardState {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }
}
