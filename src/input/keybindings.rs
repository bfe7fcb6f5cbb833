use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::keyboard::{KeyCode, KeyState};

/// Logical navigation keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavKey {
    /// Move (or yaw) left.
    Left,
    /// Move (or yaw) right.
    Right,
    /// Move along the view direction (or pitch up).
    Forward,
    /// Move against the view direction (or pitch down).
    Backward,
    /// Move up (or dolly in while rotating).
    Up,
    /// Move down (or dolly out while rotating).
    Down,
    /// Modifier: directional keys rotate instead of translating.
    Rotate,
    /// Modifier: dolly moves the focus point with the camera.
    TranslateZ,
    /// Modifier: scale motion down.
    Accurate,
    /// Modifier: scale motion down further.
    SuperAccurate,
}

impl NavKey {
    /// Number of logical keys.
    pub const COUNT: usize = 10;

    /// Every logical key, in table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Left,
        Self::Right,
        Self::Forward,
        Self::Backward,
        Self::Up,
        Self::Down,
        Self::Rotate,
        Self::TranslateZ,
        Self::Accurate,
        Self::SuperAccurate,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Named default binding sets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum KeyPreset {
    /// Arrow keys plus Page Up / Page Down.
    #[default]
    Arrows,
    /// W/A/S/D plus E (up) and Q (down).
    Wasd,
}

/// Immutable table from [`NavKey`] to a physical key code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    keys: [KeyCode; NavKey::COUNT],
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::arrows()
    }
}

impl KeyBindings {
    /// Shared modifier layout for both presets.
    const fn with_directions(
        left: KeyCode,
        right: KeyCode,
        forward: KeyCode,
        backward: KeyCode,
        up: KeyCode,
        down: KeyCode,
    ) -> Self {
        Self {
            keys: [
                left,
                right,
                forward,
                backward,
                up,
                down,
                KeyCode::CONTROL,
                KeyCode::ALT,
                KeyCode::SHIFT,
                KeyCode::SPACE,
            ],
        }
    }

    /// Arrow keys move, Page Up / Page Down rise and sink, Ctrl rotates,
    /// Alt dollies the focus point along, Shift and Space slow motion down.
    #[must_use]
    pub const fn arrows() -> Self {
        Self::with_directions(
            KeyCode::LEFT,
            KeyCode::RIGHT,
            KeyCode::UP,
            KeyCode::DOWN,
            KeyCode::PAGE_UP,
            KeyCode::PAGE_DOWN,
        )
    }

    /// W/A/S/D move, E and Q rise and sink; modifiers as in
    /// [`arrows`](Self::arrows).
    #[must_use]
    pub const fn wasd() -> Self {
        Self::with_directions(
            KeyCode::letter(b'A'),
            KeyCode::letter(b'D'),
            KeyCode::letter(b'W'),
            KeyCode::letter(b'S'),
            KeyCode::letter(b'E'),
            KeyCode::letter(b'Q'),
        )
    }

    /// Bindings for a named preset.
    #[must_use]
    pub const fn from_preset(preset: KeyPreset) -> Self {
        match preset {
            KeyPreset::Arrows => Self::arrows(),
            KeyPreset::Wasd => Self::wasd(),
        }
    }

    /// Copy of these bindings with one key rebound.
    #[must_use]
    pub fn with(mut self, action: NavKey, key: KeyCode) -> Self {
        self.keys[action.index()] = key;
        self
    }

    /// Physical key bound to `action`.
    #[must_use]
    pub fn key(&self, action: NavKey) -> KeyCode {
        self.keys[action.index()]
    }

    /// First action bound to a physical key.
    #[must_use]
    pub fn lookup(&self, key: KeyCode) -> Option<NavKey> {
        NavKey::ALL.into_iter().find(|action| self.key(*action) == key)
    }

    /// Whether the key bound to `action` is held.
    pub fn is_down(&self, action: NavKey, keys: &dyn KeyState) -> bool {
        keys.is_key_down(self.key(action))
    }

    /// Number of accuracy modifiers held: 0, 1 or 2.
    pub fn accuracy_mode(&self, keys: &dyn KeyState) -> u8 {
        u8::from(self.is_down(NavKey::Accurate, keys))
            + u8::from(self.is_down(NavKey::SuperAccurate, keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_only_in_directions() {
        let arrows = KeyBindings::arrows();
        let wasd = KeyBindings::wasd();
        assert_eq!(arrows.key(NavKey::Forward), KeyCode::UP);
        assert_eq!(wasd.key(NavKey::Forward), KeyCode(u32::from(b'W')));
        for action in [
            NavKey::Rotate,
            NavKey::TranslateZ,
            NavKey::Accurate,
            NavKey::SuperAccurate,
        ] {
            assert_eq!(arrows.key(action), wasd.key(action));
        }
        assert_eq!(KeyBindings::from_preset(KeyPreset::Wasd), wasd);
    }

    #[test]
    fn rebinding_returns_new_table() {
        let base = KeyBindings::arrows();
        let rebound = base.clone().with(NavKey::Rotate, KeyCode::letter(b'R'));
        assert_eq!(base.key(NavKey::Rotate), KeyCode::CONTROL);
        assert_eq!(rebound.key(NavKey::Rotate), KeyCode::letter(b'R'));
        assert_eq!(rebound.lookup(KeyCode::letter(b'R')), Some(NavKey::Rotate));
        assert_eq!(rebound.lookup(KeyCode::letter(b'Z')), None);
    }

    #[test]
    fn accuracy_mode_counts_modifiers() {
        let bindings = KeyBindings::arrows();
        let none = |_: KeyCode| false;
        let shift = |k: KeyCode| k == KeyCode::SHIFT;
        let both = |k: KeyCode| k == KeyCode::SHIFT || k == KeyCode::SPACE;
        assert_eq!(bindings.accuracy_mode(&none), 0);
        assert_eq!(bindings.accuracy_mode(&shift), 1);
        assert_eq!(bindings.accuracy_mode(&both), 2);
    }
}
