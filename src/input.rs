//! Per-tick input and classifier output mapping
//!
//! The simulation only ever sees two booleans. Keyboard polling produces them
//! directly; a gesture classifier produces a class index that `ClassMap`
//! resolves to a `Gesture`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Window closed / quit requested
    pub quit: bool,
    /// Wall-clock milliseconds since the previous tick
    pub elapsed_ms: u64,
}

impl TickInput {
    /// Input from raw key state
    pub fn keys(left: bool, right: bool, elapsed_ms: u64) -> Self {
        Self {
            left,
            right,
            quit: false,
            elapsed_ms,
        }
    }

    /// Input from a classified gesture
    pub fn from_gesture(gesture: Gesture, elapsed_ms: u64) -> Self {
        let (left, right) = gesture.steering();
        Self::keys(left, right, elapsed_ms)
    }

    /// Quit request; no steering
    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Default::default()
        }
    }
}

/// Discrete classifier output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    Left,
    Right,
    /// Unknown class or no hand detected
    #[default]
    Other,
}

impl Gesture {
    /// Parse a class label. Accepts "left"/"right" and the dataset names
    /// "thumb_left"/"thumb_right", case-insensitive.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "left" | "thumb_left" => Gesture::Left,
            "right" | "thumb_right" => Gesture::Right,
            _ => Gesture::Other,
        }
    }

    /// `(left, right)` signals for this gesture
    pub fn steering(&self) -> (bool, bool) {
        match self {
            Gesture::Left => (true, false),
            Gesture::Right => (false, true),
            Gesture::Other => (false, false),
        }
    }
}

/// Classifier index -> label table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassMap(pub BTreeMap<u32, String>);

impl Default for ClassMap {
    fn default() -> Self {
        Self(BTreeMap::from([
            (0, "thumb_left".to_string()),
            (1, "thumb_right".to_string()),
        ]))
    }
}

impl ClassMap {
    /// Label for a class index
    pub fn label(&self, class: u32) -> Option<&str> {
        self.0.get(&class).map(String::as_str)
    }

    /// Resolve a prediction (`None` = no hand detected) to a gesture
    pub fn resolve(&self, prediction: Option<u32>) -> Gesture {
        prediction
            .and_then(|class| self.label(class))
            .map(Gesture::from_label)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_labels() {
        assert_eq!(Gesture::from_label("Left"), Gesture::Left);
        assert_eq!(Gesture::from_label("thumb_right"), Gesture::Right);
        assert_eq!(Gesture::from_label("Neutral"), Gesture::Other);
        assert_eq!(Gesture::from_label(""), Gesture::Other);
    }

    #[test]
    fn test_class_map_resolve() {
        let map = ClassMap::default();
        assert_eq!(map.resolve(Some(0)), Gesture::Left);
        assert_eq!(map.resolve(Some(1)), Gesture::Right);
        assert_eq!(map.resolve(Some(7)), Gesture::Other);
        assert_eq!(map.resolve(None), Gesture::Other);
    }

    #[test]
    fn test_class_map_from_json() {
        let map: ClassMap = serde_json::from_str(r#"{"0": "Right", "3": "Left"}"#).unwrap();
        assert_eq!(map.resolve(Some(0)), Gesture::Right);
        assert_eq!(map.resolve(Some(3)), Gesture::Left);
        assert_eq!(map.resolve(Some(1)), Gesture::Other);
    }

    #[test]
    fn test_gesture_input() {
        let input = TickInput::from_gesture(Gesture::Right, 16);
        assert!(!input.left && input.right && !input.quit);
        assert_eq!(input.elapsed_ms, 16);

        let input = TickInput::from_gesture(Gesture::Other, 16);
        assert!(!input.left && !input.right);
    }
}
