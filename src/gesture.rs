// Gesture vocabulary and the finger-state classifier.

use crate::fingers::FingerState;

/// Confidence attached to a reading when a hand was detected.
pub const HAND_CONFIDENCE: f32 = 0.8;

/// Recognized hand poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gesture {
    /// No hand, or a pose outside the vocabulary.
    #[default]
    None,
    /// Index finger up.
    Draw,
    /// Index and middle up.
    Move,
    /// Fist.
    Pause,
    /// Thumb out.
    Undo,
    /// Pinky up.
    Redo,
    /// Open palm.
    Clear,
    /// Index, middle and ring up.
    ChangeColor,
}

/// Number of gesture labels.
pub const GESTURE_COUNT: usize = 8;

impl Gesture {
    pub const ALL: [Gesture; GESTURE_COUNT] = [
        Self::None,
        Self::Draw,
        Self::Move,
        Self::Pause,
        Self::Undo,
        Self::Redo,
        Self::Clear,
        Self::ChangeColor,
    ];

    /// Gestures shown in the guide bar, in display order.
    pub const GUIDE: [Gesture; 7] = [
        Self::Draw,
        Self::Move,
        Self::Pause,
        Self::Undo,
        Self::Redo,
        Self::Clear,
        Self::ChangeColor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Draw => "Draw",
            Self::Move => "Move",
            Self::Pause => "Pause",
            Self::Undo => "Undo",
            Self::Redo => "Redo",
            Self::Clear => "Clear",
            Self::ChangeColor => "ChangeColor",
        }
    }

    /// Short label for the guide bar.
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::ChangeColor => "Color",
            other => other.as_str(),
        }
    }

    /// How to make the pose, for help text.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::None => "any other pose",
            Self::Draw => "index finger up",
            Self::Move => "index + middle up",
            Self::Pause => "fist",
            Self::Undo => "thumb out",
            Self::Redo => "pinky up",
            Self::Clear => "open palm",
            Self::ChangeColor => "three fingers up",
        }
    }

    /// One-shot actions that fire on the frame the label appears.
    pub fn is_edge_triggered(&self) -> bool {
        matches!(self, Self::Undo | Self::Redo | Self::Clear | Self::ChangeColor)
    }

    /// A finger state that classifies as this gesture. `None` has no
    /// canonical pose.
    pub fn canonical_fingers(&self) -> Option<FingerState> {
        let bits = match self {
            Self::None => return None,
            Self::Draw => [0, 1, 0, 0, 0],
            Self::Move => [0, 1, 1, 0, 0],
            Self::Pause => [0, 0, 0, 0, 0],
            Self::Undo => [1, 0, 0, 0, 0],
            Self::Redo => [0, 0, 0, 0, 1],
            Self::Clear => [1, 1, 1, 1, 1],
            Self::ChangeColor => [0, 1, 1, 1, 0],
        };
        Some(FingerState::from_bits(bits))
    }
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact-match table, first hit wins.
const TABLE: [([u8; 5], Gesture); 5] = [
    ([0, 1, 0, 0, 0], Gesture::Draw),
    ([0, 1, 1, 0, 0], Gesture::Move),
    ([0, 1, 1, 1, 0], Gesture::ChangeColor),
    ([1, 0, 0, 0, 0], Gesture::Undo),
    ([0, 0, 0, 0, 1], Gesture::Redo),
];

/// Map a finger state to a gesture. Total: anything unlisted is `None`.
pub fn classify(fingers: FingerState) -> Gesture {
    for (bits, gesture) in TABLE {
        if FingerState::from_bits(bits) == fingers {
            return gesture;
        }
    }
    match fingers.count_up() {
        5 => Gesture::Clear,
        0 => Gesture::Pause,
        _ => Gesture::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_table() {
        let cases = [
            ([0, 1, 0, 0, 0], Gesture::Draw),
            ([0, 1, 1, 0, 0], Gesture::Move),
            ([0, 1, 1, 1, 0], Gesture::ChangeColor),
            ([1, 0, 0, 0, 0], Gesture::Undo),
            ([0, 0, 0, 0, 1], Gesture::Redo),
            ([1, 1, 1, 1, 1], Gesture::Clear),
            ([0, 0, 0, 0, 0], Gesture::Pause),
            ([1, 1, 0, 0, 0], Gesture::None),
            ([0, 0, 1, 0, 0], Gesture::None),
            ([0, 1, 1, 1, 1], Gesture::None),
        ];
        for (bits, expected) in cases {
            assert_eq!(classify(FingerState::from_bits(bits)), expected, "bits {bits:?}");
        }
    }

    #[test]
    fn test_canonical_fingers_classify_back() {
        for gesture in Gesture::ALL {
            if let Some(fingers) = gesture.canonical_fingers() {
                assert_eq!(classify(fingers), gesture);
            }
        }
        assert!(Gesture::None.canonical_fingers().is_none());
    }

    #[test]
    fn test_edge_triggered_set() {
        let edge: Vec<_> = Gesture::ALL.into_iter().filter(Gesture::is_edge_triggered).collect();
        assert_eq!(edge, vec![Gesture::Undo, Gesture::Redo, Gesture::Clear, Gesture::ChangeColor]);
    }

    #[test]
    fn test_guide_labels() {
        assert_eq!(Gesture::ChangeColor.short_label(), "Color");
        assert_eq!(Gesture::Draw.short_label(), "Draw");
        assert_eq!(Gesture::ChangeColor.to_string(), "ChangeColor");
    }

    proptest! {
        #[test]
        fn unlisted_vectors_are_none(bits in proptest::array::uniform5(0u8..2)) {
            let fingers = FingerState::from_bits(bits);
            let listed = TABLE.iter().any(|(b, _)| *b == bits);
            let sum = fingers.count_up();
            if !listed && sum != 0 && sum != 5 {
                prop_assert_eq!(classify(fingers), Gesture::None);
            }
        }
    }
}
