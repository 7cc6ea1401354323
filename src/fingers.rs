// Finger-state extraction: which fingers are raised in one frame.
//
// The four long fingers compare tip height against the PIP joint. The
// thumb compares tip x against the IP joint, which only holds for a
// mirrored front-facing camera and an upright hand; it is not
// rotation-invariant.

use crate::landmarks::{HandLandmark, LandmarkSet};

/// The five fingers, in finger-state order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [Self::Thumb, Self::Index, Self::Middle, Self::Ring, Self::Pinky];

    pub fn tip(&self) -> HandLandmark {
        match self {
            Self::Thumb => HandLandmark::ThumbTip,
            Self::Index => HandLandmark::IndexTip,
            Self::Middle => HandLandmark::MiddleTip,
            Self::Ring => HandLandmark::RingTip,
            Self::Pinky => HandLandmark::PinkyTip,
        }
    }

    /// Joint the tip is measured against: IP for the thumb, PIP otherwise.
    pub fn reference_joint(&self) -> HandLandmark {
        match self {
            Self::Thumb => HandLandmark::ThumbIp,
            Self::Index => HandLandmark::IndexPip,
            Self::Middle => HandLandmark::MiddlePip,
            Self::Ring => HandLandmark::RingPip,
            Self::Pinky => HandLandmark::PinkyPip,
        }
    }
}

/// Up/down flags for thumb, index, middle, ring, pinky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FingerState([bool; 5]);

impl FingerState {
    pub const fn new(thumb: bool, index: bool, middle: bool, ring: bool, pinky: bool) -> Self {
        Self([thumb, index, middle, ring, pinky])
    }

    /// From 0/1 flags, handy for tables.
    pub const fn from_bits(bits: [u8; 5]) -> Self {
        Self([bits[0] != 0, bits[1] != 0, bits[2] != 0, bits[3] != 0, bits[4] != 0])
    }

    pub fn is_up(&self, finger: Finger) -> bool {
        self.0[finger as usize]
    }

    pub fn as_array(&self) -> [bool; 5] {
        self.0
    }

    /// Number of raised fingers.
    pub fn count_up(&self) -> usize {
        self.0.iter().filter(|up| **up).count()
    }
}

/// Margins (normalized units) a tip must clear to count as raised.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerThresholds {
    /// Index through pinky: tip must sit this far above the PIP joint.
    pub finger_tip: f32,
    /// Thumb: tip must sit this far left of the IP joint.
    pub thumb_margin: f32,
}

impl Default for FingerThresholds {
    fn default() -> Self {
        Self { finger_tip: 0.1, thumb_margin: 0.05 }
    }
}

/// Read the finger states off one frame's landmarks.
pub fn extract(hand: &LandmarkSet, thresholds: &FingerThresholds) -> FingerState {
    let mut state = [false; 5];
    for finger in Finger::ALL {
        let tip = hand.get(finger.tip());
        let joint = hand.get(finger.reference_joint());
        state[finger as usize] = match finger {
            Finger::Thumb => tip.x < joint.x - thresholds.thumb_margin,
            _ => tip.y < joint.y - thresholds.finger_tip,
        };
    }
    FingerState(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{Landmark, LANDMARK_COUNT};

    /// Hand with every joint at (0.5, 0.5): nothing clears a margin.
    fn flat_hand() -> [Landmark; LANDMARK_COUNT] {
        [Landmark::flat(0.5, 0.5); LANDMARK_COUNT]
    }

    fn set(pts: &mut [Landmark; LANDMARK_COUNT], lm: HandLandmark, x: f32, y: f32) {
        pts[lm.index()] = Landmark::flat(x, y);
    }

    #[test]
    fn test_flat_hand_is_all_down() {
        let hand = LandmarkSet::new(flat_hand());
        let state = extract(&hand, &FingerThresholds::default());
        assert_eq!(state, FingerState::default());
        assert_eq!(state.count_up(), 0);
    }

    #[test]
    fn test_index_up() {
        let mut pts = flat_hand();
        set(&mut pts, HandLandmark::IndexTip, 0.5, 0.3);
        let state = extract(&LandmarkSet::new(pts), &FingerThresholds::default());
        assert_eq!(state, FingerState::new(false, true, false, false, false));
    }

    #[test]
    fn test_finger_needs_full_margin() {
        let mut pts = flat_hand();
        // Above the joint, but by less than the margin: not up.
        set(&mut pts, HandLandmark::MiddlePip, 0.5, 0.6);
        set(&mut pts, HandLandmark::MiddleTip, 0.5, 0.55);
        let thresholds = FingerThresholds { finger_tip: 0.1, thumb_margin: 0.05 };
        let state = extract(&LandmarkSet::new(pts.clone()), &thresholds);
        assert!(!state.is_up(Finger::Middle));

        set(&mut pts, HandLandmark::MiddleTip, 0.5, 0.45);
        let state = extract(&LandmarkSet::new(pts), &thresholds);
        assert!(state.is_up(Finger::Middle));
    }

    #[test]
    fn test_thumb_uses_x_axis() {
        let mut pts = flat_hand();
        // Tip far above the joint but not to the left: thumb stays down.
        set(&mut pts, HandLandmark::ThumbTip, 0.5, 0.1);
        let state = extract(&LandmarkSet::new(pts.clone()), &FingerThresholds::default());
        assert!(!state.is_up(Finger::Thumb));

        set(&mut pts, HandLandmark::ThumbTip, 0.4, 0.5);
        let state = extract(&LandmarkSet::new(pts.clone()), &FingerThresholds::default());
        assert!(state.is_up(Finger::Thumb));

        // Mirrored the other way: down.
        set(&mut pts, HandLandmark::ThumbTip, 0.6, 0.5);
        let state = extract(&LandmarkSet::new(pts), &FingerThresholds::default());
        assert!(!state.is_up(Finger::Thumb));
    }

    #[test]
    fn test_custom_threshold() {
        let mut pts = flat_hand();
        set(&mut pts, HandLandmark::RingTip, 0.5, 0.45);
        let hand = LandmarkSet::new(pts);
        assert!(!extract(&hand, &FingerThresholds::default()).is_up(Finger::Ring));
        let loose = FingerThresholds { finger_tip: 0.02, ..FingerThresholds::default() };
        assert!(extract(&hand, &loose).is_up(Finger::Ring));
    }

    #[test]
    fn test_from_bits() {
        assert_eq!(FingerState::from_bits([0, 1, 1, 0, 0]), FingerState::new(false, true, true, false, false));
    }
}
