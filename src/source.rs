// Landmark backends.
//
// Exactly one `LandmarkSource` is chosen at startup from `Backend`;
// there is no fallback chain. A model-backed detector plugs in by
// implementing the trait.

use std::str::FromStr;

use crate::error::Error;
use crate::gesture::Gesture;
use crate::landmarks::{HandLandmark, Landmark, LandmarkSet, LANDMARK_COUNT};
use crate::types::FrameBuffer;

/// Operator input a scripted backend can follow. Detectors that read the
/// camera ignore it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cue {
    /// Pose change requested this frame, if any.
    pub pose: Option<PoseRequest>,
    /// Pointer position in normalized canvas coordinates.
    pub pointer: Option<(f32, f32)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseRequest {
    /// Take the hand out of view.
    Hide,
    /// Hold the canonical pose for this gesture.
    Show(Gesture),
}

/// Per-frame hand detection.
pub trait LandmarkSource {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Landmarks of the single tracked hand, or `None` when no hand is in
    /// view. `frame` is the mirrored camera image when a camera is open.
    fn next_hand(&mut self, frame: Option<&FrameBuffer>) -> Option<LandmarkSet>;

    /// Operator input for this frame.
    fn cue(&mut self, _cue: Cue) {}
}

// ── Backend selection ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Keyboard-posed hand that follows the pointer.
    Synthetic,
    /// Never sees a hand.
    None,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Synthetic => "synthetic",
            Self::None => "none",
        }
    }

    pub fn open(&self) -> Box<dyn LandmarkSource> {
        match self {
            Self::Synthetic => Box::new(SyntheticHand::new()),
            Self::None => Box::new(NoHand),
        }
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "synthetic" => Ok(Self::Synthetic),
            "none" => Ok(Self::None),
            other => Err(Error::UnknownBackend(other.to_string())),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── No hand ────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct NoHand;

impl LandmarkSource for NoHand {
    fn name(&self) -> &'static str {
        "none"
    }

    fn next_hand(&mut self, _frame: Option<&FrameBuffer>) -> Option<LandmarkSet> {
        None
    }
}

// ── Synthetic hand ─────────────────────────────────────────

/// Horizontal spacing between neighbouring fingers.
const FINGER_SPACING: f32 = 0.04;
/// Vertical spacing between the joints of one finger.
const JOINT_SPACING: f32 = 0.10;
/// How far below its PIP joint a curled fingertip rests.
const CURL_DROP: f32 = 0.02;

/// Builds an upright right hand, seen through a mirrored camera, for a
/// requested pose. The index fingertip sits on the pointer.
#[derive(Debug, Clone)]
pub struct SyntheticHand {
    pose: Option<Gesture>,
    position: (f32, f32),
}

impl SyntheticHand {
    /// Starts hidden, centred.
    pub fn new() -> Self {
        Self { pose: None, position: (0.5, 0.5) }
    }

    pub fn pose(&self) -> Option<Gesture> {
        self.pose
    }

    /// Landmarks for `gesture` with the index fingertip at (x, y).
    /// `Gesture::None` is rendered as thumb and index out, a pose the
    /// classifier does not know.
    pub fn landmarks(gesture: Gesture, x: f32, y: f32) -> LandmarkSet {
        let fingers = gesture
            .canonical_fingers()
            .map(|f| f.as_array())
            .unwrap_or([true, true, false, false, false]);
        let mut pts = [Landmark::default(); LANDMARK_COUNT];
        let mut put = |lm: HandLandmark, px: f32, py: f32| {
            pts[lm.index()] = Landmark::flat(px, py);
        };

        put(HandLandmark::Wrist, x + 0.05, y + 0.45);

        // Thumb reaches toward smaller x when out.
        put(HandLandmark::ThumbCmc, x - 0.06, y + 0.35);
        put(HandLandmark::ThumbMcp, x - 0.09, y + 0.30);
        put(HandLandmark::ThumbIp, x - 0.11, y + 0.26);
        if fingers[0] {
            put(HandLandmark::ThumbTip, x - 0.18, y + 0.22);
        } else {
            put(HandLandmark::ThumbTip, x - 0.08, y + 0.26);
        }

        let chains = [
            [HandLandmark::IndexMcp, HandLandmark::IndexPip, HandLandmark::IndexDip, HandLandmark::IndexTip],
            [HandLandmark::MiddleMcp, HandLandmark::MiddlePip, HandLandmark::MiddleDip, HandLandmark::MiddleTip],
            [HandLandmark::RingMcp, HandLandmark::RingPip, HandLandmark::RingDip, HandLandmark::RingTip],
            [HandLandmark::PinkyMcp, HandLandmark::PinkyPip, HandLandmark::PinkyDip, HandLandmark::PinkyTip],
        ];
        for (i, [mcp, pip, dip, tip]) in chains.into_iter().enumerate() {
            let fx = x + FINGER_SPACING * i as f32;
            let pip_y = y + 2.0 * JOINT_SPACING;
            put(mcp, fx, y + 3.0 * JOINT_SPACING);
            put(pip, fx, pip_y);
            if fingers[i + 1] {
                put(dip, fx, y + JOINT_SPACING);
                put(tip, fx, y);
            } else {
                put(dip, fx, pip_y + CURL_DROP / 2.0);
                put(tip, fx, pip_y + CURL_DROP);
            }
        }

        LandmarkSet::new(pts)
    }
}

impl Default for SyntheticHand {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkSource for SyntheticHand {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn next_hand(&mut self, _frame: Option<&FrameBuffer>) -> Option<LandmarkSet> {
        let gesture = self.pose?;
        Some(Self::landmarks(gesture, self.position.0, self.position.1))
    }

    fn cue(&mut self, cue: Cue) {
        match cue.pose {
            Some(PoseRequest::Hide) => self.pose = None,
            Some(PoseRequest::Show(g)) => self.pose = Some(g),
            None => {}
        }
        if let Some((x, y)) = cue.pointer {
            self.position = (x, y);
        }
    }
}
