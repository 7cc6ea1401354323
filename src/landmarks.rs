// Hand landmark data as delivered by a pose-estimation backend.
//
// A detected hand is 21 keypoints in a fixed order: the wrist, then four
// points per finger from base to tip, thumb first and pinky last.
// Coordinates are normalized to the camera image, x and y in [0, 1],
// z relative to the wrist.

// ── Landmark definitions ───────────────────────────────────

/// The 21 named hand landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Total number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

impl HandLandmark {
    /// All landmarks in wire order.
    pub const ALL: [HandLandmark; LANDMARK_COUNT] = [
        Self::Wrist,
        Self::ThumbCmc,
        Self::ThumbMcp,
        Self::ThumbIp,
        Self::ThumbTip,
        Self::IndexMcp,
        Self::IndexPip,
        Self::IndexDip,
        Self::IndexTip,
        Self::MiddleMcp,
        Self::MiddlePip,
        Self::MiddleDip,
        Self::MiddleTip,
        Self::RingMcp,
        Self::RingPip,
        Self::RingDip,
        Self::RingTip,
        Self::PinkyMcp,
        Self::PinkyPip,
        Self::PinkyDip,
        Self::PinkyTip,
    ];

    /// Position of this landmark in a [`LandmarkSet`] (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }
}

// ── Points ─────────────────────────────────────────────────

/// One keypoint in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    /// A point with no depth information.
    pub const fn flat(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// All 21 landmarks of one detected hand, for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from a slice, `None` unless it holds exactly 21 points.
    pub fn from_slice(points: &[Landmark]) -> Option<Self> {
        let points: [Landmark; LANDMARK_COUNT] = points.try_into().ok()?;
        Some(Self { points })
    }

    pub fn get(&self, landmark: HandLandmark) -> Landmark {
        self.points[landmark.index()]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    /// Index fingertip scaled to a `width` x `height` pixel surface,
    /// truncated toward zero.
    pub fn index_tip_px(&self, width: usize, height: usize) -> (i32, i32) {
        let tip = self.get(HandLandmark::IndexTip);
        ((tip.x * width as f32) as i32, (tip.y * height as f32) as i32)
    }
}
