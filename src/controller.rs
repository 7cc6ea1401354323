// Per-frame glue from landmarks to canvas actions.
//
// Draw is level-triggered: every Draw frame adds a point. Undo, Redo,
// Clear and ChangeColor are edge-triggered: they fire once, on the frame
// the stabilized label becomes that gesture. Frames with no hand skip the
// stabilizer and report None.

use tracing::debug;

use crate::canvas::Canvas;
use crate::fingers::{self, FingerThresholds};
use crate::gesture::{self, Gesture, HAND_CONFIDENCE};
use crate::landmarks::LandmarkSet;
use crate::stabilizer::{GestureStabilizer, StabilizerConfig};
use crate::types::Point;

/// What the pipeline made of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureReading {
    /// Stabilized label.
    pub gesture: Gesture,
    /// Unfiltered classification for this frame.
    pub raw: Gesture,
    /// Index fingertip in canvas pixels, when a hand was seen.
    pub position: Option<Point>,
    pub confidence: f32,
    /// Whether `gesture` differs from the previous frame's label.
    pub changed: bool,
}

/// Owns the stabilizer and remembers the last label it acted on.
#[derive(Debug, Clone)]
pub struct GestureController {
    stabilizer: GestureStabilizer,
    thresholds: FingerThresholds,
    last: Gesture,
}

impl GestureController {
    pub fn new(stabilizer: StabilizerConfig, thresholds: FingerThresholds) -> Self {
        Self {
            stabilizer: GestureStabilizer::new(stabilizer),
            thresholds,
            last: Gesture::None,
        }
    }

    /// Label acted on in the most recent frame.
    pub fn last_gesture(&self) -> Gesture {
        self.last
    }

    /// Run one frame through the pipeline and apply the result to `canvas`.
    /// A frame with no hand reports `None` and leaves the stabilizer alone.
    pub fn process(&mut self, hand: Option<&LandmarkSet>, canvas: &mut Canvas) -> GestureReading {
        let Some(hand) = hand else {
            let changed = self.last != Gesture::None;
            apply(Gesture::None, None, changed, canvas);
            self.last = Gesture::None;
            return GestureReading { gesture: Gesture::None, raw: Gesture::None, position: None, confidence: 0.0, changed };
        };

        let fingers = fingers::extract(hand, &self.thresholds);
        let raw = gesture::classify(fingers);
        let (x, y) = hand.index_tip_px(canvas.width(), canvas.height());
        let position = Some(Point::new(x, y));

        let stable = self.stabilizer.update(raw);
        let changed = stable != self.last;
        apply(stable, position, changed, canvas);
        self.last = stable;

        GestureReading { gesture: stable, raw, position, confidence: HAND_CONFIDENCE, changed }
    }
}

/// Translate one stabilized label into canvas calls.
pub fn apply(gesture: Gesture, position: Option<Point>, changed: bool, canvas: &mut Canvas) {
    if let (Gesture::Draw, Some(p)) = (gesture, position) {
        canvas.start_stroke();
        canvas.add_point(p.x, p.y);
        return;
    }

    // Anything but drawing seals the stroke in progress first.
    canvas.end_stroke();
    if !(changed && gesture.is_edge_triggered()) {
        return;
    }
    match gesture {
        Gesture::Undo => canvas.undo(),
        Gesture::Redo => canvas.redo(),
        Gesture::Clear => canvas.clear(),
        Gesture::ChangeColor => canvas.cycle_color(),
        _ => return,
    }
    debug!(gesture = gesture.as_str(), "gesture action fired");
}
