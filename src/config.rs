// Tunables for the whole application.
//
// Everything the frame loop needs is gathered in `AppConfig`; the
// command line overrides a subset of it before `AppConfig::validate`
// runs once at startup.

use crate::error::{Error, Result};
use crate::fingers::FingerThresholds;
use crate::stabilizer::StabilizerConfig;
use crate::types::Color;

// ── Layout ─────────────────────────────────────────────────

/// Height of the toolbar strip along the top edge.
pub const TOOLBAR_HEIGHT: usize = 80;
pub const TOOLBAR_PADDING: usize = 10;
pub const COLOR_SWATCH_RADIUS: i32 = 25;
pub const BUTTON_WIDTH: usize = 60;
pub const BUTTON_HEIGHT: usize = 60;

/// Height of the gesture guide bar along the bottom edge.
pub const GESTURE_BAR_HEIGHT: usize = 100;
pub const GESTURE_BAR_PADDING: usize = 15;

// ── Colors ─────────────────────────────────────────────────

pub const CANVAS_BG_COLOR: Color = 0x00_28_28_28;
pub const TOOLBAR_BG_COLOR: Color = 0x00_3C_3C_3C;
pub const GESTURE_BAR_BG_COLOR: Color = 0x00_32_32_32;
pub const TEXT_COLOR: Color = 0x00_FF_FF_FF;
pub const HIGHLIGHT_COLOR: Color = 0x00_00_FF_FF;
pub const ACTIVE_GESTURE_COLOR: Color = 0x00_00_C8_00;

/// Drawing palette in cycling order. The eraser paints with the
/// background color.
pub const PALETTE: [(&str, Color); 8] = [
    ("Red", 0x00_FF_00_00),
    ("Green", 0x00_00_FF_00),
    ("Blue", 0x00_00_00_FF),
    ("Yellow", 0x00_FF_FF_00),
    ("Orange", 0x00_FF_A5_00),
    ("Purple", 0x00_FF_00_FF),
    ("White", 0x00_FF_FF_FF),
    ("Eraser", CANVAS_BG_COLOR),
];

pub const DEFAULT_COLOR: Color = 0x00_FF_FF_FF;

/// Palette name of a color, "Unknown" for anything off-palette.
pub fn color_name(color: Color) -> &'static str {
    PALETTE
        .iter()
        .find(|(_, c)| *c == color)
        .map(|(name, _)| *name)
        .unwrap_or("Unknown")
}

// ── Brushes ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrushSize {
    Small,
    Medium,
    Large,
}

impl BrushSize {
    pub const ALL: [BrushSize; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Brush radius in pixels.
    pub fn px(&self) -> u32 {
        match self {
            Self::Small => 3,
            Self::Medium => 6,
            Self::Large => 10,
        }
    }

    /// Next size up, wrapping back to small.
    pub fn next(&self) -> Self {
        match self {
            Self::Small => Self::Medium,
            Self::Medium => Self::Large,
            Self::Large => Self::Small,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

// ── Config ─────────────────────────────────────────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Canvas (and window) size in pixels.
    pub canvas_width: usize,
    pub canvas_height: usize,
    /// Camera device index (0 = default webcam).
    pub camera_index: u32,
    /// Requested camera resolution; the device may pick something close.
    pub camera_width: u32,
    pub camera_height: u32,
    /// Camera preview inset size.
    pub preview_width: usize,
    pub preview_height: usize,
    /// Majority-vote window and cooldown.
    pub stabilizer: StabilizerConfig,
    /// Finger up/down margins.
    pub fingers: FingerThresholds,
    /// Maximum number of committed strokes kept for undo.
    pub max_strokes: usize,
    /// Brush and color selected at startup.
    pub brush_size: BrushSize,
    pub color: Color,
    /// Frame pacing for the window.
    pub target_fps: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1280,
            canvas_height: 720,
            camera_index: 0,
            camera_width: 640,
            camera_height: 480,
            preview_width: 240,
            preview_height: 180,
            stabilizer: StabilizerConfig::default(),
            fingers: FingerThresholds::default(),
            max_strokes: 50,
            brush_size: BrushSize::Medium,
            color: DEFAULT_COLOR,
            target_fps: 30,
        }
    }
}

impl AppConfig {
    /// Reject settings the frame loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(Error::Config(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        let chrome = TOOLBAR_HEIGHT + GESTURE_BAR_HEIGHT;
        if self.canvas_height <= chrome {
            return Err(Error::Config(format!(
                "canvas height {} leaves no room below the toolbar and gesture bar ({chrome} px)",
                self.canvas_height
            )));
        }
        if self.stabilizer.window == 0 {
            return Err(Error::Config("smoothing window must hold at least one frame".into()));
        }
        if self.max_strokes == 0 {
            return Err(Error::Config("max_strokes must be at least 1".into()));
        }
        if !(0.0..1.0).contains(&self.fingers.finger_tip) || !(0.0..1.0).contains(&self.fingers.thumb_margin) {
            return Err(Error::Config(format!(
                "finger thresholds must lie in [0, 1), got tip={} thumb={}",
                self.fingers.finger_tip, self.fingers.thumb_margin
            )));
        }
        if self.preview_width > self.canvas_width || self.preview_height > self.canvas_height {
            return Err(Error::Config("camera preview does not fit on the canvas".into()));
        }
        Ok(())
    }
}
