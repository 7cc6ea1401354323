// Frame composition.
//
// Committed strokes are rasterized into a cached layer that is rebuilt
// from scratch only when the stroke log changed (commit, undo, redo,
// clear). Strokes paint over each other, so there is no cheaper way to
// take one back out. The in-progress stroke and all chrome are drawn on
// top every frame.

use crate::canvas::{CanvasSnapshot, Stroke};
use crate::config::{AppConfig, CANVAS_BG_COLOR, GESTURE_BAR_HEIGHT, TEXT_COLOR};
use crate::hud::{self, CameraPreview, GestureGuide, Toolbar};
use crate::landmarks::LandmarkSet;
use crate::raster;
use crate::types::{FrameBuffer, Point};

/// Per-frame extras that do not live in the stroke log.
#[derive(Clone, Copy, Default)]
pub struct Overlay<'a> {
    /// Mirrored camera frame, when a camera is open.
    pub camera: Option<&'a FrameBuffer>,
    pub hand: Option<&'a LandmarkSet>,
    pub cursor: Option<Point>,
    pub status: &'a str,
}

pub struct Renderer {
    layer: FrameBuffer,
    toolbar: Toolbar,
    guide: GestureGuide,
    preview: CameraPreview,
}

impl Renderer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            layer: FrameBuffer::new(config.canvas_width, config.canvas_height, CANVAS_BG_COLOR),
            toolbar: Toolbar::new(config.canvas_width),
            guide: GestureGuide::new(config.canvas_width, config.canvas_height),
            preview: CameraPreview::new(config.canvas_width, config.preview_width, config.preview_height),
        }
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    /// Re-rasterize every committed stroke onto a blank layer.
    pub fn rebuild<'s>(&mut self, committed: impl IntoIterator<Item = &'s Stroke>) {
        self.layer.fill(CANVAS_BG_COLOR);
        for stroke in committed {
            raster::draw_stroke(&mut self.layer, stroke);
        }
    }

    /// Build this frame's image into `screen`. `rebuild` forces the
    /// committed layer to be redrawn first.
    pub fn compose(&mut self, screen: &mut FrameBuffer, snap: &CanvasSnapshot<'_>, rebuild: bool, overlay: &Overlay<'_>) {
        if rebuild {
            self.rebuild(snap.committed.iter());
        }
        screen.pixels.copy_from_slice(&self.layer.pixels);

        if let Some(stroke) = snap.in_progress {
            raster::draw_stroke(screen, stroke);
        }

        self.toolbar.draw(screen, snap.color, snap.brush_size);
        self.guide.draw(screen, snap.gesture);

        if let Some(frame) = overlay.camera {
            self.preview.draw(screen, frame, overlay.hand);
        }

        if let Some(at) = overlay.cursor {
            hud::draw_cursor(screen, at, snap.gesture);
        }

        let status_y = screen.height as i32 - GESTURE_BAR_HEIGHT as i32 - 18;
        raster::draw_text_5x7(screen, 10, status_y, overlay.status, TEXT_COLOR);
    }
}
