// UI chrome drawn over the canvas: toolbar, gesture guide bar and the
// camera preview inset.

use image::{imageops, imageops::FilterType, Rgb, RgbImage};

use crate::config::{
    self, BrushSize, ACTIVE_GESTURE_COLOR, BUTTON_HEIGHT, BUTTON_WIDTH, COLOR_SWATCH_RADIUS,
    GESTURE_BAR_BG_COLOR, GESTURE_BAR_HEIGHT, GESTURE_BAR_PADDING, HIGHLIGHT_COLOR, PALETTE,
    TEXT_COLOR, TOOLBAR_BG_COLOR, TOOLBAR_HEIGHT, TOOLBAR_PADDING,
};
use crate::gesture::Gesture;
use crate::landmarks::LandmarkSet;
use crate::raster::{self, GLYPH_HEIGHT};
use crate::types::{pack_rgb, unpack_rgb, Color, FrameBuffer, Point};

const BUTTON_GAP: usize = 10;
/// Width reserved for the brush size indicator left of the buttons.
const BRUSH_SECTION_WIDTH: usize = 110;
const SWATCH_OUTLINE: Color = 0x00_C8_C8_C8;
const BUTTON_COLOR: Color = 0x00_50_50_50;

// ── Toolbar ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarButton {
    Undo,
    Redo,
    Clear,
}

impl ToolbarButton {
    pub const ALL: [ToolbarButton; 3] = [Self::Undo, Self::Redo, Self::Clear];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undo => "Undo",
            Self::Redo => "Redo",
            Self::Clear => "Clear",
        }
    }
}

/// What a click on the toolbar landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarHit {
    Color(Color),
    BrushSize,
    Button(ToolbarButton),
}

#[derive(Debug, Clone)]
struct Swatch {
    center: Point,
    color: Color,
}

#[derive(Debug, Clone)]
pub struct Toolbar {
    width: usize,
    swatches: Vec<Swatch>,
    brush_center: Point,
    buttons: Vec<(ToolbarButton, Point)>,
}

impl Toolbar {
    pub fn new(canvas_width: usize) -> Self {
        let button_start = canvas_width
            .saturating_sub(TOOLBAR_PADDING + ToolbarButton::ALL.len() * (BUTTON_WIDTH + BUTTON_GAP));
        let swatch_area = button_start.saturating_sub(BRUSH_SECTION_WIDTH + 2 * TOOLBAR_PADDING);
        let spacing = (swatch_area / PALETTE.len()) as i32;
        let start_x = TOOLBAR_PADDING as i32 + COLOR_SWATCH_RADIUS;
        let mid_y = (TOOLBAR_HEIGHT / 2) as i32;

        let swatches = PALETTE
            .iter()
            .enumerate()
            .map(|(i, (_, color))| Swatch {
                center: Point::new(start_x + i as i32 * spacing, mid_y),
                color: *color,
            })
            .collect();

        let buttons = ToolbarButton::ALL
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let x = button_start + i * (BUTTON_WIDTH + BUTTON_GAP);
                (*b, Point::new(x as i32, TOOLBAR_PADDING as i32))
            })
            .collect();

        let brush_center = Point::new(
            button_start.saturating_sub(BRUSH_SECTION_WIDTH / 2 + TOOLBAR_PADDING) as i32,
            mid_y,
        );

        Self { width: canvas_width, swatches, brush_center, buttons }
    }

    /// Map a click in canvas coordinates to a toolbar element.
    pub fn hit(&self, x: i32, y: i32) -> Option<ToolbarHit> {
        if y < 0 || y >= TOOLBAR_HEIGHT as i32 {
            return None;
        }
        let r2 = COLOR_SWATCH_RADIUS * COLOR_SWATCH_RADIUS;
        for s in &self.swatches {
            let (dx, dy) = (x - s.center.x, y - s.center.y);
            if dx * dx + dy * dy <= r2 {
                return Some(ToolbarHit::Color(s.color));
            }
        }
        for (button, origin) in &self.buttons {
            let inside_x = x >= origin.x && x < origin.x + BUTTON_WIDTH as i32;
            let inside_y = y >= origin.y && y < origin.y + BUTTON_HEIGHT as i32;
            if inside_x && inside_y {
                return Some(ToolbarHit::Button(*button));
            }
        }
        let half = (BRUSH_SECTION_WIDTH / 2) as i32;
        if (x - self.brush_center.x).abs() <= half {
            return Some(ToolbarHit::BrushSize);
        }
        None
    }

    pub fn draw(&self, fb: &mut FrameBuffer, current_color: Color, brush: BrushSize) {
        raster::blend_rect(fb, 0, 0, self.width as i32, TOOLBAR_HEIGHT as i32, TOOLBAR_BG_COLOR, 0.9);

        for s in &self.swatches {
            raster::fill_disc(fb, s.center.x, s.center.y, COLOR_SWATCH_RADIUS, s.color);
            raster::draw_ring(fb, s.center.x, s.center.y, COLOR_SWATCH_RADIUS, 2, SWATCH_OUTLINE);
            if s.color == current_color {
                raster::draw_ring(fb, s.center.x, s.center.y, COLOR_SWATCH_RADIUS + 5, 3, HIGHLIGHT_COLOR);
            }
        }

        // Brush preview: a dot of the real radius plus its name.
        let c = self.brush_center;
        raster::fill_disc(fb, c.x, c.y - 8, brush.px() as i32, current_color);
        let label = brush.as_str();
        raster::draw_text_5x7(fb, c.x - raster::text_width(label) / 2, c.y + 14, label, TEXT_COLOR);

        for (button, origin) in &self.buttons {
            let (w, h) = (BUTTON_WIDTH as i32, BUTTON_HEIGHT as i32);
            raster::fill_rect(fb, origin.x, origin.y, w, h, BUTTON_COLOR);
            raster::stroke_rect(fb, origin.x, origin.y, w, h, SWATCH_OUTLINE);
            let label = button.as_str();
            let tx = origin.x + (w - raster::text_width(label)) / 2;
            let ty = origin.y + (h - GLYPH_HEIGHT) / 2;
            raster::draw_text_5x7(fb, tx, ty, label, TEXT_COLOR);
        }
    }
}

// ── Gesture guide ──────────────────────────────────────────

/// Bottom bar listing every gesture, the active one highlighted.
#[derive(Debug, Clone)]
pub struct GestureGuide {
    width: usize,
    bar_y: i32,
}

impl GestureGuide {
    pub fn new(canvas_width: usize, canvas_height: usize) -> Self {
        Self {
            width: canvas_width,
            bar_y: canvas_height.saturating_sub(GESTURE_BAR_HEIGHT) as i32,
        }
    }

    /// Top edge of the bar.
    pub fn top(&self) -> i32 {
        self.bar_y
    }

    pub fn draw(&self, fb: &mut FrameBuffer, active: Gesture) {
        raster::blend_rect(fb, 0, self.bar_y, self.width as i32, GESTURE_BAR_HEIGHT as i32, GESTURE_BAR_BG_COLOR, 0.9);

        let pad = GESTURE_BAR_PADDING as i32;
        let n = Gesture::GUIDE.len() as i32;
        let cell_w = (self.width as i32 - 2 * pad) / n;
        let cell_h = GESTURE_BAR_HEIGHT as i32 - 2 * pad;
        for (i, gesture) in Gesture::GUIDE.iter().enumerate() {
            let x = pad + i as i32 * cell_w;
            let y = self.bar_y + pad;
            let inner_w = cell_w - 8;
            if *gesture == active {
                raster::fill_rect(fb, x, y, inner_w, cell_h, ACTIVE_GESTURE_COLOR);
            }
            raster::stroke_rect(fb, x, y, inner_w, cell_h, SWATCH_OUTLINE);

            let label = gesture.short_label();
            let hint = gesture.hint();
            let cx = x + inner_w / 2;
            raster::draw_text_5x7(fb, cx - raster::text_width(label) / 2, y + cell_h / 2 - 12, label, TEXT_COLOR);
            raster::draw_text_5x7(fb, cx - raster::text_width(hint) / 2, y + cell_h / 2 + 6, hint, SWATCH_OUTLINE);
        }
    }
}

// ── Camera preview ─────────────────────────────────────────

const LANDMARK_DOT: Color = 0x00_00_FF_00;

/// Scaled-down camera image in the top-right corner, under the toolbar.
#[derive(Debug, Clone)]
pub struct CameraPreview {
    origin: Point,
    width: u32,
    height: u32,
}

impl CameraPreview {
    pub fn new(canvas_width: usize, width: usize, height: usize) -> Self {
        let x = canvas_width.saturating_sub(width + 20) as i32;
        let y = (TOOLBAR_HEIGHT + 10) as i32;
        Self { origin: Point::new(x, y), width: width as u32, height: height as u32 }
    }

    pub fn draw(&self, fb: &mut FrameBuffer, frame: &FrameBuffer, hand: Option<&LandmarkSet>) {
        if frame.width == 0 || frame.height == 0 || self.width == 0 || self.height == 0 {
            return;
        }
        let scaled = scale_frame(frame, self.width, self.height);
        for (x, y, px) in scaled.enumerate_pixels() {
            let color = pack_rgb(px[0], px[1], px[2]);
            raster::put_pixel(fb, self.origin.x + x as i32, self.origin.y + y as i32, color);
        }

        if let Some(hand) = hand {
            for lm in hand.points() {
                let px = self.origin.x + (lm.x * self.width as f32) as i32;
                let py = self.origin.y + (lm.y * self.height as f32) as i32;
                raster::fill_disc(fb, px, py, 2, LANDMARK_DOT);
            }
        }

        raster::stroke_rect(fb, self.origin.x - 1, self.origin.y - 1, self.width as i32 + 2, self.height as i32 + 2, SWATCH_OUTLINE);
    }
}

/// Resize a packed frame with a triangle filter.
fn scale_frame(frame: &FrameBuffer, width: u32, height: u32) -> RgbImage {
    let src = RgbImage::from_fn(frame.width as u32, frame.height as u32, |x, y| {
        let (r, g, b) = unpack_rgb(frame.pixels[y as usize * frame.width + x as usize]);
        Rgb([r, g, b])
    });
    imageops::resize(&src, width, height, FilterType::Triangle)
}

// ── Cursor and status ──────────────────────────────────────

/// Ring in Move mode, crosshair otherwise.
pub fn draw_cursor(fb: &mut FrameBuffer, at: Point, gesture: Gesture) {
    if gesture == Gesture::Move {
        raster::draw_ring(fb, at.x, at.y, 10, 2, HIGHLIGHT_COLOR);
        raster::fill_disc(fb, at.x, at.y, 3, HIGHLIGHT_COLOR);
    } else {
        raster::draw_crosshair(fb, at.x, at.y, 12, HIGHLIGHT_COLOR);
    }
}

/// "FPS: 29.8 | Gesture: Draw | Color: Red"
pub fn status_line(fps: f32, gesture: Gesture, color: Color) -> String {
    format!("FPS: {fps:.1} | Gesture: {} | Color: {}", gesture.as_str(), config::color_name(color))
}
