// Stroke storage with linear undo/redo.
//
// Committed strokes and undone strokes live on two stacks. The stroke
// being drawn is held on the side until it is sealed. Committing a new
// stroke drops the redo stack, so history never branches. Every
// operation is a no-op when it does not apply to the current state.

use std::collections::VecDeque;

use tracing::debug;

use crate::config::{self, AppConfig, BrushSize, PALETTE};
use crate::gesture::Gesture;
use crate::types::{Color, Point};

/// One continuous drawn path. Sealed strokes are never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stroke {
    points: Vec<Point>,
    color: Color,
    size: u32,
}

impl Stroke {
    pub fn new(color: Color, size: u32) -> Self {
        Self { points: Vec::new(), color, size }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Brush radius in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Read-only view handed to the renderer once per frame.
#[derive(Debug, Clone, Copy)]
pub struct CanvasSnapshot<'a> {
    pub committed: &'a VecDeque<Stroke>,
    pub in_progress: Option<&'a Stroke>,
    pub color: Color,
    pub brush_size: BrushSize,
    pub gesture: Gesture,
}

/// The stroke log plus current brush selection.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    max_strokes: usize,
    strokes: VecDeque<Stroke>,
    redo: Vec<Stroke>,
    current: Option<Stroke>,
    color: Color,
    brush_size: BrushSize,
    dirty: bool,
}

impl Canvas {
    pub fn new(width: usize, height: usize, max_strokes: usize) -> Self {
        Self {
            width,
            height,
            max_strokes,
            strokes: VecDeque::new(),
            redo: Vec::new(),
            current: None,
            color: config::DEFAULT_COLOR,
            brush_size: BrushSize::Medium,
            dirty: true,
        }
    }

    /// Canvas sized and primed from the application config.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut canvas = Self::new(config.canvas_width, config.canvas_height, config.max_strokes);
        canvas.color = config.color;
        canvas.brush_size = config.brush_size;
        canvas
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    /// Committed strokes, oldest first.
    pub fn strokes(&self) -> &VecDeque<Stroke> {
        &self.strokes
    }

    /// Undone strokes; the last entry is the next one `redo` restores.
    pub fn redo_stack(&self) -> &[Stroke] {
        &self.redo
    }

    pub fn current_stroke(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn color_name(&self) -> &'static str {
        config::color_name(self.color)
    }

    pub fn brush_size(&self) -> BrushSize {
        self.brush_size
    }

    /// Whether the committed list changed since the last call, clearing
    /// the flag. The renderer re-rasterizes everything when this is set.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn snapshot(&self, gesture: Gesture) -> CanvasSnapshot<'_> {
        CanvasSnapshot {
            committed: &self.strokes,
            in_progress: self.current.as_ref(),
            color: self.color,
            brush_size: self.brush_size,
            gesture,
        }
    }

    // ── Stroke lifecycle ───────────────────────────────────

    pub fn start_stroke(&mut self) {
        if self.current.is_none() {
            self.current = Some(Stroke::new(self.color, self.brush_size.px()));
        }
    }

    /// Append a point, clamped to the canvas, to the stroke in progress.
    pub fn add_point(&mut self, x: i32, y: i32) {
        let max_x = self.width.saturating_sub(1) as i32;
        let max_y = self.height.saturating_sub(1) as i32;
        if let Some(stroke) = self.current.as_mut() {
            stroke.points.push(Point::new(x.clamp(0, max_x), y.clamp(0, max_y)));
        }
    }

    /// Seal the stroke in progress. Empty strokes are dropped.
    pub fn end_stroke(&mut self) {
        let Some(stroke) = self.current.take() else {
            return;
        };
        if stroke.is_empty() {
            return;
        }

        debug!(points = stroke.points.len(), "stroke committed");
        self.strokes.push_back(stroke);
        self.redo.clear();
        while self.strokes.len() > self.max_strokes {
            self.strokes.pop_front();
        }
        self.dirty = true;
    }

    // ── History ────────────────────────────────────────────

    pub fn undo(&mut self) {
        if let Some(stroke) = self.strokes.pop_back() {
            self.redo.push(stroke);
            self.dirty = true;
            debug!(committed = self.strokes.len(), redo = self.redo.len(), "undo");
        }
    }

    pub fn redo(&mut self) {
        if let Some(stroke) = self.redo.pop() {
            self.strokes.push_back(stroke);
            self.dirty = true;
            debug!(committed = self.strokes.len(), redo = self.redo.len(), "redo");
        }
    }

    /// Drop everything, including a stroke in progress.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.redo.clear();
        self.current = None;
        self.dirty = true;
        debug!("canvas cleared");
    }

    // ── Brush ──────────────────────────────────────────────

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_brush_size(&mut self, size: BrushSize) {
        self.brush_size = size;
    }

    /// Step to the next palette color, wrapping. An off-palette color
    /// resets to the first entry.
    pub fn cycle_color(&mut self) {
        let next = match PALETTE.iter().position(|(_, c)| *c == self.color) {
            Some(i) => (i + 1) % PALETTE.len(),
            None => 0,
        };
        self.color = PALETTE[next].1;
        debug!(color = PALETTE[next].0, "color cycled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn canvas() -> Canvas {
        Canvas::new(100, 100, 50)
    }

    fn draw(canvas: &mut Canvas, pts: &[(i32, i32)]) {
        canvas.start_stroke();
        for (x, y) in pts {
            canvas.add_point(*x, *y);
        }
        canvas.end_stroke();
    }

    fn pts(stroke: &Stroke) -> Vec<(i32, i32)> {
        stroke.points().iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_stroke_undo_redo_scenario() {
        let mut c = canvas();
        draw(&mut c, &[(10, 10), (20, 20), (30, 30)]);
        assert_eq!(c.strokes().len(), 1);
        assert_eq!(pts(&c.strokes()[0]), vec![(10, 10), (20, 20), (30, 30)]);

        c.undo();
        assert!(c.strokes().is_empty());
        assert_eq!(c.redo_stack().len(), 1);

        c.redo();
        assert_eq!(c.strokes().len(), 1);
        assert!(c.redo_stack().is_empty());
        assert_eq!(pts(&c.strokes()[0]), vec![(10, 10), (20, 20), (30, 30)]);
    }

    #[test]
    fn test_start_stroke_is_idempotent() {
        let mut c = canvas();
        c.start_stroke();
        c.add_point(1, 1);
        c.set_color(0x00_FF_00_00);
        c.start_stroke();
        c.add_point(2, 2);
        let stroke = c.current_stroke().unwrap();
        assert_eq!(stroke.points().len(), 2);
        assert_eq!(stroke.color(), config::DEFAULT_COLOR);
    }

    #[test]
    fn test_add_point_requires_stroke() {
        let mut c = canvas();
        c.add_point(5, 5);
        assert!(c.current_stroke().is_none());
        c.end_stroke();
        assert!(c.strokes().is_empty());
    }

    #[test]
    fn test_add_point_clamps() {
        let mut c = canvas();
        draw(&mut c, &[(-5, 50), (150, -1), (99, 100)]);
        assert_eq!(pts(&c.strokes()[0]), vec![(0, 50), (99, 0), (99, 99)]);
    }

    #[test]
    fn test_empty_stroke_not_committed() {
        let mut c = canvas();
        draw(&mut c, &[(1, 1)]);
        c.undo();
        c.start_stroke();
        c.end_stroke();
        assert!(c.strokes().is_empty());
        assert!(!c.is_drawing());
        // Redo survives an empty stroke.
        assert_eq!(c.redo_stack().len(), 1);
    }

    #[test]
    fn test_new_stroke_clears_redo() {
        let mut c = canvas();
        draw(&mut c, &[(1, 1)]);
        draw(&mut c, &[(2, 2)]);
        c.undo();
        assert_eq!(c.redo_stack().len(), 1);
        draw(&mut c, &[(3, 3)]);
        assert!(c.redo_stack().is_empty());
        c.redo();
        assert_eq!(c.strokes().len(), 2);
        assert_eq!(pts(&c.strokes()[1]), vec![(3, 3)]);
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut c = Canvas::new(100, 100, 3);
        for i in 0..5 {
            draw(&mut c, &[(i, i)]);
        }
        assert_eq!(c.strokes().len(), 3);
        let firsts: Vec<_> = c.strokes().iter().map(|s| s.points()[0].x).collect();
        assert_eq!(firsts, vec![2, 3, 4]);
    }

    #[test]
    fn test_undo_redo_on_empty_are_noops() {
        let mut c = canvas();
        c.take_dirty();
        c.undo();
        c.redo();
        assert!(!c.take_dirty());
        assert!(c.strokes().is_empty());
    }

    #[test]
    fn test_clear_discards_everything() {
        let mut c = canvas();
        draw(&mut c, &[(1, 1)]);
        draw(&mut c, &[(2, 2)]);
        c.undo();
        c.start_stroke();
        c.add_point(3, 3);
        c.clear();
        assert!(c.strokes().is_empty());
        assert!(c.redo_stack().is_empty());
        assert!(!c.is_drawing());
        assert!(c.take_dirty());
    }

    #[test]
    fn test_brush_applies_to_later_strokes_only() {
        let mut c = canvas();
        draw(&mut c, &[(1, 1)]);
        c.set_color(0x00_00_FF_00);
        c.set_brush_size(BrushSize::Large);
        draw(&mut c, &[(2, 2)]);
        assert_eq!(c.strokes()[0].color(), config::DEFAULT_COLOR);
        assert_eq!(c.strokes()[0].size(), BrushSize::Medium.px());
        assert_eq!(c.strokes()[1].color(), 0x00_00_FF_00);
        assert_eq!(c.strokes()[1].size(), BrushSize::Large.px());
    }

    #[test]
    fn test_cycle_color_wraps() {
        let mut c = canvas();
        assert_eq!(c.color_name(), "White");
        c.cycle_color();
        assert_eq!(c.color_name(), "Eraser");
        c.cycle_color();
        assert_eq!(c.color_name(), "Red");
        c.cycle_color();
        assert_eq!(c.color_name(), "Green");
    }

    #[test]
    fn test_cycle_color_off_palette_resets() {
        let mut c = canvas();
        c.set_color(0x00_12_34_56);
        assert_eq!(c.color_name(), "Unknown");
        c.cycle_color();
        assert_eq!(c.color(), PALETTE[0].1);
    }

    #[test]
    fn test_from_config() {
        let config = AppConfig { brush_size: BrushSize::Small, color: PALETTE[2].1, ..AppConfig::default() };
        let c = Canvas::from_config(&config);
        assert_eq!((c.width(), c.height()), (1280, 720));
        assert_eq!(c.brush_size(), BrushSize::Small);
        assert_eq!(c.color_name(), "Blue");
    }

    #[test]
    fn test_dirty_tracks_committed_changes() {
        let mut c = canvas();
        assert!(c.take_dirty());
        assert!(!c.take_dirty());
        c.start_stroke();
        c.add_point(1, 1);
        assert!(!c.take_dirty());
        c.end_stroke();
        assert!(c.take_dirty());
    }

    #[test]
    fn test_snapshot_exposes_state() {
        let mut c = canvas();
        draw(&mut c, &[(1, 1)]);
        c.start_stroke();
        c.add_point(4, 4);
        let snap = c.snapshot(Gesture::Draw);
        assert_eq!(snap.committed.len(), 1);
        assert_eq!(snap.in_progress.map(|s| s.points().len()), Some(1));
        assert_eq!(snap.gesture, Gesture::Draw);
        assert_eq!(snap.brush_size, BrushSize::Medium);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Stroke(Vec<(i32, i32)>),
        Undo,
        Redo,
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => proptest::collection::vec((-20i32..120, -20i32..120), 0..5).prop_map(Op::Stroke),
            2 => Just(Op::Undo),
            2 => Just(Op::Redo),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn committed_count_bounded(ops in proptest::collection::vec(op(), 0..80), max in 1usize..6) {
            let mut c = Canvas::new(100, 100, max);
            for op in ops {
                match op {
                    Op::Stroke(p) => draw(&mut c, &p),
                    Op::Undo => c.undo(),
                    Op::Redo => c.redo(),
                    Op::Clear => c.clear(),
                }
                prop_assert!(c.strokes().len() <= max);
                prop_assert!(!c.is_drawing());
            }
        }

        #[test]
        fn undo_then_redo_restores(ops in proptest::collection::vec(op(), 1..40)) {
            let mut c = canvas();
            for op in ops {
                match op {
                    Op::Stroke(p) => draw(&mut c, &p),
                    Op::Undo => c.undo(),
                    Op::Redo => c.redo(),
                    Op::Clear => c.clear(),
                }
            }
            prop_assume!(!c.strokes().is_empty());
            let before = c.strokes().clone();
            c.undo();
            c.redo();
            prop_assert_eq!(c.strokes(), &before);
        }
    }
}
