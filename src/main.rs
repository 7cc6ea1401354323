// Air Canvas: draw in the air with your index finger.
//
// gesture mode: a landmark backend reports the hand every frame; the
//   gesture pipeline turns poses into strokes. Keys 1-7 pose the synthetic
//   hand, 0 hides it, and the mouse moves it.
// pointer mode: press-drag with the mouse to draw.
// Both: click the toolbar, C clears, U undoes, R redoes, Q/Esc quits.

mod camera;
mod window;

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, info, warn};

use air_canvas::config::{AppConfig, TOOLBAR_HEIGHT};
use air_canvas::controller::GestureController;
use air_canvas::gesture::Gesture;
use air_canvas::hud::{self, ToolbarButton, ToolbarHit};
use air_canvas::render::{Overlay, Renderer};
use air_canvas::source::{Backend, Cue};
use air_canvas::types::{FrameBuffer, Point};
use air_canvas::Canvas;

use camera::CameraCapture;
use window::{AppWindow, KeyAction};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Hand landmarks drive the canvas
    Gesture,
    /// The mouse draws directly
    Pointer,
}

#[derive(Parser, Debug)]
#[command(name = "air-canvas", about = "Gesture-controlled drawing canvas")]
struct Cli {
    /// Input mode
    #[arg(long, value_enum, default_value_t = Mode::Gesture)]
    mode: Mode,

    /// Landmark backend: synthetic or none
    #[arg(long, default_value = "synthetic")]
    backend: Backend,

    /// Run gesture mode without opening a camera
    #[arg(long)]
    no_camera: bool,

    /// Camera device index
    #[arg(long)]
    camera_index: Option<u32>,

    /// Majority-vote window in frames
    #[arg(long)]
    window: Option<usize>,

    /// Frames to hold a new gesture before another change is accepted
    #[arg(long)]
    cooldown: Option<u32>,

    /// How far a fingertip must clear its joint to count as up
    #[arg(long)]
    finger_threshold: Option<f32>,

    /// Committed strokes kept for undo
    #[arg(long)]
    max_strokes: Option<usize>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<usize>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<usize>,
}

impl Cli {
    fn config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        if let Some(index) = self.camera_index {
            config.camera_index = index;
        }
        if let Some(window) = self.window {
            config.stabilizer.window = window;
        }
        if let Some(cooldown) = self.cooldown {
            config.stabilizer.cooldown_frames = cooldown;
        }
        if let Some(threshold) = self.finger_threshold {
            config.fingers.finger_tip = threshold;
        }
        if let Some(max) = self.max_strokes {
            config.max_strokes = max;
        }
        if let Some(w) = self.width {
            config.canvas_width = w;
        }
        if let Some(h) = self.height {
            config.canvas_height = h;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "air_canvas=info".into()),
        )
        .init();

    let config = cli.config();
    config.validate()?;

    info!("air-canvas v{} starting", env!("CARGO_PKG_VERSION"));
    info!(mode = ?cli.mode, backend = cli.backend.as_str(), "input");

    let mut canvas = Canvas::from_config(&config);
    let mut renderer = Renderer::new(&config);
    let mut controller = GestureController::new(config.stabilizer, config.fingers);
    let mut source = cli.backend.open();

    let mut cam = if cli.mode == Mode::Gesture && !cli.no_camera {
        let cam = CameraCapture::new(config.camera_index, config.camera_width, config.camera_height)
            .context("no usable camera; pass --no-camera to run without one")?;
        Some(cam)
    } else {
        None
    };

    let mut win = AppWindow::new("Air Canvas", config.canvas_width, config.canvas_height, config.target_fps)?;
    let mut screen = FrameBuffer::new(config.canvas_width, config.canvas_height, 0);
    // Pointer drawing stops at the gesture guide.
    let draw_bottom = hud::GestureGuide::new(config.canvas_width, config.canvas_height).top();

    let mut mouse_was_down = false;
    let mut gesture = Gesture::None;
    let mut fps = 0.0_f32;
    let mut frames_this_second: u32 = 0;
    let mut last_fps_time = Instant::now();

    while win.is_open() && !win.quit_pressed() {
        let now = Instant::now();

        // 1) Camera
        let frame = match cam.as_mut().map(CameraCapture::next_frame) {
            Some(Ok(frame)) => Some(frame),
            Some(Err(e)) => {
                warn!("dropping frame: {e}");
                None
            }
            None => None,
        };

        // 2) Keyboard and toolbar
        for action in win.key_actions() {
            match action {
                KeyAction::Clear => canvas.clear(),
                KeyAction::Undo => canvas.undo(),
                KeyAction::Redo => canvas.redo(),
            }
        }

        let mouse = win.mouse_pos();
        let mouse_down = win.left_mouse_down();
        let pressed = mouse_down && !mouse_was_down;
        mouse_was_down = mouse_down;

        let mut on_toolbar = false;
        if let Some((mx, my)) = mouse {
            on_toolbar = my < TOOLBAR_HEIGHT as i32;
            if pressed {
                match renderer.toolbar().hit(mx, my) {
                    Some(ToolbarHit::Color(color)) => canvas.set_color(color),
                    Some(ToolbarHit::BrushSize) => canvas.set_brush_size(canvas.brush_size().next()),
                    Some(ToolbarHit::Button(ToolbarButton::Undo)) => canvas.undo(),
                    Some(ToolbarHit::Button(ToolbarButton::Redo)) => canvas.redo(),
                    Some(ToolbarHit::Button(ToolbarButton::Clear)) => canvas.clear(),
                    None => {}
                }
            }
        }

        // 3) Input
        let mut hand = None;
        let cursor = match cli.mode {
            Mode::Gesture => {
                let pointer = mouse.map(|(mx, my)| {
                    (mx as f32 / config.canvas_width as f32, my as f32 / config.canvas_height as f32)
                });
                source.cue(Cue { pose: win.pose_request(), pointer });
                hand = source.next_hand(frame.as_ref());

                let reading = controller.process(hand.as_ref(), &mut canvas);
                gesture = reading.gesture;
                reading.position
            }
            Mode::Pointer => {
                let inside = mouse.filter(|&(_, my)| !on_toolbar && my < draw_bottom);
                match (mouse_down, inside) {
                    (true, Some((mx, my))) => {
                        canvas.start_stroke();
                        canvas.add_point(mx, my);
                        gesture = Gesture::Draw;
                    }
                    _ => {
                        canvas.end_stroke();
                        gesture = Gesture::None;
                    }
                }
                mouse.map(Point::from)
            }
        };

        // 4) Compose and present
        let status = hud::status_line(fps, gesture, canvas.color());
        let overlay = Overlay {
            camera: frame.as_ref(),
            hand: hand.as_ref(),
            cursor,
            status: &status,
        };
        let rebuild = canvas.take_dirty();
        renderer.compose(&mut screen, &canvas.snapshot(gesture), rebuild, &overlay);
        win.present(&screen)?;

        // 5) FPS
        frames_this_second += 1;
        let elapsed = now.duration_since(last_fps_time);
        if elapsed >= Duration::from_secs(1) {
            fps = frames_this_second as f32 / elapsed.as_secs_f32();
            debug!(fps, "frame rate");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    canvas.end_stroke();
    info!(strokes = canvas.strokes().len(), "air-canvas shutting down");
    Ok(())
}

