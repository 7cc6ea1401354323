// The on-screen window and the keyboard/mouse state the frame loop polls.

use air_canvas::error::Error;
use air_canvas::gesture::Gesture;
use air_canvas::source::PoseRequest;
use air_canvas::types::FrameBuffer;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// Number keys that pose the synthetic hand.
const POSE_KEYS: [(Key, PoseRequest); 8] = [
    (Key::Key0, PoseRequest::Hide),
    (Key::Key1, PoseRequest::Show(Gesture::Draw)),
    (Key::Key2, PoseRequest::Show(Gesture::Move)),
    (Key::Key3, PoseRequest::Show(Gesture::Pause)),
    (Key::Key4, PoseRequest::Show(Gesture::Undo)),
    (Key::Key5, PoseRequest::Show(Gesture::Redo)),
    (Key::Key6, PoseRequest::Show(Gesture::Clear)),
    (Key::Key7, PoseRequest::Show(Gesture::ChangeColor)),
];

/// Single-shot keyboard commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Clear,
    Undo,
    Redo,
}

pub struct AppWindow {
    window: Window,
}

impl AppWindow {
    pub fn new(title: &str, width: usize, height: usize, target_fps: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(target_fps);
        Ok(Self { window })
    }

    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Esc or Q.
    pub fn quit_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape) || self.window.is_key_down(Key::Q)
    }

    /// Every command key pressed since the last update, in a fixed order.
    pub fn key_actions(&self) -> Vec<KeyAction> {
        [(Key::C, KeyAction::Clear), (Key::U, KeyAction::Undo), (Key::R, KeyAction::Redo)]
            .into_iter()
            .filter(|(key, _)| self.window.is_key_pressed(*key, KeyRepeat::No))
            .map(|(_, action)| action)
            .collect()
    }

    /// Pose picked this frame with the number keys; the lowest key wins
    /// when several go down at once.
    pub fn pose_request(&self) -> Option<PoseRequest> {
        POSE_KEYS
            .iter()
            .find(|(key, _)| self.window.is_key_pressed(*key, KeyRepeat::No))
            .map(|(_, pose)| *pose)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Mouse position in window pixels, clamped to the window.
    pub fn mouse_pos(&self) -> Option<(i32, i32)> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| (x.max(0.0) as i32, y.max(0.0) as i32))
    }
}
