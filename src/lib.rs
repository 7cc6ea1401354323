// Air Canvas: draw on a virtual canvas with hand gestures.
//
// Per frame, a `source::LandmarkSource` reports zero or one hand. The
// landmarks become finger states (`fingers`), a gesture label
// (`gesture`), and a debounced label (`stabilizer`). The
// `controller` turns that into stroke operations on the `canvas`,
// which `render` rasterizes for the window.

pub mod canvas;
pub mod config;
pub mod controller;
pub mod error;
pub mod fingers;
pub mod gesture;
pub mod hud;
pub mod landmarks;
pub mod raster;
pub mod render;
pub mod source;
pub mod stabilizer;
pub mod types;

pub use canvas::{Canvas, CanvasSnapshot, Stroke};
pub use config::AppConfig;
pub use controller::{GestureController, GestureReading};
pub use error::{Error, Result};
pub use gesture::{classify, Gesture};
pub use landmarks::{HandLandmark, Landmark, LandmarkSet};
pub use source::{Backend, LandmarkSource};
pub use stabilizer::{GestureStabilizer, StabilizerConfig};
