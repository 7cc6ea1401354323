// One error type for the whole library.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// Opening/starting the camera failed
    #[error("Camera init error: {0}")]
    CameraInit(String),

    /// Grabbing/decoding a frame failed
    #[error("Camera frame error: {0}")]
    CameraFrame(String),

    /// A tunable is out of range
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// No landmark backend goes by this name
    #[error("Unknown landmark backend: {0} (expected one of: synthetic, none)")]
    UnknownBackend(String),
}

/// Result type for air canvas operations
pub type Result<T> = std::result::Result<T, Error>;
