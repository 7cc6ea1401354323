// Webcam capture. Frames come back mirrored so the preview behaves like a
// mirror and landmark x matches the on-screen side of the hand.

use air_canvas::error::Error;
use air_canvas::types::{pack_rgb, FrameBuffer};
use tracing::info;

use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution},
};

pub struct CameraCapture {
    cam: Camera,
}

impl CameraCapture {
    /// Open device `index` near the requested resolution. The stream may
    /// settle on something else, which is logged.
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        let fmt = CameraFormat::new(Resolution::new(width, height), FrameFormat::YUYV, 30);
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(CameraIndex::Index(index), req)
            .map_err(|e| Error::CameraInit(format!("create camera {index}: {e}")))?;
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("open stream: {e}")))?;

        let actual = cam.resolution();
        info!(index, width = actual.width(), height = actual.height(), "camera opened");

        Ok(Self { cam })
    }

    /// Block for the next frame and return it flipped left-to-right as
    /// 0x00RRGGBB pixels.
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("fetch frame: {e}")))?;
        let rgb = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("decode RGB: {e}")))?;

        let (w, h) = rgb.dimensions();
        let (w, h) = (w as usize, h as usize);
        let raw = rgb.as_raw();
        if w == 0 || h == 0 || raw.len() < w * h * 3 {
            return Err(Error::CameraFrame(format!("short frame: {} bytes for {w}x{h}", raw.len())));
        }

        let mut pixels = Vec::with_capacity(w * h);
        for row in raw.chunks_exact(w * 3).take(h) {
            for px in row.chunks_exact(3).rev() {
                pixels.push(pack_rgb(px[0], px[1], px[2]));
            }
        }

        Ok(FrameBuffer { width: w, height: h, pixels })
    }
}
