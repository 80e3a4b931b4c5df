pub mod headless;
pub mod window;

use std::path::{Path, PathBuf};

use crate::canvas::Canvas;
use crate::capture;
use crate::error::{Error, Result};
use crate::input::PolledEvents;

pub use headless::HeadlessDisplay;
pub use window::WinitDisplay;

/// Everything the frame loop needs from the platform.
///
/// The value returned by `create_window` is the only handle to the window:
/// there is no global state, every call goes through it.
pub trait Display {
    fn create_window(width: u32, height: u32, title: &str) -> Result<Self>
    where
        Self: Sized;

    /// Drains pending platform events.
    fn poll_events(&mut self) -> Result<PolledEvents>;

    fn begin_frame(&mut self) -> Result<()> {
        Ok(())
    }

    /// Copies the canvas onto the display. The canvas must have the size
    /// the window was created with.
    fn present(&mut self, canvas: &Canvas) -> Result<()>;

    /// Flips the presented frame to the screen.
    fn end_frame(&mut self) -> Result<()>;

    /// Writes the last presented frame to `<dir>/<name>_<timestamp>.png`.
    fn save_png(&mut self, dir: &Path, name: &str) -> Result<PathBuf>;

    /// Releases platform resources. The frame loop calls this exactly once.
    fn shutdown(&mut self);
}

/// The last canvas handed to `present`, black until the first one arrives.
pub struct PresentedFrame {
    canvas: Canvas,
}

impl PresentedFrame {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let canvas = Canvas::try_new(width, height)
            .ok_or_else(|| Error::Config(format!("canvas size {width}x{height} is too large")))?;
        Ok(PresentedFrame { canvas })
    }

    pub fn update(&mut self, canvas: &Canvas) {
        self.canvas.clone_from(canvas);
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn save_png(&self, dir: &Path, name: &str) -> Result<PathBuf> {
        capture::save_rgb(
            dir,
            name,
            self.canvas.width(),
            self.canvas.height(),
            self.canvas.as_rgb(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use super::*;
    use crate::canvas::Color;

    fn decode(path: &Path) -> (png::ColorType, Vec<u8>) {
        let decoder = png::Decoder::new(File::open(path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info.color_type, buf)
    }

    #[test]
    fn test_save_before_first_present_is_opaque_black() {
        let tmp = tempfile::tempdir().unwrap();
        let frame = PresentedFrame::new(3, 2).unwrap();

        let path = frame.save_png(tmp.path(), "early").unwrap();

        let (color_type, data) = decode(&path);
        assert_eq!(color_type, png::ColorType::Rgb);
        assert_eq!(data, vec![0; 3 * 2 * 3]);
    }

    #[test]
    fn test_save_uses_last_update() {
        let tmp = tempfile::tempdir().unwrap();
        let mut frame = PresentedFrame::new(2, 1).unwrap();
        let mut canvas = Canvas::new(2, 1);
        canvas.pixel(1, 0, Color::rgb(9, 8, 7));
        frame.update(&canvas);
        canvas.clear(0);

        let path = frame.save_png(tmp.path(), "late").unwrap();

        assert_eq!(decode(&path).1, vec![0, 0, 0, 9, 8, 7]);
    }

    #[test]
    fn test_oversized_frame_is_rejected() {
        if usize::BITS <= 64 {
            assert!(matches!(
                PresentedFrame::new(u32::MAX, u32::MAX),
                Err(Error::Config(_))
            ));
        }
    }
}
