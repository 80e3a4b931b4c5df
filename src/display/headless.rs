use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::canvas::Canvas;
use crate::display::{Display, PresentedFrame};
use crate::error::Result;
use crate::input::PolledEvents;

const PROGRESS_INTERVAL: u64 = 100;

/// A display without a window.
///
/// Frames are kept in memory so saving still works. With a frame limit the
/// display asks to close once that many frames were flipped, otherwise it
/// runs until the process is stopped.
pub struct HeadlessDisplay {
    title: String,
    frame: PresentedFrame,
    frames_shown: u64,
    frame_limit: Option<u64>,
    last_flip: Option<std::time::Instant>,
}

impl HeadlessDisplay {
    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    pub fn frames_shown(&self) -> u64 {
        self.frames_shown
    }

    pub fn last_frame(&self) -> &Canvas {
        self.frame.canvas()
    }
}

impl Display for HeadlessDisplay {
    fn create_window(width: u32, height: u32, title: &str) -> Result<Self> {
        debug!("headless display {}x{} \"{}\"", width, height, title);
        Ok(HeadlessDisplay {
            title: title.to_string(),
            frame: PresentedFrame::new(width, height)?,
            frames_shown: 0,
            frame_limit: None,
            last_flip: None,
        })
    }

    fn poll_events(&mut self) -> Result<PolledEvents> {
        match self.frame_limit {
            Some(limit) if self.frames_shown >= limit => Ok(PolledEvents::close()),
            _ => Ok(PolledEvents::default()),
        }
    }

    fn present(&mut self, canvas: &Canvas) -> Result<()> {
        self.frame.update(canvas);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        let now = std::time::Instant::now();
        self.frames_shown += 1;
        if self.frames_shown % PROGRESS_INTERVAL == 0 {
            let delta_ms = self
                .last_flip
                .map(|t| now.duration_since(t).as_secs_f64() * 1000.0)
                .unwrap_or_default();
            info!(
                "{}: frame {}, delta {:.2} ms",
                self.title, self.frames_shown, delta_ms
            );
        }
        self.last_flip = Some(now);
        Ok(())
    }

    fn save_png(&mut self, dir: &Path, name: &str) -> Result<PathBuf> {
        self.frame.save_png(dir, name)
    }

    fn shutdown(&mut self) {
        debug!("headless display closed after {} frames", self.frames_shown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Color;

    #[test]
    fn test_frame_limit_requests_close() {
        let mut display = HeadlessDisplay::create_window(4, 4, "t")
            .unwrap()
            .with_frame_limit(2);
        let canvas = Canvas::new(4, 4);

        for _ in 0..2 {
            assert!(!display.poll_events().unwrap().close_requested);
            display.present(&canvas).unwrap();
            display.end_frame().unwrap();
        }
        assert!(display.poll_events().unwrap().close_requested);
        assert_eq!(display.frames_shown(), 2);
    }

    #[test]
    fn test_unlimited_never_closes() {
        let mut display = HeadlessDisplay::create_window(1, 1, "t").unwrap();
        for _ in 0..250 {
            assert_eq!(display.poll_events().unwrap(), PolledEvents::default());
            display.end_frame().unwrap();
        }
    }

    #[test]
    fn test_present_keeps_copy() {
        let mut display = HeadlessDisplay::create_window(3, 3, "t").unwrap();
        let mut canvas = Canvas::new(3, 3);
        canvas.pixel(1, 2, Color::WHITE);
        display.present(&canvas).unwrap();
        canvas.clear(0);
        assert_eq!(display.last_frame().get(1, 2), Some(Color::WHITE));
    }

    #[test]
    fn test_save_writes_last_frame() {
        let tmp = tempfile::tempdir().unwrap();
        let mut display = HeadlessDisplay::create_window(2, 2, "t").unwrap();
        let path = display.save_png(&tmp.path().join("output"), "headless").unwrap();
        assert!(path.exists());
    }
}
