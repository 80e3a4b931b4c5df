use std::path::PathBuf;
use std::time::Duration;

use crate::canvas::Canvas;
use crate::error::{Error, Result};

pub const DEFAULT_TITLE: &str = "kanvas";

/// Settings for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub target_fps: u32,
    pub width: u32,
    pub height: u32,
    /// Window title, also used as the stem of saved images.
    pub title: String,
    /// Where saved images go, relative to the working directory.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_fps: 60,
            width: 640,
            height: 360,
            title: DEFAULT_TITLE.to_string(),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl Config {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_fps(mut self, target_fps: u32) -> Self {
        self.target_fps = target_fps;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_fps == 0 {
            return Err(Error::Config("target_fps must be at least 1".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if Canvas::byte_len(self.width, self.height).is_none() {
            return Err(Error::Config(format!(
                "canvas size {}x{} is too large",
                self.width, self.height
            )));
        }
        if self.title.trim().is_empty() {
            return Err(Error::Config("title must not be empty".into()));
        }
        Ok(())
    }
}
