use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

use error_iter::ErrorIter as _;
use log::{debug, error, info};

use crate::canvas::Canvas;
use crate::config::Config;
use crate::display::Display;
use crate::error::{Error, Result};
use crate::input::InputSnapshot;
use crate::sketch::Sketch;

/// Pacing state of the frame loop.
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    target: Duration,
}

impl FrameClock {
    pub fn start(target: Duration) -> Self {
        FrameClock {
            last: Instant::now(),
            frame_index: 0,
            target,
        }
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Marks the start of an iteration and returns the milliseconds since the
    /// previous one (or since `start` on the first call).
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let delta = now.duration_since(self.last);
        self.last = now;
        delta.as_secs_f64() * 1000.0
    }

    pub fn advance(&mut self) {
        self.frame_index += 1;
    }

    /// What is left of this iteration's budget. Overruns are not carried over.
    pub fn remaining(&self) -> Duration {
        sleep_time(self.target, self.last.elapsed())
    }
}

pub fn sleep_time(target: Duration, spent: Duration) -> Duration {
    target.saturating_sub(spent)
}

/// Shuts the display down when dropped, whichever way the loop is left.
struct ShutdownGuard<'a, D: Display> {
    display: &'a mut D,
}

impl<D: Display> Deref for ShutdownGuard<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.display
    }
}

impl<D: Display> DerefMut for ShutdownGuard<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.display
    }
}

impl<D: Display> Drop for ShutdownGuard<'_, D> {
    fn drop(&mut self) {
        self.display.shutdown();
    }
}

pub struct Runner {
    config: Config,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        Runner { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Drives `sketch` on `display` until a quit is requested.
    ///
    /// Returns the number of frames drawn. The display is shut down exactly
    /// once before this returns, also when the sketch or the display fails.
    pub fn run<D, S>(&self, display: &mut D, sketch: &mut S) -> Result<u64>
    where
        D: Display,
        S: Sketch + ?Sized,
    {
        let mut display = ShutdownGuard { display };
        self.config.validate()?;

        let config = &self.config;
        info!(
            "starting \"{}\" at {}x{}, {} fps",
            config.title, config.width, config.height, config.target_fps
        );

        let mut canvas = Canvas::new(config.width, config.height);
        sketch.on_setup(&mut canvas).map_err(Error::Sketch)?;
        debug!("setup done");

        let mut clock = FrameClock::start(config.frame_duration());
        loop {
            let input = InputSnapshot::from_events(&display.poll_events()?);
            if input.quit {
                break;
            }

            if input.save {
                match display.save_png(&config.output_dir, &config.title) {
                    Ok(path) => info!("image saved to {}", path.display()),
                    Err(err) => log_error("save_png", err),
                }
            }

            let delta_ms = clock.tick();

            display.begin_frame()?;
            sketch
                .on_frame(&mut canvas, clock.frame_index(), delta_ms)
                .map_err(Error::Sketch)?;
            display.present(&canvas)?;
            display.end_frame()?;

            clock.advance();

            let pause = clock.remaining();
            if !pause.is_zero() {
                std::thread::sleep(pause);
            }
        }

        info!("quit after {} frames", clock.frame_index());
        Ok(clock.frame_index())
    }
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}
