//! A small pixel canvas: write RGB values in `on_setup` and `on_frame`, and
//! the frame loop paces, presents and handles quit (Escape, window close) and
//! save-to-PNG (S).

pub mod canvas;
pub mod capture;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod runner;
pub mod sketch;

pub use canvas::{Canvas, Color};
pub use config::Config;
pub use display::{Display, HeadlessDisplay, WinitDisplay};
pub use error::{Error, Result};
pub use input::{InputSnapshot, Keys, PolledEvents};
pub use runner::{FrameClock, Runner};
pub use sketch::{FnSketch, Sketch};

extern crate bitflags;

/// Opens a window and runs `sketch` in it until the user quits.
pub fn run<S: Sketch + ?Sized>(sketch: &mut S, config: Config) -> Result<()> {
    config.validate()?;
    let mut display = WinitDisplay::create_window(config.width, config.height, &config.title)?;
    Runner::new(config).run(&mut display, sketch)?;
    Ok(())
}

/// [`run`] for a `setup` / `draw` closure pair.
pub fn run_fn<S, D>(setup: S, draw: D, config: Config) -> Result<()>
where
    S: FnMut(&mut Canvas),
    D: FnMut(&mut Canvas, u64, f64),
{
    run(&mut FnSketch::new(setup, draw), config)
}

/// Runs `sketch` without a window, for `frame_limit` frames or forever.
pub fn run_headless<S: Sketch + ?Sized>(
    sketch: &mut S,
    config: Config,
    frame_limit: Option<u64>,
) -> Result<u64> {
    let mut display = HeadlessDisplay::create_window(config.width, config.height, &config.title)?;
    if let Some(limit) = frame_limit {
        display = display.with_frame_limit(limit);
    }
    Runner::new(config).run(&mut display, sketch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_run_headless_with_limit() {
        let mut last = None;
        let mut sketch = FnSketch::new(
            |canvas: &mut Canvas| canvas.clear(20),
            |canvas: &mut Canvas, frame, _| {
                canvas.pixel(frame as i32, 0, Color::WHITE);
                last = Some(frame);
            },
        );
        let config = Config::default().with_size(8, 2).with_fps(1000);

        let drawn = run_headless(&mut sketch, config, Some(3)).unwrap();
        drop(sketch);

        assert_eq!(drawn, 3);
        assert_eq!(last, Some(2));
    }

    #[test_log::test]
    fn test_repeated_runs_in_one_process() {
        for _ in 0..3 {
            let mut sketch = FnSketch::new(|_: &mut Canvas| {}, |_: &mut Canvas, _, _| {});
            let config = Config::default().with_size(4, 4).with_fps(1000);
            assert_eq!(run_headless(&mut sketch, config, Some(2)).unwrap(), 2);
        }
    }
}
