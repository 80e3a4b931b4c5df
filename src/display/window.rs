use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use error_iter::ErrorIter as _;
use log::{debug, warn};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::keyboard::KeyCode;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowBuilder};
use winit_input_helper::WinitInputHelper;

use crate::canvas::Canvas;
use crate::display::{Display, PresentedFrame};
use crate::error::Result;
use crate::input::{Keys, PolledEvents};

const KEY_MAP: [(KeyCode, Keys); 2] = [(KeyCode::Escape, Keys::Escape), (KeyCode::KeyS, Keys::S)];

/// Holds a value between owners on one thread.
struct Parked<T>(RefCell<Option<T>>);

impl<T> Parked<T> {
    const fn new() -> Self {
        Parked(RefCell::new(None))
    }

    fn take(&self) -> Option<T> {
        self.0.borrow_mut().take()
    }

    fn put(&self, value: T) {
        *self.0.borrow_mut() = Some(value);
    }
}

thread_local! {
    // winit builds at most one event loop per process; later runs reuse it.
    static EVENT_LOOP: Parked<EventLoop<()>> = const { Parked::new() };
}

fn take_event_loop() -> Result<EventLoop<()>> {
    match EVENT_LOOP.with(Parked::take) {
        Some(event_loop) => Ok(event_loop),
        None => Ok(EventLoop::new()?),
    }
}

fn park_event_loop(event_loop: EventLoop<()>) {
    // Fails only while the thread is exiting, when the loop can just drop.
    let _ = EVENT_LOOP.try_with(|slot| slot.put(event_loop));
}

fn open_window(
    event_loop: &EventLoop<()>,
    width: u32,
    height: u32,
    title: &str,
) -> Result<(Arc<Window>, Pixels<'static>)> {
    let size = LogicalSize::new(width as f64, height as f64);
    let window = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(size)
        .with_min_inner_size(size)
        .build(event_loop)?;
    let window = Arc::new(window);

    let window_size = window.inner_size();
    let surface = SurfaceTexture::new(window_size.width, window_size.height, Arc::clone(&window));
    let pixels = Pixels::new(width, height, surface)?;
    debug!(
        "window {}x{} (surface {}x{})",
        width, height, window_size.width, window_size.height
    );
    Ok((window, pixels))
}

/// A real window, drawn through `pixels` and driven by pumping the `winit`
/// event loop once per poll.
///
/// Shutting down closes the window and hands the event loop back for the
/// next `WinitDisplay` created on the same thread.
pub struct WinitDisplay {
    event_loop: Option<EventLoop<()>>,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    input: WinitInputHelper,
    frame: PresentedFrame,
}

impl WinitDisplay {
    fn release(&mut self) {
        // The surface holds the window, so it goes first.
        self.pixels = None;
        self.window = None;
        if let Some(mut event_loop) = self.event_loop.take() {
            // Let the platform process the close before the loop is reused.
            event_loop.pump_events(Some(Duration::ZERO), |_, _| {});
            park_event_loop(event_loop);
        }
    }
}

impl Display for WinitDisplay {
    fn create_window(width: u32, height: u32, title: &str) -> Result<Self> {
        let frame = PresentedFrame::new(width, height)?;
        let event_loop = take_event_loop()?;
        let (window, pixels) = match open_window(&event_loop, width, height, title) {
            Ok(parts) => parts,
            Err(err) => {
                park_event_loop(event_loop);
                return Err(err);
            }
        };

        Ok(WinitDisplay {
            event_loop: Some(event_loop),
            window: Some(window),
            pixels: Some(pixels),
            input: WinitInputHelper::new(),
            frame,
        })
    }

    fn poll_events(&mut self) -> Result<PolledEvents> {
        let Some(event_loop) = self.event_loop.as_mut() else {
            return Ok(PolledEvents::close());
        };
        let input = &mut self.input;
        let status = event_loop.pump_events(Some(Duration::ZERO), |event, _target| {
            input.update(&event);
        });

        let mut events = PolledEvents {
            close_requested: matches!(status, PumpStatus::Exit(_)) || self.input.close_requested(),
            ..Default::default()
        };
        for (code, key) in KEY_MAP {
            if self.input.key_pressed(code) {
                events.pressed |= key;
            }
            if self.input.key_released(code) {
                events.released |= key;
            }
        }

        if let (Some(size), Some(pixels)) = (self.input.window_resized(), self.pixels.as_mut()) {
            if let Err(err) = pixels.resize_surface(size.width, size.height) {
                warn!("resize_surface() failed: {err}");
                for source in err.sources().skip(1) {
                    warn!("  Caused by: {source}");
                }
            }
        }

        Ok(events)
    }

    fn begin_frame(&mut self) -> Result<()> {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        Ok(())
    }

    fn present(&mut self, canvas: &Canvas) -> Result<()> {
        self.frame.update(canvas);
        let Some(pixels) = self.pixels.as_mut() else {
            return Ok(());
        };
        for (dst, src) in pixels
            .frame_mut()
            .chunks_exact_mut(4)
            .zip(canvas.as_rgb().chunks_exact(3))
        {
            dst[..3].copy_from_slice(src);
            dst[3] = 0xff;
        }
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        if let (Some(window), Some(pixels)) = (&self.window, &self.pixels) {
            window.pre_present_notify();
            pixels.render()?;
        }
        Ok(())
    }

    fn save_png(&mut self, dir: &Path, name: &str) -> Result<PathBuf> {
        self.frame.save_png(dir, name)
    }

    fn shutdown(&mut self) {
        self.release();
        debug!("window closed");
    }
}

impl Drop for WinitDisplay {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parked_value_is_handed_over_once() {
        let slot = Parked::new();
        assert_eq!(slot.take(), None::<u32>);

        slot.put(7);
        assert_eq!(slot.take(), Some(7));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_parked_put_replaces() {
        let slot = Parked::new();
        slot.put("first");
        slot.put("second");
        assert_eq!(slot.take(), Some("second"));
    }

    #[test]
    fn test_key_map_covers_every_key() {
        let mapped = KEY_MAP
            .iter()
            .fold(Keys::empty(), |acc, (_, key)| acc | *key);
        assert_eq!(mapped, Keys::all());
        assert_eq!(KEY_MAP.len(), Keys::all().iter().count());
    }
}
