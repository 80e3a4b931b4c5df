use crate::canvas::Canvas;

/// Client drawing code driven by the frame loop.
pub trait Sketch {
    /// Runs once before the first frame. Whatever it draws is visible in
    /// the first presented frame.
    fn on_setup(&mut self, canvas: &mut Canvas) -> anyhow::Result<()> {
        let _ = canvas;
        Ok(())
    }

    /// Runs once per frame. `frame_index` counts completed frames starting
    /// at 0; `delta_ms` is the wall-clock time since the previous frame began.
    fn on_frame(&mut self, canvas: &mut Canvas, frame_index: u64, delta_ms: f64)
    -> anyhow::Result<()>;
}

/// Adapts a pair of closures into a [`Sketch`].
pub struct FnSketch<S, D> {
    setup: S,
    draw: D,
}

impl<S, D> FnSketch<S, D>
where
    S: FnMut(&mut Canvas),
    D: FnMut(&mut Canvas, u64, f64),
{
    pub fn new(setup: S, draw: D) -> Self {
        FnSketch { setup, draw }
    }
}

impl<S, D> Sketch for FnSketch<S, D>
where
    S: FnMut(&mut Canvas),
    D: FnMut(&mut Canvas, u64, f64),
{
    fn on_setup(&mut self, canvas: &mut Canvas) -> anyhow::Result<()> {
        (self.setup)(canvas);
        Ok(())
    }

    fn on_frame(&mut self, canvas: &mut Canvas, frame_index: u64, delta_ms: f64) -> anyhow::Result<()> {
        (self.draw)(canvas, frame_index, delta_ms);
        Ok(())
    }
}
