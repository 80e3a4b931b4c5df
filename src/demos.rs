use kanvas::{Canvas, Color, Config, Sketch};
use rand::Rng;

/// A white column sweeping across a dark background.
pub struct Smoke;

impl Sketch for Smoke {
    fn on_setup(&mut self, canvas: &mut Canvas) -> anyhow::Result<()> {
        canvas.clear(20);
        Ok(())
    }

    fn on_frame(&mut self, canvas: &mut Canvas, frame: u64, _delta_ms: f64) -> anyhow::Result<()> {
        let x = ((frame / 2) % canvas.width() as u64) as i32;
        for y in 0..canvas.height() as i32 {
            canvas.pixel(x, y, Color::WHITE);
        }
        Ok(())
    }
}

/// Chaos game: jump halfway towards a random corner, plot, repeat.
pub struct Sierpinski<R> {
    rng: R,
}

impl<R: Rng> Sierpinski<R> {
    pub const POINTS_PER_FRAME: usize = 1000;

    pub fn new(rng: R) -> Self {
        Sierpinski { rng }
    }
}

impl<R: Rng> Sketch for Sierpinski<R> {
    fn on_setup(&mut self, canvas: &mut Canvas) -> anyhow::Result<()> {
        canvas.clear(20);
        Ok(())
    }

    fn on_frame(&mut self, canvas: &mut Canvas, _frame: u64, _delta_ms: f64) -> anyhow::Result<()> {
        let (w, h) = (canvas.width() as i32, canvas.height() as i32);
        let corners = [(w / 2, 0), (0, h - 1), (w - 1, h - 1)];

        let (mut x, mut y) = (w / 2, h / 2);
        for _ in 0..Self::POINTS_PER_FRAME {
            let (tx, ty) = corners[self.rng.random_range(0..corners.len())];
            x = (x + tx) / 2;
            y = (y + ty) / 2;
            canvas.pixel(x, y, Color::WHITE);
        }
        Ok(())
    }
}

/// Primes along a square spiral, drawn once.
pub struct Ulam {
    pub step_px: i32,
}

// right, up, left, down
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];

fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut f = 3;
    while f * f <= n {
        if n % f == 0 {
            return false;
        }
        f += 2;
    }
    true
}

impl Sketch for Ulam {
    fn on_setup(&mut self, canvas: &mut Canvas) -> anyhow::Result<()> {
        canvas.clear(20);

        let (w, h) = (canvas.width() as i32, canvas.height() as i32);
        let (mut x, mut y) = (w / 2, h / 2);
        let mut n = 1;
        let mut dir = 0;
        let mut leg = 1;
        let mut taken = 0;
        let mut legs_at_length = 0;

        while (0..w).contains(&x) && (0..h).contains(&y) {
            if is_prime(n) {
                canvas.pixel(x, y, Color::WHITE);
            }

            let (dx, dy) = DIRECTIONS[dir];
            x += dx * self.step_px;
            y += dy * self.step_px;
            n += 1;
            taken += 1;

            if taken == leg {
                dir = (dir + 1) % 4;
                taken = 0;
                legs_at_length += 1;
                if legs_at_length == 2 {
                    leg += 1;
                    legs_at_length = 0;
                }
            }
        }
        Ok(())
    }

    fn on_frame(&mut self, _canvas: &mut Canvas, _frame: u64, _delta_ms: f64) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Demo {
    Smoke,
    Sierpinski,
    Ulam,
}

impl Demo {
    pub fn config(self) -> Config {
        match self {
            Demo::Smoke => Config::default().with_size(320, 200).with_title("Pixel Smoke"),
            Demo::Sierpinski => Config::default()
                .with_size(800, 800)
                .with_title("Sierpinski Triangle"),
            Demo::Ulam => Config::default().with_size(800, 800).with_title("Ulam Spiral"),
        }
    }

    pub fn sketch(self) -> Box<dyn Sketch> {
        match self {
            Demo::Smoke => Box::new(Smoke),
            Demo::Sierpinski => Box::new(Sierpinski::new(rand::rng())),
            Demo::Ulam => Box::new(Ulam { step_px: 4 }),
        }
    }
}
