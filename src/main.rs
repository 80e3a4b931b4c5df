mod demos;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use error_iter::ErrorIter as _;
use log::error;

use demos::Demo;

#[derive(Parser, Debug)]
#[command(version, about = "Pixel canvas demos")]
struct Args {
    /// Which demo to run
    #[arg(value_enum, default_value_t = Demo::Smoke)]
    demo: Demo,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Window title and file name stem for saved images
    #[arg(long)]
    title: Option<String>,

    /// Directory for saved images
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Run without opening a window
    #[arg(long)]
    headless: bool,

    /// Stop after this many frames (headless only)
    #[arg(long, requires = "headless")]
    frames: Option<u64>,
}

impl Args {
    fn config(&self) -> kanvas::Config {
        let mut config = self.demo.config();
        if let Some(fps) = self.fps {
            config = config.with_fps(fps);
        }
        let width = self.width.unwrap_or(config.width);
        let height = self.height.unwrap_or(config.height);
        config = config.with_size(width, height);
        if let Some(title) = &self.title {
            config = config.with_title(title.clone());
        }
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir);
        }
        config
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.config();
    let mut sketch = args.demo.sketch();

    let result = if args.headless {
        kanvas::run_headless(sketch.as_mut(), config, args.frames).map(|_| ())
    } else {
        kanvas::run(sketch.as_mut(), config)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            for source in err.sources().skip(1) {
                error!("  Caused by: {source}");
            }
            ExitCode::FAILURE
        }
    }
}
