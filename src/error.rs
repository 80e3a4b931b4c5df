use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode PNG")]
    Png(#[from] png::EncodingError),

    #[error("failed to create event loop")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window")]
    Window(#[from] winit::error::OsError),

    #[error("pixel surface error")]
    Pixels(#[from] pixels::Error),

    #[error(transparent)]
    Sketch(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
