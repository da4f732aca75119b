//! ASCII Animator - A color-capable ASCII video animator for the terminal
//!
//! This crate converts video files into sequences of pre-rendered ASCII
//! frames and replays them in the terminal at a fixed cadence, with support
//! for monochrome, 16-color ANSI and 24-bit true-color output.

pub mod cli;
pub mod converter;
pub mod decoder;
pub mod renderer;

pub use cli::{Cli, ColorMode};
pub use converter::{brightness_to_glyph, plan_dimensions, AnsiColor, FrameTranscoder};
pub use decoder::{PixelLayout, VideoDecoder, VideoFrame};
pub use renderer::{frame_interval, Player};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

/// Glyph ramp used for brightness mapping, densest character first.
pub const GLYPH_RAMP: [char; 10] = ['@', '%', '#', '*', '+', '=', '-', ':', '.', ' '];

/// Target height bounds, in character cells.
pub const MIN_HEIGHT: u32 = 20;
pub const MAX_HEIGHT: u32 = 120;

/// Target width bounds, in character cells.
pub const MIN_WIDTH: u32 = 40;
pub const MAX_WIDTH: u32 = 200;

/// Default target height when none is requested.
pub const DEFAULT_HEIGHT: u32 = 60;

/// Playback framerate bounds.
pub const MIN_FRAMERATE: u32 = 1;
pub const MAX_FRAMERATE: u32 = 120;

/// Fallback framerate when the source reports a non-positive rate.
pub const DEFAULT_FRAMERATE: u32 = 30;

/// Sanity ceiling for frame-count based buffer reservation. Containers with
/// corrupt metadata can report absurd counts; above this the frame vector
/// grows organically instead.
pub const MAX_FRAME_COUNT: usize = 100_000;

/// Error types used throughout the application
#[derive(thiserror::Error, Debug)]
pub enum AnimatorError {
    #[error("video decoding error: {0}")]
    Decode(#[from] ffmpeg_next::Error),

    #[error("no video stream found in '{0}'")]
    NoVideoStream(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, AnimatorError>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        brightness_to_glyph, frame_interval, plan_dimensions, AnimatorError, AnsiColor, Cli,
        ColorMode, FrameTranscoder, PixelLayout, Player, Result, VideoDecoder, VideoFrame,
        DEFAULT_FRAMERATE, DEFAULT_HEIGHT, GLYPH_RAMP, MAX_FRAME_COUNT, MAX_HEIGHT, MAX_WIDTH,
        MIN_HEIGHT, MIN_WIDTH,
    };
}
