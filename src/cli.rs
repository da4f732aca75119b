use std::path::PathBuf;

use clap::Parser;

use crate::{
    AnimatorError, Result, DEFAULT_HEIGHT, MAX_FRAMERATE, MAX_HEIGHT, MAX_WIDTH, MIN_FRAMERATE,
    MIN_HEIGHT, MIN_WIDTH,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the video file to animate
    #[arg(required = true)]
    pub video_path: PathBuf,

    /// Color mode (none, ansi, full)
    #[arg(short, long, value_enum, default_value = "none")]
    pub color: ColorMode,

    /// Target height in character cells [20, 120]
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Target width in character cells [40, 200] (default: derived from aspect ratio)
    #[arg(long)]
    pub width: Option<u32>,

    /// Target frames per second [1, 120] (default: derived from the source)
    #[arg(short, long)]
    pub framerate: Option<u32>,

    /// Print video information and exit without playing
    #[arg(long)]
    pub info: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Color rendering strategy for transcoded frames
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    /// Plain glyphs, no escape sequences
    None,
    /// 16-color ANSI classification
    Ansi,
    /// 24-bit true-color escape per pixel
    Full,
}

impl Cli {
    /// Validate command line arguments before any decoding starts
    pub fn validate(&self) -> Result<()> {
        if !self.video_path.exists() {
            return Err(AnimatorError::InvalidConfig(format!(
                "video file does not exist: {}",
                self.video_path.display()
            )));
        }

        if self.height < MIN_HEIGHT || self.height > MAX_HEIGHT {
            return Err(AnimatorError::InvalidConfig(format!(
                "target height {} is out of bounds [{}, {}]",
                self.height, MIN_HEIGHT, MAX_HEIGHT
            )));
        }

        if let Some(width) = self.width {
            if width < MIN_WIDTH || width > MAX_WIDTH {
                return Err(AnimatorError::InvalidConfig(format!(
                    "target width {} is out of bounds [{}, {}]",
                    width, MIN_WIDTH, MAX_WIDTH
                )));
            }
        }

        if let Some(framerate) = self.framerate {
            if framerate < MIN_FRAMERATE || framerate > MAX_FRAMERATE {
                return Err(AnimatorError::InvalidConfig(format!(
                    "target framerate {} is out of bounds [{}, {}]",
                    framerate, MIN_FRAMERATE, MAX_FRAMERATE
                )));
            }
        }

        Ok(())
    }

    /// File name of the video, for status output
    pub fn file_name(&self) -> &str {
        self.video_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with(height: u32, width: Option<u32>, framerate: Option<u32>) -> Cli {
        Cli {
            // Cargo.toml always exists, which keeps the path check out of the way
            video_path: PathBuf::from("Cargo.toml"),
            color: ColorMode::None,
            height,
            width,
            framerate,
            info: false,
            verbose: false,
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(cli_with(DEFAULT_HEIGHT, None, None).validate().is_ok());
    }

    #[test]
    fn test_missing_file_rejected() {
        let mut cli = cli_with(DEFAULT_HEIGHT, None, None);
        cli.video_path = PathBuf::from("definitely/not/a/real/file.mp4");
        let err = cli.validate().unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_height_bounds() {
        assert!(cli_with(19, None, None).validate().is_err());
        assert!(cli_with(20, None, None).validate().is_ok());
        assert!(cli_with(120, None, None).validate().is_ok());
        assert!(cli_with(121, None, None).validate().is_err());
    }

    #[test]
    fn test_width_bounds() {
        assert!(cli_with(60, Some(39), None).validate().is_err());
        assert!(cli_with(60, Some(40), None).validate().is_ok());
        assert!(cli_with(60, Some(200), None).validate().is_ok());
        assert!(cli_with(60, Some(201), None).validate().is_err());
    }

    #[test]
    fn test_framerate_bounds() {
        assert!(cli_with(60, None, Some(0)).validate().is_err());
        assert!(cli_with(60, None, Some(1)).validate().is_ok());
        assert!(cli_with(60, None, Some(120)).validate().is_ok());
        assert!(cli_with(60, None, Some(121)).validate().is_err());
    }
}
