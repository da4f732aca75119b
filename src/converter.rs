use std::fmt::Write;

use log::debug;

use crate::cli::ColorMode;
use crate::decoder::VideoFrame;
use crate::{GLYPH_RAMP, MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};

/// Width-to-height ratio of a terminal character cell. Cells are roughly
/// twice as tall as they are wide, so square objects need the compensation
/// to render square.
const CHAR_ASPECT: f64 = 0.5;

/// Reset escape appended after every colored glyph.
pub const RESET: &str = "\x1b[0m";

/// Brightness below which a pixel is classified black regardless of hue.
const DARK_THRESHOLD: u8 = 30;
/// Channel spread below which a pixel is treated as grayscale.
const GRAYSCALE_SPREAD: u8 = 20;
/// Grayscale brightness cutoffs.
const VERY_BRIGHT: u8 = 200;
const BRIGHT: u8 = 120;
/// Chromatic pixels brighter than this get the bright color variant.
const MEDIUM_BRIGHT: u8 = 128;

/// Map a brightness value to a glyph from the density ramp.
///
/// Integer floor division keeps the mapping bit-for-bit reproducible:
/// brightness 0 maps to `@` (densest), 255 maps to a space.
pub fn brightness_to_glyph(brightness: u8) -> char {
    let index = brightness as usize * (GLYPH_RAMP.len() - 1) / 255;
    GLYPH_RAMP[index]
}

/// Discrete terminal color classification used in ANSI mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Blue,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightBlue,
    BrightWhite,
}

impl AnsiColor {
    /// Foreground SGR escape for this color
    pub const fn escape(self) -> &'static str {
        match self {
            AnsiColor::Black => "\x1b[30m",
            AnsiColor::Red => "\x1b[31m",
            AnsiColor::Green => "\x1b[32m",
            AnsiColor::Blue => "\x1b[34m",
            AnsiColor::White => "\x1b[37m",
            AnsiColor::BrightBlack => "\x1b[90m",
            AnsiColor::BrightRed => "\x1b[91m",
            AnsiColor::BrightGreen => "\x1b[92m",
            AnsiColor::BrightBlue => "\x1b[94m",
            AnsiColor::BrightWhite => "\x1b[97m",
        }
    }

    /// Classify an RGB pixel into one of the 16-color palette entries.
    ///
    /// Decision order: dark override, then grayscale by channel spread, then
    /// hue by the strictly-largest channel with a brightness-gated bright
    /// variant. Ties between channels fall through to white.
    pub fn classify(r: u8, g: u8, b: u8, brightness: u8) -> Self {
        if brightness < DARK_THRESHOLD {
            return AnsiColor::Black;
        }

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        if max - min < GRAYSCALE_SPREAD {
            if brightness > VERY_BRIGHT {
                return AnsiColor::BrightWhite;
            }
            if brightness > BRIGHT {
                return AnsiColor::White;
            }
            return AnsiColor::BrightBlack;
        }

        let bright = brightness > MEDIUM_BRIGHT;
        if r > g && r > b {
            return if bright {
                AnsiColor::BrightRed
            } else {
                AnsiColor::Red
            };
        }
        if g > r && g > b {
            return if bright {
                AnsiColor::BrightGreen
            } else {
                AnsiColor::Green
            };
        }
        if b > r && b > g {
            return if bright {
                AnsiColor::BrightBlue
            } else {
                AnsiColor::Blue
            };
        }

        AnsiColor::White
    }
}

/// Compute the target character grid for a source video.
///
/// Returns `(height, width)`. When no width is requested it is derived from
/// the video aspect ratio under the fixed character cell aspect, then both
/// dimensions are clamped to their supported bounds so extreme aspect
/// ratios saturate instead of erroring.
pub fn plan_dimensions(
    src_width: u32,
    src_height: u32,
    requested_height: u32,
    requested_width: Option<u32>,
) -> (u32, u32) {
    let video_aspect = src_width as f64 / src_height as f64;

    let width = match requested_width {
        Some(width) => width,
        None => (requested_height as f64 * video_aspect / CHAR_ASPECT).round() as u32,
    };

    let height = requested_height.clamp(MIN_HEIGHT, MAX_HEIGHT);
    let width = width.clamp(MIN_WIDTH, MAX_WIDTH);

    (height, width)
}

/// Average the color channels into a brightness value. The sum of three u8
/// divided by three always fits back into a u8.
fn brightness_of(r: u8, g: u8, b: u8) -> u8 {
    ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8
}

/// Transcodes decoded frames into terminal-ready text blocks
pub struct FrameTranscoder {
    mode: ColorMode,
    height: u32,
    width: u32,
}

impl FrameTranscoder {
    /// Create a transcoder for the given mode and character grid
    pub fn new(mode: ColorMode, height: u32, width: u32) -> Self {
        Self {
            mode,
            height,
            width,
        }
    }

    /// Transcode one decoded frame into a single owned text block.
    ///
    /// The frame must already be resized to the transcoder's grid: GRAY8
    /// layout for monochrome, RGB24 for the color modes. Rows come out top
    /// first, each terminated by a newline. The mode dispatch is hoisted
    /// out of the pixel loop.
    pub fn transcode(&self, frame: &VideoFrame) -> String {
        debug_assert_eq!(frame.width, self.width);
        debug_assert_eq!(frame.height, self.height);

        let text = match self.mode {
            ColorMode::None => self.transcode_mono(frame),
            ColorMode::Ansi => self.transcode_ansi(frame),
            ColorMode::Full => self.transcode_full(frame),
        };

        debug!(
            "transcoded frame {} into {} bytes ({}x{})",
            frame.frame_number,
            text.len(),
            self.width,
            self.height
        );
        text
    }

    fn transcode_mono(&self, frame: &VideoFrame) -> String {
        let (width, height) = (self.width as usize, self.height as usize);
        let mut text = String::with_capacity((width + 1) * height);

        for row in frame.data.chunks_exact(width) {
            for &brightness in row {
                text.push(brightness_to_glyph(brightness));
            }
            text.push('\n');
        }
        text
    }

    fn transcode_ansi(&self, frame: &VideoFrame) -> String {
        let (width, height) = (self.width as usize, self.height as usize);
        // 5 escape bytes + glyph + 4 reset bytes per pixel
        let mut text = String::with_capacity((width * 10 + 1) * height);

        for row in frame.data.chunks_exact(width * 3) {
            for px in row.chunks_exact(3) {
                let (r, g, b) = (px[0], px[1], px[2]);
                let brightness = brightness_of(r, g, b);
                text.push_str(AnsiColor::classify(r, g, b, brightness).escape());
                text.push(brightness_to_glyph(brightness));
                text.push_str(RESET);
            }
            text.push('\n');
        }
        text
    }

    fn transcode_full(&self, frame: &VideoFrame) -> String {
        let (width, height) = (self.width as usize, self.height as usize);
        // up to 19 escape bytes + glyph + 4 reset bytes per pixel
        let mut text = String::with_capacity((width * 24 + 1) * height);

        for row in frame.data.chunks_exact(width * 3) {
            for px in row.chunks_exact(3) {
                let (r, g, b) = (px[0], px[1], px[2]);
                let brightness = brightness_of(r, g, b);
                let _ = write!(
                    text,
                    "\x1b[38;2;{};{};{}m{}{}",
                    r,
                    g,
                    b,
                    brightness_to_glyph(brightness),
                    RESET
                );
            }
            text.push('\n');
        }
        text
    }
}
