use std::io::{stdout, Stdout, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::ResetColor,
    terminal::{Clear, ClearType},
};
use log::debug;

use crate::{Result, DEFAULT_FRAMERATE};

/// Derive the inter-frame interval for playback.
///
/// An explicit framerate wins; otherwise the source's reported rate is used,
/// falling back to the default when the source reports a non-positive rate.
/// The interval is floored to whole milliseconds.
pub fn frame_interval(requested: Option<u32>, source_fps: f64) -> Duration {
    let fps = match requested {
        Some(rate) => f64::from(rate),
        None if source_fps > 0.0 => source_fps,
        None => f64::from(DEFAULT_FRAMERATE),
    };
    Duration::from_millis((1000.0 / fps) as u64)
}

/// Replays pre-rendered frames against a text sink at a fixed cadence.
///
/// Each frame is emitted as clear, write, flush, then a blocking sleep for
/// the full interval. Frames play in order exactly once; an empty sequence
/// is a no-op.
pub struct Player<W: Write> {
    out: W,
    interval: Duration,
}

impl Player<Stdout> {
    /// Player writing to standard output
    pub fn to_stdout(interval: Duration) -> Self {
        Self::new(stdout(), interval)
    }
}

impl<W: Write> Player<W> {
    pub fn new(out: W, interval: Duration) -> Self {
        Self { out, interval }
    }

    /// Hide the cursor for the duration of playback
    pub fn init(&mut self) -> Result<()> {
        execute!(self.out, Hide)?;
        Ok(())
    }

    /// Restore the cursor and colors after playback
    pub fn finish(&mut self) -> Result<()> {
        execute!(self.out, ResetColor, Show)?;
        Ok(())
    }

    /// Play the frame sequence to completion
    pub fn play(&mut self, frames: &[String]) -> Result<()> {
        debug!(
            "playing {} frames at {}ms intervals",
            frames.len(),
            self.interval.as_millis()
        );

        for frame in frames {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
            self.out.write_all(frame.as_bytes())?;
            self.out.flush()?;
            thread::sleep(self.interval);
        }
        Ok(())
    }
}
