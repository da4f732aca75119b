use std::path::Path;

use ffmpeg_next as ffmpeg;
use log::{debug, info};

use crate::{AnimatorError, Result};

/// Pixel layout delivered to the transcoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// Single brightness channel, one byte per pixel
    Gray8,
    /// Packed RGB, three bytes per pixel
    Rgb24,
}

impl PixelLayout {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Gray8 => 1,
            PixelLayout::Rgb24 => 3,
        }
    }

    fn to_pixel(self) -> ffmpeg::format::Pixel {
        match self {
            PixelLayout::Gray8 => ffmpeg::format::Pixel::GRAY8,
            PixelLayout::Rgb24 => ffmpeg::format::Pixel::RGB24,
        }
    }
}

/// A decoded frame, already resized to the target character grid.
///
/// `data` is tightly packed row-major with no stride padding, in the layout
/// the decoder was configured with.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub frame_number: u64,
}

/// Video decoder that extracts frames from video files and hands them out
/// resized to the target grid with area-averaging resampling.
pub struct VideoDecoder {
    input: ffmpeg::format::context::Input,
    stream_index: usize,
    decoder: ffmpeg::codec::decoder::Video,
    scaler: Option<ffmpeg::software::scaling::Context>,
    layout: PixelLayout,
    target_width: u32,
    target_height: u32,
    eof_sent: bool,
    frames_read: u64,
    fps: f64,
    frame_count: Option<u64>,
    duration: f64,
}

impl VideoDecoder {
    /// Open a video file and set up decoding for its best video stream.
    ///
    /// Until [`set_output`](Self::set_output) is called, frames come out at
    /// the source resolution in RGB24.
    pub fn open(path: &Path) -> Result<Self> {
        ffmpeg::init()?;

        debug!("opening video file: {}", path.display());
        let input = ffmpeg::format::input(&path)?;

        let stream = input
            .streams()
            .best(ffmpeg::media::Type::Video)
            .ok_or_else(|| AnimatorError::NoVideoStream(path.display().to_string()))?;
        let stream_index = stream.index();

        let rate = stream.avg_frame_rate();
        let fps = if rate.denominator() != 0 {
            f64::from(rate.numerator()) / f64::from(rate.denominator())
        } else {
            0.0
        };

        let frame_count = u64::try_from(stream.frames()).ok().filter(|&count| count > 0);

        let duration = if stream.duration() != ffmpeg::ffi::AV_NOPTS_VALUE {
            stream.duration() as f64 * f64::from(stream.time_base().numerator())
                / f64::from(stream.time_base().denominator())
        } else {
            0.0
        };

        let context = ffmpeg::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = context.decoder().video()?;

        info!(
            "video stream {}: {}x{}, {:.2} fps, {:.2}s",
            stream_index,
            decoder.width(),
            decoder.height(),
            fps,
            duration
        );

        let (width, height) = (decoder.width(), decoder.height());
        Ok(Self {
            input,
            stream_index,
            decoder,
            scaler: None,
            layout: PixelLayout::Rgb24,
            target_width: width,
            target_height: height,
            eof_sent: false,
            frames_read: 0,
            fps,
            frame_count,
            duration,
        })
    }

    /// Configure the grid and pixel layout delivered by [`next_frame`](Self::next_frame)
    pub fn set_output(&mut self, width: u32, height: u32, layout: PixelLayout) {
        self.target_width = width;
        self.target_height = height;
        self.layout = layout;
        self.scaler = None;
        debug!("decoder output set to {}x{} {:?}", width, height, layout);
    }

    /// Reported source frame rate, 0.0 when the container does not know it
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Reported total frame count, if the container knows it
    pub fn frame_count(&self) -> Option<u64> {
        self.frame_count
    }

    /// Source duration in seconds, 0.0 when unknown
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Source frame dimensions in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        (self.decoder.width(), self.decoder.height())
    }

    /// Decode the next frame, or `None` once the stream is exhausted
    pub fn next_frame(&mut self) -> Result<Option<VideoFrame>> {
        let mut decoded = ffmpeg::frame::Video::empty();

        loop {
            match self.decoder.receive_frame(&mut decoded) {
                Ok(()) => {
                    self.frames_read += 1;
                    return self.rescale(&decoded).map(Some);
                }
                Err(ffmpeg::Error::Other { errno }) if errno == ffmpeg::ffi::EAGAIN => {
                    if self.eof_sent {
                        return Ok(None);
                    }
                    self.pump_decoder()?;
                }
                Err(ffmpeg::Error::Eof) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Feed the decoder the next packet of our stream, or EOF when the
    /// demuxer runs dry.
    fn pump_decoder(&mut self) -> Result<()> {
        let stream_index = self.stream_index;
        let packet = self
            .input
            .packets()
            .find(|(stream, _)| stream.index() == stream_index)
            .map(|(_, packet)| packet);

        match packet {
            Some(packet) => self.decoder.send_packet(&packet)?,
            None => {
                self.decoder.send_eof()?;
                self.eof_sent = true;
                debug!("demuxer exhausted after {} frames", self.frames_read);
            }
        }
        Ok(())
    }

    /// Resize a decoded frame to the target grid and strip stride padding
    fn rescale(&mut self, decoded: &ffmpeg::frame::Video) -> Result<VideoFrame> {
        let (width, height) = (self.target_width, self.target_height);

        if self.scaler.is_none() {
            self.scaler = Some(ffmpeg::software::scaling::Context::get(
                decoded.format(),
                decoded.width(),
                decoded.height(),
                self.layout.to_pixel(),
                width,
                height,
                ffmpeg::software::scaling::Flags::AREA,
            )?);
        }

        let mut resized = ffmpeg::frame::Video::empty();
        if let Some(scaler) = self.scaler.as_mut() {
            scaler.run(decoded, &mut resized)?;
        }

        // the scaler aligns rows; copy out the packed pixels
        let bytes_per_row = width as usize * self.layout.bytes_per_pixel();
        let stride = resized.stride(0);
        let plane = resized.data(0);

        let mut data = Vec::with_capacity(bytes_per_row * height as usize);
        for y in 0..height as usize {
            let offset = y * stride;
            data.extend_from_slice(&plane[offset..offset + bytes_per_row]);
        }

        Ok(VideoFrame {
            data,
            width,
            height,
            frame_number: self.frames_read,
        })
    }
}
