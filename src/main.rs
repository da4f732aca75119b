use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};

use ascii_animator::{
    frame_interval, plan_dimensions, Cli, ColorMode, FrameTranscoder, PixelLayout, Player,
    VideoDecoder, MAX_FRAME_COUNT, PACKAGE_NAME, VERSION,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = cli.validate() {
        error!("invalid arguments: {}", e);
        process::exit(1);
    }

    info!("starting {} v{}", PACKAGE_NAME, VERSION);

    let mut decoder = VideoDecoder::open(&cli.video_path)
        .with_context(|| format!("could not open video '{}'", cli.video_path.display()))?;
    let (src_width, src_height) = decoder.dimensions();

    if cli.info {
        println!("Video information:");
        println!("  File:        {}", cli.video_path.display());
        println!("  Dimensions:  {}x{}", src_width, src_height);
        println!("  Frame rate:  {:.2} fps", decoder.fps());
        println!("  Duration:    {:.2} s", decoder.duration());
        match decoder.frame_count() {
            Some(count) => println!("  Frame count: {}", count),
            None => println!("  Frame count: unknown"),
        }
        return Ok(());
    }

    if atty::isnt(atty::Stream::Stdout) {
        warn!("stdout is not a terminal; escape sequences will be written raw");
    }

    let (height, width) = plan_dimensions(src_width, src_height, cli.height, cli.width);
    info!(
        "rendering {}x{} character cells from {}x{} source, color mode {:?}",
        width, height, src_width, src_height, cli.color
    );

    let layout = match cli.color {
        ColorMode::None => PixelLayout::Gray8,
        ColorMode::Ansi | ColorMode::Full => PixelLayout::Rgb24,
    };
    decoder.set_output(width, height, layout);

    let interval = frame_interval(cli.framerate, decoder.fps());
    let transcoder = FrameTranscoder::new(cli.color, height, width);

    // Transcode everything up front so playback cadence never waits on decode
    let mut frames = Vec::new();
    if let Some(count) = decoder.frame_count() {
        if (count as usize) < MAX_FRAME_COUNT {
            frames.reserve(count as usize);
        }
    }

    while let Some(frame) = decoder
        .next_frame()
        .with_context(|| format!("failed to decode '{}'", cli.file_name()))?
    {
        frames.push(transcoder.transcode(&frame));
    }

    info!(
        "transcoded {} frames, playing at {}ms per frame",
        frames.len(),
        interval.as_millis()
    );

    let mut player = Player::to_stdout(interval);
    player.init()?;
    let played = player.play(&frames);
    player.finish()?;
    played?;

    info!("playback finished after {} frames", frames.len());
    Ok(())
}
