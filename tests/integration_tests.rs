use std::path::PathBuf;

use ascii_animator::prelude::*;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

/// Create a placeholder video file so validation gets past the existence
/// check. Tests that use it never reach the decoder.
fn create_dummy_video(dir: &tempfile::TempDir) -> PathBuf {
    let video_path = dir.path().join("test_video.mp4");
    std::fs::write(&video_path, b"dummy video content").unwrap();
    video_path
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("ascii-animator").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ASCII video animator"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("ascii-animator").unwrap();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_missing_file() {
    let mut cmd = Command::cargo_bin("ascii-animator").unwrap();
    cmd.arg("nonexistent.mp4");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_cli_height_out_of_bounds() {
    let dir = tempdir().unwrap();
    let video_path = create_dummy_video(&dir);

    let mut cmd = Command::cargo_bin("ascii-animator").unwrap();
    cmd.arg(video_path.to_str().unwrap())
        .arg("--height")
        .arg("500");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("out of bounds"));
}

#[test]
fn test_cli_width_out_of_bounds() {
    let dir = tempdir().unwrap();
    let video_path = create_dummy_video(&dir);

    let mut cmd = Command::cargo_bin("ascii-animator").unwrap();
    cmd.arg(video_path.to_str().unwrap())
        .arg("--width")
        .arg("10");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("out of bounds"));
}

#[test]
fn test_cli_framerate_out_of_bounds() {
    let dir = tempdir().unwrap();
    let video_path = create_dummy_video(&dir);

    let mut cmd = Command::cargo_bin("ascii-animator").unwrap();
    cmd.arg(video_path.to_str().unwrap())
        .arg("--framerate")
        .arg("240");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("out of bounds"));
}

#[test]
fn test_cli_unknown_color_mode() {
    let dir = tempdir().unwrap();
    let video_path = create_dummy_video(&dir);

    let mut cmd = Command::cargo_bin("ascii-animator").unwrap();
    cmd.arg(video_path.to_str().unwrap())
        .arg("--color")
        .arg("sepia");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_cli_undecodable_file_fails_at_startup() {
    let dir = tempdir().unwrap();
    let video_path = create_dummy_video(&dir);

    // a file that exists but is not a video fails before any playback
    let mut cmd = Command::cargo_bin("ascii-animator").unwrap();
    cmd.arg(video_path.to_str().unwrap());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("could not open video"));
}

mod library_tests {
    use super::*;

    #[test]
    fn test_glyph_ramp_extremes() {
        assert_eq!(brightness_to_glyph(0), '@');
        assert_eq!(brightness_to_glyph(255), ' ');
        assert_eq!(GLYPH_RAMP.len(), 10);
    }

    #[test]
    fn test_dimension_planning() {
        assert_eq!(plan_dimensions(1920, 1080, 60, None), (60, 200));
        assert_eq!(plan_dimensions(1920, 1080, 20, None), (20, 71));
    }

    #[test]
    fn test_interval_derivation() {
        assert_eq!(frame_interval(Some(30), 0.0).as_millis(), 33);
        assert_eq!(frame_interval(None, 0.0).as_millis(), 33);
        assert_eq!(frame_interval(None, 50.0).as_millis(), 20);
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(AnsiColor::classify(0, 0, 0, 0), AnsiColor::Black);
        assert_eq!(AnsiColor::classify(200, 200, 200, 200), AnsiColor::White);
        assert_eq!(AnsiColor::classify(255, 0, 0, 85), AnsiColor::Red);
    }
}
