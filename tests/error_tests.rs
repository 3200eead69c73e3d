//! Error scenario integration tests

use std::process::Command;

fn screen_recorder_bin(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_screen-recorder"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("SCREEN_RECORDER_FFMPEG");
    cmd
}

fn home() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn record_volume_out_of_range() {
    let home = home();
    let output = screen_recorder_bin(&home)
        .args(["record", "--volume", "3.0"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("volume"),
        "Expected error about volume, got: {}",
        stderr
    );
}

#[test]
fn record_invalid_codec() {
    let home = home();
    let output = screen_recorder_bin(&home)
        .args(["record", "--codec", "h265"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("codec"),
        "Expected error about codec, got: {}",
        stderr
    );
}

#[test]
fn record_invalid_resolution() {
    let home = home();
    let output = screen_recorder_bin(&home)
        .args(["record", "--resolution", "1920by1080"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("resolution"),
        "Expected error about resolution, got: {}",
        stderr
    );
}

#[test]
fn record_invalid_duration() {
    let home = home();
    let output = screen_recorder_bin(&home)
        .args(["record", "--duration", "invalid"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid duration"),
        "Expected error about invalid duration, got: {}",
        stderr
    );
}

#[test]
fn record_frame_rate_not_a_number() {
    let home = home();
    let output = screen_recorder_bin(&home)
        .args(["record", "--frame-rate", "fast"])
        .output()
        .expect("Failed to execute command");

    // Rejected by argument parsing
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("frame-rate"),
        "Expected error about frame rate, got: {}",
        stderr
    );
}

#[test]
fn devices_unsupported_platform() {
    let home = home();
    let output = screen_recorder_bin(&home)
        .args(["devices", "--platform", "sunos"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unsupported platform: sunos"),
        "Expected unsupported platform error, got: {}",
        stderr
    );
}

#[cfg(unix)]
#[test]
fn record_with_missing_ffmpeg() {
    let home = home();
    let out = home.path().join("captures");
    let output = screen_recorder_bin(&home)
        .args(["record", "--no-uuid", "-o"])
        .arg(&out)
        .args(["--ffmpeg", "/nonexistent/bin/ffmpeg"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("FFmpeg not found"),
        "Expected missing FFmpeg error, got: {}",
        stderr
    );
}

#[cfg(target_os = "linux")]
#[test]
fn verbose_from_config_echoes_command() {
    let home = home();
    let status = screen_recorder_bin(&home)
        .args(["config", "set", "verbose", "true"])
        .status()
        .expect("Failed to execute command");
    assert!(status.success());

    let out = home.path().join("captures");
    let output = screen_recorder_bin(&home)
        .args(["record", "--no-uuid", "-o"])
        .arg(&out)
        .args(["--ffmpeg", "/nonexistent/bin/ffmpeg"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("/nonexistent/bin/ffmpeg -y -f x11grab"),
        "Expected the FFmpeg command line, got: {}",
        stderr
    );
    assert!(stderr.contains("FFmpeg not found"), "got: {}", stderr);
}

#[test]
fn config_get_unknown_key() {
    let home = home();
    let output = screen_recorder_bin(&home)
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown key"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_key() {
    let home = home();
    let output = screen_recorder_bin(&home)
        .args(["config", "set", "api_key", "secret"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown key"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_preset() {
    let home = home();
    let output = screen_recorder_bin(&home)
        .args(["config", "set", "preset", "veryslow"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("preset"),
        "Expected error about preset, got: {}",
        stderr
    );
    // Nothing was written
    assert!(!home.path().join(".config/screen-recorder/config.toml").exists());
}

#[test]
fn config_set_invalid_boolean() {
    let home = home();
    let output = screen_recorder_bin(&home)
        .args(["config", "set", "record_audio", "maybe"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("true") && stderr.contains("false"),
        "Expected error about invalid boolean, got: {}",
        stderr
    );
}

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
#[test]
fn unreadable_config_file_is_ignored_for_dry_run() {
    let home = home();
    let dir = home.path().join(".config/screen-recorder");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "frame_rate = \"fast\"\n").unwrap();

    let output = screen_recorder_bin(&home)
        .args(["record", "--dry-run"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("-framerate 30"), "got: {}", stdout);
}
