//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary with config lookups pointed at an empty directory
fn screen_recorder(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("screen-recorder").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("SCREEN_RECORDER_FFMPEG");
    cmd
}

#[test]
fn help_output() {
    let home = TempDir::new().unwrap();
    screen_recorder(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Record the screen"))
        .stdout(predicate::str::contains("record"))
        .stdout(predicate::str::contains("devices"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--ffmpeg"));
}

#[test]
fn record_help_lists_options() {
    let home = TempDir::new().unwrap();
    screen_recorder(&home)
        .args(["record", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output-path"))
        .stdout(predicate::str::contains("--frame-rate"))
        .stdout(predicate::str::contains("--audio-source"))
        .stdout(predicate::str::contains("--duration"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn version_output() {
    let home = TempDir::new().unwrap();
    screen_recorder(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("screen-recorder"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    let home = TempDir::new().unwrap();
    screen_recorder(&home).assert().failure().code(2);
}

#[test]
fn config_path_output() {
    let home = TempDir::new().unwrap();
    screen_recorder(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("screen-recorder"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_help_output() {
    let home = TempDir::new().unwrap();
    screen_recorder(&home)
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn config_list_with_no_file() {
    let home = TempDir::new().unwrap();
    screen_recorder(&home)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("frame_rate"))
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();
    screen_recorder(&home)
        .args(["config", "set", "codec", "libvpx"])
        .assert()
        .success();

    screen_recorder(&home)
        .args(["config", "get", "codec"])
        .assert()
        .success()
        .stdout("libvpx\n");

    screen_recorder(&home)
        .args(["config", "get", "preset"])
        .assert()
        .success()
        .stdout("(not set)\n");
}

#[test]
fn config_init_twice_fails() {
    let home = TempDir::new().unwrap();
    screen_recorder(&home)
        .args(["config", "init"])
        .assert()
        .success();

    screen_recorder(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[cfg(target_os = "linux")]
#[test]
fn dry_run_prints_command_ending_with_output_file() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("captures");
    let out = out.to_str().unwrap();

    screen_recorder(&home)
        .args([
            "record", "--dry-run", "--no-uuid", "-o", out, "-n", "clip", "-r", "25",
        ])
        .args(["--ffmpeg", "/usr/bin/ffmpeg", "--", "-tune", "zerolatency"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/usr/bin/ffmpeg "))
        .stdout(predicate::str::contains("-f x11grab"))
        .stdout(predicate::str::contains("-framerate 25"))
        .stdout(predicate::str::contains("-tune zerolatency"))
        .stdout(predicate::str::ends_with(format!("{}/clip.mp4\n", out)));

    // Nothing is created on a dry run
    assert!(!home.path().join("captures").exists());
}

#[cfg(target_os = "linux")]
#[test]
fn dry_run_uses_configured_values() {
    let home = TempDir::new().unwrap();
    screen_recorder(&home)
        .args(["config", "set", "format", "mkv"])
        .assert()
        .success();

    screen_recorder(&home)
        .args(["record", "--dry-run", "--no-uuid", "-n", "take"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("take.mkv\n"));
}
