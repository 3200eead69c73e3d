//! Device enumeration tests against canned listing output

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use screen_recorder::application::ports::CommandRunner;
use screen_recorder::application::DeviceEnumerator;
use screen_recorder::domain::platform::Platform;
use screen_recorder::domain::ErrorKind;

const DSHOW_LISTING: &str = r#"[dshow @ 000002a1] "HD Webcam" (video)
[dshow @ 000002a1]   Alternative name "@device_pnp_\\?\usb#vid_0c45"
[dshow @ 000002a1] "Stereo Mix (Realtek(R) Audio)" (audio)
[dshow @ 000002a1]   Alternative name "@device_cm_{33D9A762}\wave_{0B1F}"
[dshow @ 000002a1] "Headset Microphone (Jabra)" (audio)
[dshow @ 000002a1] "Stereo Mix (Realtek(R) Audio)" (audio)
dummy: Immediate exit requested
"#;

const AVFOUNDATION_LISTING: &str = "\
[AVFoundation indev @ 0x7f9] AVFoundation video devices:
[AVFoundation indev @ 0x7f9] [0] FaceTime HD Camera
[AVFoundation indev @ 0x7f9] [1] Capture screen 0
[AVFoundation indev @ 0x7f9] AVFoundation audio devices:
[AVFoundation indev @ 0x7f9] [0] MacBook Air Microphone
[AVFoundation indev @ 0x7f9] [1] BlackHole 16ch
: Input/output error
";

const PACTL_LISTING: &str = "\
0\talsa_output.usb-Focusrite.monitor\tPipeWire\ts32le 2ch 48000Hz\tSUSPENDED
1\talsa_input.usb-Focusrite.analog-stereo\tPipeWire\ts32le 2ch 48000Hz\tRUNNING
";

/// Answers every query with the same output and records what was run
#[derive(Clone)]
struct CannedRunner {
    output: Result<&'static str, io::ErrorKind>,
    calls: Arc<Mutex<Vec<(PathBuf, Vec<String>)>>>,
}

impl CannedRunner {
    fn answering(output: &'static str) -> Self {
        Self {
            output: Ok(output),
            calls: Arc::default(),
        }
    }

    fn failing(kind: io::ErrorKind) -> Self {
        Self {
            output: Err(kind),
            calls: Arc::default(),
        }
    }

    fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for CannedRunner {
    async fn run(&self, program: &Path, args: &[String]) -> io::Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_path_buf(), args.to_vec()));
        match self.output {
            Ok(text) => Ok(text.to_string()),
            Err(kind) => Err(io::Error::new(kind, "no such program")),
        }
    }
}

fn enumerator(runner: &CannedRunner) -> DeviceEnumerator<CannedRunner> {
    DeviceEnumerator::new(runner.clone(), "/opt/ffmpeg/bin/ffmpeg")
}

#[tokio::test]
async fn windows_lists_audio_devices_sorted_and_unique() {
    let runner = CannedRunner::answering(DSHOW_LISTING);

    let devices = enumerator(&runner)
        .list_devices(Some(Platform::Windows))
        .await
        .unwrap();

    assert_eq!(
        devices.names(),
        ["Headset Microphone (Jabra)", "Stereo Mix (Realtek(R) Audio)"]
    );

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
    assert!(calls[0].1.contains(&"dshow".to_string()));
    assert!(calls[0].1.contains(&"-list_devices".to_string()));
}

#[tokio::test]
async fn macos_lists_only_the_audio_section() {
    let runner = CannedRunner::answering(AVFOUNDATION_LISTING);

    let devices = enumerator(&runner).list_devices_for_os("darwin").await.unwrap();

    assert_eq!(devices.names(), ["BlackHole 16ch", "MacBook Air Microphone"]);
    assert!(!devices.contains("FaceTime HD Camera"));
    assert!(runner.calls()[0].1.contains(&"avfoundation".to_string()));
}

#[tokio::test]
async fn linux_asks_pactl_not_ffmpeg() {
    let runner = CannedRunner::answering(PACTL_LISTING);

    let devices = enumerator(&runner).list_devices_for_os("linux").await.unwrap();

    assert_eq!(
        devices.names(),
        [
            "alsa_input.usb-Focusrite.analog-stereo",
            "alsa_output.usb-Focusrite.monitor"
        ]
    );
    let calls = runner.calls();
    assert_eq!(calls[0].0, PathBuf::from("pactl"));
    assert_eq!(calls[0].1, ["list", "sources", "short"]);
}

#[tokio::test]
async fn unsupported_os_fails_before_running_anything() {
    let runner = CannedRunner::answering(DSHOW_LISTING);

    let err = enumerator(&runner)
        .list_devices_for_os("sunos")
        .await
        .unwrap_err();

    assert_eq!(err.code, 400);
    assert_eq!(err.kind, ErrorKind::InvalidInput);
    assert_eq!(err.message, "Unsupported platform: sunos");
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn runner_failure_is_internal_error() {
    let runner = CannedRunner::failing(io::ErrorKind::NotFound);

    let err = enumerator(&runner)
        .list_devices(Some(Platform::Linux))
        .await
        .unwrap_err();

    assert_eq!(err.code, 500);
    assert!(err.message.contains("pactl"), "got: {}", err.message);
}

#[tokio::test]
async fn unrecognised_output_gives_empty_list() {
    let runner = CannedRunner::answering("ffmpeg: command produced nothing useful\n");

    let devices = enumerator(&runner)
        .list_devices(Some(Platform::MacOs))
        .await
        .unwrap();

    assert!(devices.is_empty());
}
