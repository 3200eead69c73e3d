//! Main app runners for the record and devices commands

use std::process::ExitCode;
use std::time::Instant;

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::broadcast::Receiver;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::application::{DeviceEnumerator, RecorderEvent, RecordingController};
use crate::domain::capture::{build_command, select_backend};
use crate::domain::config::AppConfig;
use crate::domain::error::{ErrorKind, RecordingError};
use crate::domain::platform::Platform;
use crate::domain::recording::{Duration, RecorderConfig, SessionState};
use crate::infrastructure::{FfmpegLauncher, TokioCommandRunner, XdgConfigStore};

use super::args::RecordArgs;
use super::presenter::Presenter;
use super::signals::StopSignals;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Exit code for a recorder error: invalid input is a usage error
pub fn exit_code_for(err: &RecordingError) -> u8 {
    match err.kind {
        ErrorKind::InvalidInput => EXIT_USAGE_ERROR,
        _ => EXIT_ERROR,
    }
}

/// How the record loop ended
enum Outcome {
    /// We asked FFmpeg to stop
    StopRequested(&'static str),
    /// FFmpeg ended by itself without error
    Finished,
    /// FFmpeg ended with an error
    Failed,
}

/// Run the record command
pub async fn run_record(args: RecordArgs, global: AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    let config = load_merged_config(global.merge(args.to_config())).await;

    let stop_after = match args.duration.as_deref().map(str::parse::<Duration>).transpose() {
        Ok(d) => d,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let recorder_config = match config
        .to_recorder_options()
        .and_then(RecorderConfig::new)
    {
        Ok(c) => c,
        Err(e) => {
            presenter.error(&e.message);
            return ExitCode::from(exit_code_for(&e));
        }
    };

    let launcher = FfmpegLauncher::with_binary(config.ffmpeg_or_default());
    let controller = match RecordingController::new(recorder_config, launcher) {
        Ok(c) => c,
        Err(e) => {
            presenter.error(&e.message);
            return ExitCode::from(exit_code_for(&e));
        }
    };

    if args.dry_run {
        return print_command(&controller, &config, &presenter);
    }

    let mut signals = match StopSignals::install() {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut events = controller.subscribe();
    controller.start().await;

    let Some(output_file) = controller.output_file().await else {
        report_errors(&mut events, &presenter);
        return ExitCode::from(EXIT_ERROR);
    };

    presenter.start_spinner(&format!("Recording to {}", output_file.display()));
    let started = Instant::now();
    let total_ms = stop_after.map(|d| d.as_millis());

    let deadline = async {
        match stop_after {
            Some(d) => tokio::time::sleep(d.as_std()).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);

    let mut ticker = tokio::time::interval(std::time::Duration::from_millis(250));
    let mut had_error = false;

    let outcome = loop {
        tokio::select! {
            request = signals.recv() => {
                let reason = request.map(|r| r.as_str()).unwrap_or("shutdown");
                break Outcome::StopRequested(reason);
            }
            _ = &mut deadline => break Outcome::StopRequested("duration elapsed"),
            event = events.recv() => match event {
                Ok(RecorderEvent::Stopped) => break Outcome::Finished,
                Ok(RecorderEvent::Error(e)) => {
                    had_error = true;
                    presenter.error(&e.message);
                    if controller.state().await == SessionState::Idle {
                        break Outcome::Failed;
                    }
                }
                Err(RecvError::Lagged(n)) => debug!(skipped = n, "Event receiver lagged"),
                Err(RecvError::Closed) => break Outcome::Failed,
            },
            _ = ticker.tick() => {
                presenter.update_recording_progress(started.elapsed().as_millis() as u64, total_ms);
            }
        }
    };

    if let Outcome::StopRequested(reason) = outcome {
        debug!(reason, "Stopping recording");
        presenter.update_spinner("Finalizing recording...");
        controller.stop().await;
        had_error |= report_errors(&mut events, &presenter);
    }

    match outcome {
        Outcome::Failed => {
            presenter.spinner_fail("Recording failed");
            ExitCode::from(EXIT_ERROR)
        }
        _ if had_error => {
            presenter.spinner_fail(&format!(
                "Recording ended with errors: {}",
                output_file.display()
            ));
            ExitCode::from(EXIT_ERROR)
        }
        _ => {
            presenter.spinner_success(&format!("Saved {}", output_file.display()));
            ExitCode::from(EXIT_SUCCESS)
        }
    }
}

/// Print pending error events; returns whether there were any
fn report_errors(events: &mut Receiver<RecorderEvent>, presenter: &Presenter) -> bool {
    let mut any = false;
    loop {
        match events.try_recv() {
            Ok(RecorderEvent::Error(e)) => {
                presenter.error(&e.message);
                any = true;
            }
            Ok(RecorderEvent::Stopped) | Err(TryRecvError::Lagged(_)) => {}
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    any
}

/// Print the FFmpeg command a recording would run
fn print_command(
    controller: &RecordingController<FfmpegLauncher>,
    config: &AppConfig,
    presenter: &Presenter,
) -> ExitCode {
    let recorder = controller.config();
    let output_file = recorder.resolve_output_file();
    match build_command(recorder, select_backend(controller.platform()), &output_file) {
        Ok(command) => {
            presenter.output(&command.render(&config.ffmpeg_or_default()));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.message);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

/// Run the devices command
pub async fn run_devices(platform: Option<String>, json: bool, global: AppConfig) -> ExitCode {
    let presenter = Presenter::new();
    let config = load_merged_config(global).await;
    let enumerator = DeviceEnumerator::new(TokioCommandRunner::new(), config.ffmpeg_or_default());

    let result = match platform.as_deref() {
        Some(os) => enumerator.list_devices_for_os(os).await,
        None => enumerator.list_devices(None).await,
    };

    let devices = match result {
        Ok(d) => d,
        Err(e) => {
            presenter.error(&e.message);
            return ExitCode::from(exit_code_for(&e));
        }
    };

    if json {
        match serde_json::to_string_pretty(devices.names()) {
            Ok(text) => presenter.output(&text),
            Err(e) => {
                presenter.error(&format!("Failed to encode device list: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else if devices.is_empty() {
        let platform = platform.unwrap_or_else(|| {
            Platform::current()
                .map(|p| p.to_string())
                .unwrap_or_else(|_| std::env::consts::OS.to_string())
        });
        presenter.warn(&format!("No audio devices found on {}", platform));
    } else {
        for name in devices.names() {
            presenter.output(name);
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Settings for a command: defaults < config file < env and CLI flags
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    XdgConfigStore::new().load_layered(cli_config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_maps_to_usage_error() {
        assert_eq!(
            exit_code_for(&RecordingError::invalid_field("volume", 3.0)),
            EXIT_USAGE_ERROR
        );
        assert_eq!(
            exit_code_for(&RecordingError::unsupported_platform("sunos")),
            EXIT_USAGE_ERROR
        );
    }

    #[test]
    fn runtime_errors_map_to_error() {
        assert_eq!(exit_code_for(&RecordingError::internal("boom")), EXIT_ERROR);
        assert_eq!(exit_code_for(&RecordingError::already_recording()), EXIT_ERROR);
        assert_eq!(exit_code_for(&RecordingError::no_active_recording()), EXIT_ERROR);
    }
}
