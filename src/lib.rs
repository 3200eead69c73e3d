//! screen-recorder - screen and audio capture driven by FFmpeg
//!
//! This crate validates a recording configuration, synthesizes the FFmpeg
//! invocation for the host platform, and supervises the FFmpeg process from
//! start to graceful stop. It never touches the media itself.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Config validation, capture backends, command building, session state, errors
//! - **Application**: The recording controller, device enumeration, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (FFmpeg process, command runner, config file)
//! - **CLI**: Command-line interface, argument parsing, and signal handling
//!
//! # Example
//!
//! ```no_run
//! use screen_recorder::application::{RecorderEvent, RecordingController};
//! use screen_recorder::domain::recording::{RecorderConfig, RecorderOptions};
//! use screen_recorder::infrastructure::FfmpegLauncher;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RecorderConfig::new(RecorderOptions {
//!     frame_rate: 30,
//!     resolution: Some("1280x720".to_string()),
//!     ..Default::default()
//! })?;
//!
//! let controller = RecordingController::new(config, FfmpegLauncher::new())?;
//! let mut events = controller.subscribe();
//!
//! controller.start().await;
//! tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//! controller.stop().await;
//!
//! while let Ok(event) = events.try_recv() {
//!     if let RecorderEvent::Error(e) = event {
//!         eprintln!("{}", e);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
