//! Application layer - Use cases and port interfaces
//!
//! Contains the recording controller, device enumeration and the trait
//! definitions for external system interactions.

pub mod controller;
pub mod devices;
pub mod ports;

// Re-export use cases
pub use controller::{RecorderEvent, RecordingController};
pub use devices::DeviceEnumerator;
