//! Output file naming

use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::options::RecorderConfig;

/// Build `{dir}/{file_name}[_{uuid}].{format}`.
///
/// With `include_uuid` every call yields a fresh path; without it the
/// result is fully determined by the inputs.
pub fn output_file_path(
    dir: impl AsRef<Path>,
    file_name: &str,
    format: &str,
    include_uuid: bool,
) -> PathBuf {
    let name = if include_uuid {
        format!("{}_{}.{}", file_name, Uuid::new_v4(), format)
    } else {
        format!("{}.{}", file_name, format)
    };
    dir.as_ref().join(name)
}

impl RecorderConfig {
    /// Resolve the file the next recording will be written to
    pub fn resolve_output_file(&self) -> PathBuf {
        output_file_path(
            self.output_path(),
            self.file_name(),
            self.format(),
            self.include_uuid(),
        )
    }
}
