//! CLI presenter for output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const SPINNER_TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Progress bar width in cells
const BAR_WIDTH: usize = 20;

/// Terminal output for the CLI.
///
/// Results go to stdout; status lines and the recording spinner go to
/// stderr so output stays pipeable.
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Show the recording spinner
    pub fn start_spinner(&mut self, message: &str) {
        let style = ProgressStyle::default_spinner()
            .tick_chars(SPINNER_TICKS)
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = ProgressBar::new_spinner().with_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    pub fn spinner_success(&mut self, message: &str) {
        self.finish_spinner("✓".green(), message);
    }

    pub fn spinner_fail(&mut self, message: &str) {
        self.finish_spinner("✗".red(), message);
    }

    fn finish_spinner(&mut self, symbol: ColoredString, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", symbol, message));
        }
    }

    /// Print a status line to stderr without tearing the spinner
    fn status_line(&self, symbol: ColoredString, message: &str) {
        match self.spinner {
            Some(ref spinner) => spinner.suspend(|| eprintln!("{} {}", symbol, message)),
            None => eprintln!("{} {}", symbol, message),
        }
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        self.status_line("✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        self.status_line("⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        self.status_line("✗".red(), message);
    }

    /// Output text to stdout (machine-readable results)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Format elapsed recording time, with a bar when the length is known
    pub fn format_progress(&self, elapsed_ms: u64, total_ms: Option<u64>) -> String {
        let elapsed = format_clock(elapsed_ms / 1000);
        let Some(total_ms) = total_ms else {
            return elapsed;
        };

        let percent = if total_ms > 0 {
            (elapsed_ms as f64 / total_ms as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        let filled = ((percent / 100.0) * BAR_WIDTH as f64) as usize;
        let empty = BAR_WIDTH - filled;

        format!(
            "[{}{}] {} / {}",
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            elapsed,
            format_clock(total_ms / 1000)
        )
    }

    /// Update recording progress
    pub fn update_recording_progress(&self, elapsed_ms: u64, total_ms: Option<u64>) {
        let progress = self.format_progress(elapsed_ms, total_ms);
        self.update_spinner(&format!("Recording... {}", progress));
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// `m:ss`, or `h:mm:ss` from one hour on
fn format_clock(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}
