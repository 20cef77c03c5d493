//! Thinking Indicator
//!
//! An animated spinner shown while the tutor composes a reply, updating on
//! the current terminal line using `\r` + ANSI line clearing, driven by a
//! tokio background task.
//!
//! Terminal capability detection: respects `TERM=dumb`, unset `TERM`, and
//! non-terminal stdout. Without ANSI support the spinner stays silent.

use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

const SPINNER_DOTS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Check if the terminal supports ANSI escape sequences.
///
/// Returns `false` if:
/// - The `TERM` env var is `"dumb"` or unset/empty
/// - Stdout is not a terminal (piped to a file, etc.)
pub fn supports_ansi() -> bool {
    if !io::stdout().is_terminal() {
        return false;
    }
    match std::env::var("TERM") {
        Ok(term) => !term.is_empty() && term != "dumb",
        Err(_) => false, // TERM not set
    }
}

/// A single-line spinner for the tutor's thinking pause.
pub struct ThinkingSpinner {
    stop_signal: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
    start_time: Instant,
}

impl ThinkingSpinner {
    /// Start spinning with the given message. Inert when the terminal
    /// cannot render it.
    pub fn start(message: &str) -> Self {
        if !supports_ansi() {
            return Self {
                stop_signal: Arc::new(AtomicBool::new(true)),
                handle: None,
                start_time: Instant::now(),
            };
        }

        let stop_signal = Arc::new(AtomicBool::new(false));
        let stop = stop_signal.clone();
        let message = message.to_string();
        let start = Instant::now();

        let handle = tokio::spawn(async move {
            let mut tick: usize = 0;

            loop {
                if stop.load(Ordering::Relaxed) {
                    break;
                }

                let frame = SPINNER_DOTS[tick % SPINNER_DOTS.len()];
                let elapsed = start.elapsed().as_secs_f64();

                print!("\r\x1b[2K  {} {} ({:.1}s)", frame, message, elapsed);
                io::stdout().flush().ok();

                tick += 1;
                tokio::time::sleep(tokio::time::Duration::from_millis(80)).await;
            }
        });

        Self {
            stop_signal,
            handle: Some(handle),
            start_time: Instant::now(),
        }
    }

    /// Stop the spinner and clear its line.
    pub fn finish(self) {
        // Drop does the cleanup.
    }

    /// Time since the spinner started.
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}

impl Drop for ThinkingSpinner {
    fn drop(&mut self) {
        self.stop_signal.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        // Clear the spinner line so the next chat line starts clean
        if io::stdout().is_terminal() {
            print!("\r\x1b[2K");
            io::stdout().flush().ok();
        }
    }
}
