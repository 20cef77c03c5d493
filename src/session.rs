//! Session statistics
//!
//! Counters for one tutoring session:
//! - messages submitted and corrections received
//! - derived practice-session number (advances every three messages)
//! - derived accuracy percentage, guarded against the empty session
//!
//! State is owned by the pipeline and mutated only through it; nothing here
//! is persisted.

/// Point-in-time view of the counters and derived metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Messages submitted so far.
    pub messages: u32,
    /// Responses that carried a correction.
    pub corrections: u32,
    /// Practice-session number, starting at 1.
    pub session_number: u32,
    /// Rounded share of messages that needed no correction.
    /// `None` until the first message has been recorded.
    pub accuracy_percent: Option<u8>,
}

/// Mutable counters for one session. Lives as long as the pipeline;
/// invariant: `corrections <= messages`.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    messages: u32,
    corrections: u32,
}

impl SessionState {
    /// Fresh session with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one submitted user message.
    pub(crate) fn record_message(&mut self) {
        self.messages += 1;
    }

    /// Record that the latest response carried a correction.
    pub(crate) fn record_correction(&mut self) {
        self.corrections += 1;
        debug_assert!(
            self.corrections <= self.messages,
            "corrections can never outnumber messages"
        );
    }

    /// Messages submitted so far.
    pub fn messages(&self) -> u32 {
        self.messages
    }

    /// Responses that carried a correction.
    pub fn corrections(&self) -> u32 {
        self.corrections
    }

    /// Practice-session number: a new "session" every three messages.
    pub fn session_number(&self) -> u32 {
        self.messages / 3 + 1
    }

    /// Rounded percentage of messages that needed no correction.
    ///
    /// Returns `None` when no messages have been recorded yet; the formula
    /// divides by the message count, and this accessor is the reusable
    /// guard for that.
    pub fn accuracy_percent(&self) -> Option<u8> {
        if self.messages == 0 {
            return None;
        }
        let correct = (self.messages - self.corrections) as f64;
        Some((correct / self.messages as f64 * 100.0).round() as u8)
    }

    /// Snapshot of the counters and derived metrics.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.messages,
            corrections: self.corrections,
            session_number: self.session_number(),
            accuracy_percent: self.accuracy_percent(),
        }
    }
}
