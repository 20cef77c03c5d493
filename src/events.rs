//! Turn events and collaborator seams
//!
//! The pipeline never draws anything itself; each turn is pushed through
//! these small sink traits. The binary wires them to the terminal, tests
//! wire them to recording doubles.

use crate::session::SessionSnapshot;

/// Who authored a chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Tutor,
}

/// Feedback panel contents after a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// The message needed no correction.
    Praise { message: String },
    /// The input was judged imperfect; the panel shows the improved form.
    Correction {
        /// What the user actually said.
        original: String,
        /// The corrected sentence; falls back to the original when the
        /// matched record has none.
        improved: String,
        /// Why the change was suggested.
        explanation: String,
        /// Occasional extra language tip.
        tip: Option<String>,
    },
}

/// Renders chat lines. Append-only and ordered.
pub trait DisplaySink: Send + Sync {
    /// Show one chat line; `annotation` is the grammar note attached under
    /// a correcting tutor line.
    fn message(&self, speaker: Speaker, text: &str, annotation: Option<&str>);
}

/// Renders the feedback panel; each call replaces the prior contents.
pub trait FeedbackSink: Send + Sync {
    fn feedback(&self, payload: &Feedback);
}

/// Renders the session statistics (corrections, session number, accuracy).
pub trait StatsSink: Send + Sync {
    fn stats(&self, snapshot: SessionSnapshot);
}
