//! Turn pipeline
//!
//! One submission = one turn: echo the user line, think for a moment, match
//! a canned response, update the counters, then push the reply, feedback,
//! stats, and speech out through the sinks, in that order.
//!
//! The pipeline owns the session counters; `submit` takes `&mut self`, so
//! turns are serialized by the borrow checker and no locking is needed.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::events::{DisplaySink, Feedback, FeedbackSink, Speaker, StatsSink};
use crate::responses::{ResponseMatcher, ENCOURAGEMENT, GREETING};
use crate::session::{SessionSnapshot, SessionState};
use crate::voice::SpeechOutput;

/// Tunable turn parameters, injected at construction so tests can run with
/// zero delay and a forced (1.0) or suppressed (0.0) tip.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Pause before the tutor replies (models thinking time).
    pub response_delay: Duration,
    /// Chance of attaching the template's tip to correction feedback.
    /// Clamped to `0.0..=1.0`.
    pub tip_probability: f64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            response_delay: Duration::from_millis(1000),
            tip_probability: 0.3,
        }
    }
}

impl PipelineOptions {
    /// Set the thinking delay.
    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    /// Set the tip probability (clamped to `0.0..=1.0`).
    pub fn with_tip_probability(mut self, probability: f64) -> Self {
        self.tip_probability = probability.clamp(0.0, 1.0);
        self
    }
}

/// The collaborator set a pipeline drives. One object may serve several
/// seams (the terminal front end implements all three sink traits).
#[derive(Clone)]
pub struct TurnSinks {
    pub display: Arc<dyn DisplaySink>,
    pub feedback: Arc<dyn FeedbackSink>,
    pub stats: Arc<dyn StatsSink>,
    pub voice: Arc<dyn SpeechOutput>,
}

/// Result of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank input: no state change, no output.
    Ignored,
    /// A full turn ran.
    Answered(TurnSummary),
}

/// What a completed turn emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSummary {
    /// The trimmed text the turn processed.
    pub message: String,
    /// Reply text that was shown and spoken.
    pub reply: String,
    /// Whether the response carried a correction.
    pub corrected: bool,
    /// Whether a tip rode along on the feedback.
    pub tip_attached: bool,
    /// Counters after the turn.
    pub stats: SessionSnapshot,
}

/// Orchestrates tutoring turns over the built-in response table.
pub struct TutorPipeline {
    matcher: ResponseMatcher,
    state: SessionState,
    sinks: TurnSinks,
    options: PipelineOptions,
}

impl TutorPipeline {
    pub fn new(sinks: TurnSinks, options: PipelineOptions) -> Self {
        Self {
            matcher: ResponseMatcher::new(),
            state: SessionState::new(),
            sinks,
            options,
        }
    }

    /// Swap in a custom response table (rule experiments, tests).
    pub fn with_matcher(mut self, matcher: ResponseMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Send the tutor's opening line. Display only: the greeting is not a
    /// turn and touches no counters.
    pub fn greet(&self) {
        self.sinks.display.message(Speaker::Tutor, GREETING, None);
    }

    /// Run one turn. Blank input is ignored with no state change and no
    /// output; otherwise the returned future completes once the reply,
    /// feedback, stats, and speech events have all been emitted.
    pub async fn submit(&mut self, raw_text: &str) -> Submission {
        let message = raw_text.trim();
        if message.is_empty() {
            debug!("ignoring blank submission");
            return Submission::Ignored;
        }

        // Echo the user line before thinking.
        self.sinks.display.message(Speaker::User, message, None);
        self.state.record_message();

        // The one asynchronous boundary in the system.
        if !self.options.response_delay.is_zero() {
            tokio::time::sleep(self.options.response_delay).await;
        }

        let template = self.matcher.match_message(message);
        debug!(
            corrected = template.has_correction(),
            "matched canned response"
        );

        let mut tip_attached = false;
        let feedback = if let Some(explanation) = template.explanation {
            self.state.record_correction();
            let tip = template.tip.filter(|_| self.roll_tip());
            tip_attached = tip.is_some();
            Feedback::Correction {
                original: message.to_string(),
                improved: template
                    .corrected
                    .map(str::to_string)
                    .unwrap_or_else(|| message.to_string()),
                explanation: explanation.to_string(),
                tip: tip.map(str::to_string),
            }
        } else {
            Feedback::Praise {
                message: ENCOURAGEMENT.to_string(),
            }
        };

        let stats = self.state.snapshot();

        // Tutor side of the turn, in presentation order.
        self.sinks
            .display
            .message(Speaker::Tutor, template.reply, template.explanation);
        self.sinks.feedback.feedback(&feedback);
        self.sinks.stats.stats(stats);
        self.sinks.voice.speak(template.reply);

        Submission::Answered(TurnSummary {
            message: message.to_string(),
            reply: template.reply.to_string(),
            corrected: template.has_correction(),
            tip_attached,
            stats,
        })
    }

    /// Session counters so far (read-only).
    pub fn session(&self) -> &SessionState {
        &self.state
    }

    /// The matcher this pipeline consults.
    pub fn matcher(&self) -> &ResponseMatcher {
        &self.matcher
    }

    fn roll_tip(&self) -> bool {
        // The endpoints stay deterministic so tests can force or suppress
        // tips without seeding an RNG.
        if self.options.tip_probability <= 0.0 {
            return false;
        }
        if self.options.tip_probability >= 1.0 {
            return true;
        }
        rand::rng().random_bool(self.options.tip_probability)
    }
}
