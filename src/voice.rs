//! Speech collaborators
//!
//! Optional capture (speech-to-text) and output (text-to-speech) seams for
//! the tutor. Neither capability is required: when capture is absent the
//! voice control is disabled and the user types; when output is absent the
//! tutor is simply silent.
//!
//! No real microphone or synthesizer backend ships here: capture is either
//! absent ([`NoCapture`]) or scripted ([`ScriptedCapture`], used by tests
//! and demos), and output renders as a terminal cue ([`ConsoleVoice`]).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use tracing::debug;

use crate::errors::CaptureError;

/// Chat line shown once when capture is absent at startup.
pub const CAPTURE_UNAVAILABLE_MSG: &str =
    "Speech recognition isn't available here. Please type your messages instead.";

/// Chat line shown when a capture attempt fails at runtime.
pub const CAPTURE_RETRY_MSG: &str =
    "I'm having trouble hearing you. Please try again or type your message.";

/// Delivery settings for spoken output.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSettings {
    /// BCP 47 language tag for the voice.
    pub language: String,
    /// Speaking rate multiplier (1.0 = normal).
    pub rate: f32,
    /// Voice pitch multiplier (1.0 = neutral).
    pub pitch: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            rate: 1.0,
            pitch: 1.1,
        }
    }
}

impl VoiceSettings {
    /// Set the voice language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the speaking rate.
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    /// Set the voice pitch.
    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }
}

// ============================================================================
// Speech output
// ============================================================================

/// Vocalizes tutor replies. Presentation only; the pipeline never depends
/// on whether anything was actually spoken.
pub trait SpeechOutput: Send + Sync {
    fn speak(&self, text: &str);
}

/// Speech output rendered as a dim terminal cue (the stand-in for a real
/// synthesizer backend).
#[derive(Debug, Clone)]
pub struct ConsoleVoice {
    settings: VoiceSettings,
}

impl ConsoleVoice {
    pub fn new(settings: VoiceSettings) -> Self {
        Self { settings }
    }
}

impl Default for ConsoleVoice {
    fn default() -> Self {
        Self::new(VoiceSettings::default())
    }
}

impl SpeechOutput for ConsoleVoice {
    fn speak(&self, text: &str) {
        debug!(language = %self.settings.language, rate = self.settings.rate, "speaking reply");
        let words = text.split_whitespace().count();
        println!(
            "{}",
            format!("  🔊 speaking ({} {}, {})", words, plural_words(words), self.settings.language)
                .dimmed()
        );
    }
}

fn plural_words(n: usize) -> &'static str {
    if n == 1 {
        "word"
    } else {
        "words"
    }
}

/// Speech output that stays quiet. Used for `--no-voice`, quiet mode, and
/// tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentVoice;

impl SpeechOutput for SilentVoice {
    fn speak(&self, _text: &str) {}
}

/// Wraps a speech output behind an on/off switch so the chat loop can flip
/// spoken replies at runtime without rebuilding the pipeline.
#[derive(Debug)]
pub struct ToggleVoice<S: SpeechOutput> {
    inner: S,
    enabled: AtomicBool,
}

impl<S: SpeechOutput> ToggleVoice<S> {
    pub fn new(inner: S, enabled: bool) -> Self {
        Self {
            inner,
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Flip the switch and return the new state.
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_not(Ordering::Relaxed)
    }
}

impl<S: SpeechOutput> SpeechOutput for ToggleVoice<S> {
    fn speak(&self, text: &str) {
        if self.is_enabled() {
            self.inner.speak(text);
        }
    }
}

// ============================================================================
// Speech capture
// ============================================================================

/// One event from a running capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// A recognized utterance; re-enters the pipeline through `submit`.
    Transcript(String),
    /// The capture attempt failed (no audio, permission denied, ...).
    Failed(String),
    /// The capture session ended; the listening state resets.
    Ended,
}

/// Captures user speech and reports it as text events.
///
/// Session shape: `start` arms one capture session, `poll_event` drains its
/// events in order, and an `Ended` event always closes the session.
pub trait SpeechCapture: Send {
    /// Whether the capability exists on this host.
    fn is_available(&self) -> bool;

    /// Begin listening.
    fn start(&mut self) -> Result<(), CaptureError>;

    /// Abort listening without waiting for a result.
    fn stop(&mut self);

    /// True while a capture session is running.
    fn is_listening(&self) -> bool;

    /// Drain the next pending capture event, if any.
    fn poll_event(&mut self) -> Option<CaptureEvent>;
}

/// The absent capability. `start` always fails; the front end disables the
/// voice control and shows [`CAPTURE_UNAVAILABLE_MSG`] once.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl SpeechCapture for NoCapture {
    fn is_available(&self) -> bool {
        false
    }

    fn start(&mut self) -> Result<(), CaptureError> {
        Err(CaptureError::Unavailable)
    }

    fn stop(&mut self) {}

    fn is_listening(&self) -> bool {
        false
    }

    fn poll_event(&mut self) -> Option<CaptureEvent> {
        None
    }
}

/// One scripted capture outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedUtterance {
    /// The microphone "heard" this text.
    Heard(String),
    /// The capture attempt fails with this reason.
    Failure(String),
}

/// Capture backend that replays a prepared script, one utterance per
/// `start` call. Stands in for a microphone in tests and demos.
#[derive(Debug, Default)]
pub struct ScriptedCapture {
    script: VecDeque<ScriptedUtterance>,
    pending: VecDeque<CaptureEvent>,
    listening: bool,
}

impl ScriptedCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful utterance.
    pub fn hear(mut self, text: impl Into<String>) -> Self {
        self.script.push_back(ScriptedUtterance::Heard(text.into()));
        self
    }

    /// Queue a failing capture attempt.
    pub fn fail(mut self, reason: impl Into<String>) -> Self {
        self.script
            .push_back(ScriptedUtterance::Failure(reason.into()));
        self
    }

    /// Utterances not yet consumed by `start`.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SpeechCapture for ScriptedCapture {
    fn is_available(&self) -> bool {
        true
    }

    fn start(&mut self) -> Result<(), CaptureError> {
        if self.listening {
            // One session at a time, like the platform recognizers.
            return Err(CaptureError::Failed {
                reason: "already listening".to_string(),
            });
        }
        self.listening = true;
        match self.script.pop_front() {
            Some(ScriptedUtterance::Heard(text)) => {
                self.pending.push_back(CaptureEvent::Transcript(text));
            }
            Some(ScriptedUtterance::Failure(reason)) => {
                self.pending.push_back(CaptureEvent::Failed(reason));
            }
            // Script exhausted: the session hears nothing.
            None => {
                self.pending
                    .push_back(CaptureEvent::Failed("no-speech".to_string()));
            }
        }
        self.pending.push_back(CaptureEvent::Ended);
        Ok(())
    }

    fn stop(&mut self) {
        self.pending.clear();
        self.listening = false;
    }

    fn is_listening(&self) -> bool {
        self.listening
    }

    fn poll_event(&mut self) -> Option<CaptureEvent> {
        let event = self.pending.pop_front();
        if matches!(event, Some(CaptureEvent::Ended)) {
            self.listening = false;
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_capture_is_unavailable() {
        let mut capture = NoCapture;
        assert!(!capture.is_available());
        assert!(matches!(capture.start(), Err(CaptureError::Unavailable)));
        assert!(capture.poll_event().is_none());
    }

    #[test]
    fn test_scripted_capture_delivers_transcript_then_ends() {
        let mut capture = ScriptedCapture::new().hear("I was in Paris");
        capture.start().expect("scripted capture starts");
        assert!(capture.is_listening());

        assert_eq!(
            capture.poll_event(),
            Some(CaptureEvent::Transcript("I was in Paris".to_string()))
        );
        assert!(capture.is_listening(), "still listening until Ended");
        assert_eq!(capture.poll_event(), Some(CaptureEvent::Ended));
        assert!(!capture.is_listening(), "Ended resets the listening state");
        assert_eq!(capture.poll_event(), None);
    }

    #[test]
    fn test_scripted_capture_failure_then_ends() {
        let mut capture = ScriptedCapture::new().fail("permission denied");
        capture.start().expect("scripted capture starts");
        assert_eq!(
            capture.poll_event(),
            Some(CaptureEvent::Failed("permission denied".to_string()))
        );
        assert_eq!(capture.poll_event(), Some(CaptureEvent::Ended));
        assert!(!capture.is_listening());
    }

    #[test]
    fn test_scripted_capture_exhausted_script_reports_no_speech() {
        let mut capture = ScriptedCapture::new();
        capture.start().expect("start works on an empty script");
        assert_eq!(
            capture.poll_event(),
            Some(CaptureEvent::Failed("no-speech".to_string()))
        );
    }

    #[test]
    fn test_scripted_capture_rejects_double_start() {
        let mut capture = ScriptedCapture::new().hear("one").hear("two");
        capture.start().expect("first start works");
        assert!(matches!(
            capture.start(),
            Err(CaptureError::Failed { .. })
        ));
        assert_eq!(capture.remaining(), 1, "second utterance stays queued");
    }

    #[test]
    fn test_stop_clears_pending_events() {
        let mut capture = ScriptedCapture::new().hear("ignored");
        capture.start().expect("scripted capture starts");
        capture.stop();
        assert!(!capture.is_listening());
        assert_eq!(capture.poll_event(), None);
    }

    #[test]
    fn test_toggle_voice_flips_state() {
        let voice = ToggleVoice::new(SilentVoice, true);
        assert!(voice.is_enabled());
        assert!(!voice.toggle());
        assert!(!voice.is_enabled());
        assert!(voice.toggle());
        assert!(voice.is_enabled());
    }

    #[test]
    fn test_toggle_voice_muted_when_disabled() {
        use std::sync::Mutex;

        struct Recorder(Mutex<Vec<String>>);
        impl SpeechOutput for Recorder {
            fn speak(&self, text: &str) {
                self.0.lock().unwrap().push(text.to_string());
            }
        }

        let voice = ToggleVoice::new(Recorder(Mutex::new(Vec::new())), false);
        voice.speak("quiet");
        voice.toggle();
        voice.speak("loud");
        assert_eq!(*voice.inner.0.lock().unwrap(), vec!["loud".to_string()]);
    }

    #[test]
    fn test_voice_settings_builders() {
        let settings = VoiceSettings::default()
            .with_language("fr-FR")
            .with_rate(0.9)
            .with_pitch(1.3);
        assert_eq!(settings.language, "fr-FR");
        assert_eq!(settings.rate, 0.9);
        assert_eq!(settings.pitch, 1.3);
    }

    #[test]
    fn test_default_voice_settings_match_tutor_voice() {
        let settings = VoiceSettings::default();
        assert_eq!(settings.language, "en-US");
        assert_eq!(settings.rate, 1.0);
        assert_eq!(settings.pitch, 1.1);
    }
}
