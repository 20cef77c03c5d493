//! Interactive practice session
//!
//! The terminal front end: a reedline chat loop that feeds sentences
//! through the tutoring pipeline and routes slash commands. Session shape:
//! greeting on entry, a thinking pause before each reply, the feedback
//! panel and stats line under it, and an optional spoken-reply cue.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use tracing::warn;

use crate::config::Config;
use crate::errors::CaptureError;
use crate::events::{DisplaySink, Speaker};
use crate::input::{ReadlineResult, TutorEditor};
use crate::pipeline::{Submission, TurnSinks, TutorPipeline};
use crate::ui::{print_rules, TerminalDisplay};
use crate::voice::{
    CaptureEvent, ConsoleVoice, NoCapture, SpeechCapture, ToggleVoice, CAPTURE_RETRY_MSG,
    CAPTURE_UNAVAILABLE_MSG,
};

const MAX_CONSECUTIVE_ERRORS: u32 = 3;

/// One interactive practice session wired to the terminal.
pub struct PracticeSession {
    pipeline: TutorPipeline,
    display: Arc<TerminalDisplay>,
    voice: Arc<ToggleVoice<ConsoleVoice>>,
    capture: Box<dyn SpeechCapture>,
    language: String,
}

impl PracticeSession {
    /// Wire the pipeline to the terminal sinks the config describes. The
    /// display serves all three sink seams; the voice sink starts in the
    /// configured state and `/voice` flips it later.
    pub fn new(config: &Config) -> Self {
        let display = Arc::new(TerminalDisplay::new().with_timestamps(config.ui.timestamps));
        let voice = Arc::new(ToggleVoice::new(
            ConsoleVoice::new(config.voice_settings()),
            config.voice.enabled,
        ));
        let sinks = TurnSinks {
            display: display.clone(),
            feedback: display.clone(),
            stats: display.clone(),
            voice: voice.clone(),
        };
        Self {
            pipeline: TutorPipeline::new(sinks, config.pipeline_options()),
            display,
            voice,
            capture: Box::new(NoCapture),
            language: config.voice.language.clone(),
        }
    }

    /// Swap in a speech capture backend (scripted capture in demos and
    /// tests; the default is the absent capability).
    pub fn with_capture(mut self, capture: Box<dyn SpeechCapture>) -> Self {
        self.capture = capture;
        self
    }

    /// Run the chat loop until `exit`, `quit`, or EOF.
    pub async fn run(&mut self) -> Result<()> {
        let mut editor = TutorEditor::new(&self.language)?;

        println!(
            "{} {}",
            "🎓 Parlo Practice Session".bright_cyan(),
            format!("[{}]", self.language).bright_yellow()
        );
        println!(
            "  Type {} for commands, {} to speak, {} to quit",
            "/help".bright_cyan(),
            "/listen".bright_cyan(),
            "exit".bright_cyan(),
        );
        println!();

        if !self.capture.is_available() {
            self.display
                .message(Speaker::Tutor, CAPTURE_UNAVAILABLE_MSG, None);
        }
        self.pipeline.greet();
        println!();

        let mut consecutive_errors = 0;

        loop {
            let input = match editor.read_line() {
                Ok(ReadlineResult::Line(line)) => {
                    consecutive_errors = 0;
                    line
                }
                Ok(ReadlineResult::Interrupt) => {
                    consecutive_errors = 0;
                    println!("\n{}", "Interrupted. Type 'exit' to leave.".bright_yellow());
                    continue;
                }
                Ok(ReadlineResult::Eof) => break,
                Err(e) => {
                    consecutive_errors += 1;
                    if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                        return Err(e.context("terminal input unavailable"));
                    }
                    eprintln!("Input error: {}", e);
                    continue;
                }
            };

            let input = input.trim();

            if input == "exit" || input == "quit" {
                break;
            }

            match input {
                "" => continue,
                "/help" => print_help(),
                "/stats" => self.show_stats(),
                "/voice" => self.toggle_voice(),
                "/listen" => self.listen_once(&mut editor).await,
                "/rules" => print_rules(self.pipeline.matcher()),
                _ if input.starts_with('/') => {
                    println!(
                        "Unknown command: {}. Type {} for the list.",
                        input.bright_red(),
                        "/help".bright_cyan()
                    );
                }
                sentence => self.practice_turn(sentence, &mut editor).await,
            }
        }

        println!("{}", "👋 Keep practicing! See you next time.".bright_cyan());
        Ok(())
    }

    /// One full turn; the prompt advances with the practice-session number.
    async fn practice_turn(&mut self, sentence: &str, editor: &mut TutorEditor) {
        if let Submission::Answered(summary) = self.pipeline.submit(sentence).await {
            editor.set_session(summary.stats.session_number);
        }
    }

    fn show_stats(&self) {
        let snapshot = self.pipeline.session().snapshot();
        let accuracy = snapshot
            .accuracy_percent
            .map(|p| format!("{p}%"))
            .unwrap_or_else(|| "--".to_string());
        println!();
        println!("{}", "📊 Session Statistics".bright_cyan().bold());
        println!("  messages      {}", snapshot.messages);
        println!("  corrections   {}", snapshot.corrections);
        println!("  session       {}", snapshot.session_number);
        println!("  accuracy      {}", accuracy);
        println!();
    }

    fn toggle_voice(&self) {
        if self.voice.toggle() {
            println!("  🔊 Spoken replies {}", "on".green());
        } else {
            println!("  🔇 Spoken replies {}", "off".yellow());
        }
    }

    /// Capture one utterance and run it through the pipeline. Capture
    /// failures surface as chat lines, matching the widget's retry prompt.
    async fn listen_once(&mut self, editor: &mut TutorEditor) {
        match self.capture.start() {
            Ok(()) => {}
            Err(CaptureError::Unavailable) => {
                self.display
                    .message(Speaker::Tutor, CAPTURE_UNAVAILABLE_MSG, None);
                return;
            }
            Err(CaptureError::Failed { reason }) => {
                warn!(%reason, "speech capture failed to start");
                self.display
                    .message(Speaker::Tutor, CAPTURE_RETRY_MSG, None);
                return;
            }
        }

        println!("{}", "  🎤 Listening...".bright_red());
        let (heard, failures) = drain_capture(self.capture.as_mut());
        for reason in failures {
            warn!(%reason, "speech capture failed");
            self.display
                .message(Speaker::Tutor, CAPTURE_RETRY_MSG, None);
        }
        if let Some(text) = heard {
            self.practice_turn(&text, editor).await;
        }
    }
}

/// Drain one capture session: the last transcript wins, failures are
/// collected for reporting, and `Ended` closes the session.
fn drain_capture(capture: &mut dyn SpeechCapture) -> (Option<String>, Vec<String>) {
    let mut heard = None;
    let mut failures = Vec::new();
    while let Some(event) = capture.poll_event() {
        match event {
            CaptureEvent::Transcript(text) => heard = Some(text),
            CaptureEvent::Failed(reason) => failures.push(reason),
            CaptureEvent::Ended => break,
        }
    }
    (heard, failures)
}

fn print_help() {
    let rows = [
        ("📖", "/help", "Show this help"),
        ("📊", "/stats", "Session statistics"),
        ("🔊", "/voice", "Toggle spoken replies"),
        ("🎤", "/listen", "Capture one spoken sentence"),
        ("📋", "/rules", "Show the correction rules"),
        ("👋", "exit", "End the session"),
    ];
    println!();
    println!(
        "{}",
        "╭──────────────────────────────────────────────╮".bright_cyan()
    );
    println!(
        "{}",
        "│              🎓 PARLO COMMANDS               │".bright_cyan()
    );
    println!(
        "{}",
        "├──────────────────────────────────────────────┤".bright_cyan()
    );
    for (icon, command, description) in rows {
        println!(
            "│  {} {:<9} {:<31}│",
            icon.bright_white(),
            command,
            description
        );
    }
    println!(
        "{}",
        "╰──────────────────────────────────────────────╯".bright_cyan()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::ScriptedCapture;

    #[test]
    fn test_drain_capture_returns_transcript() {
        let mut capture = ScriptedCapture::new().hear("I was in Paris");
        capture.start().expect("scripted capture starts");
        let (heard, failures) = drain_capture(&mut capture);
        assert_eq!(heard.as_deref(), Some("I was in Paris"));
        assert!(failures.is_empty());
        assert!(!capture.is_listening(), "Ended closed the session");
    }

    #[test]
    fn test_drain_capture_collects_failures() {
        let mut capture = ScriptedCapture::new().fail("permission denied");
        capture.start().expect("scripted capture starts");
        let (heard, failures) = drain_capture(&mut capture);
        assert_eq!(heard, None);
        assert_eq!(failures, vec!["permission denied".to_string()]);
    }

    #[test]
    fn test_drain_capture_on_exhausted_script() {
        let mut capture = ScriptedCapture::new();
        capture.start().expect("start works on an empty script");
        let (heard, failures) = drain_capture(&mut capture);
        assert_eq!(heard, None);
        assert_eq!(failures, vec!["no-speech".to_string()]);
    }

    #[test]
    fn test_session_starts_with_configured_voice_state() {
        let mut config = Config::default();
        config.voice.enabled = false;
        let session = PracticeSession::new(&config);
        assert!(!session.voice.is_enabled());
        assert!(!session.capture.is_available(), "capture defaults to absent");
    }

    #[test]
    fn test_with_capture_swaps_backend() {
        let session = PracticeSession::new(&Config::default())
            .with_capture(Box::new(ScriptedCapture::new().hear("bonjour")));
        assert!(session.capture.is_available());
    }
}
