//! Chat Rendering
//!
//! Draws all three sink surfaces on the terminal: chat lines, the feedback
//! panel, and the session stats line. Between a user line and the tutor's
//! reply it keeps the thinking indicator alive, the terminal equivalent of
//! a chat window's typing dots.

use std::sync::Mutex;

use chrono::Local;
use colored::Colorize;

use crate::events::{DisplaySink, Feedback, FeedbackSink, Speaker, StatsSink};
use crate::responses::ResponseMatcher;
use crate::session::SessionSnapshot;
use crate::ui::spinner::ThinkingSpinner;

/// Print the correction rule table in priority order.
pub fn print_rules(matcher: &ResponseMatcher) {
    println!();
    println!("{}", "📋 Correction rules (first match wins)".bright_cyan().bold());
    for (index, template) in matcher.table().iter().enumerate() {
        println!(
            "  {} {}",
            format!("{}.", index + 1).bold(),
            template.rule.to_string().bright_yellow()
        );
        println!("     {}", template.reply);
        if let Some(corrected) = template.corrected {
            println!("     {} {}", "improves to:".dimmed(), corrected.bright_green());
        }
    }
    println!();
}

/// Renders the conversation on stdout.
pub struct TerminalDisplay {
    timestamps: bool,
    thinking: Mutex<Option<ThinkingSpinner>>,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            timestamps: false,
            thinking: Mutex::new(None),
        }
    }

    /// Prefix chat lines with a clock time.
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    fn stamp(&self) -> String {
        if self.timestamps {
            format!("{} ", Local::now().format("%H:%M").to_string().dimmed())
        } else {
            String::new()
        }
    }

    fn begin_thinking(&self) {
        if let Ok(mut slot) = self.thinking.lock() {
            *slot = Some(ThinkingSpinner::start("thinking"));
        }
    }

    fn end_thinking(&self) {
        if let Ok(mut slot) = self.thinking.lock() {
            if let Some(spinner) = slot.take() {
                spinner.finish();
            }
        }
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for TerminalDisplay {
    fn message(&self, speaker: Speaker, text: &str, annotation: Option<&str>) {
        match speaker {
            Speaker::User => {
                println!("{}{} {}", self.stamp(), "🗣 You:".bright_blue().bold(), text);
                // A reply is coming; show the typing dots until it does.
                self.begin_thinking();
            }
            Speaker::Tutor => {
                self.end_thinking();
                println!(
                    "{}{} {}",
                    self.stamp(),
                    "🦉 Tutor:".bright_magenta().bold(),
                    text
                );
                if let Some(note) = annotation {
                    println!("   🎓 {}", note.dimmed());
                }
            }
        }
    }
}

impl FeedbackSink for TerminalDisplay {
    fn feedback(&self, payload: &Feedback) {
        match payload {
            Feedback::Praise { message } => {
                println!("   {}", message.green());
            }
            Feedback::Correction {
                original,
                improved,
                explanation,
                tip,
            } => {
                println!("   {} {}", "Your sentence:".bold(), original);
                println!("   {} {}", "Improved version:".bold(), improved.bright_green());
                println!("   {} {}", "Explanation:".bold(), explanation);
                if let Some(tip) = tip {
                    println!("   {} {}", "💡 Language Tip:".yellow().bold(), tip);
                }
            }
        }
    }
}

impl StatsSink for TerminalDisplay {
    fn stats(&self, snapshot: SessionSnapshot) {
        let accuracy = snapshot
            .accuracy_percent
            .map(|p| format!("{p}%"))
            .unwrap_or_else(|| "--".to_string());
        println!(
            "{}",
            format!(
                "   📊 session {} · corrections {} · accuracy {}",
                snapshot.session_number, snapshot.corrections, accuracy
            )
            .dimmed()
        );
        println!();
    }
}
