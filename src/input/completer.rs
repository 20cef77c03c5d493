//! Slash-Command Completion
//!
//! Completes chat commands. Ordinary sentences are left alone: suggestions
//! only appear once the line starts with `/`.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use reedline::{Completer, Span, Suggestion};

/// Completer for the chat loop's slash commands
pub struct SlashCompleter {
    /// Known commands (/help, /stats, ...)
    commands: Vec<String>,
    /// Fuzzy matcher for smart matching
    matcher: SkimMatcherV2,
}

impl SlashCompleter {
    /// Create a new completer over the given commands
    pub fn new(commands: Vec<String>) -> Self {
        Self {
            commands,
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Get command completions with explicit span
    fn complete_commands_with_span(
        &self,
        prefix: &str,
        span_start: usize,
        span_end: usize,
    ) -> Vec<Suggestion> {
        let mut suggestions: Vec<(i64, Suggestion)> = self
            .commands
            .iter()
            .filter_map(|cmd| {
                self.matcher.fuzzy_match(cmd, prefix).map(|score| {
                    (
                        score,
                        Suggestion {
                            value: cmd.clone(),
                            display_override: None,
                            description: Some(self.command_description(cmd)),
                            style: None,
                            extra: None,
                            span: Span::new(span_start, span_end),
                            append_whitespace: true,
                            match_indices: None,
                        },
                    )
                })
            })
            .collect();

        suggestions.sort_by(|a, b| b.0.cmp(&a.0));
        suggestions.into_iter().map(|(_, s)| s).collect()
    }

    /// Get description for a command
    fn command_description(&self, cmd: &str) -> String {
        match cmd {
            "/help" => "Show available commands".to_string(),
            "/stats" => "Show session statistics".to_string(),
            "/voice" => "Toggle spoken replies".to_string(),
            "/listen" => "Capture one spoken sentence".to_string(),
            "/rules" => "Show the correction rules".to_string(),
            "exit" => "End the practice session".to_string(),
            "quit" => "End the practice session".to_string(),
            _ => "Command".to_string(),
        }
    }
}

impl Completer for SlashCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let before_cursor = &line[..pos];
        if before_cursor.starts_with('/') {
            self.complete_commands_with_span(before_cursor, 0, pos)
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::command_names;

    #[test]
    fn test_completer_creation() {
        let completer = SlashCompleter::new(command_names());
        assert!(completer.commands.contains(&"/help".to_string()));
    }

    #[test]
    fn test_command_completions_prefix() {
        let completer = SlashCompleter::new(command_names());
        let suggestions = completer.complete_commands_with_span("/he", 0, 3);
        assert!(suggestions.iter().any(|s| s.value == "/help"));
    }

    #[test]
    fn test_slash_lists_all_commands() {
        let completer = SlashCompleter::new(vec![
            "/help".into(),
            "/stats".into(),
            "/voice".into(),
            "/rules".into(),
        ]);
        let suggestions = completer.complete_commands_with_span("/", 0, 1);
        assert_eq!(suggestions.len(), 4);
    }

    #[test]
    fn test_plain_sentences_get_no_suggestions() {
        let mut completer = SlashCompleter::new(command_names());
        assert!(completer.complete("I was in Paris", 14).is_empty());
        assert!(completer.complete("", 0).is_empty());
    }

    #[test]
    fn test_complete_interface() {
        let mut completer = SlashCompleter::new(command_names());
        let suggestions = completer.complete("/st", 3);
        assert!(suggestions.iter().any(|s| s.value == "/stats"));
    }

    #[test]
    fn test_command_description() {
        let completer = SlashCompleter::new(vec![]);
        assert_eq!(
            completer.command_description("/voice"),
            "Toggle spoken replies"
        );
        assert_eq!(completer.command_description("/made-up"), "Command");
    }

    #[test]
    fn test_suggestion_has_description() {
        let completer = SlashCompleter::new(command_names());
        let suggestions = completer.complete_commands_with_span("/rules", 0, 6);
        assert!(!suggestions.is_empty());
        assert!(suggestions[0].description.is_some());
    }
}
