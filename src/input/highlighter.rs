//! Input Highlighting
//!
//! Styles slash commands and the exit keywords as you type; everything
//! else is an ordinary sentence and stays unstyled.

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

/// Highlighter for the chat input
pub struct InputHighlighter {
    /// Style for commands (/help, /stats)
    command_style: Style,
    /// Style for the exit keywords
    keyword_style: Style,
    /// Default style
    default_style: Style,
}

impl InputHighlighter {
    pub fn new() -> Self {
        Self {
            command_style: Style::new().fg(Color::Cyan).bold(),
            keyword_style: Style::new().fg(Color::Green),
            default_style: Style::new(),
        }
    }

    /// Check if a word is a command
    fn is_command(&self, word: &str) -> bool {
        matches!(word, "/help" | "/stats" | "/voice" | "/listen" | "/rules")
    }
}

impl Default for InputHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for InputHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if line.is_empty() {
            return styled;
        }

        let first_word = line.split_whitespace().next().unwrap_or("");

        if self.is_command(first_word) {
            let cmd_end = first_word.len();
            styled.push((self.command_style, first_word.to_string()));
            if line.len() > cmd_end {
                styled.push((self.default_style, line[cmd_end..].to_string()));
            }
        } else if first_word == "exit" || first_word == "quit" {
            styled.push((self.keyword_style, line.to_string()));
        } else {
            styled.push((self.default_style, line.to_string()));
        }

        styled
    }
}
