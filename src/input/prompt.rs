//! Chat Prompt
//!
//! A friendly prompt for the practice session.

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};
use std::borrow::Cow;

/// The tutor's input prompt
pub struct TutorPrompt {
    /// Voice language tag (for display)
    language: String,
    /// Current practice-session number
    session: u32,
}

impl TutorPrompt {
    /// Create a new prompt
    pub fn new() -> Self {
        Self {
            language: String::new(),
            session: 0,
        }
    }

    /// Create a prompt with context
    pub fn with_context(language: &str, session: u32) -> Self {
        Self {
            language: language.to_string(),
            session,
        }
    }

    /// Get the mascot glyph
    fn mascot(&self) -> &'static str {
        "🎓"
    }

    /// Get the notebook glyph for the current session
    fn notebook_glyph(&self) -> &'static str {
        match self.session % 4 {
            0 => "📕",
            1 => "📗",
            2 => "📘",
            _ => "📙",
        }
    }
}

impl Default for TutorPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(mismatched_lifetime_syntaxes)]
impl Prompt for TutorPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        if self.session > 0 {
            Cow::Owned(format!("{} {} ", self.mascot(), self.notebook_glyph()))
        } else {
            Cow::Owned(format!("{} ", self.mascot()))
        }
    }

    fn render_prompt_right(&self) -> Cow<str> {
        if !self.language.is_empty() {
            Cow::Owned(format!("[{}]", self.language))
        } else {
            Cow::Borrowed("")
        }
    }

    fn render_prompt_indicator(&self, edit_mode: PromptEditMode) -> Cow<str> {
        match edit_mode {
            PromptEditMode::Default | PromptEditMode::Emacs => Cow::Borrowed("❯ "),
            PromptEditMode::Vi(vi_mode) => match vi_mode {
                reedline::PromptViMode::Normal => Cow::Borrowed("❮ "),
                reedline::PromptViMode::Insert => Cow::Borrowed("❯ "),
            },
            PromptEditMode::Custom(s) => Cow::Owned(format!("{} ", s)),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed("  ⋮ ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "🔍",
            PromptHistorySearchStatus::Failing => "❌",
        };
        Cow::Owned(format!("{} [{}]: ", prefix, history_search.term))
    }
}
