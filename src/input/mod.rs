//! Chat Input
//!
//! Line editing for the conversation: persistent history, slash-command
//! completion, and input highlighting, built on reedline.

mod completer;
mod highlighter;
mod prompt;

pub use completer::SlashCompleter;
pub use highlighter::InputHighlighter;
pub use prompt::TutorPrompt;

use anyhow::Result;
use reedline::{
    default_emacs_keybindings, ColumnarMenu, EditCommand, Emacs, FileBackedHistory, KeyCode,
    KeyModifiers, Keybindings, MenuBuilder, Reedline, ReedlineEvent, ReedlineMenu, Signal,
};
use std::path::PathBuf;

/// Commands the chat loop understands.
pub fn command_names() -> Vec<String> {
    ["/help", "/stats", "/voice", "/listen", "/rules", "exit", "quit"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Default history file location.
fn history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("parlo").join("history.txt"))
}

/// Line editor for the practice session
pub struct TutorEditor {
    editor: Reedline,
    prompt: TutorPrompt,
    language: String,
}

impl TutorEditor {
    /// Create an editor showing the given voice language in the prompt
    pub fn new(language: &str) -> Result<Self> {
        let history: Box<FileBackedHistory> = if let Some(path) = history_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Box::new(FileBackedHistory::with_file(1000, path)?)
        } else {
            Box::new(FileBackedHistory::new(1000)?)
        };

        let completer = Box::new(SlashCompleter::new(command_names()));
        let highlighter = Box::new(InputHighlighter::new());

        let completion_menu = Box::new(
            ColumnarMenu::default()
                .with_name("completion_menu")
                .with_columns(1)
                .with_column_padding(2)
                .with_marker(" > "),
        );

        let keybindings = Self::build_keybindings();

        let editor = Reedline::create()
            .with_history(history)
            .with_completer(completer)
            .with_quick_completions(true)
            .with_partial_completions(true)
            .with_highlighter(highlighter)
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        Ok(Self {
            editor,
            prompt: TutorPrompt::with_context(language, 1),
            language: language.to_string(),
        })
    }

    fn build_keybindings() -> Keybindings {
        let mut keybindings = default_emacs_keybindings();

        // Tab completes, then cycles the menu
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Edit(vec![EditCommand::Complete]),
                ReedlineEvent::Menu("completion_menu".to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        // Typing "/" opens the command menu
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Char('/'),
            ReedlineEvent::Multiple(vec![
                ReedlineEvent::Edit(vec![EditCommand::InsertChar('/')]),
                ReedlineEvent::Menu("completion_menu".to_string()),
            ]),
        );

        // Escape closes the menu without selecting
        keybindings.add_binding(KeyModifiers::NONE, KeyCode::Esc, ReedlineEvent::Esc);

        keybindings
    }

    /// Read a line from the user
    pub fn read_line(&mut self) -> Result<ReadlineResult> {
        match self.editor.read_line(&self.prompt) {
            Ok(Signal::Success(line)) => Ok(ReadlineResult::Line(line)),
            Ok(Signal::CtrlC) => Ok(ReadlineResult::Interrupt),
            Ok(Signal::CtrlD) => Ok(ReadlineResult::Eof),
            Err(e) => Err(e.into()),
        }
    }

    /// Advance the prompt to the given practice-session number
    pub fn set_session(&mut self, session: u32) {
        self.prompt = TutorPrompt::with_context(&self.language, session);
    }
}

/// Result of reading a line
#[derive(Debug)]
pub enum ReadlineResult {
    /// A line was entered
    Line(String),
    /// Ctrl+C was pressed
    Interrupt,
    /// Ctrl+D was pressed (EOF)
    Eof,
}
