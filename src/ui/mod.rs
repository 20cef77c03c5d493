//! Terminal User Interface
//!
//! Everything the tutor draws: chat lines, the feedback panel, the stats
//! line, and the thinking indicator shown while the tutor composes a
//! reply.

pub mod display;
pub mod spinner;

pub use display::{print_rules, TerminalDisplay};
pub use spinner::{supports_ansi, ThinkingSpinner};
