//! Parlo - Terminal Language Tutor
//!
//! A practice partner for language learners: type (or speak) a sentence,
//! get a tutor reply with a grammar correction, an occasional language
//! tip, and running session statistics.
//!
//! - **Matching**: First-hit keyword rules over a fixed response table
//! - **Turns**: Echo, thinking pause, reply, feedback panel, stats line
//! - **Voice seams**: Optional speech capture and a spoken-reply cue
//! - **Front end**: Reedline chat loop with slash commands and history
//!
//! # Quick Start
//!
//! ```ignore
//! use parlo::config::Config;
//! use parlo::repl::PracticeSession;
//!
//! let config = Config::load(None)?;
//! PracticeSession::new(&config).run().await?;
//! ```

// ─── Core pipeline ─────────────────────────────────────────────────
pub mod config;
pub mod errors;
pub mod events;
pub mod pipeline;
pub mod responses;
pub mod session;
pub mod telemetry;
pub mod voice;

// ─── Terminal front end ────────────────────────────────────────────
pub mod cli;
pub mod input;
pub mod repl;
pub mod ui;
