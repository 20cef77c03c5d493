//! Parlo - Terminal Language Tutor
//!
//! Practice sentences, get corrections, watch your accuracy climb.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::pipeline::{TurnSinks, TutorPipeline};
use crate::repl::PracticeSession;
use crate::responses::ResponseMatcher;
use crate::telemetry::init_tracing;
use crate::ui::{print_rules, TerminalDisplay};
use crate::voice::{ConsoleVoice, SilentVoice, SpeechOutput};

#[derive(Parser)]
#[command(name = "parlo")]
#[command(about = "Terminal language tutor: practice sentences and get corrections")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Headless mode: run one sentence through the tutor and exit
    #[arg(short = 'p', long, value_name = "SENTENCE")]
    prompt: Option<String>,

    /// Config file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Thinking delay before each reply, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Chance of a language tip riding on a correction (0.0 to 1.0)
    #[arg(long, value_name = "P")]
    tip_probability: Option<f64>,

    /// Voice language tag shown in the prompt and the spoken-reply cue
    #[arg(long, value_name = "TAG")]
    language: Option<String>,

    /// Disable the spoken-reply cue
    #[arg(long)]
    no_voice: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Prefix chat lines with clock times
    #[arg(long)]
    timestamps: bool,

    /// Quiet mode (no banner, no spoken-reply cue)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive practice session
    #[command(alias = "c")]
    Chat,

    /// Print the correction rule table and exit
    Rules,
}

pub async fn run() -> Result<()> {
    // Initialize telemetry
    init_tracing();

    let cli = Cli::parse();

    // Apply --no-color early to disable all color output
    if cli.no_color || std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    }

    let config_path = cli.config.as_deref().map(expand_path);
    let mut config = Config::load(config_path.as_deref())?;

    // CLI flags override the config file
    if let Some(delay_ms) = cli.delay_ms {
        config.tutor.response_delay_ms = delay_ms;
    }
    if let Some(probability) = cli.tip_probability {
        config.tutor.tip_probability = probability;
    }
    if let Some(language) = cli.language {
        config.voice.language = language;
    }
    if cli.no_voice {
        config.voice.enabled = false;
    }
    if cli.timestamps {
        config.ui.timestamps = true;
    }
    if !config.ui.color {
        colored::control::set_override(false);
    }

    // Headless mode: one sentence in, one full turn out
    if let Some(prompt) = cli.prompt {
        // Support reading from stdin with "-p -"
        let sentence = if prompt == "-" {
            use std::io::Read;
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer.trim().to_string()
        } else {
            prompt
        };

        if sentence.trim().is_empty() {
            anyhow::bail!("empty practice sentence");
        }

        return run_headless(&config, &sentence, cli.quiet).await;
    }

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let mut session = PracticeSession::new(&config);
            session.run().await?;
        }
        Commands::Rules => {
            print_rules(&ResponseMatcher::new());
        }
    }

    Ok(())
}

/// One turn against the terminal sinks, then exit. Quiet mode drops the
/// banner and the spoken-reply cue but keeps the turn output itself.
async fn run_headless(config: &Config, sentence: &str, quiet: bool) -> Result<()> {
    let display = Arc::new(TerminalDisplay::new().with_timestamps(config.ui.timestamps));
    let voice: Arc<dyn SpeechOutput> = if config.voice.enabled && !quiet {
        Arc::new(ConsoleVoice::new(config.voice_settings()))
    } else {
        Arc::new(SilentVoice)
    };
    let sinks = TurnSinks {
        display: display.clone(),
        feedback: display.clone(),
        stats: display.clone(),
        voice,
    };
    let mut pipeline = TutorPipeline::new(sinks, config.pipeline_options());

    if !quiet {
        use colored::Colorize;
        println!(
            "{} {}",
            "🎓 Parlo".bright_cyan(),
            format!("[{}]", config.voice.language).bright_yellow()
        );
        println!();
    }

    pipeline.submit(sentence).await;
    Ok(())
}

/// Expand a leading `~/` to the home directory.
fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
