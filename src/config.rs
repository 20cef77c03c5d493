//! Configuration Management
//!
//! Loads tutor configuration from TOML files.
//! Configuration includes:
//! - Tutor behavior (response delay, tip probability)
//! - Voice settings (language, rate, pitch)
//! - UI options (color, timestamps)
//!
//! Search order: explicit `--config` path, then `./parlo.toml`, then
//! `~/.config/parlo/config.toml`, then built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ParloError, Result};
use crate::pipeline::PipelineOptions;
use crate::voice::VoiceSettings;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tutor: TutorConfig,

    #[serde(default)]
    pub voice: VoiceConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Tutor turn behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorConfig {
    /// Milliseconds of thinking time before the tutor replies.
    #[serde(default = "default_response_delay_ms")]
    pub response_delay_ms: u64,
    /// Chance of attaching a language tip to correction feedback.
    #[serde(default = "default_tip_probability")]
    pub tip_probability: f64,
}

/// Spoken-output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Whether tutor replies are spoken at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// BCP 47 language tag for the voice.
    #[serde(default = "default_language")]
    pub language: String,
    /// Speaking rate multiplier.
    #[serde(default = "default_rate")]
    pub rate: f32,
    /// Voice pitch multiplier.
    #[serde(default = "default_pitch")]
    pub pitch: f32,
}

/// Terminal output options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Enable colored output (`NO_COLOR` still wins).
    #[serde(default = "default_true")]
    pub color: bool,
    /// Prefix chat lines with a clock time.
    #[serde(default)]
    pub timestamps: bool,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: default_response_delay_ms(),
            tip_probability: default_tip_probability(),
        }
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: default_language(),
            rate: default_rate(),
            pitch: default_pitch(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            timestamps: false,
        }
    }
}

fn default_response_delay_ms() -> u64 {
    1000
}
fn default_tip_probability() -> f64 {
    0.3
}
fn default_true() -> bool {
    true
}
fn default_language() -> String {
    "en-US".to_string()
}
fn default_rate() -> f32 {
    1.0
}
fn default_pitch() -> f32 {
    1.1
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p).map_err(|e| {
                    ParloError::Config(format!("failed to read config from {}: {e}", p.display()))
                })?;
                Self::parse(&content)?
            }
            None => {
                let home_config = dirs::home_dir().map(|h| h.join(".config/parlo/config.toml"));

                let mut default_paths = vec![std::path::PathBuf::from("parlo.toml")];
                if let Some(hc) = home_config {
                    default_paths.push(hc);
                }

                let mut loaded = None;
                for p in &default_paths {
                    if let Ok(content) = std::fs::read_to_string(p) {
                        debug!(path = %p.display(), "loading config file");
                        loaded = Some(Self::parse(&content)?);
                        break;
                    }
                }
                loaded.unwrap_or_else(|| {
                    debug!("no config file found, using defaults");
                    Self::default()
                })
            }
        };

        // Override with environment variables
        if let Ok(delay) = std::env::var("PARLO_RESPONSE_DELAY_MS") {
            if let Ok(ms) = delay.parse::<u64>() {
                config.tutor.response_delay_ms = ms;
            }
        }
        if let Ok(probability) = std::env::var("PARLO_TIP_PROBABILITY") {
            if let Ok(p) = probability.parse::<f64>() {
                config.tutor.tip_probability = p;
            }
        }
        if let Ok(language) = std::env::var("PARLO_LANGUAGE") {
            config.voice.language = language;
        }

        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ParloError::Config(format!("failed to parse config: {e}")))
    }

    /// Turn parameters for the pipeline. The tip probability is clamped
    /// here, so an out-of-range config value degrades instead of erroring.
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions::default()
            .with_response_delay(std::time::Duration::from_millis(self.tutor.response_delay_ms))
            .with_tip_probability(self.tutor.tip_probability)
    }

    /// Delivery settings for the speech output seam.
    pub fn voice_settings(&self) -> VoiceSettings {
        VoiceSettings::default()
            .with_language(self.voice.language.clone())
            .with_rate(self.voice.rate)
            .with_pitch(self.voice.pitch)
    }
}
