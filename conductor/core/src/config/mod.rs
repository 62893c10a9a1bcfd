//! TOML Configuration File Support
//!
//! Timing, scale targets and strings for the exercise, loaded from
//! `~/.config/breathe/config.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # XDG Base Directory Compliance
//!
//! - `$BREATHE_CONFIG` if set
//! - `$XDG_CONFIG_HOME/breathe/config.toml` (typically `~/.config/breathe/config.toml`)
//!
//! # Example Configuration
//!
//! ```toml
//! [reveal]
//! char_delay_ms = 160
//! string_delay_ms = 1000
//! split_mode = "graphemes"
//!
//! [press]
//! duration_ms = 1800
//! delay_ms = 200
//! scale_down = 0.3
//! overshoot = 1.2
//!
//! [breathing]
//! ready_ms = 3000
//! hold_ms = 3000
//! duration_ms = 7000
//! delay_ms = 200
//! inhale_scale = 0.5
//! exhale_scale = 1.2
//!
//! [render]
//! frame_interval_ms = 33
//!
//! [strings]
//! inhale = "einatmen"
//! exhale = "ausatmen"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reveal::SplitMode;
use crate::strings::{StringTable, StringTableOverrides};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Reveal section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealToml {
    /// Delay between revealed characters in milliseconds
    pub char_delay_ms: Option<u64>,
    /// Pause after each revealed string in milliseconds
    pub string_delay_ms: Option<u64>,
    /// `graphemes` or `chars`
    pub split_mode: Option<SplitMode>,
}

/// Press section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PressToml {
    /// Duration of each press keyframe in milliseconds
    pub duration_ms: Option<u64>,
    /// Delay before the overshoot keyframe in milliseconds
    pub delay_ms: Option<u64>,
    /// Scale the button shrinks to when pressed
    pub scale_down: Option<f32>,
    /// Scale the button overshoots to before settling
    pub overshoot: Option<f32>,
}

/// Breathing section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathingToml {
    /// How long "ready" is shown in milliseconds
    pub ready_ms: Option<u64>,
    /// Hold duration in milliseconds
    pub hold_ms: Option<u64>,
    /// Inhale/exhale duration in milliseconds
    pub duration_ms: Option<u64>,
    /// Delay before the exhale starts moving in milliseconds
    pub delay_ms: Option<u64>,
    /// Scale at the end of an inhale
    pub inhale_scale: Option<f32>,
    /// Scale at the end of an exhale
    pub exhale_scale: Option<f32>,
}

/// Render section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderToml {
    /// Animation frame interval in milliseconds
    pub frame_interval_ms: Option<u64>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BreatheToml {
    /// Reveal section
    pub reveal: RevealToml,
    /// Press section
    pub press: PressToml,
    /// Breathing section
    pub breathing: BreathingToml,
    /// Render section
    pub render: RenderToml,
    /// String overrides
    pub strings: StringTableOverrides,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Typewriter timing
#[derive(Clone, Debug, PartialEq)]
pub struct RevealConfig {
    /// Delay between revealed characters
    pub char_delay: Duration,
    /// Pause after each string
    pub string_delay: Duration,
    /// How text is cut into reveal units
    pub split_mode: SplitMode,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            char_delay: Duration::from_millis(160),
            string_delay: Duration::from_millis(1000),
            split_mode: SplitMode::Graphemes,
        }
    }
}

/// Press pulse timing and scales
#[derive(Clone, Debug, PartialEq)]
pub struct PressConfig {
    /// Duration of each of the three keyframes
    pub duration: Duration,
    /// Delay before the overshoot keyframe
    pub delay: Duration,
    /// First keyframe target
    pub scale_down: f32,
    /// Second keyframe target
    pub overshoot: f32,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1800),
            delay: Duration::from_millis(200),
            scale_down: 0.3,
            overshoot: 1.2,
        }
    }
}

/// Breathing cycle timing and scales
#[derive(Clone, Debug, PartialEq)]
pub struct BreathingConfig {
    /// How long "ready" is shown
    pub ready: Duration,
    /// Each hold
    pub hold: Duration,
    /// Each inhale and exhale
    pub breath: Duration,
    /// Delay before the exhale starts moving
    pub exhale_delay: Duration,
    /// Inhale keyframe target
    pub inhale_scale: f32,
    /// Exhale keyframe target
    pub exhale_scale: f32,
    /// How long the praise label stays before the restart label
    pub praise: Duration,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            ready: Duration::from_millis(3000),
            hold: Duration::from_millis(3000),
            breath: Duration::from_millis(7000),
            exhale_delay: Duration::from_millis(200),
            inhale_scale: 0.5,
            exhale_scale: 1.2,
            praise: Duration::from_millis(3000),
        }
    }
}

/// Centralized configuration for the exercise
#[derive(Clone, Debug)]
pub struct BreatheConfig {
    /// Typewriter timing
    pub reveal: RevealConfig,
    /// Press pulse
    pub press: PressConfig,
    /// Breathing cycle
    pub breathing: BreathingConfig,
    /// Interval between animation frames
    pub frame_interval: Duration,
    /// User-facing strings
    pub strings: StringTable,
    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,
    /// Source of configuration values
    source: ConfigSource,
}

impl Default for BreatheConfig {
    fn default() -> Self {
        Self {
            reveal: RevealConfig::default(),
            press: PressConfig::default(),
            breathing: BreathingConfig::default(),
            frame_interval: Duration::from_millis(33),
            strings: StringTable::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl BreatheConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check values that would make the choreography meaningless
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for a zero frame interval or a
    /// scale target that is not a positive finite number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "render.frame_interval_ms must be greater than zero".to_string(),
            ));
        }

        let scales = [
            ("press.scale_down", self.press.scale_down),
            ("press.overshoot", self.press.overshoot),
            ("breathing.inhale_scale", self.breathing.inhale_scale),
            ("breathing.exhale_scale", self.breathing.exhale_scale),
        ];
        for (name, value) in scales {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$BREATHE_CONFIG` when set, otherwise
/// `$XDG_CONFIG_HOME/breathe/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("BREATHE_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|p| p.join("breathe").join("config.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or the
/// resulting values fail validation. A missing config file is not an error.
pub fn load_config() -> Result<BreatheConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or the resulting values fail validation.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<BreatheConfig, ConfigError> {
    let mut config = BreatheConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: BreatheToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, |key| std::env::var(key).ok());

    config.validate()?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut BreatheConfig, toml: &BreatheToml) {
    // Reveal
    if let Some(ms) = toml.reveal.char_delay_ms {
        config.reveal.char_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.reveal.string_delay_ms {
        config.reveal.string_delay = Duration::from_millis(ms);
    }
    if let Some(mode) = toml.reveal.split_mode {
        config.reveal.split_mode = mode;
    }

    // Press
    if let Some(ms) = toml.press.duration_ms {
        config.press.duration = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.press.delay_ms {
        config.press.delay = Duration::from_millis(ms);
    }
    if let Some(scale) = toml.press.scale_down {
        config.press.scale_down = scale;
    }
    if let Some(scale) = toml.press.overshoot {
        config.press.overshoot = scale;
    }

    // Breathing
    if let Some(ms) = toml.breathing.ready_ms {
        config.breathing.ready = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.breathing.hold_ms {
        config.breathing.hold = Duration::from_millis(ms);
        config.breathing.praise = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.breathing.duration_ms {
        config.breathing.breath = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.breathing.delay_ms {
        config.breathing.exhale_delay = Duration::from_millis(ms);
    }
    if let Some(scale) = toml.breathing.inhale_scale {
        config.breathing.inhale_scale = scale;
    }
    if let Some(scale) = toml.breathing.exhale_scale {
        config.breathing.exhale_scale = scale;
    }

    // Render
    if let Some(ms) = toml.render.frame_interval_ms {
        config.frame_interval = Duration::from_millis(ms);
    }

    config.strings.merge(&toml.strings);
}

/// Apply environment variable overrides to the config
fn apply_env_config(config: &mut BreatheConfig, var: impl Fn(&str) -> Option<String>) {
    let millis = |key: &str| {
        let raw = var(key)?;
        match raw.trim().parse::<u64>() {
            Ok(ms) => Some(Duration::from_millis(ms)),
            Err(_) => {
                tracing::warn!(key, value = %raw, "Ignoring non-numeric environment override");
                None
            }
        }
    };

    if let Some(d) = millis("BREATHE_CHAR_DELAY_MS") {
        config.reveal.char_delay = d;
        config.source = ConfigSource::Env;
    }
    if let Some(d) = millis("BREATHE_HOLD_MS") {
        config.breathing.hold = d;
        config.breathing.praise = d;
        config.source = ConfigSource::Env;
    }
    if let Some(d) = millis("BREATHE_BREATH_MS") {
        config.breathing.breath = d;
        config.source = ConfigSource::Env;
    }
    if let Some(d) = millis("BREATHE_FRAME_MS") {
        config.frame_interval = d;
        config.source = ConfigSource::Env;
    }
    if let Some(raw) = var("BREATHE_SPLIT_MODE") {
        match raw.parse::<SplitMode>() {
            Ok(mode) => {
                config.reveal.split_mode = mode;
                config.source = ConfigSource::Env;
            }
            Err(e) => tracing::warn!(error = %e, "Ignoring BREATHE_SPLIT_MODE"),
        }
    }
}
