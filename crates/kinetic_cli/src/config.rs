//! Kinetic configuration file handling

use anyhow::{Context, Result};
use kinetic_animation::DuplicatePolicy;
use kinetic_core::{Color, NodeId, Point, PropertyKey, PropertyKind, PropertySnapshot, Size};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file name looked up in directories
pub const CONFIG_FILE: &str = "kinetic.toml";

/// Top-level Kinetic configuration (kinetic.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct KineticConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub shape: ShapeConfig,
}

/// Frame loop settings
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct PlaybackConfig {
    /// Simulated frames per second
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Give up after this many seconds of simulated time
    #[serde(default = "default_max_duration")]
    pub max_duration: f32,
    /// Print every Nth frame (the last frame is always printed)
    #[serde(default = "default_sample_every")]
    pub sample_every: u32,
}

fn default_fps() -> u32 {
    60
}

fn default_max_duration() -> f32 {
    10.0
}

fn default_sample_every() -> u32 {
    6
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            max_duration: default_max_duration(),
            sample_every: default_sample_every(),
        }
    }
}

/// Scheduler settings
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicyConfig,
}

/// Serialized form of [`DuplicatePolicy`]
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicyConfig {
    #[default]
    LastWriterWins,
    Reject,
}

impl From<DuplicatePolicyConfig> for DuplicatePolicy {
    fn from(value: DuplicatePolicyConfig) -> Self {
        match value {
            DuplicatePolicyConfig::LastWriterWins => DuplicatePolicy::LastWriterWins,
            DuplicatePolicyConfig::Reject => DuplicatePolicy::Reject,
        }
    }
}

/// Logging settings
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Initial state of the demo shape
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct ShapeConfig {
    /// `#rrggbb`
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_side")]
    pub width: f32,
    #[serde(default = "default_side")]
    pub height: f32,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub corner_radius: f32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_color() -> String {
    "#ff0000".to_string()
}

fn default_side() -> f32 {
    100.0
}

fn default_opacity() -> f32 {
    1.0
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            width: default_side(),
            height: default_side(),
            x: 0.0,
            y: 0.0,
            corner_radius: 0.0,
            opacity: default_opacity(),
        }
    }
}

impl ShapeConfig {
    /// Build the shape's property snapshot
    pub fn snapshot(&self, node: NodeId) -> Result<PropertySnapshot> {
        let color = parse_hex_color(&self.color)?;
        let snapshot = PropertySnapshot::new()
            .with(PropertyKey::new(node, PropertyKind::Color), color)?
            .with(
                PropertyKey::new(node, PropertyKind::Size),
                Size::new(self.width, self.height),
            )?
            .with(
                PropertyKey::new(node, PropertyKind::Position),
                Point::new(self.x, self.y),
            )?
            .with(
                PropertyKey::new(node, PropertyKind::CornerRadius),
                self.corner_radius,
            )?
            .with(PropertyKey::new(node, PropertyKind::Opacity), self.opacity)?;
        Ok(snapshot)
    }
}

/// Parse `#rrggbb` (leading `#` optional)
pub fn parse_hex_color(input: &str) -> Result<Color> {
    let digits = input.trim().trim_start_matches('#');
    if digits.len() != 6 {
        anyhow::bail!("Expected a #rrggbb color, got {input:?}");
    }
    let hex = u32::from_str_radix(digits, 16)
        .with_context(|| format!("Invalid hex color {input:?}"))?;
    Ok(Color::from_hex(hex))
}

impl KineticConfig {
    /// Load configuration from a file, or from kinetic.toml in a directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found in {}. Run `kinetic init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Load an explicit path, or ./kinetic.toml if present, or defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_dir(path),
            None if Path::new(CONFIG_FILE).exists() => Self::load_from_dir(Path::new(".")),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: KineticConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.playback.fps == 0 {
            anyhow::bail!("playback.fps must be at least 1");
        }
        if !self.playback.max_duration.is_finite() || self.playback.max_duration <= 0.0 {
            anyhow::bail!("playback.max_duration must be a positive number of seconds");
        }
        if self.playback.sample_every == 0 {
            anyhow::bail!("playback.sample_every must be at least 1");
        }
        parse_hex_color(&self.shape.color)?;
        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
