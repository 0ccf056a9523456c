//! Tunable constants for the countdown and the fireworks simulation.
//!
//! Defaults reproduce the classic look: 50-particle bursts, slow ascent, a
//! 100-shell celebration spread over ten seconds. Everything is in canvas
//! pixels and animation frames ("ticks") unless the field name says `_ms`.

use std::fmt;
use std::ops::Range;

/// DOM ids of the elements the countdown writes to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementIds {
    pub canvas: String,
    pub countdown: String,
    pub happy_new_year: String,
    pub good_luck: String,
    pub now_time: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            canvas: "fireworkCanvas".to_owned(),
            countdown: "countdown".to_owned(),
            happy_new_year: "happyNewYear".to_owned(),
            good_luck: "goodLuck".to_owned(),
            now_time: "nowTime".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FireworksConfig {
    pub elements: ElementIds,
    /// Particles spawned by every explosion.
    pub particle_count: usize,
    pub ascent_speed: f64,
    pub shell_radius: f64,
    pub particle_radius: f64,
    /// Outward speed range of a fresh particle.
    pub particle_speed: Range<f64>,
    /// Initial lifetime range, in ticks.
    pub particle_lifetime: Range<f64>,
    /// Added to every particle's vertical velocity each tick.
    pub gravity: f64,
    pub opacity_decay: f64,
    /// Alpha of the black overlay painted every frame (trail length).
    pub trail_alpha: f64,
    pub burst_size: usize,
    pub burst_interval_ms: f64,
    /// Number of January days (starting on the 1st) that show the celebration.
    /// At most 31.
    pub celebration_days: u32,
    pub countdown_period_ms: i32,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            elements: ElementIds::default(),
            particle_count: 50,
            ascent_speed: 2.0,
            shell_radius: 3.0,
            particle_radius: 2.0,
            particle_speed: 2.0..5.0,
            particle_lifetime: 100.0..150.0,
            gravity: 0.05,
            opacity_decay: 0.01,
            trail_alpha: 0.1,
            burst_size: 100,
            burst_interval_ms: 100.0,
            celebration_days: 3,
            countdown_period_ms: 1000,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositive(&'static str),
    EmptyRange(&'static str),
    TooLarge { field: &'static str, max: u32 },
    /// Opacity would still be visible after the shortest lifetime ends.
    SlowFade { decay: f64, min_lifetime: f64 },
    #[cfg(feature = "serde_json")]
    Json(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive(field) => write!(f, "`{field}` must be positive"),
            ConfigError::EmptyRange(field) => write!(f, "`{field}` must be a non-empty range"),
            ConfigError::TooLarge { field, max } => write!(f, "`{field}` must be at most {max}"),
            ConfigError::SlowFade { decay, min_lifetime } => write!(
                f,
                "opacity decay {decay} does not reach zero within the minimum lifetime of {min_lifetime} ticks"
            ),
            #[cfg(feature = "serde_json")]
            ConfigError::Json(msg) => write!(f, "invalid config json: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl FireworksConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("ascent_speed", self.ascent_speed),
            ("shell_radius", self.shell_radius),
            ("particle_radius", self.particle_radius),
            ("opacity_decay", self.opacity_decay),
            ("burst_interval_ms", self.burst_interval_ms),
            ("countdown_period_ms", self.countdown_period_ms as f64),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive(field));
            }
        }
        if self.particle_count == 0 {
            return Err(ConfigError::NonPositive("particle_count"));
        }
        if self.burst_size == 0 {
            return Err(ConfigError::NonPositive("burst_size"));
        }
        if self.celebration_days == 0 {
            return Err(ConfigError::NonPositive("celebration_days"));
        }
        if self.celebration_days > 31 {
            return Err(ConfigError::TooLarge { field: "celebration_days", max: 31 });
        }
        if self.particle_speed.is_empty() || self.particle_speed.start < 0.0 {
            return Err(ConfigError::EmptyRange("particle_speed"));
        }
        if self.particle_lifetime.is_empty() || !(self.particle_lifetime.start > 0.0) {
            return Err(ConfigError::EmptyRange("particle_lifetime"));
        }
        if self.opacity_decay * self.particle_lifetime.start < 1.0 {
            return Err(ConfigError::SlowFade {
                decay: self.opacity_decay,
                min_lifetime: self.particle_lifetime.start,
            });
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON object; missing fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
