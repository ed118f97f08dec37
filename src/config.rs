use serde::Deserialize;

use crate::cursor::DEFAULT_HOVER_SELECTOR;
use crate::error::EngineError;
use crate::{magnetic, marquee, stagger};

/// Mount configuration, usually handed over from JS as a JSON string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub canvas_id: String,
    pub cursor_ring_id: String,
    pub cursor_dot_id: String,
    pub headline_id: String,
    pub hover_selector: String,
    pub magnetic_max_distance: f64,
    /// px per ms
    pub marquee_speed: f64,
    pub stagger_interval_ms: f64,
    /// Overrides the `prefers-reduced-motion` media query when set.
    pub reduced_motion: Option<bool>,
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas_id: "particle-field".into(),
            cursor_ring_id: "cursor-ring".into(),
            cursor_dot_id: "cursor-dot".into(),
            headline_id: "headline".into(),
            hover_selector: DEFAULT_HOVER_SELECTOR.into(),
            magnetic_max_distance: magnetic::DEFAULT_MAX_DISTANCE,
            marquee_speed: marquee::DEFAULT_SPEED,
            stagger_interval_ms: stagger::DEFAULT_INTERVAL_MS,
            reduced_motion: None,
            log_level: "info".into(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse `json`, or fall back to defaults with a warning. Empty input means defaults.
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self::default(),
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                log::warn!("ignoring engine config: {e}");
                Self::default()
            }),
        }
    }

    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Filter applied to the console logger installed at startup.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level().to_level_filter()
    }
}
