//! Track and simulator configuration.

use serde::Deserialize;

use crate::domain::{Track, MAX_STRIDE, MIN_STRIDE, RACE_DISTANCE};

/// Race distance and per-tick stride range.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackConfig {
    #[serde(default = "default_distance")]
    pub distance: u32,
    #[serde(default = "default_min_stride")]
    pub min_stride: u32,
    #[serde(default = "default_max_stride")]
    pub max_stride: u32,
}

const fn default_distance() -> u32 {
    RACE_DISTANCE
}

const fn default_min_stride() -> u32 {
    MIN_STRIDE
}

const fn default_max_stride() -> u32 {
    MAX_STRIDE
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            distance: default_distance(),
            min_stride: default_min_stride(),
            max_stride: default_max_stride(),
        }
    }
}

impl From<&TrackConfig> for Track {
    fn from(config: &TrackConfig) -> Self {
        Track::new(config.distance, config.min_stride, config.max_stride)
    }
}
