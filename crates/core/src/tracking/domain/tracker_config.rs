use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    DEFAULT_MAX_CENTROID_DISTANCE, DEFAULT_MAX_MISSED_FRAMES, DEFAULT_MIN_IOU,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max distance must be finite and positive, got {0}")]
    InvalidMaxDistance(f64),
    #[error("minimum IoU must lie strictly between 0 and 1, got {0}")]
    InvalidMinIou(f64),
    #[error("smoothing alpha must lie in (0, 1], got {0}")]
    InvalidSmoothing(f64),
    #[error("failed to read tracker config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid tracker config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Association rule used by the tracker, with its threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MatchStrategyConfig {
    Centroid { max_distance: f64 },
    Iou { min_iou: f64 },
}

impl MatchStrategyConfig {
    pub fn centroid() -> Self {
        Self::Centroid {
            max_distance: DEFAULT_MAX_CENTROID_DISTANCE,
        }
    }

    pub fn iou() -> Self {
        Self::Iou {
            min_iou: DEFAULT_MIN_IOU,
        }
    }
}

impl Default for MatchStrategyConfig {
    fn default() -> Self {
        Self::centroid()
    }
}

/// Tracker tunables.
///
/// JSON form: `{"max_missed_frames": 5, "strategy": {"kind": "iou",
/// "min_iou": 0.5}, "smoothing": 0.6}`. Every field is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub max_missed_frames: u32,
    pub strategy: MatchStrategyConfig,
    /// EMA alpha; `None` stores every match as-is.
    pub smoothing: Option<f64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_missed_frames: DEFAULT_MAX_MISSED_FRAMES,
            strategy: MatchStrategyConfig::default(),
            smoothing: None,
        }
    }
}

impl TrackerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.strategy {
            MatchStrategyConfig::Centroid { max_distance } => {
                if !max_distance.is_finite() || max_distance <= 0.0 {
                    return Err(ConfigError::InvalidMaxDistance(max_distance));
                }
            }
            MatchStrategyConfig::Iou { min_iou } => {
                if !(min_iou > 0.0 && min_iou < 1.0) {
                    return Err(ConfigError::InvalidMinIou(min_iou));
                }
            }
        }
        if let Some(alpha) = self.smoothing {
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(ConfigError::InvalidSmoothing(alpha));
            }
        }
        Ok(())
    }
}
