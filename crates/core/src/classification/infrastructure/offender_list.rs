use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::classification::domain::plate_classifier::{
    is_plate_candidate, normalize_plate_text, Classification, PlateClassifier,
};
use crate::shared::constants::DEFAULT_OFFENDER_REASON;

#[derive(Debug, Error)]
pub enum OffenderListError {
    #[error("failed to read offender list {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid offender list: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct OffenderEntry {
    plate: String,
    #[serde(default)]
    reason: Option<String>,
}

/// In-memory watch list keyed by normalized plate text.
#[derive(Clone, Debug, Default)]
pub struct OffenderList {
    reasons: HashMap<String, String>,
}

impl OffenderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `[{"plate": "ABC123", "reason": "..."}]`.
    ///
    /// Entries without a reason (or with a blank one) get
    /// `DEFAULT_OFFENDER_REASON`.
    pub fn from_json(json: &str) -> Result<Self, OffenderListError> {
        let entries: Vec<OffenderEntry> = serde_json::from_str(json)?;
        let mut list = Self::new();
        for entry in entries {
            let reason = entry
                .reason
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_OFFENDER_REASON.to_string());
            list.insert(&entry.plate, reason);
        }
        Ok(list)
    }

    pub fn load(path: &Path) -> Result<Self, OffenderListError> {
        let json = std::fs::read_to_string(path).map_err(|source| OffenderListError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_json(&json)?;
        log::info!("Loaded {} listed plates from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn insert(&mut self, plate: &str, reason: impl Into<String>) {
        self.reasons.insert(normalize_plate_text(plate), reason.into());
    }

    pub fn reason_for(&self, plate: &str) -> Option<&str> {
        self.reasons
            .get(&normalize_plate_text(plate))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }
}

impl PlateClassifier for OffenderList {
    fn classify(&self, raw_text: &str) -> Option<Classification> {
        let plate = normalize_plate_text(raw_text);
        if !is_plate_candidate(&plate) {
            return None;
        }
        let reason = self.reasons.get(&plate).cloned();
        Some(Classification {
            is_offender: reason.is_some(),
            plate,
            reason,
        })
    }
}
