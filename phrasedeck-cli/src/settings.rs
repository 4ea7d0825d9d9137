//! Optional JSON settings file.

use std::fs;
use std::path::Path;

use phrasedeck_core::EstimatorConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct AppSettings {
    pub estimator: EstimatorConfig,
}

impl AppSettings {
    /// Pull out-of-range values back into something the splitter accepts.
    pub fn normalize(&mut self) {
        let before = self.estimator.clone();
        let est = &mut self.estimator;
        if !est.top_db.is_finite() || est.top_db <= 0.0 {
            est.top_db = EstimatorConfig::default().top_db;
        }
        est.top_db = est.top_db.clamp(1.0, 120.0);
        est.frame_length = est.frame_length.clamp(16, 1 << 16);
        est.hop_length = est.hop_length.clamp(1, est.frame_length);
        est.min_interval_ms = est.min_interval_ms.min(10_000);
        if *est != before {
            warn!(?before, after = ?est, "settings file values adjusted");
        }
    }

    /// Apply command-line overrides on top of the file values. Overrides are
    /// not normalized; invalid ones are left for validation to reject.
    pub fn apply_overrides(&mut self, top_db: Option<f64>, min_interval_ms: Option<u32>) {
        if let Some(db) = top_db {
            self.estimator.top_db = db;
        }
        if let Some(ms) = min_interval_ms {
            self.estimator.min_interval_ms = ms;
        }
    }
}

/// Read and parse a settings file. Missing fields take their defaults.
pub fn load_settings(path: &Path) -> Result<AppSettings, String> {
    let raw = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str::<AppSettings>(&raw).map_err(|e| e.to_string())
}
