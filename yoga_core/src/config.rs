use std::{fs, path::Path, path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub overlay: OverlayConfig,
    pub storage: StorageConfig,
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Countdown before the camera starts judging.
    pub pre_roll_ticks: u32,
    pub pre_roll_period_ms: u64,
    /// Length of the judged window.
    pub hold_ticks: u32,
    pub hold_period_ms: u64,
    pub sample_period_ms: u64,
    /// Divisor applied to pixel coordinates before classification.
    pub normalization_scale: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pre_roll_ticks: 10,
            pre_roll_period_ms: 1000,
            hold_ticks: 100,
            hold_period_ms: 1000,
            sample_period_ms: 100,
            normalization_scale: 400.0,
        }
    }
}

impl SessionConfig {
    /// Rejects periods a timer could never fire on.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.pre_roll_period_ms > 0, "session.pre_roll_period_ms must be positive");
        ensure!(self.hold_period_ms > 0, "session.hold_period_ms must be positive");
        ensure!(self.sample_period_ms > 0, "session.sample_period_ms must be positive");
        ensure!(
            self.normalization_scale.is_finite() && self.normalization_scale > 0.0,
            "session.normalization_scale must be a positive number"
        );
        Ok(())
    }

    // Never below 1 ms.
    pub fn pre_roll_period(&self) -> Duration {
        Duration::from_millis(self.pre_roll_period_ms.max(1))
    }

    pub fn hold_period(&self) -> Duration {
        Duration::from_millis(self.hold_period_ms.max(1))
    }

    pub fn sample_period(&self) -> Duration {
        Duration::from_millis(self.sample_period_ms.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Keypoints below this confidence are not drawn.
    pub min_keypoint_score: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { min_keypoint_score: 0.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: PathBuf,
    pub best_scores_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".yoga"),
            best_scores_key: "bestScores".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub recording: PathBuf,
    pub classifier: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            recording: PathBuf::from("assets/recording.json"),
            classifier: PathBuf::from("assets/classifier.json"),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("failed to parse config: {}", path.display()))?;
        config
            .session
            .validate()
            .with_context(|| format!("invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Falls back to defaults when `path` does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
