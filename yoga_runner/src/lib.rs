use std::{fs, path::Path};

use anyhow::Context;
use yoga_schema::{ClassifierWeights, Recording};

pub fn load_recording_json_from_path(path: impl AsRef<Path>) -> anyhow::Result<Recording> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("failed to read recording: {}", path.display()))?;
    let recording: Recording = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse recording json: {}", path.display()))?;
    Ok(recording)
}

pub fn load_recording_json_from_str(json: &str) -> anyhow::Result<Recording> {
    let recording: Recording = serde_json::from_str(json).context("failed to parse recording json")?;
    Ok(recording)
}

pub fn load_classifier_json_from_path(path: impl AsRef<Path>) -> anyhow::Result<ClassifierWeights> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("failed to read classifier: {}", path.display()))?;
    let weights: ClassifierWeights = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse classifier json: {}", path.display()))?;
    Ok(weights)
}
