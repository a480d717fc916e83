use yoga_schema::{Pose, Recording};

use super::PoseEstimator;
use crate::error::PipelineError;

/// Replays the frames of a [`Recording`] in a loop, one per call.
#[derive(Debug, Clone)]
pub struct ScriptedEstimator {
    recording: Recording,
    cursor: usize,
    ready: bool,
}

impl ScriptedEstimator {
    pub fn new(recording: Recording) -> Self {
        Self {
            recording,
            cursor: 0,
            ready: true,
        }
    }

    /// Simulates a model that failed (or has yet) to load.
    pub fn with_ready(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn frames_served(&self) -> usize {
        self.cursor
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }
}

impl PoseEstimator for ScriptedEstimator {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn estimate(&mut self) -> Result<Pose, PipelineError> {
        if !self.ready {
            return Err(PipelineError::NotReady);
        }
        let frames = &self.recording.frames;
        if frames.is_empty() {
            return Err(PipelineError::FrameUnavailable);
        }

        let frame = &frames[self.cursor % frames.len()];
        self.cursor += 1;
        if frame.keypoints.is_empty() {
            return Err(PipelineError::FrameUnavailable);
        }
        Ok(Pose::new(1.0, frame.keypoints.clone()))
    }
}
