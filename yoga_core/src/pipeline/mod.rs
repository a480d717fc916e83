pub mod classifier;
pub mod queue;
pub mod scripted;

use tracing::debug;
use yoga_schema::Pose;

use crate::error::PipelineError;

/// One judged frame: the estimated keypoints and the class the classifier
/// picked for them.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub pose: Pose,
    pub predicted: usize,
}

pub trait PoseEstimator {
    fn is_ready(&self) -> bool;

    /// Estimates the pose in the current camera frame.
    fn estimate(&mut self) -> Result<Pose, PipelineError>;
}

pub trait PoseClassifier {
    fn is_ready(&self) -> bool;

    /// Returns the index of the most likely pose class for `input`.
    fn classify(&mut self, input: &[f32]) -> Result<usize, PipelineError>;
}

/// Everything the sampler needs: readiness plus frame → prediction.
pub trait PosePipeline {
    fn is_ready(&self) -> bool;

    fn sample(&mut self) -> Result<Sample, PipelineError>;
}

pub struct ModelPipeline<E, C> {
    estimator: E,
    classifier: C,
    scale: f32,
}

impl<E: PoseEstimator, C: PoseClassifier> ModelPipeline<E, C> {
    pub fn new(estimator: E, classifier: C, scale: f32) -> Self {
        Self {
            estimator,
            classifier,
            scale,
        }
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    pub fn estimator_mut(&mut self) -> &mut E {
        &mut self.estimator
    }
}

impl<E: PoseEstimator, C: PoseClassifier> PosePipeline for ModelPipeline<E, C> {
    fn is_ready(&self) -> bool {
        self.estimator.is_ready() && self.classifier.is_ready()
    }

    fn sample(&mut self) -> Result<Sample, PipelineError> {
        if !self.is_ready() {
            return Err(PipelineError::NotReady);
        }
        let pose = self.estimator.estimate()?;
        if pose.is_empty() {
            return Err(PipelineError::FrameUnavailable);
        }
        let features = feature_vector(&pose, self.scale);
        let predicted = self.classifier.classify(&features)?;
        debug!(predicted, keypoints = pose.keypoints.len(), "classified frame");
        Ok(Sample { pose, predicted })
    }
}

/// Flattens keypoints into `[x0, y0, x1, y1, ...]`, each divided by `scale`.
pub fn feature_vector(pose: &Pose, scale: f32) -> Vec<f32> {
    let mut features = Vec::with_capacity(pose.keypoints.len() * 2);
    for keypoint in &pose.keypoints {
        features.push(keypoint.x / scale);
        features.push(keypoint.y / scale);
    }
    features
}
