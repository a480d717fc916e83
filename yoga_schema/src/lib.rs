use serde::{Deserialize, Serialize};

/// PoseNet body parts, declared in the estimator's keypoint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyPart {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl BodyPart {
    pub const COUNT: usize = 17;

    pub const ALL: [BodyPart; Self::COUNT] = [
        BodyPart::Nose,
        BodyPart::LeftEye,
        BodyPart::RightEye,
        BodyPart::LeftEar,
        BodyPart::RightEar,
        BodyPart::LeftShoulder,
        BodyPart::RightShoulder,
        BodyPart::LeftElbow,
        BodyPart::RightElbow,
        BodyPart::LeftWrist,
        BodyPart::RightWrist,
        BodyPart::LeftHip,
        BodyPart::RightHip,
        BodyPart::LeftKnee,
        BodyPart::RightKnee,
        BodyPart::LeftAnkle,
        BodyPart::RightAnkle,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub part: BodyPart,
    /// Pixel position in the source frame.
    pub x: f32,
    pub y: f32,
    /// Detection confidence in [0, 1].
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    #[serde(default)]
    pub score: f32,
    pub keypoints: Vec<Keypoint>,
}

impl Pose {
    /// Builds a pose with keypoints sorted into PoseNet order.
    pub fn new(score: f32, mut keypoints: Vec<Keypoint>) -> Self {
        keypoints.sort_by_key(|k| k.part.index());
        Self { score, keypoints }
    }

    pub fn get(&self, part: BodyPart) -> Option<&Keypoint> {
        self.keypoints.iter().find(|k| k.part == part)
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMeta {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub time_ms: u64,
    /// Empty when the camera had no frame ready.
    #[serde(default)]
    pub keypoints: Vec<Keypoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub meta: RecordingMeta,
    pub frames: Vec<RecordedFrame>,
}

impl Recording {
    pub fn duration_ms(&self) -> u64 {
        self.frames.last().map(|f| f.time_ms).unwrap_or(0)
    }
}

/// Dense single-layer classifier: `logits = weights · input + bias`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierWeights {
    #[serde(default)]
    pub labels: Vec<String>,
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

impl ClassifierWeights {
    pub fn class_count(&self) -> usize {
        self.bias.len()
    }

    pub fn input_len(&self) -> Option<usize> {
        self.weights.first().map(|row| row.len())
    }
}
