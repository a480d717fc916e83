use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of poses the classifier distinguishes.
pub const POSE_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PoseClass(usize);

impl PoseClass {
    pub const ALL: [PoseClass; POSE_COUNT] = [PoseClass(0), PoseClass(1), PoseClass(2)];

    pub fn new(index: usize) -> Option<Self> {
        (index < POSE_COUNT).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl Default for PoseClass {
    fn default() -> Self {
        Self(0)
    }
}

impl TryFrom<usize> for PoseClass {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("pose index {value} out of range (0..{POSE_COUNT})"))
    }
}

impl From<PoseClass> for usize {
    fn from(pose: PoseClass) -> Self {
        pose.0
    }
}

impl fmt::Display for PoseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
