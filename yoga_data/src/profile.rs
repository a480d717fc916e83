use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{PoseClass, POSE_COUNT};
use crate::result::{write_counts, ScoreVector};

/// Highest score ever reached per pose. Slots never decrease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestScores([u32; POSE_COUNT]);

impl BestScores {
    pub fn new(counts: [u32; POSE_COUNT]) -> Self {
        Self(counts)
    }

    pub fn get(&self, pose: PoseClass) -> u32 {
        self.0[pose.index()]
    }

    /// Raises each slot to `max(best, score)`. Returns true if any slot grew.
    pub fn merge(&mut self, scores: &ScoreVector) -> bool {
        let mut improved = false;
        for (best, &score) in self.0.iter_mut().zip(scores.as_array()) {
            if score > *best {
                *best = score;
                improved = true;
            }
        }
        improved
    }

    pub fn as_array(&self) -> &[u32; POSE_COUNT] {
        &self.0
    }
}

impl fmt::Display for BestScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_counts(f, &self.0)
    }
}
