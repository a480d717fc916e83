use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{PoseClass, POSE_COUNT};
use crate::profile::BestScores;

/// Correct-frame counts accumulated during the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreVector([u32; POSE_COUNT]);

impl ScoreVector {
    pub fn new(counts: [u32; POSE_COUNT]) -> Self {
        Self(counts)
    }

    pub fn get(&self, pose: PoseClass) -> u32 {
        self.0[pose.index()]
    }

    /// Returns the new count for `pose`.
    pub fn increment(&mut self, pose: PoseClass) -> u32 {
        let slot = &mut self.0[pose.index()];
        *slot = slot.saturating_add(1);
        *slot
    }

    pub fn reset(&mut self) {
        self.0 = [0; POSE_COUNT];
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    pub fn as_array(&self) -> &[u32; POSE_COUNT] {
        &self.0
    }
}

impl fmt::Display for ScoreVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_counts(f, &self.0)
    }
}

pub(crate) fn write_counts(f: &mut fmt::Formatter<'_>, counts: &[u32]) -> fmt::Result {
    write!(f, "[")?;
    for (i, c) in counts.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{c}")?;
    }
    write!(f, "]")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The hold window ran out.
    Expired,
    /// The user stopped the session.
    Stopped,
    /// The owning context was torn down mid-session.
    TornDown,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EndReason::Expired => "expired",
            EndReason::Stopped => "stopped",
            EndReason::TornDown => "torn_down",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub pose: PoseClass,
    pub reason: EndReason,
    pub scores: ScoreVector,
    pub best_before: BestScores,
    pub best_after: BestScores,
}

impl SessionSummary {
    pub fn improved(&self) -> bool {
        self.best_after != self.best_before
    }
}
