use glam::Vec2;
use yoga_schema::{BodyPart, Keypoint, Pose};

use crate::geometry::{joint_angle, within};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Skeleton,
    /// Limb angle inside its accepted range.
    Good,
    Bad,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayCommand {
    Dot { at: Vec2, radius: f32 },
    Segment { from: Vec2, to: Vec2, stroke: Stroke },
    Label { at: Vec2, text: String },
}

/// A joint angle checked against an accepted range, measured at `vertex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimbCheck {
    pub name: &'static str,
    pub a: BodyPart,
    pub vertex: BodyPart,
    pub c: BodyPart,
    pub min_deg: i32,
    pub max_deg: i32,
}

pub const LIMB_CHECKS: [LimbCheck; 4] = [
    LimbCheck {
        name: "Left Leg",
        a: BodyPart::RightHip,
        vertex: BodyPart::LeftHip,
        c: BodyPart::LeftKnee,
        min_deg: 120,
        max_deg: 150,
    },
    LimbCheck {
        name: "Right Leg",
        a: BodyPart::LeftHip,
        vertex: BodyPart::RightHip,
        c: BodyPart::RightKnee,
        min_deg: 120,
        max_deg: 150,
    },
    LimbCheck {
        name: "Left Arm",
        a: BodyPart::LeftHip,
        vertex: BodyPart::LeftShoulder,
        c: BodyPart::LeftWrist,
        min_deg: 110,
        max_deg: 130,
    },
    LimbCheck {
        name: "Right Arm",
        a: BodyPart::RightHip,
        vertex: BodyPart::RightShoulder,
        c: BodyPart::RightWrist,
        min_deg: 110,
        max_deg: 130,
    },
];

/// PoseNet's adjacent keypoint pairs.
pub const SKELETON: [(BodyPart, BodyPart); 12] = [
    (BodyPart::LeftHip, BodyPart::LeftShoulder),
    (BodyPart::LeftElbow, BodyPart::LeftShoulder),
    (BodyPart::LeftElbow, BodyPart::LeftWrist),
    (BodyPart::LeftHip, BodyPart::LeftKnee),
    (BodyPart::LeftKnee, BodyPart::LeftAnkle),
    (BodyPart::RightHip, BodyPart::RightShoulder),
    (BodyPart::RightElbow, BodyPart::RightShoulder),
    (BodyPart::RightElbow, BodyPart::RightWrist),
    (BodyPart::RightHip, BodyPart::RightKnee),
    (BodyPart::RightKnee, BodyPart::RightAnkle),
    (BodyPart::LeftShoulder, BodyPart::RightShoulder),
    (BodyPart::LeftHip, BodyPart::RightHip),
];

const DOT_RADIUS: f32 = 3.0;
const LABEL_OFFSET: Vec2 = Vec2::new(10.0, -10.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbReading {
    pub check: LimbCheck,
    pub a: Vec2,
    pub vertex: Vec2,
    pub c: Vec2,
    /// `None` when a limb segment has zero length.
    pub angle: Option<i32>,
}

impl LimbReading {
    pub fn in_range(&self) -> bool {
        within(self.angle, self.check.min_deg, self.check.max_deg)
    }

    pub fn label(&self) -> Option<String> {
        self.angle.map(|a| format!("{} Angle: {a}°", self.check.name))
    }
}

fn position(k: &Keypoint) -> Vec2 {
    Vec2::new(k.x, k.y)
}

/// Angle readings for every limb whose three keypoints are present.
pub fn limb_readings(pose: &Pose) -> Vec<LimbReading> {
    LIMB_CHECKS
        .iter()
        .filter_map(|check| {
            let a = position(pose.get(check.a)?);
            let vertex = position(pose.get(check.vertex)?);
            let c = position(pose.get(check.c)?);
            Some(LimbReading {
                check: *check,
                a,
                vertex,
                c,
                angle: joint_angle(a, vertex, c),
            })
        })
        .collect()
}

/// Drawing commands for one frame, in frame pixel coordinates.
///
/// Keypoints and skeleton edges below `min_score` are left out. Limbs whose
/// angle is unavailable draw neither their lines nor their label.
pub fn build_overlay(pose: &Pose, min_score: f32) -> Vec<OverlayCommand> {
    let mut commands = Vec::new();

    for keypoint in pose.keypoints.iter().filter(|k| k.score >= min_score) {
        commands.push(OverlayCommand::Dot {
            at: position(keypoint),
            radius: DOT_RADIUS,
        });
    }

    for (from, to) in SKELETON {
        let (Some(from), Some(to)) = (pose.get(from), pose.get(to)) else {
            continue;
        };
        if from.score < min_score || to.score < min_score {
            continue;
        }
        commands.push(OverlayCommand::Segment {
            from: position(from),
            to: position(to),
            stroke: Stroke::Skeleton,
        });
    }

    for reading in limb_readings(pose) {
        let Some(text) = reading.label() else {
            continue;
        };
        let stroke = if reading.in_range() { Stroke::Good } else { Stroke::Bad };
        commands.push(OverlayCommand::Segment {
            from: reading.a,
            to: reading.vertex,
            stroke,
        });
        commands.push(OverlayCommand::Segment {
            from: reading.vertex,
            to: reading.c,
            stroke,
        });
        commands.push(OverlayCommand::Label {
            at: reading.vertex + LABEL_OFFSET,
            text,
        });
    }

    commands
}
