use std::time::Duration;

use yoga_data::model::PoseClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start/stop button.
    Toggle,
    SelectPose(PoseClass),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlEvent {
    /// Session clock time when the command was issued
    pub timestamp: Duration,
    pub command: Command,
}
