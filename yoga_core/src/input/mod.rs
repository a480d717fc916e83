pub mod events;

use self::events::ControlEvent;
use crate::queue::EventQueue;

/// UI commands waiting for the session owner.
pub type ControlQueue = EventQueue<ControlEvent>;
