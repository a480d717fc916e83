pub mod context;
pub mod state;

pub use context::{SampleOutcome, SampleTicket, SessionContext, ToggleOutcome, UpdateReport};
pub use state::{Effect, SessionEvent, SessionState, Transition};
