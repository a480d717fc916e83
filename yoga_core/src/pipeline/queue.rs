use super::Sample;
use crate::error::PipelineError;
use crate::queue::EventQueue;
use crate::session::SampleTicket;

/// A pipeline request that finished, possibly after its session ended.
#[derive(Debug, Clone)]
pub struct Completion {
    pub ticket: SampleTicket,
    pub result: Result<Sample, PipelineError>,
}

/// Carries completions from an asynchronous pipeline back to the session owner.
pub type CompletionQueue = EventQueue<Completion>;
