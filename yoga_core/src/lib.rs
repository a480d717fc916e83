pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod overlay;
pub mod pipeline;
pub mod queue;
pub mod session;
pub mod storage;
pub mod time;
