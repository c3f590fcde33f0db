//! Tower Layer implementations for the dispatch service

pub mod trace;

pub use trace::{DispatchTraceLayer, DispatchTraceService};
