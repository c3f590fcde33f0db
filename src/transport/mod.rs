//! Network transports exposing the dispatcher

pub mod http;

pub use http::{build_router, GatewayState, SERVICE_NAME};
