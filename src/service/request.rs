//! Dispatch request type

use bytes::Bytes;

/// One inbound JSON-RPC call addressed to an agent
///
/// The body is kept raw so that JSON parse failures are reported by the
/// dispatcher as protocol errors rather than rejected by the transport.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    /// Agent id taken from the first path segment
    pub agent_id: String,

    /// Raw request body
    pub body: Bytes,
}

impl DispatchRequest {
    pub fn new(agent_id: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            agent_id: agent_id.into(),
            body: body.into(),
        }
    }
}
