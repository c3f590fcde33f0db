//! Serialization codecs for the A2A JSON-RPC binding

pub mod ids;
pub mod jsonrpc;

pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use jsonrpc::{extract_user_message, JsonRpcCodec, JsonRpcError, JsonRpcResponse};
