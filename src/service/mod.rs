//! Tower Service implementations

pub mod core;
pub mod request;
pub mod response;

pub use self::core::DispatchService;
pub use request::DispatchRequest;
pub use response::DispatchResponse;
