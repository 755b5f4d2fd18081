//! Port traits (interfaces for adapters).
//!
//! The orchestration service depends on these traits, not on a concrete HTTP client.

mod transport;

pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
