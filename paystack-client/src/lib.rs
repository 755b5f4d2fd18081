//! # Paystack Client
//!
//! Orchestration service for the Paystack gateway.
//!
//! ## Architecture
//!
//! - `service` - One operation per gateway capability, generic over the transport
//! - `transport` - reqwest adapter for the `HttpTransport` port
//! - `security` - Webhook signature computation and verification
//! - `config` - Explicit service configuration
//!
//! The service is generic over `T: HttpTransport`, allowing a different
//! transport (or an in-memory one in tests) to be injected.

pub mod config;
pub mod security;
pub mod service;
pub mod transport;


pub use config::PaystackConfig;
pub use service::PaystackService;
pub use transport::ReqwestTransport;
