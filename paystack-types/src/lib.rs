//! # Paystack Types
//!
//! Typed records and port traits for the Paystack gateway client.
//! This crate has ZERO IO dependencies - only record factories,
//! currency conversion, error types and trait definitions.
//!
//! ## Layout
//!
//! - `record` - The record factory contract and raw payload schema
//! - `domain/` - Gateway records (Customer, Subscription, Transfer, ...)
//! - `ports/` - The HTTP transport trait adapters implement
//! - `error` - Mapping, gateway and service error types

pub mod domain;
pub mod error;
pub mod ports;
pub mod record;

// Re-export commonly used types
pub use domain::{
    Bank, ChargeSuccessEvent, Currency, Customer, Invoice, MinorUnits, Subscription,
    SubscriptionStatus, TransactionInitPayload, TransactionInitialization,
    TransactionVerification, Transfer, TransferRecipient, User, WebhookEvent, WebhookEventKind,
};
pub use error::{AmountError, GatewayError, MappingError, PaystackError};
pub use ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use record::Record;
