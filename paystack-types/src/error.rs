//! Error types for the Paystack client.

use rust_decimal::Decimal;

use crate::ports::TransportError;

/// A raw payload is missing a mandatory field for its target record.
///
/// Never retried; the first failing record (outer or nested) wins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid cast to {kind}")]
pub struct MappingError {
    kind: &'static str,
}

impl MappingError {
    pub fn new(kind: &'static str) -> Self {
        Self { kind }
    }

    /// Name of the record that failed to build.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

/// The gateway answered with a non-success, non-404 status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Gateway error: {status} - {reason}")]
pub struct GatewayError {
    /// HTTP status code
    pub status: u16,
    /// The gateway's own reason string
    pub reason: String,
    /// Raw response body
    pub body: String,
}

/// A major-unit amount that has no exact minor-unit value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount {0} has a fraction smaller than one minor unit")]
    SubMinor(Decimal),

    #[error("Amount {0} is out of range")]
    OutOfRange(Decimal),
}

/// Service-level errors surfaced to callers.
#[derive(Debug, thiserror::Error)]
pub enum PaystackError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error("Subscription not found: {0}")]
    SubscriptionNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PaystackError {
    /// HTTP status carried by a gateway failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            PaystackError::Gateway(err) => Some(err.status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_error_message() {
        let err = MappingError::new("Customer");
        assert_eq!(err.kind(), "Customer");
        assert_eq!(err.to_string(), "Invalid cast to Customer");
    }

    #[test]
    fn test_gateway_status_is_preserved() {
        let err: PaystackError = GatewayError {
            status: 500,
            reason: "Internal Server Error".into(),
            body: "{}".into(),
        }
        .into();

        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Gateway error: 500 - Internal Server Error");
    }
}
