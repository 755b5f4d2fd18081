use serde_json::Value;

use super::transaction::ChargeSuccessEvent;
use crate::error::MappingError;
use crate::record::{RawRecord, Record};

/// Event names the gateway sends to a webhook endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookEventKind {
    SubscriptionCreate,
    SubscriptionNotRenew,
    SubscriptionDisable,
    SubscriptionExpiringCards,
    ChargeSuccess,
    InvoiceCreate,
    InvoiceUpdate,
    InvoicePaymentFailed,
    TransferSuccess,
    TransferFailed,
    TransferReversed,
}

impl WebhookEventKind {
    pub const ALL: [WebhookEventKind; 11] = [
        Self::SubscriptionCreate,
        Self::SubscriptionNotRenew,
        Self::SubscriptionDisable,
        Self::SubscriptionExpiringCards,
        Self::ChargeSuccess,
        Self::InvoiceCreate,
        Self::InvoiceUpdate,
        Self::InvoicePaymentFailed,
        Self::TransferSuccess,
        Self::TransferFailed,
        Self::TransferReversed,
    ];
}

impl AsRef<str> for WebhookEventKind {
    fn as_ref(&self) -> &str {
        match self {
            Self::SubscriptionCreate => "subscription.create",
            Self::SubscriptionNotRenew => "subscription.not_renew",
            Self::SubscriptionDisable => "subscription.disable",
            Self::SubscriptionExpiringCards => "subscription.expiring_cards",
            Self::ChargeSuccess => "charge.success",
            Self::InvoiceCreate => "invoice.create",
            Self::InvoiceUpdate => "invoice.update",
            Self::InvoicePaymentFailed => "invoice.payment_failed",
            Self::TransferSuccess => "transfer.success",
            Self::TransferFailed => "transfer.failed",
            Self::TransferReversed => "transfer.reversed",
        }
    }
}

impl std::fmt::Display for WebhookEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl std::str::FromStr for WebhookEventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_ref() == s)
            .ok_or_else(|| format!("Unknown webhook event: {}", s))
    }
}

/// An inbound webhook body: `{"event": ..., "data": {...}}`.
///
/// Authenticity is checked separately against the raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEvent {
    event: String,
    data: Value,
}

impl WebhookEvent {
    pub const KIND: &'static str = "WebhookEvent";

    /// Parses a raw webhook body.
    pub fn from_payload(payload: &[u8]) -> Result<Self, MappingError> {
        let raw: Value =
            serde_json::from_slice(payload).map_err(|_| MappingError::new(Self::KIND))?;
        let record = RawRecord::parse(Self::KIND, &raw)?;
        record.require(&["event", "data"])?;

        Ok(Self {
            event: record.text("event"),
            data: record.value("data"),
        })
    }

    /// Event name exactly as sent.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Known event kind, `None` for names this client does not model.
    pub fn kind(&self) -> Option<WebhookEventKind> {
        self.event.parse().ok()
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Builds the `charge.success` payload; `Ok(None)` for any other event.
    pub fn charge_success(&self) -> Result<Option<ChargeSuccessEvent>, MappingError> {
        match self.kind() {
            Some(WebhookEventKind::ChargeSuccess) => {
                ChargeSuccessEvent::create(&self.data).map(Some)
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_kind_round_trip_names() {
        for kind in WebhookEventKind::ALL {
            assert_eq!(kind.to_string().parse::<WebhookEventKind>().unwrap(), kind);
        }
        assert!("charge.pending".parse::<WebhookEventKind>().is_err());
    }

    #[test]
    fn test_unknown_event_is_kept_verbatim() {
        let event =
            WebhookEvent::from_payload(br#"{"event":"paymentrequest.pending","data":{}}"#).unwrap();

        assert_eq!(event.event(), "paymentrequest.pending");
        assert_eq!(event.kind(), None);
        assert_eq!(event.charge_success().unwrap(), None);
    }

    #[test]
    fn test_malformed_payload() {
        assert!(WebhookEvent::from_payload(b"not json").is_err());
        assert!(WebhookEvent::from_payload(br#"{"event":"charge.success"}"#).is_err());
    }

    #[test]
    fn test_charge_success_event() {
        let body = json!({
            "event": "charge.success",
            "data": {
                "id": 302961,
                "domain": "live",
                "status": "success",
                "reference": "qTPrJoy9Bx",
                "amount": 10000,
                "gateway_response": "Approved",
                "paid_at": "2016-09-30T21:10:19.000Z",
                "created_at": "2016-09-30T21:09:56.000Z",
                "channel": "card",
                "currency": "NGN",
                "authorization": {},
                "customer": {
                    "id": 68324,
                    "email": "ada@example.com",
                    "customer_code": "CUS_qo38as2hpsgk2r0",
                    "createdAt": "2016-09-30",
                },
                "plan": {},
                "subaccount": {},
                "split": {},
                "source": {},
            }
        });
        let event = WebhookEvent::from_payload(body.to_string().as_bytes()).unwrap();

        assert_eq!(event.kind(), Some(WebhookEventKind::ChargeSuccess));
        let charge = event.charge_success().unwrap().unwrap();
        assert_eq!(charge.reference(), "qTPrJoy9Bx");
    }

    #[test]
    fn test_charge_success_with_bad_data_fails() {
        let event =
            WebhookEvent::from_payload(br#"{"event":"charge.success","data":{"id":1}}"#).unwrap();
        assert!(event.charge_success().is_err());
    }
}
