//! Subscription and invoice records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::money::MinorUnits;
use crate::error::MappingError;
use crate::record::{RawRecord, Record, into_map};

/// Current status of a gateway subscription.
///
/// Transitions are driven by the gateway; the client only classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubscriptionStatus {
    Active,
    NonRenewing,
    Attention,
    Cancelled,
    Pending,
}

impl SubscriptionStatus {
    /// Whether this status keeps a customer subscribed.
    pub fn is_subscribed(&self) -> bool {
        !matches!(self, SubscriptionStatus::Cancelled)
    }
}

impl AsRef<str> for SubscriptionStatus {
    fn as_ref(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::NonRenewing => "non-renewing",
            Self::Attention => "attention",
            Self::Cancelled => "cancelled",
            Self::Pending => "pending",
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// A billed charge on a subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    amount: MinorUnits,
    status: String,
    reference: String,
    description: String,
    created_at: String,
}

impl Invoice {
    pub fn amount(&self) -> MinorUnits {
        self.amount
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl Record for Invoice {
    const KIND: &'static str = "Invoice";

    fn create(raw: &Value) -> Result<Self, MappingError> {
        let raw = RawRecord::parse(Self::KIND, raw)?;
        raw.require(&["amount", "status", "createdAt"])?;

        Ok(Self {
            amount: MinorUnits::new(raw.int("amount")),
            status: raw.text("status"),
            reference: raw.text("reference"),
            description: raw.text("description"),
            created_at: raw.text("createdAt"),
        })
    }

    fn to_mapping(&self) -> Map<String, Value> {
        let mapping = json!({
            "plan": "premium",
            "price": self.amount.major(),
            "status": self.status,
            "reference": self.reference,
            "description": self.description,
            "date": self.created_at,
        });
        into_map(mapping)
    }
}

/// A customer's recurring plan on the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    id: String,
    code: String,
    amount: MinorUnits,
    status: SubscriptionStatus,
    next_payment_date: String,
    created_at: String,
    email_token: Option<String>,
    invoices: Vec<Invoice>,
    most_recent_invoice: Option<Invoice>,
}

impl Subscription {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn amount(&self) -> MinorUnits {
        self.amount
    }

    pub fn status(&self) -> SubscriptionStatus {
        self.status
    }

    pub fn next_payment_date(&self) -> &str {
        &self.next_payment_date
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Token the gateway requires to enable or disable this subscription.
    pub fn email_token(&self) -> Option<&str> {
        self.email_token.as_deref()
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn most_recent_invoice(&self) -> Option<&Invoice> {
        self.most_recent_invoice.as_ref()
    }

    /// Sum of every invoice amount in major units.
    ///
    /// Each invoice is truncated before summing.
    pub fn total_billing(&self) -> i64 {
        self.invoices.iter().map(|invoice| invoice.amount().major()).sum()
    }
}

impl Record for Subscription {
    const KIND: &'static str = "Subscription";

    fn create(raw: &Value) -> Result<Self, MappingError> {
        let raw = RawRecord::parse(Self::KIND, raw)?;
        raw.require(&["subscription_code", "status", "next_payment_date", "invoices"])?;

        let invoices = raw.records::<Invoice>("invoices")?;
        let most_recent_invoice = raw.opt_record::<Invoice>("most_recent_invoice")?;
        let status = serde_json::from_value::<SubscriptionStatus>(raw.value("status"))
            .map_err(|_| raw.error())?;

        Ok(Self {
            id: raw.text("id"),
            code: raw.text("subscription_code"),
            amount: MinorUnits::new(raw.int("amount")),
            status,
            next_payment_date: raw.text("next_payment_date"),
            created_at: raw.text("createdAt"),
            email_token: raw.opt_text("email_token"),
            invoices,
            most_recent_invoice,
        })
    }

    fn to_mapping(&self) -> Map<String, Value> {
        let plans: Vec<Value> = self
            .invoices
            .iter()
            .map(|invoice| Value::Object(invoice.to_mapping()))
            .collect();

        let mapping = json!({
            "id": self.id,
            "code": self.code,
            "amount": self.amount.major(),
            "status": self.status.as_ref(),
            "next_payment_date": self.next_payment_date,
            "created_at": self.created_at,
            "plans": plans,
        });
        into_map(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(amount: i64) -> Value {
        json!({"amount": amount, "status": "success", "createdAt": "2024-06-01"})
    }

    fn subscription(status: &str) -> Value {
        json!({
            "subscription_code": "SUB_abc",
            "status": status,
            "next_payment_date": "2024-07-01",
            "invoices": [],
        })
    }

    #[test]
    fn test_invoice_defaults() {
        let invoice = Invoice::create(&invoice(250000)).unwrap();

        assert_eq!(invoice.amount().major(), 2500);
        assert_eq!(invoice.reference(), "");
        assert_eq!(invoice.description(), "");
    }

    #[test]
    fn test_invoice_missing_mandatory_field() {
        for key in ["amount", "status", "createdAt"] {
            let mut raw = invoice(100);
            raw.as_object_mut().unwrap().remove(key);
            let err = Invoice::create(&raw).unwrap_err();
            assert_eq!(err.kind(), "Invoice", "missing {key}");
        }
    }

    #[test]
    fn test_invoice_projection() {
        let raw = json!({
            "amount": 1050,
            "status": "success",
            "reference": "ref_1",
            "description": "June",
            "createdAt": "2024-06-01",
        });
        let mapping = Invoice::create(&raw).unwrap().to_mapping();

        assert_eq!(
            Value::Object(mapping),
            json!({
                "plan": "premium",
                "price": 10,
                "status": "success",
                "reference": "ref_1",
                "description": "June",
                "date": "2024-06-01",
            })
        );
    }

    #[test]
    fn test_subscription_optional_defaults() {
        let sub = Subscription::create(&subscription("active")).unwrap();

        assert_eq!(sub.id(), "");
        assert_eq!(sub.amount().minor(), 0);
        assert_eq!(sub.created_at(), "");
        assert_eq!(sub.email_token(), None);
        assert!(sub.invoices().is_empty());
        assert!(sub.most_recent_invoice().is_none());
    }

    #[test]
    fn test_subscription_missing_mandatory_field() {
        for key in ["subscription_code", "status", "next_payment_date", "invoices"] {
            let mut raw = subscription("active");
            raw.as_object_mut().unwrap().remove(key);
            assert!(Subscription::create(&raw).is_err(), "missing {key}");
        }
    }

    #[test]
    fn test_subscription_unknown_status_fails() {
        let err = Subscription::create(&subscription("paused")).unwrap_err();
        assert_eq!(err.kind(), "Subscription");
    }

    #[test]
    fn test_subscription_nested_invoice_failure_propagates() {
        let mut raw = subscription("active");
        raw["invoices"] = json!([{"amount": 100}]);

        let err = Subscription::create(&raw).unwrap_err();
        assert_eq!(err.kind(), "Invoice");
    }

    #[test]
    fn test_total_billing_truncates_each_invoice() {
        let mut raw = subscription("active");
        raw["invoices"] = json!([invoice(1050), invoice(1050), invoice(200000)]);
        raw["most_recent_invoice"] = invoice(200000);
        raw["email_token"] = json!("tok_123");

        let sub = Subscription::create(&raw).unwrap();

        assert_eq!(sub.total_billing(), 2020);
        assert_eq!(sub.email_token(), Some("tok_123"));
        assert_eq!(sub.most_recent_invoice().unwrap().amount().major(), 2000);
    }

    #[test]
    fn test_subscription_projection() {
        let mut raw = subscription("non-renewing");
        raw["id"] = json!(9);
        raw["amount"] = json!(500000);
        raw["createdAt"] = json!("2024-06-01");
        raw["invoices"] = json!([invoice(500000)]);

        let mapping = Subscription::create(&raw).unwrap().to_mapping();

        assert_eq!(mapping["id"], json!("9"));
        assert_eq!(mapping["code"], json!("SUB_abc"));
        assert_eq!(mapping["amount"], json!(5000));
        assert_eq!(mapping["status"], json!("non-renewing"));
        assert_eq!(mapping["created_at"], json!("2024-06-01"));
        assert_eq!(mapping["plans"][0]["price"], json!(5000));
        assert!(!mapping.contains_key("email_token"));
    }
}
