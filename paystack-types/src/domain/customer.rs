//! Customer and user records.

use serde_json::{Map, Value, json};

use super::subscription::Subscription;
use crate::error::MappingError;
use crate::record::{RawRecord, Record, into_map};

/// Caller-supplied details used to register a customer on the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    email: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
}

impl User {
    /// Builds a user directly from validated values.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

impl Record for User {
    const KIND: &'static str = "User";

    fn create(raw: &Value) -> Result<Self, MappingError> {
        let raw = RawRecord::parse(Self::KIND, raw)?;
        raw.require(&["email", "first_name", "last_name"])?;

        Ok(Self {
            email: raw.text("email"),
            first_name: raw.text("first_name"),
            last_name: raw.text("last_name"),
            phone: raw.opt_text("phone_number"),
        })
    }

    fn to_mapping(&self) -> Map<String, Value> {
        into_map(json!({
            "email": self.email,
            "first_name": self.first_name,
            "last_name": self.last_name,
            "phone": self.phone,
        }))
    }
}

/// A customer as known to the gateway, with their subscriptions.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    id: String,
    email: String,
    code: String,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: String,
    subscriptions: Vec<Subscription>,
}

impl Customer {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// True when any subscription is active, non-renewing, attention or pending.
    pub fn is_subscribed(&self) -> bool {
        self.subscriptions
            .iter()
            .any(|subscription| subscription.status().is_subscribed())
    }
}

impl Record for Customer {
    const KIND: &'static str = "Customer";

    fn create(raw: &Value) -> Result<Self, MappingError> {
        let raw = RawRecord::parse(Self::KIND, raw)?;
        raw.require(&["id", "email", "customer_code", "createdAt"])?;

        let subscriptions = raw.records::<Subscription>("subscriptions")?;

        Ok(Self {
            id: raw.text("id"),
            email: raw.text("email"),
            code: raw.text("customer_code"),
            first_name: raw.opt_text("first_name"),
            last_name: raw.opt_text("last_name"),
            created_at: raw.text("createdAt"),
            subscriptions,
        })
    }

    fn to_mapping(&self) -> Map<String, Value> {
        let subscriptions: Vec<Value> = self
            .subscriptions
            .iter()
            .map(|subscription| Value::Object(subscription.to_mapping()))
            .collect();

        into_map(json!({
            "id": self.id,
            "email": self.email,
            "code": self.code,
            "first_name": self.first_name,
            "last_name": self.last_name,
            "created_at": self.created_at,
            "subscriptions": subscriptions,
        }))
    }
}
