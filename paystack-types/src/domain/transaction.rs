//! Transaction records: initialization input/output, verification and the
//! `charge.success` webhook payload.

use serde_json::{Map, Value, json};

use super::customer::Customer;
use super::money::MinorUnits;
use crate::error::MappingError;
use crate::record::{RawRecord, Record, into_map};

/// Input to a transaction initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInitPayload {
    email: String,
    /// Minor units, kept as text the way the gateway accepts it.
    amount: String,
    metadata: Value,
    reference: Option<String>,
}

impl TransactionInitPayload {
    /// Builds a payload with empty metadata and no reference.
    pub fn new(email: impl Into<String>, amount: MinorUnits) -> Self {
        Self {
            email: email.into(),
            amount: amount.minor().to_string(),
            metadata: Value::Array(Vec::new()),
            reference: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn metadata(&self) -> &Value {
        &self.metadata
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

impl Record for TransactionInitPayload {
    const KIND: &'static str = "TransactionInitPayload";

    fn create(raw: &Value) -> Result<Self, MappingError> {
        let raw = RawRecord::parse(Self::KIND, raw)?;
        raw.require(&["email", "amount"])?;

        Ok(Self {
            email: raw.text("email"),
            amount: raw.text("amount"),
            metadata: raw
                .opt_value("metadata")
                .unwrap_or_else(|| Value::Array(Vec::new())),
            reference: raw.opt_text("reference"),
        })
    }

    fn to_mapping(&self) -> Map<String, Value> {
        into_map(json!({
            "email": self.email,
            "amount": self.amount,
            "metadata": self.metadata,
            "reference": self.reference,
        }))
    }
}

/// Checkout handle returned by a transaction initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInitialization {
    authorization_url: String,
    access_code: String,
    reference: String,
}

impl TransactionInitialization {
    pub fn authorization_url(&self) -> &str {
        &self.authorization_url
    }

    pub fn access_code(&self) -> &str {
        &self.access_code
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }
}

impl Record for TransactionInitialization {
    const KIND: &'static str = "TransactionInitialization";

    fn create(raw: &Value) -> Result<Self, MappingError> {
        let raw = RawRecord::parse(Self::KIND, raw)?;
        raw.require(&["authorization_url", "access_code", "reference"])?;

        Ok(Self {
            authorization_url: raw.text("authorization_url"),
            access_code: raw.text("access_code"),
            reference: raw.text("reference"),
        })
    }

    fn to_mapping(&self) -> Map<String, Value> {
        into_map(json!({
            "authorization_url": self.authorization_url,
            "access_code": self.access_code,
            "reference": self.reference,
        }))
    }
}

/// Outcome of verifying a transaction by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionVerification {
    id: i64,
    domain: String,
    status: String,
    reference: String,
    receipt_number: Option<String>,
    amount: MinorUnits,
    gateway_response: Option<String>,
    paid_at: Option<String>,
    created_at: Option<String>,
    channel: String,
    currency: String,
    ip_address: Option<String>,
    log: Value,
    fees: i64,
    authorization: Option<Value>,
    customer: Option<Customer>,
}

impl TransactionVerification {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn receipt_number(&self) -> Option<&str> {
        self.receipt_number.as_deref()
    }

    pub fn amount(&self) -> MinorUnits {
        self.amount
    }

    pub fn gateway_response(&self) -> Option<&str> {
        self.gateway_response.as_deref()
    }

    pub fn paid_at(&self) -> Option<&str> {
        self.paid_at.as_deref()
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }

    pub fn log(&self) -> &Value {
        &self.log
    }

    pub fn fees(&self) -> i64 {
        self.fees
    }

    pub fn authorization(&self) -> Option<&Value> {
        self.authorization.as_ref()
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }
}

impl Record for TransactionVerification {
    const KIND: &'static str = "TransactionVerification";

    fn create(raw: &Value) -> Result<Self, MappingError> {
        let raw = RawRecord::parse(Self::KIND, raw)?;
        raw.require(&[
            "id",
            "domain",
            "status",
            "reference",
            "amount",
            "channel",
            "currency",
        ])?;

        let customer = raw.truthy("customer").map(Customer::create).transpose()?;

        Ok(Self {
            id: raw.int("id"),
            domain: raw.text("domain"),
            status: raw.text("status"),
            reference: raw.text("reference"),
            receipt_number: raw.opt_text("receipt_number"),
            amount: MinorUnits::new(raw.int("amount")),
            gateway_response: raw.opt_text("gateway_response"),
            paid_at: raw.opt_text("paid_at"),
            created_at: raw.opt_text("created_at"),
            channel: raw.text("channel"),
            currency: raw.text("currency"),
            ip_address: raw.opt_text("ip_address"),
            log: raw
                .opt_value("log")
                .unwrap_or_else(|| Value::Array(Vec::new())),
            fees: raw.int("fees"),
            authorization: raw.opt_value("authorization"),
            customer,
        })
    }

    fn to_mapping(&self) -> Map<String, Value> {
        let customer = self
            .customer
            .as_ref()
            .map(|customer| Value::Object(customer.to_mapping()));

        into_map(json!({
            "id": self.id,
            "domain": self.domain,
            "status": self.status,
            "reference": self.reference,
            "receipt_number": self.receipt_number,
            "amount": self.amount.minor(),
            "gateway_response": self.gateway_response,
            "paid_at": self.paid_at,
            "created_at": self.created_at,
            "channel": self.channel,
            "currency": self.currency,
            "ip_address": self.ip_address,
            "log": self.log,
            "fees": self.fees,
            "authorization": self.authorization,
            "customer": customer,
        }))
    }
}

/// Payload of a `charge.success` webhook.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeSuccessEvent {
    id: i64,
    domain: String,
    status: String,
    reference: String,
    amount: MinorUnits,
    message: Option<String>,
    gateway_response: String,
    paid_at: String,
    created_at: String,
    channel: String,
    currency: String,
    ip_address: Option<String>,
    metadata: Value,
    fees_breakdown: Option<Value>,
    log: Option<Value>,
    fees: i64,
    fees_split: Option<Value>,
    authorization: Value,
    customer: Customer,
    plan: Value,
    subaccount: Value,
    split: Value,
    order_id: Option<String>,
    requested_amount: Option<i64>,
    pos_transaction_data: Option<Value>,
    source: Value,
}

impl ChargeSuccessEvent {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn amount(&self) -> MinorUnits {
        self.amount
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn gateway_response(&self) -> &str {
        &self.gateway_response
    }

    pub fn paid_at(&self) -> &str {
        &self.paid_at
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }

    pub fn metadata(&self) -> &Value {
        &self.metadata
    }

    pub fn fees_breakdown(&self) -> Option<&Value> {
        self.fees_breakdown.as_ref()
    }

    pub fn log(&self) -> Option<&Value> {
        self.log.as_ref()
    }

    pub fn fees(&self) -> i64 {
        self.fees
    }

    pub fn fees_split(&self) -> Option<&Value> {
        self.fees_split.as_ref()
    }

    pub fn authorization(&self) -> &Value {
        &self.authorization
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn plan(&self) -> &Value {
        &self.plan
    }

    pub fn subaccount(&self) -> &Value {
        &self.subaccount
    }

    pub fn split(&self) -> &Value {
        &self.split
    }

    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    pub fn requested_amount(&self) -> Option<i64> {
        self.requested_amount
    }

    pub fn pos_transaction_data(&self) -> Option<&Value> {
        self.pos_transaction_data.as_ref()
    }

    pub fn source(&self) -> &Value {
        &self.source
    }
}

impl Record for ChargeSuccessEvent {
    const KIND: &'static str = "ChargeSuccessEvent";

    fn create(raw: &Value) -> Result<Self, MappingError> {
        let raw = RawRecord::parse(Self::KIND, raw)?;
        raw.require(&[
            "id",
            "domain",
            "status",
            "reference",
            "amount",
            "gateway_response",
            "paid_at",
            "created_at",
            "channel",
            "currency",
            "authorization",
            "customer",
            "plan",
            "subaccount",
            "split",
            "source",
        ])?;

        let customer = raw.record::<Customer>("customer")?;

        Ok(Self {
            id: raw.int("id"),
            domain: raw.text("domain"),
            status: raw.text("status"),
            reference: raw.text("reference"),
            amount: MinorUnits::new(raw.int("amount")),
            message: raw.opt_text("message"),
            gateway_response: raw.text("gateway_response"),
            paid_at: raw.text("paid_at"),
            created_at: raw.text("created_at"),
            channel: raw.text("channel"),
            currency: raw.text("currency"),
            ip_address: raw.opt_text("ip_address"),
            metadata: raw.value("metadata"),
            fees_breakdown: raw.opt_value("fees_breakdown"),
            log: raw.opt_value("log"),
            fees: raw.int("fees"),
            fees_split: raw.opt_value("fees_split"),
            authorization: raw.value("authorization"),
            customer,
            plan: raw.value("plan"),
            subaccount: raw.value("subaccount"),
            split: raw.value("split"),
            order_id: raw.opt_text("order_id"),
            requested_amount: raw.opt_int("requested_amount"),
            pos_transaction_data: raw.opt_value("pos_transaction_data"),
            source: raw.value("source"),
        })
    }

    fn to_mapping(&self) -> Map<String, Value> {
        into_map(json!({
            "id": self.id,
            "domain": self.domain,
            "status": self.status,
            "reference": self.reference,
            "amount": self.amount.minor(),
            "message": self.message,
            "gateway_response": self.gateway_response,
            "paid_at": self.paid_at,
            "created_at": self.created_at,
            "channel": self.channel,
            "currency": self.currency,
            "ip_address": self.ip_address,
            "metadata": self.metadata,
            "fees_breakdown": self.fees_breakdown,
            "log": self.log,
            "fees": self.fees,
            "fees_split": self.fees_split,
            "authorization": self.authorization,
            "customer": Value::Object(self.customer.to_mapping()),
            "plan": self.plan,
            "subaccount": self.subaccount,
            "split": self.split,
            "order_id": self.order_id,
            "requested_amount": self.requested_amount,
            "pos_transaction_data": self.pos_transaction_data,
            "source": self.source,
        }))
    }
}
