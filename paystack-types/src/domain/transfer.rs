//! Transfer, transfer recipient and bank records.

use serde_json::{Map, Value, json};

use super::money::MinorUnits;
use crate::error::MappingError;
use crate::record::{RawRecord, Record, into_map};

/// A payout from the integration balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// Major units, already converted from the gateway's minor units.
    amount: String,
    code: String,
    created_at: String,
}

impl Transfer {
    /// Amount in major units.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl Record for Transfer {
    const KIND: &'static str = "Transfer";

    fn create(raw: &Value) -> Result<Self, MappingError> {
        let raw = RawRecord::parse(Self::KIND, raw)?;
        raw.require(&["amount", "transfer_code", "createdAt"])?;

        Ok(Self {
            amount: MinorUnits::new(raw.int("amount")).major().to_string(),
            code: raw.text("transfer_code"),
            created_at: raw.text("createdAt"),
        })
    }

    fn to_mapping(&self) -> Map<String, Value> {
        into_map(json!({
            "amount": self.amount,
            "transfer_code": self.code,
            "createdAt": self.created_at,
        }))
    }
}

/// A bank account registered as a payout destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecipient {
    code: String,
    name: String,
    created_at: String,
}

impl TransferRecipient {
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl Record for TransferRecipient {
    const KIND: &'static str = "TransferRecipient";

    fn create(raw: &Value) -> Result<Self, MappingError> {
        let raw = RawRecord::parse(Self::KIND, raw)?;
        raw.require(&["recipient_code", "name", "createdAt"])?;

        Ok(Self {
            code: raw.text("recipient_code"),
            name: raw.text("name"),
            created_at: raw.text("createdAt"),
        })
    }

    fn to_mapping(&self) -> Map<String, Value> {
        into_map(json!({
            "recipient_code": self.code,
            "name": self.name,
            "createdAt": self.created_at,
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bank {
    name: String,
    code: String,
}

impl Bank {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl Record for Bank {
    const KIND: &'static str = "Bank";

    fn create(raw: &Value) -> Result<Self, MappingError> {
        let raw = RawRecord::parse(Self::KIND, raw)?;
        raw.require(&["name", "code"])?;

        Ok(Self {
            name: raw.text("name"),
            code: raw.text("code"),
        })
    }

    fn to_mapping(&self) -> Map<String, Value> {
        into_map(json!({
            "name": self.name,
            "code": self.code,
        }))
    }
}
