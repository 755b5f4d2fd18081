//! Typed gateway records.

pub mod customer;
pub mod money;
pub mod subscription;
pub mod transaction;
pub mod transfer;
pub mod webhook;

pub use customer::{Customer, User};
pub use money::{Currency, MINOR_PER_MAJOR, MinorUnits};
pub use subscription::{Invoice, Subscription, SubscriptionStatus};
pub use transaction::{
    ChargeSuccessEvent, TransactionInitPayload, TransactionInitialization,
    TransactionVerification,
};
pub use transfer::{Bank, Transfer, TransferRecipient};
pub use webhook::{WebhookEvent, WebhookEventKind};
