//! Paystack Orchestration Service
//!
//! Issues gateway calls through the transport port, feeds successful responses
//! through the record factories and classifies failures.
//!
//! Failure policy:
//! - 404 on a fetch-style read is an absent result, not an error.
//! - Any other non-success status is a [`GatewayError`], logged then returned.
//! - Boolean validators (account, balance, webhook) fold failures into `false`.

use rust_decimal::Decimal;
use serde_json::{Value, json};
use tracing::{debug, error, instrument, warn};
use url::Url;

use paystack_types::{
    Bank, Currency, Customer, GatewayError, HttpMethod, HttpRequest, HttpResponse, HttpTransport,
    MappingError, MinorUnits, PaystackError, Record, Subscription, TransactionInitPayload,
    TransactionInitialization, TransactionVerification, Transfer, TransferRecipient, User,
};

use crate::config::PaystackConfig;
use crate::security;
use crate::transport::{ReqwestTransport, canonical_reason};

/// Log severity attached to a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    /// Write paths: create, initialize, subscribe, transfer.
    Critical,
    /// Read and validate paths.
    Error,
}

impl Severity {
    fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Error => "error",
        }
    }
}

/// Application service for gateway operations.
///
/// Generic over `T: HttpTransport` - the transport is injected at construction.
/// Holds no mutable state; configuration is read-only after construction.
pub struct PaystackService<T: HttpTransport> {
    config: PaystackConfig,
    transport: T,
}

impl PaystackService<ReqwestTransport> {
    /// Creates a service backed by reqwest with the configured timeout.
    pub fn from_config(config: PaystackConfig) -> Result<Self, PaystackError> {
        if config.secret_key().trim().is_empty() {
            return Err(PaystackError::InvalidConfig(
                "secret key cannot be empty".into(),
            ));
        }
        base_url(&config)?;
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::new(config, transport))
    }
}

impl<T: HttpTransport> PaystackService<T> {
    pub fn new(config: PaystackConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &PaystackConfig {
        &self.config
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Customers
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers a customer on the gateway.
    #[instrument(skip(self, user), fields(email = %user.email()))]
    pub async fn create_customer(&self, user: &User) -> Result<Customer, PaystackError> {
        let request = self.post(&["customer"], Value::Object(user.to_mapping()))?;
        self.call(request, Severity::Critical, "Failed to create customer")
            .await
    }

    /// Fetches a customer by email; `None` when the gateway has no such customer.
    #[instrument(skip(self))]
    pub async fn fetch_customer(&self, email: &str) -> Result<Option<Customer>, PaystackError> {
        let request = self.get(&["customer", email])?;
        self.fetch(request, "Failed to fetch customer").await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transactions
    // ─────────────────────────────────────────────────────────────────────────────

    /// Starts a checkout for the default subscription plan.
    #[instrument(skip(self, amount), fields(amount = amount.minor()))]
    pub async fn initialize_subscription_transaction(
        &self,
        email: &str,
        amount: MinorUnits,
    ) -> Result<TransactionInitialization, PaystackError> {
        let payload = json!({
            "email": email,
            "amount": amount.minor(),
            "callback_url": self.config.callback_url(),
            "plan": self.config.plan_code(),
        });
        let request = self.post(&["transaction", "initialize"], payload)?;
        self.call(
            request,
            Severity::Critical,
            "Error initializing subscription transaction",
        )
        .await
    }

    /// Starts a one-off checkout.
    #[instrument(skip(self, payload), fields(email = %payload.email()))]
    pub async fn initialize_transaction(
        &self,
        payload: &TransactionInitPayload,
    ) -> Result<TransactionInitialization, PaystackError> {
        let mut body = payload.to_mapping();
        body.insert(
            "callback_url".into(),
            Value::String(self.config.callback_url().to_string()),
        );
        let request = self.post(&["transaction", "initialize"], Value::Object(body))?;
        self.call(
            request,
            Severity::Critical,
            "Error initializing purchase transaction",
        )
        .await
    }

    /// Verifies a transaction by its reference.
    #[instrument(skip(self))]
    pub async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<TransactionVerification, PaystackError> {
        let request = self.get(&["transaction", "verify", reference])?;
        self.call(request, Severity::Error, "Error verifying transaction")
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Subscriptions
    // ─────────────────────────────────────────────────────────────────────────────

    /// Subscribes a customer to the default plan.
    #[instrument(skip(self))]
    pub async fn create_subscription(&self, customer: &str) -> Result<Subscription, PaystackError> {
        let payload = json!({
            "customer": customer,
            "plan": self.config.plan_code(),
        });
        let request = self.post(&["subscription"], payload)?;
        self.call(
            request,
            Severity::Critical,
            "Error occurred while creating subscription",
        )
        .await
    }

    /// Fetches a subscription by id or code; `None` on 404.
    #[instrument(skip(self))]
    pub async fn fetch_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<Option<Subscription>, PaystackError> {
        let request = self.get(&["subscription", subscription_id])?;
        self.fetch(request, "Failed to fetch subscription").await
    }

    /// Returns a link where the customer can manage the subscription.
    #[instrument(skip(self))]
    pub async fn manage_subscription(&self, subscription_id: &str) -> Result<String, PaystackError> {
        let context = "Error managing subscription";
        let request = self.get(&["subscription", subscription_id, "manage", "link"])?;
        let response = self.dispatch(&request, Severity::Error, context).await?;

        data(&response)
            .get("link")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| {
                self.mapping_failure(&request, &response, MappingError::new("ManageLink"))
            })
    }

    /// Re-enables a subscription. Fetches it first for its email token.
    ///
    /// The fetch and the enable are two round trips with no atomicity; a
    /// concurrent change between them is not detected.
    #[instrument(skip(self))]
    pub async fn enable_subscription(&self, subscription_code: &str) -> Result<bool, PaystackError> {
        self.toggle_subscription(
            subscription_code,
            "enable",
            "Error occurred while enabling subscription",
        )
        .await
    }

    /// Disables a subscription. Same two-step sequence as enabling.
    #[instrument(skip(self))]
    pub async fn disable_subscription(
        &self,
        subscription_code: &str,
    ) -> Result<bool, PaystackError> {
        self.toggle_subscription(
            subscription_code,
            "disable",
            "Error occurred while disabling subscription",
        )
        .await
    }

    /// Posts the fetched subscription's code and email token to
    /// `/subscription/{action}`.
    ///
    /// The result is the response's top-level `status` flag, not
    /// `data.status`. Product has yet to confirm which of the two the
    /// gateway sets for enable/disable.
    async fn toggle_subscription(
        &self,
        subscription_code: &str,
        action: &str,
        context: &str,
    ) -> Result<bool, PaystackError> {
        let subscription = self
            .fetch_subscription(subscription_code)
            .await?
            .ok_or_else(|| PaystackError::SubscriptionNotFound(subscription_code.to_string()))?;

        let payload = json!({
            "code": subscription.code(),
            "token": subscription.email_token(),
        });
        let request = self.post(&["subscription", action], payload)?;
        let response = self.dispatch(&request, Severity::Critical, context).await?;
        Ok(status_flag(&response))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Webhooks
    // ─────────────────────────────────────────────────────────────────────────────

    /// Checks the HMAC-SHA512 signature of a raw webhook body. Never fails.
    pub fn is_valid_paystack_webhook(&self, payload: &[u8], signature: &str) -> bool {
        security::verify_webhook_signature(payload, signature, self.config.secret_key())
    }

    /// Whether `domain` is on the configured allow-list.
    pub fn is_allowed_domain(&self, domain: &str) -> bool {
        self.config.is_allowed_domain(domain)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Banks & Balance
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists banks, optionally filtered by country.
    #[instrument(skip(self))]
    pub async fn fetch_banks(&self, country: Option<&str>) -> Result<Vec<Bank>, PaystackError> {
        let mut request = self.get(&["bank"])?;
        if let Some(country) = country {
            request = request.query("country", country);
        }
        let response = self
            .dispatch(&request, Severity::Error, "Failed to fetch banks")
            .await?;

        match data(&response) {
            Value::Array(items) => items
                .iter()
                .map(Bank::create)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| self.mapping_failure(&request, &response, err)),
            _ => Err(self.mapping_failure(&request, &response, MappingError::new(Bank::KIND))),
        }
    }

    /// Resolves an account number at a bank. `false` on any failure.
    #[instrument(skip(self))]
    pub async fn validate_account_number(&self, account_number: &str, bank_code: &str) -> bool {
        let Ok(request) = self.get(&["bank", "resolve"]) else {
            return false;
        };
        let request = request
            .query("account_number", account_number)
            .query("bank_code", bank_code);

        match self
            .dispatch(&request, Severity::Error, "Error validating account number")
            .await
        {
            Ok(response) => status_flag(&response),
            Err(_) => false,
        }
    }

    /// Whether the integration balance strictly exceeds `amount`.
    ///
    /// Compares against the first balance entry, both in minor units.
    /// `false` on any failure.
    #[instrument(skip(self, amount), fields(amount = amount.minor()))]
    pub async fn check_balance_is_sufficient(&self, amount: MinorUnits) -> bool {
        let Ok(request) = self.get(&["balance"]) else {
            return false;
        };
        let Ok(response) = self
            .dispatch(&request, Severity::Error, "Error checking balance")
            .await
        else {
            return false;
        };

        let balance = response
            .json()
            .and_then(|body| body.pointer("/data/0/balance").and_then(as_int));
        let Some(balance) = balance else {
            error!(
                endpoint = %request.url,
                body = %response.body,
                "Balance missing from gateway response"
            );
            return false;
        };

        let sufficient = balance > amount.minor();
        if !sufficient {
            warn!(
                severity = "alert",
                requested = amount.minor(),
                balance,
                "Insufficient balance"
            );
        }
        sufficient
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transfers
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers a bank account (NUBAN) as a transfer recipient.
    #[instrument(skip(self))]
    pub async fn create_transfer_recipient(
        &self,
        name: &str,
        account_number: &str,
        bank_code: &str,
        currency: Currency,
    ) -> Result<TransferRecipient, PaystackError> {
        let payload = json!({
            "type": "nuban",
            "name": name,
            "account_number": account_number,
            "bank_code": bank_code,
            "currency": currency.to_string(),
        });
        let request = self.post(&["transferrecipient"], payload)?;
        self.call(request, Severity::Critical, "Error creating a recipient")
            .await
    }

    /// Pays `amount` major units (e.g. `10.50` naira) from the balance to a
    /// recipient. The gateway receives the exact minor-unit value.
    #[instrument(skip(self))]
    pub async fn initiate_transfer(
        &self,
        amount: Decimal,
        recipient_code: &str,
        reference: &str,
    ) -> Result<Transfer, PaystackError> {
        let amount = MinorUnits::from_major(amount)?;
        let payload = json!({
            "source": "balance",
            "reason": "Payout",
            "amount": amount.minor(),
            "recipient": recipient_code,
            "reference": reference,
        });
        let request = self.post(&["transfer"], payload)?;
        self.call(request, Severity::Critical, "Error initiating a transfer")
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Request plumbing
    // ─────────────────────────────────────────────────────────────────────────────

    fn get(&self, segments: &[&str]) -> Result<HttpRequest, PaystackError> {
        let request = HttpRequest::new(HttpMethod::Get, self.endpoint(segments)?)
            .header("Authorization", self.bearer());
        Ok(request)
    }

    fn post(&self, segments: &[&str], body: Value) -> Result<HttpRequest, PaystackError> {
        let request = HttpRequest::new(HttpMethod::Post, self.endpoint(segments)?)
            .header("Authorization", self.bearer())
            .header("Content-Type", "application/json")
            .header("Cache-Control", "no-cache")
            .json(body);
        Ok(request)
    }

    /// Base URL plus `segments`, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<String, PaystackError> {
        let mut url = base_url(&self.config)?;
        url.path_segments_mut()
            .map_err(|_| PaystackError::InvalidConfig("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.config.secret_key())
    }

    /// Sends and maps a successful response through `R`'s factory.
    async fn call<R: Record>(
        &self,
        request: HttpRequest,
        severity: Severity,
        context: &str,
    ) -> Result<R, PaystackError> {
        let response = self.dispatch(&request, severity, context).await?;
        self.decode(&request, &response)
    }

    /// Like [`Self::call`] but a 404 yields `Ok(None)`.
    async fn fetch<R: Record>(
        &self,
        request: HttpRequest,
        context: &str,
    ) -> Result<Option<R>, PaystackError> {
        let response = self.send(&request, Severity::Error, context).await?;
        if response.is_not_found() {
            debug!(endpoint = %request.url, "Gateway returned not found");
            return Ok(None);
        }
        if !response.is_success() {
            return Err(self.reject(Severity::Error, context, &request, response));
        }
        self.decode(&request, &response).map(Some)
    }

    /// Sends and rejects any non-success status.
    async fn dispatch(
        &self,
        request: &HttpRequest,
        severity: Severity,
        context: &str,
    ) -> Result<HttpResponse, PaystackError> {
        let response = self.send(request, severity, context).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(self.reject(severity, context, request, response))
        }
    }

    async fn send(
        &self,
        request: &HttpRequest,
        severity: Severity,
        context: &str,
    ) -> Result<HttpResponse, PaystackError> {
        debug!(method = %request.method, endpoint = %request.url, "Sending gateway request");
        self.transport.send(request).await.map_err(|err| {
            error!(
                severity = severity.as_str(),
                method = %request.method,
                endpoint = %request.url,
                error = %err,
                "{}",
                context
            );
            PaystackError::Transport(err)
        })
    }

    fn reject(
        &self,
        severity: Severity,
        context: &str,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> PaystackError {
        let err = GatewayError {
            status: response.status,
            reason: gateway_reason(&response),
            body: response.body,
        };
        error!(
            severity = severity.as_str(),
            method = %request.method,
            endpoint = %request.url,
            status = err.status,
            reason = %err.reason,
            body = %err.body,
            "{}",
            context
        );
        PaystackError::Gateway(err)
    }

    fn decode<R: Record>(
        &self,
        request: &HttpRequest,
        response: &HttpResponse,
    ) -> Result<R, PaystackError> {
        R::create(&data(response)).map_err(|err| self.mapping_failure(request, response, err))
    }

    fn mapping_failure(
        &self,
        request: &HttpRequest,
        response: &HttpResponse,
        err: MappingError,
    ) -> PaystackError {
        error!(
            endpoint = %request.url,
            kind = err.kind(),
            body = %response.body,
            "Failed to map gateway response"
        );
        PaystackError::Mapping(err)
    }
}

fn base_url(config: &PaystackConfig) -> Result<Url, PaystackError> {
    Url::parse(config.base_url())
        .map_err(|err| PaystackError::InvalidConfig(format!("invalid base URL: {}", err)))
}

/// The `data` member of a JSON body, `Value::Null` when missing.
fn data(response: &HttpResponse) -> Value {
    response
        .json()
        .and_then(|mut body| body.get_mut("data").map(Value::take))
        .unwrap_or(Value::Null)
}

/// The top-level boolean `status` member of a JSON body.
fn status_flag(response: &HttpResponse) -> bool {
    response
        .json()
        .and_then(|body| body.get("status").and_then(Value::as_bool))
        .unwrap_or(false)
}

/// The gateway's `message`, falling back to the HTTP reason phrase.
fn gateway_reason(response: &HttpResponse) -> String {
    response
        .json()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(String::from))
        .or_else(|| canonical_reason(response.status).map(String::from))
        .unwrap_or_else(|| "Unknown error occurred".to_string())
}

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
