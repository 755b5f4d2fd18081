//! Service configuration.

use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.paystack.co";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the service needs, supplied once at construction.
///
/// Read-only for the lifetime of a service instance.
#[derive(Clone)]
pub struct PaystackConfig {
    secret_key: String,
    plan_code: String,
    callback_url: String,
    allowed_domains: Vec<String>,
    base_url: String,
    timeout: Duration,
}

impl PaystackConfig {
    /// Creates a configuration with the default endpoint and timeout.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            plan_code: String::new(),
            callback_url: String::new(),
            allowed_domains: Vec::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the default subscription plan code.
    pub fn with_plan_code(mut self, plan_code: impl Into<String>) -> Self {
        self.plan_code = plan_code.into();
        self
    }

    /// Sets the callback (redirect) URL sent with transaction initialization.
    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = callback_url.into();
        self
    }

    pub fn with_allowed_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    /// Overrides the gateway base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn plan_code(&self) -> &str {
        &self.plan_code
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Case-insensitive membership in the allow-list.
    pub fn is_allowed_domain(&self, domain: &str) -> bool {
        self.allowed_domains
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(domain.trim()))
    }
}

impl fmt::Debug for PaystackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaystackConfig")
            .field("secret_key", &"[redacted]")
            .field("plan_code", &self.plan_code)
            .field("callback_url", &self.callback_url)
            .field("allowed_domains", &self.allowed_domains)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = PaystackConfig::new("sk_test_abc");
        assert_eq!(config.base_url(), "https://api.paystack.co");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.allowed_domains().is_empty());
    }

    #[test]
    fn test_config_with_trailing_slash() {
        let config = PaystackConfig::new("sk_test_abc").with_base_url("http://localhost:4010/");
        assert_eq!(config.base_url(), "http://localhost:4010");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = PaystackConfig::new("sk_live_very_secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk_live_very_secret"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn test_allowed_domain() {
        let config =
            PaystackConfig::new("sk").with_allowed_domains(["shop.example.com", "52.31.139.75"]);
        assert!(config.is_allowed_domain("SHOP.example.com"));
        assert!(config.is_allowed_domain("52.31.139.75"));
        assert!(!config.is_allowed_domain("evil.example.com"));
    }
}
