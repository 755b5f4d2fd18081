//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use paystack_client::PaystackConfig;

/// Builds the client configuration from `PAYSTACK_*` environment variables.
pub fn from_env() -> anyhow::Result<PaystackConfig> {
    from_lookup(|key| env::var(key).ok())
}

/// Same as [`from_env`] but reading through `lookup`.
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<PaystackConfig> {
    let secret_key = lookup("PAYSTACK_SECRET_KEY")
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| anyhow::anyhow!("PAYSTACK_SECRET_KEY environment variable is required"))?;

    let mut config = PaystackConfig::new(secret_key)
        .with_plan_code(lookup("PAYSTACK_PLAN_CODE").unwrap_or_default())
        .with_callback_url(lookup("PAYSTACK_CALLBACK_URL").unwrap_or_default())
        .with_allowed_domains(parse_whitelist(
            &lookup("PAYSTACK_WHITELIST").unwrap_or_default(),
        ));

    if let Some(base_url) = lookup("PAYSTACK_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    if let Some(secs) = lookup("PAYSTACK_TIMEOUT_SECS") {
        let secs: u64 = secs
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("PAYSTACK_TIMEOUT_SECS must be a whole number"))?;
        config = config.with_timeout(Duration::from_secs(secs));
    }

    Ok(config)
}

fn parse_whitelist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|domain| !domain.is_empty())
        .map(String::from)
        .collect()
}
