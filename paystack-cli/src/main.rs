//! Paystack CLI
//!
//! Command-line interface over the Paystack orchestration service.
//! Configuration comes from `PAYSTACK_*` environment variables (or `.env`).

mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paystack_client::PaystackService;
use paystack_types::{Currency, MinorUnits, Record, TransactionInitPayload, User, WebhookEvent};

#[derive(Parser)]
#[command(name = "paystack")]
#[command(author, version, about = "Paystack gateway CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Customer operations
    Customer {
        #[command(subcommand)]
        action: CustomerCommands,
    },
    /// Subscription operations
    Subscription {
        #[command(subcommand)]
        action: SubscriptionCommands,
    },
    /// Transaction operations
    Transaction {
        #[command(subcommand)]
        action: TransactionCommands,
    },
    /// Bank directory and account resolution
    Bank {
        #[command(subcommand)]
        action: BankCommands,
    },
    /// Integration balance
    Balance {
        #[command(subcommand)]
        action: BalanceCommands,
    },
    /// Transfer recipients
    Recipient {
        #[command(subcommand)]
        action: RecipientCommands,
    },
    /// Payouts
    Transfer {
        #[command(subcommand)]
        action: TransferCommands,
    },
    /// Webhook verification
    Webhook {
        #[command(subcommand)]
        action: WebhookCommands,
    },
}

#[derive(Subcommand)]
enum CustomerCommands {
    /// Register a customer
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Fetch a customer by email
    Fetch { email: String },
}

#[derive(Subcommand)]
enum SubscriptionCommands {
    /// Subscribe a customer to the default plan
    Create {
        /// Customer code or email
        customer: String,
    },
    /// Fetch a subscription by id or code
    Fetch { id: String },
    /// Get the self-service management link
    Manage { id: String },
    /// Enable a subscription
    Enable { code: String },
    /// Disable a subscription
    Disable { code: String },
}

#[derive(Subcommand)]
enum TransactionCommands {
    /// Initialize a checkout
    Init {
        #[arg(long)]
        email: String,
        /// Amount in minor units (kobo)
        #[arg(long)]
        amount: i64,
        /// Checkout for the default plan instead of a one-off payment
        #[arg(long)]
        subscription: bool,
        #[arg(long)]
        reference: Option<String>,
        /// Metadata as a JSON document
        #[arg(long)]
        metadata: Option<String>,
    },
    /// Verify a transaction by reference
    Verify { reference: String },
}

#[derive(Subcommand)]
enum BankCommands {
    /// List banks
    List {
        #[arg(long)]
        country: Option<String>,
    },
    /// Check that an account number resolves at a bank
    Resolve {
        #[arg(long)]
        account_number: String,
        #[arg(long)]
        bank_code: String,
    },
}

#[derive(Subcommand)]
enum BalanceCommands {
    /// Check the balance strictly exceeds an amount
    Check {
        /// Amount in minor units (kobo)
        #[arg(long)]
        amount: i64,
    },
}

#[derive(Subcommand)]
enum RecipientCommands {
    /// Register a bank account as a transfer recipient
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        account_number: String,
        #[arg(long)]
        bank_code: String,
        /// Currency (NGN, GHS, ZAR, KES, USD)
        #[arg(long, default_value = "NGN")]
        currency: String,
    },
}

#[derive(Subcommand)]
enum TransferCommands {
    /// Pay a recipient from the balance
    Initiate {
        /// Amount in major units (naira), e.g. 10.50
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        recipient: String,
        #[arg(long)]
        reference: String,
    },
}

#[derive(Subcommand)]
enum WebhookCommands {
    /// Verify a webhook body against its signature
    Verify {
        /// File holding the raw request body
        #[arg(long)]
        payload: PathBuf,
        /// Value of the x-paystack-signature header
        #[arg(long)]
        signature: String,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,paystack_client=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn parse_currency(s: &str) -> Result<Currency> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Unknown currency: {}. Supported: NGN, GHS, ZAR, KES, USD", s))
}

fn print_record<R: Record>(record: &R) -> Result<()> {
    print_json(&Value::Object(record.to_mapping()))
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_flag(ok: bool, yes: &str, no: &str) {
    if ok {
        println!("✓ {}", yes);
    } else {
        println!("✗ {}", no);
        std::process::exit(1);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = config::from_env()?;
    let service = PaystackService::from_config(config)?;

    match cli.command {
        Commands::Customer { action } => match action {
            CustomerCommands::Create {
                email,
                first_name,
                last_name,
                phone,
            } => {
                let user = User::new(email, first_name, last_name, phone);
                let customer = service.create_customer(&user).await?;
                print_record(&customer)?;
            }
            CustomerCommands::Fetch { email } => match service.fetch_customer(&email).await? {
                Some(customer) => print_record(&customer)?,
                None => anyhow::bail!("Customer not found: {}", email),
            },
        },

        Commands::Subscription { action } => match action {
            SubscriptionCommands::Create { customer } => {
                let subscription = service.create_subscription(&customer).await?;
                print_record(&subscription)?;
            }
            SubscriptionCommands::Fetch { id } => match service.fetch_subscription(&id).await? {
                Some(subscription) => print_record(&subscription)?,
                None => anyhow::bail!("Subscription not found: {}", id),
            },
            SubscriptionCommands::Manage { id } => {
                let link = service.manage_subscription(&id).await?;
                println!("{}", link);
            }
            SubscriptionCommands::Enable { code } => {
                let enabled = service.enable_subscription(&code).await?;
                print_flag(enabled, "Subscription enabled", "Gateway refused to enable");
            }
            SubscriptionCommands::Disable { code } => {
                let disabled = service.disable_subscription(&code).await?;
                print_flag(disabled, "Subscription disabled", "Gateway refused to disable");
            }
        },

        Commands::Transaction { action } => match action {
            TransactionCommands::Init {
                email,
                amount,
                subscription,
                reference,
                metadata,
            } => {
                let amount = MinorUnits::new(amount);
                let init = if subscription {
                    service
                        .initialize_subscription_transaction(&email, amount)
                        .await?
                } else {
                    let mut payload = TransactionInitPayload::new(email, amount);
                    if let Some(reference) = reference {
                        payload = payload.with_reference(reference);
                    }
                    if let Some(metadata) = metadata {
                        payload = payload.with_metadata(serde_json::from_str(&metadata)?);
                    }
                    service.initialize_transaction(&payload).await?
                };
                print_record(&init)?;
            }
            TransactionCommands::Verify { reference } => {
                let verification = service.verify_transaction(&reference).await?;
                print_record(&verification)?;
            }
        },

        Commands::Bank { action } => match action {
            BankCommands::List { country } => {
                let banks = service.fetch_banks(country.as_deref()).await?;
                let banks: Vec<Value> = banks
                    .iter()
                    .map(|bank| Value::Object(bank.to_mapping()))
                    .collect();
                print_json(&Value::Array(banks))?;
            }
            BankCommands::Resolve {
                account_number,
                bank_code,
            } => {
                let valid = service
                    .validate_account_number(&account_number, &bank_code)
                    .await;
                print_flag(valid, "Account resolved", "Account could not be resolved");
            }
        },

        Commands::Balance { action } => match action {
            BalanceCommands::Check { amount } => {
                let amount = MinorUnits::new(amount);
                let sufficient = service.check_balance_is_sufficient(amount).await;
                print_flag(
                    sufficient,
                    &format!("Balance covers {}", amount),
                    &format!("Balance does not cover {}", amount),
                );
            }
        },

        Commands::Recipient { action } => match action {
            RecipientCommands::Create {
                name,
                account_number,
                bank_code,
                currency,
            } => {
                let currency = parse_currency(&currency)?;
                let recipient = service
                    .create_transfer_recipient(&name, &account_number, &bank_code, currency)
                    .await?;
                print_record(&recipient)?;
            }
        },

        Commands::Transfer { action } => match action {
            TransferCommands::Initiate {
                amount,
                recipient,
                reference,
            } => {
                let transfer = service
                    .initiate_transfer(amount, &recipient, &reference)
                    .await?;
                print_record(&transfer)?;
            }
        },

        Commands::Webhook { action } => match action {
            WebhookCommands::Verify { payload, signature } => {
                let body = std::fs::read(&payload)?;
                if !service.is_valid_paystack_webhook(&body, &signature) {
                    print_flag(false, "", "Invalid webhook signature");
                }
                let event = WebhookEvent::from_payload(&body)?;
                tracing::info!(event = event.event(), "Webhook signature verified");
                match event.charge_success()? {
                    Some(charge) => print_record(&charge)?,
                    None => print_json(&serde_json::json!({
                        "event": event.event(),
                        "data": event.data(),
                    }))?,
                }
            }
        },
    }

    Ok(())
}
