//! # sellhub-payments
//!
//! Typed operations for the Sellhub Payments API.
//!
//! ## Features
//!
//! - **Authentication** - Client-credentials token exchange and token checks
//! - **Subscriptions** - List, cancel, reactivate (single and bulk), change
//!   the billing due day
//! - **Purchases** - List a subscriber's purchases
//! - **Sales** - List sales users
//!
//! Every operation runs through one pipeline (build request → execute →
//! classify) and resolves to the normalized `{httpCode, body, info?}`
//! envelope from `sellhub-client`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sellhub_payments::{Credentials, PaymentsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sellhub_payments::Error> {
//!     let client = PaymentsClient::new(Credentials::new("client-id", "client-secret"))?;
//!
//!     client.authenticate().await?;
//!
//!     let subscriptions = client.list_subscriptions(&[]).await?;
//!     println!("{}", subscriptions.http_code);
//!
//!     client.cancel_subscription("sub-code", true).await?;
//!
//!     Ok(())
//! }
//! ```

mod client;

pub use client::PaymentsClient;

// Re-export sellhub-client types that callers need; errors are shared so
// that classification keeps its identity across the crate boundary.
pub use sellhub_client::{
    Body, ClientConfig, ClientConfigBuilder, Credentials, Endpoints, Envelope, Environment, Error,
    ErrorKind, QueryParam, Result, SharedCredentials,
};
