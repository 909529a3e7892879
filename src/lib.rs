//! # sellhub-api
//!
//! A Sellhub Payments API client library for Rust.
//!
//! This library provides typed access to the Sellhub Payments API with
//! built-in authentication handling, environment selection (production vs
//! sandbox), and uniform error classification.
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets) are redacted in Debug output
//! - Tracing/logging skips credential parameters
//!
//! ## Crates
//!
//! - **sellhub-client** - Core HTTP infrastructure: credential state,
//!   request encoding, the response envelope, error classification
//! - **sellhub-payments** - Operations: authentication, subscriptions,
//!   purchases, sales users
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sellhub_api::{Credentials, PaymentsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PaymentsClient::new(Credentials::new(
//!         std::env::var("SELLHUB_CLIENT_ID")?,
//!         std::env::var("SELLHUB_CLIENT_SECRET")?,
//!     ))?;
//!
//!     client.authenticate().await?;
//!
//!     let subscriptions = client.list_subscriptions(&[]).await?;
//!     println!("{:?}", subscriptions.body);
//!
//!     Ok(())
//! }
//! ```

// Re-export member crates for convenient access
#[cfg(feature = "client")]
pub use sellhub_client as client;
#[cfg(feature = "payments")]
pub use sellhub_payments as payments;

// Re-export commonly used types at the top level
#[cfg(feature = "client")]
pub use sellhub_client::{
    ClientConfig, Credentials, Envelope, Environment, Error, ErrorKind, QueryParam, Result,
};
#[cfg(feature = "payments")]
pub use sellhub_payments::PaymentsClient;
