//! # sellhub-client
//!
//! Core HTTP client infrastructure for the Sellhub Payments API.
//!
//! This crate provides the request/response pipeline shared by every API
//! operation:
//! - Credential state with scoped overrides for the authentication flows
//! - Query-string and form-flattening request encoding
//! - Environment-aware base-URL selection (production vs sandbox)
//! - A normalized response envelope with uniform error classification
//! - Connection pooling and request/response tracing
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Operation Layer                          │
//! │  (sellhub-payments: PaymentsClient)                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HttpClient                             │
//! │  - Resolves auth/production/sandbox base URLs               │
//! │  - Assembles headers (Accept, Basic/Bearer Authorization)   │
//! │  - Encodes bodies (JSON, or multipart form in upload mode)  │
//! │  - Produces the {httpCode, body, info?} envelope            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       reqwest                               │
//! │  - Sockets, TLS, timeouts, connection pooling               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use sellhub_client::{ApiRequest, Credentials, HttpClient, SharedCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sellhub_client::Error> {
//!     let http = HttpClient::default_client()?;
//!     let credentials = SharedCredentials::new(Credentials::new("id", "secret"));
//!
//!     let envelope = http
//!         .execute(&ApiRequest::get("subscriptions"), &credentials.snapshot())
//!         .await?;
//!     println!("{}", envelope.http_code);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod credentials;
mod error;
mod request;
mod response;

pub use client::HttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, Endpoints};
pub use credentials::{
    AuthenticatingGuard, BearerSwapGuard, Credentials, Environment, SharedCredentials,
};
pub use error::{Error, ErrorKind, Result};
pub use request::{encode_query, flatten_form, ApiRequest, QueryParam, RequestMethod};
pub use response::{check_api_error, Body, Envelope};

/// Production API base URL.
pub const PRODUCTION_BASE_URL: &str = "https://api.sellhub.io/payments/api/v1";

/// Sandbox API base URL.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.sellhub.io/payments/api/v1";

/// Base URL for the token endpoint used during authentication.
pub const AUTH_BASE_URL: &str = "https://api-sec.sellhub.io/security/oauth";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("sellhub-api/", env!("CARGO_PKG_VERSION"));
