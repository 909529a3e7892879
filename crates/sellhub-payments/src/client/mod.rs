//! Sellhub Payments API client.
//!
//! `PaymentsClient` owns the shared credential state and the HTTP executor
//! from `sellhub-client`, and exposes the typed operations as methods
//! grouped into the sibling modules (auth, subscriptions, sales).

use sellhub_client::{
    check_api_error, ApiRequest, ClientConfig, Credentials, Envelope, Environment, HttpClient,
    Result, SharedCredentials,
};

mod auth;
mod sales;
mod subscriptions;

/// Sellhub Payments API client.
///
/// One instance per credential set. Clones share the same credential state.
/// Operations that temporarily mutate that state (`authenticate`,
/// `check_token`) restore it on every exit path, but two such calls racing
/// on the same instance can restore each other's values — use distinct
/// instances for concurrent authentication flows.
///
/// # Example
///
/// ```rust,ignore
/// use sellhub_payments::{Credentials, PaymentsClient};
///
/// let client = PaymentsClient::new(Credentials::new("id", "secret"))?;
/// client.authenticate().await?;
/// let subs = client.list_subscriptions(&[]).await?;
/// ```
#[derive(Clone)]
pub struct PaymentsClient {
    http: HttpClient,
    credentials: SharedCredentials,
}

impl std::fmt::Debug for PaymentsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentsClient")
            .field("environment", &self.environment())
            .finish_non_exhaustive()
    }
}

impl PaymentsClient {
    /// Create a client with default HTTP configuration.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
            credentials: SharedCredentials::new(credentials),
        })
    }

    /// The shared credential state.
    pub fn credentials(&self) -> &SharedCredentials {
        &self.credentials
    }

    /// The target environment.
    pub fn environment(&self) -> Environment {
        self.credentials.snapshot().environment()
    }

    /// The current bearer token.
    pub fn bearer_token(&self) -> String {
        self.credentials.snapshot().bearer_token().to_string()
    }

    // =========================================================================
    // Narrow mutation API
    // =========================================================================

    /// Set the bearer token (a leading `Bearer ` scheme is stripped).
    pub fn set_bearer_token(&self, token: &str) {
        self.credentials.update(|c| c.set_bearer_token(token));
    }

    /// Set the Basic token (a leading `Basic ` scheme is stripped).
    pub fn set_basic_token(&self, token: &str) {
        self.credentials.update(|c| c.set_basic_token(token));
    }

    /// Set the target environment.
    pub fn set_environment(&self, environment: Environment) {
        self.credentials.update(|c| c.set_environment(environment));
    }

    /// Set the environment by wire code (1 = production, 2 = sandbox).
    /// Unknown codes are ignored.
    pub fn set_environment_code(&self, code: u8) {
        self.credentials.update(|c| c.set_environment_code(code));
    }

    /// Attach transport diagnostics to returned envelopes.
    pub fn set_debug(&self, enabled: bool) {
        self.credentials.update(|c| c.set_debug(enabled));
    }

    /// Switch request bodies to flattened multipart form fields.
    pub fn set_upload_mode(&self, enabled: bool) {
        self.credentials.update(|c| c.set_upload_mode(enabled));
    }

    /// Toggle JSON decoding of response bodies.
    pub fn set_decode_mode(&self, enabled: bool) {
        self.credentials.update(|c| c.set_decode_mode(enabled));
    }

    // =========================================================================
    // Shared pipeline
    // =========================================================================

    /// Execute a request and classify the result.
    pub(crate) async fn call(&self, request: ApiRequest) -> Result<Envelope> {
        let credentials = self.credentials.snapshot();
        let envelope = self.http.execute(&request, &credentials).await?;
        check_api_error(envelope)
    }

    /// Execute a request without classification (token checks inspect the
    /// raw status themselves).
    pub(crate) async fn call_raw(&self, request: ApiRequest) -> Result<Envelope> {
        let credentials = self.credentials.snapshot();
        self.http.execute(&request, &credentials).await
    }
}
