//! Credential state and scoped overrides.
//!
//! `Credentials` is the typed record behind every request: client id/secret,
//! the Basic and Bearer tokens, the target environment, and the behavior
//! flags. It is immutable-by-default — constructed once, then mutated only
//! through the narrow setter API or through the scoped guards on
//! [`SharedCredentials`].
//!
//! The two transient states (the `authenticating` flag and a temporary
//! bearer token under test) are only reachable through RAII guards whose
//! `Drop` restores the previous value on every exit path, including early
//! returns and panics.
//!
//! ## Security
//!
//! Secrets and tokens are redacted in Debug output.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// Target environment for API calls.
///
/// The wire codes (1 = production, 2 = sandbox) are the ones the
/// configuration surface has always accepted; [`Environment::from_code`]
/// maps them and rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Live API.
    #[default]
    Production,
    /// Sandbox API for integration testing.
    Sandbox,
}

impl Environment {
    /// Map a wire code to an environment. Unknown codes yield `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Environment::Production),
            2 => Some(Environment::Sandbox),
            _ => None,
        }
    }

    /// The wire code for this environment.
    pub fn code(self) -> u8 {
        match self {
            Environment::Production => 1,
            Environment::Sandbox => 2,
        }
    }
}

/// Credential state for one client instance.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    basic_token: String,
    bearer_token: String,
    environment: Environment,
    authenticating: bool,
    debug: bool,
    upload_mode: bool,
    decode_mode: bool,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("basic_token", &"[REDACTED]")
            .field("bearer_token", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("authenticating", &self.authenticating)
            .field("debug", &self.debug)
            .field("upload_mode", &self.upload_mode)
            .field("decode_mode", &self.decode_mode)
            .finish()
    }
}

impl Credentials {
    /// Create credentials for a client id/secret pair.
    ///
    /// The Basic token is derived as `base64(client_id:client_secret)`;
    /// [`Credentials::set_basic_token`] overrides it when the platform hands
    /// out a pre-built one.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        let basic_token = derive_basic_token(&client_id, &client_secret);

        Self {
            client_id,
            client_secret,
            basic_token,
            bearer_token: String::new(),
            environment: Environment::Production,
            authenticating: false,
            debug: false,
            upload_mode: false,
            decode_mode: true,
        }
    }

    /// Get the client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Get the client secret.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Get the Basic token (without the `Basic ` scheme).
    pub fn basic_token(&self) -> &str {
        &self.basic_token
    }

    /// Get the Bearer token (without the `Bearer ` scheme).
    pub fn bearer_token(&self) -> &str {
        &self.bearer_token
    }

    /// Get the target environment.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// True while an authentication or token-check call is in flight.
    pub fn is_authenticating(&self) -> bool {
        self.authenticating
    }

    /// Whether transport diagnostics are attached to envelopes.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Whether bodies are flattened into multipart form fields.
    pub fn upload_mode(&self) -> bool {
        self.upload_mode
    }

    /// Whether response bodies are JSON-decoded.
    pub fn decode_mode(&self) -> bool {
        self.decode_mode
    }

    /// Set the client id and re-derive the Basic token.
    pub fn set_client_id(&mut self, client_id: impl Into<String>) {
        self.client_id = client_id.into();
        self.basic_token = derive_basic_token(&self.client_id, &self.client_secret);
    }

    /// Set the client secret and re-derive the Basic token.
    pub fn set_client_secret(&mut self, client_secret: impl Into<String>) {
        self.client_secret = client_secret.into();
        self.basic_token = derive_basic_token(&self.client_id, &self.client_secret);
    }

    /// Set the Basic token, stripping a leading `Basic ` scheme if present
    /// (case-insensitive).
    pub fn set_basic_token(&mut self, token: &str) {
        self.basic_token = strip_scheme(token, "Basic ").to_string();
    }

    /// Set the Bearer token, stripping a leading `Bearer ` scheme if present
    /// (case-insensitive).
    pub fn set_bearer_token(&mut self, token: &str) {
        self.bearer_token = strip_scheme(token, "Bearer ").to_string();
    }

    /// Set the target environment.
    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment;
    }

    /// Set the environment by wire code. Unknown codes are ignored and the
    /// current environment is retained.
    pub fn set_environment_code(&mut self, code: u8) {
        if let Some(environment) = Environment::from_code(code) {
            self.environment = environment;
        }
    }

    /// Attach transport diagnostics to envelopes.
    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    /// Switch body encoding to flattened multipart form fields.
    pub fn set_upload_mode(&mut self, enabled: bool) {
        self.upload_mode = enabled;
    }

    /// Toggle JSON decoding of response bodies.
    pub fn set_decode_mode(&mut self, enabled: bool) {
        self.decode_mode = enabled;
    }
}

fn derive_basic_token(client_id: &str, client_secret: &str) -> String {
    BASE64.encode(format!("{client_id}:{client_secret}"))
}

/// Strip a leading auth scheme (e.g. `Bearer `) case-insensitively.
fn strip_scheme<'a>(value: &'a str, scheme: &str) -> &'a str {
    match value.get(..scheme.len()) {
        Some(head) if head.eq_ignore_ascii_case(scheme) => &value[scheme.len()..],
        _ => value,
    }
}

/// Shared, lock-protected credential state.
///
/// One `SharedCredentials` is owned per client instance; clones share the
/// same underlying state. The lock is held only for field access, never
/// across a network call — which also means two concurrent operations racing
/// on the transient states of the same instance can restore the wrong value.
/// Callers needing concurrency must use distinct client instances.
#[derive(Debug, Clone)]
pub struct SharedCredentials {
    inner: Arc<Mutex<Credentials>>,
}

impl SharedCredentials {
    /// Wrap credentials for shared access.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            inner: Arc::new(Mutex::new(credentials)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Credentials> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clone the current state for one request.
    pub fn snapshot(&self) -> Credentials {
        self.lock().clone()
    }

    /// Apply a mutation under the lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut Credentials) -> R) -> R {
        f(&mut self.lock())
    }

    /// Enter the authentication scope: the `authenticating` flag is raised
    /// until the returned guard is dropped.
    #[must_use = "the authenticating flag is cleared when the guard is dropped"]
    pub fn begin_authenticating(&self) -> AuthenticatingGuard {
        let previous = {
            let mut state = self.lock();
            std::mem::replace(&mut state.authenticating, true)
        };
        AuthenticatingGuard {
            state: self.clone(),
            previous,
        }
    }

    /// Install a temporary bearer token (scheme-stripped like
    /// [`Credentials::set_bearer_token`]); the previous token is restored
    /// when the returned guard is dropped.
    #[must_use = "the previous bearer token is restored when the guard is dropped"]
    pub fn swap_bearer_token(&self, token: &str) -> BearerSwapGuard {
        let previous = {
            let mut state = self.lock();
            let stripped = strip_scheme(token, "Bearer ").to_string();
            std::mem::replace(&mut state.bearer_token, stripped)
        };
        BearerSwapGuard {
            state: self.clone(),
            previous: Some(previous),
        }
    }
}

/// Scope guard for the transient `authenticating` flag.
#[derive(Debug)]
pub struct AuthenticatingGuard {
    state: SharedCredentials,
    previous: bool,
}

impl Drop for AuthenticatingGuard {
    fn drop(&mut self) {
        self.state.lock().authenticating = self.previous;
    }
}

/// Scope guard for a temporary bearer token.
#[derive(Debug)]
pub struct BearerSwapGuard {
    state: SharedCredentials,
    previous: Option<String>,
}

impl Drop for BearerSwapGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.state.lock().bearer_token = previous;
        }
    }
}
