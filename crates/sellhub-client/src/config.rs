//! Client configuration.

use std::time::Duration;

use crate::credentials::{Credentials, Environment};
use crate::{AUTH_BASE_URL, PRODUCTION_BASE_URL, SANDBOX_BASE_URL};

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URLs for the API and auth endpoints.
    pub endpoints: Endpoints,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Pool idle timeout.
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_max_idle_per_host: usize,
    /// User-Agent header value.
    pub user_agent: String,
    /// Whether to enable request/response tracing.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            user_agent: crate::USER_AGENT.to_string(),
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Override the base URLs (tests point these at a local mock).
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.config.endpoints = endpoints;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set pool idle timeout.
    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    pub fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable request/response tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    /// Build the client configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Base URLs for the three request targets.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Production API base.
    pub production: String,
    /// Sandbox API base.
    pub sandbox: String,
    /// Auth base hosting the token endpoint.
    pub auth: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            production: PRODUCTION_BASE_URL.to_string(),
            sandbox: SANDBOX_BASE_URL.to_string(),
            auth: AUTH_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every target at one base URL (for tests against a mock server).
    pub fn single(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            production: base.clone(),
            sandbox: base.clone(),
            auth: base,
        }
    }

    /// The API base for an environment.
    pub fn api_base(&self, environment: Environment) -> &str {
        match environment {
            Environment::Production => &self.production,
            Environment::Sandbox => &self.sandbox,
        }
    }

    /// The base for a request: the auth base while the authentication
    /// exchange is in flight, else the environment-selected API base.
    pub fn base_for(&self, credentials: &Credentials) -> &str {
        if credentials.is_authenticating() {
            &self.auth
        } else {
            self.api_base(credentials.environment())
        }
    }
}
