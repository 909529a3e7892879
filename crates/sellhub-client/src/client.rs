//! HTTP executor over reqwest.

use std::time::Instant;

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{encode_query, flatten_form, ApiRequest};
use crate::response::{Body, Envelope};

/// HTTP executor for the Sellhub API.
///
/// Turns an [`ApiRequest`] plus a credential snapshot into an [`Envelope`]:
/// resolves the base URL, assembles headers and body, issues the request
/// through reqwest, and normalizes the result. Connection handles belong to
/// reqwest's pool and are released on every exit path.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        for base in [
            &config.endpoints.production,
            &config.endpoints.sandbox,
            &config.endpoints.auth,
        ] {
            url::Url::parse(base)?;
        }

        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a request against the credential snapshot.
    #[instrument(skip(self, request, credentials), fields(method = request.method.as_str(), path = %request.path))]
    pub async fn execute(
        &self,
        request: &ApiRequest,
        credentials: &Credentials,
    ) -> Result<Envelope> {
        let base = self.config.endpoints.base_for(credentials);
        let url = format!(
            "{}{}",
            join_url(base, &request.path),
            encode_query(&request.query)
        );

        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &url)
            .header("Accept", "application/json");

        // Basic credentials only during the authentication exchange.
        req = if credentials.is_authenticating() {
            req.header(
                "Authorization",
                format!("Basic {}", credentials.basic_token()),
            )
        } else {
            req.header(
                "Authorization",
                format!("Bearer {}", credentials.bearer_token()),
            )
        };

        // Caller extras go after the defaults; reqwest appends repeated names.
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            req = if credentials.upload_mode() {
                // reqwest stamps the multipart/form-data header with the boundary.
                let mut form = reqwest::multipart::Form::new();
                for (name, value) in flatten_form(body) {
                    form = form.text(name, value);
                }
                req.multipart(form)
            } else {
                req.json(body)
            };
        } else if !credentials.upload_mode() {
            // Content-Type is part of the default header set even without a body.
            req = req.header("Content-Type", "application/json");
        }

        if self.config.enable_tracing {
            debug!(url = %url, "Sending request");
        }

        let started = Instant::now();
        let response = req.send().await?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let text = response.text().await?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if self.config.enable_tracing {
            if (200..300).contains(&status) {
                debug!(status, elapsed_ms, "Response received");
            } else {
                info!(status, elapsed_ms, "Non-success response");
            }
        }

        let info = if credentials.debug() {
            let mut map = Map::new();
            map.insert("url".to_string(), Value::String(final_url));
            map.insert(
                "method".to_string(),
                Value::String(request.method.as_str().to_string()),
            );
            map.insert("status".to_string(), Value::from(status));
            if let Some(content_type) = content_type {
                map.insert("content_type".to_string(), Value::String(content_type));
            }
            map.insert("content_length".to_string(), Value::from(text.len() as u64));
            map.insert("elapsed_ms".to_string(), Value::from(elapsed_ms));
            Some(map)
        } else {
            None
        };

        Ok(Envelope {
            http_code: status,
            body: Body::decode(status, text, credentials.decode_mode()),
            info,
        })
    }
}

/// Join a base URL and a path, normalizing the path to a leading `/`.
fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
