//! Authentication operations: token exchange and token checks.

use serde_json::Value;
use tracing::instrument;

use sellhub_client::{ApiRequest, Envelope, Result};

impl super::PaymentsClient {
    /// Exchange the client credentials for an access token.
    ///
    /// Posts `grant_type=client_credentials` with the client id/secret to
    /// the token endpoint. The request is signed with the Basic token; the
    /// `authenticating` scope is released when the call finishes, on
    /// success and failure alike. A returned `access_token` is stored as
    /// the bearer token for subsequent calls.
    #[instrument(skip(self))]
    pub async fn authenticate(&self) -> Result<Envelope> {
        let (client_id, client_secret) = {
            let snapshot = self.credentials().snapshot();
            (
                snapshot.client_id().to_string(),
                snapshot.client_secret().to_string(),
            )
        };

        let request = ApiRequest::post("token")
            .query("grant_type", "client_credentials")
            .query("client_id", client_id)
            .query("client_secret", client_secret);

        let envelope = {
            let _authenticating = self.credentials().begin_authenticating();
            self.call(request).await?
        };

        if let Some(token) = envelope.body.get("access_token").and_then(Value::as_str) {
            self.set_bearer_token(token);
        }

        Ok(envelope)
    }

    /// Probe whether a bearer token is still accepted by the API.
    ///
    /// The supplied token temporarily replaces the stored one for a single
    /// `subscriptions` request; the previous token is restored whether the
    /// check succeeds, fails, or the transport errors. Returns true iff the
    /// API answered with anything other than 401.
    #[instrument(skip(self, token))]
    pub async fn check_token(&self, token: &str) -> Result<bool> {
        let _swap = self.credentials().swap_bearer_token(token);
        let envelope = self.call_raw(ApiRequest::get("subscriptions")).await?;
        Ok(envelope.http_code != 401)
    }
}
