//! Sales operations.

use tracing::instrument;

use sellhub_client::{ApiRequest, Envelope, QueryParam, Result};

impl super::PaymentsClient {
    /// List sales users, optionally filtered.
    #[instrument(skip(self, filters))]
    pub async fn list_users(&self, filters: &[QueryParam]) -> Result<Envelope> {
        self.call(ApiRequest::get("sales/users").query_params(filters))
            .await
    }
}
