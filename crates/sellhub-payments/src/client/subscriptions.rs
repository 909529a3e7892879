//! Subscription operations.

use serde_json::json;
use tracing::instrument;

use sellhub_client::{ApiRequest, Envelope, Error, ErrorKind, QueryParam, Result};

impl super::PaymentsClient {
    /// List subscriptions, optionally filtered.
    #[instrument(skip(self, filters))]
    pub async fn list_subscriptions(&self, filters: &[QueryParam]) -> Result<Envelope> {
        self.call(ApiRequest::get("subscriptions").query_params(filters))
            .await
    }

    /// List the purchases of a subscription.
    #[instrument(skip(self))]
    pub async fn list_purchases(&self, subscriber_code: &str) -> Result<Envelope> {
        if subscriber_code.is_empty() {
            return Err(Error::new(ErrorKind::Validation(
                "subscriber code is required".to_string(),
            )));
        }

        self.call(ApiRequest::get(format!(
            "subscriptions/{subscriber_code}/purchases"
        )))
        .await
    }

    /// Cancel one subscription. `send_mail` controls whether the platform
    /// notifies the subscriber.
    #[instrument(skip(self))]
    pub async fn cancel_subscription(
        &self,
        subscriber_code: &str,
        send_mail: bool,
    ) -> Result<Envelope> {
        self.call(
            ApiRequest::post(format!("subscriptions/{subscriber_code}/cancel"))
                .body(json!({ "send_mail": send_mail })),
        )
        .await
    }

    /// Cancel several subscriptions in one request.
    #[instrument(skip(self, subscriber_codes))]
    pub async fn cancel_subscriptions(
        &self,
        subscriber_codes: &[&str],
        send_mail: bool,
    ) -> Result<Envelope> {
        self.call(ApiRequest::post("subscriptions/cancel").body(json!({
            "subscriber_code": subscriber_codes,
            "send_mail": send_mail,
        })))
        .await
    }

    /// Reactivate one subscription. `charge` triggers an immediate charge.
    #[instrument(skip(self))]
    pub async fn reactivate_subscription(
        &self,
        subscriber_code: &str,
        charge: bool,
    ) -> Result<Envelope> {
        self.call(
            ApiRequest::post(format!("subscriptions/{subscriber_code}/reactivate"))
                .body(json!({ "charge": charge })),
        )
        .await
    }

    /// Reactivate several subscriptions in one request.
    #[instrument(skip(self, subscriber_codes))]
    pub async fn reactivate_subscriptions(
        &self,
        subscriber_codes: &[&str],
        charge: bool,
    ) -> Result<Envelope> {
        self.call(ApiRequest::post("subscriptions/reactivate").body(json!({
            "subscriber_code": subscriber_codes,
            "charge": charge,
        })))
        .await
    }

    /// Move a subscription's billing due day. `due_day` must be in [1, 31];
    /// out-of-range values fail before any request is issued.
    #[instrument(skip(self))]
    pub async fn change_billing_due_day(
        &self,
        subscriber_code: &str,
        due_day: u8,
    ) -> Result<Envelope> {
        if !(1..=31).contains(&due_day) {
            return Err(Error::new(ErrorKind::Validation(format!(
                "due_day must be between 1 and 31, got {due_day}"
            ))));
        }

        self.call(
            ApiRequest::patch(format!("subscriptions/{subscriber_code}"))
                .body(json!({ "due_day": due_day })),
        )
        .await
    }
}
