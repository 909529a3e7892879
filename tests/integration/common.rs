use std::sync::Once;

use sellhub_api::client::Endpoints;
use sellhub_api::{ClientConfig, Credentials, PaymentsClient};
use wiremock::MockServer;

static TRACING: Once = Once::new();

/// Honor RUST_LOG when debugging a failing test; quiet otherwise.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A client whose production, sandbox, and auth bases all point at the
/// given mock server.
pub fn client_for(server: &MockServer) -> PaymentsClient {
    client_with_endpoints(Endpoints::single(server.uri()))
}

pub fn client_with_endpoints(endpoints: Endpoints) -> PaymentsClient {
    init_tracing();

    let config = ClientConfig::builder().with_endpoints(endpoints).build();

    PaymentsClient::with_config(Credentials::new("client-id", "client-secret"), config)
        .expect("client construction")
}

/// A client pointed at an address nothing listens on, to exercise
/// transport-error paths.
pub fn unreachable_client() -> PaymentsClient {
    client_with_endpoints(Endpoints::single("http://127.0.0.1:1"))
}
