//! A local stand-in for the TfL API, for tests.

use axum::Router;

use super::client::{TflClient, TflConfig};

/// Serve `app` on an ephemeral localhost port and return a client for it.
pub(crate) async fn client_for(app: Router) -> TflClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TflClient::new(
        TflConfig::new("")
            .with_base_url(format!("http://{addr}"))
            .with_timeout(5),
    )
    .unwrap()
}

/// A client whose requests fail to connect.
pub(crate) fn unreachable_client() -> TflClient {
    // Port 9 (discard) on localhost is not listening in test environments.
    TflClient::new(
        TflConfig::new("")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(2),
    )
    .unwrap()
}
