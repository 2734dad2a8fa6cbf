//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceExt;

use algorate_api_test::api::{create_router, AppState};
use algorate_api_test::clock::FixedClock;
use algorate_api_test::config::Config;
use algorate_api_test::probe::Prober;

/// 2025-03-09 10:00:00 UTC, so the test date is 10/03/2025.
pub fn test_clock() -> FixedClock {
    FixedClock::ymd_hms(2025, 3, 9, 10, 0, 0)
}

pub const TEST_DATE: &str = "10/03/2025";

/// Config pointing the probe at `api_base`.
pub fn config_for(api_base: &str, timeout_secs: u64) -> Config {
    Config {
        punting_form_api_base: api_base.to_string(),
        punting_form_api_key: "secret-key-123".to_string(),
        probe_timeout_secs: timeout_secs,
        ..Config::default()
    }
}

pub fn prober_for(api_base: &str, timeout_secs: u64) -> Prober {
    let config = config_for(api_base, timeout_secs);
    Prober::new(config.probe_settings(&test_clock())).expect("prober builds")
}

pub fn router_for(api_base: &str, timeout_secs: u64) -> Router {
    let config = config_for(api_base, timeout_secs);
    let clock = Arc::new(test_clock());
    let prober = Prober::new(config.probe_settings(&*clock)).expect("prober builds");
    create_router(AppState::new(&config, prober, clock))
}

/// GET `uri` and return status plus body text.
pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// A server that accepts connections and never answers.
pub async fn silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
        tokio::time::sleep(Duration::from_secs(60)).await;
    });
    addr
}

/// An address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// A server that accepts each connection and closes it without answering.
pub async fn hangup_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });
    addr
}

/// A server that answers every connection with bytes that are not HTTP.
pub async fn garbage_server() -> SocketAddr {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(b"GARBAGE\r\n\r\n").await;
            let _ = socket.shutdown().await;
        }
    });
    addr
}
