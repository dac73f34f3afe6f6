//! HTTP server for flashdeck.
//!
//! This module wires the deck and card services to an axum router and runs
//! it on a tokio TCP listener until a shutdown signal arrives.

mod extract;
mod routes;

use std::future::Future;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::Result;

pub use extract::decode_envelope;
pub use routes::{router, AppState, Data};

/// Serve the API on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish before this returns.
///
/// # Errors
///
/// Returns an error if the listener address cannot be read or the server
/// fails while accepting connections.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(addr = %addr, "flashdeck HTTP server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("flashdeck HTTP server stopped");
    Ok(())
}

/// Resolve when the process receives Ctrl-C.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(e) => {
            error!("Failed to listen for Ctrl-C: {}", e);
            // Never shut down on our own if the signal can't be observed.
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::store::Store;

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        crate::logging::init_test_logging();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let state = AppState::new(Arc::new(Store::new()));

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(serve(listener, state, async {
            let _ = rx.await;
        }));

        tx.send(()).unwrap();
        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_serve_answers_requests() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = AppState::new(Arc::new(Store::new()));

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(serve(listener, state, async {
            let _ = rx.await;
        }));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /decks HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with(r#"{"data":[]}"#));

        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }
}
