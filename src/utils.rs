//! Small helpers shared by the binary and the library.

use tracing::info;

/// Number of leading characters of a secret that may appear in logs.
const VISIBLE_SECRET_CHARS: usize = 8;

/// Shorten a secret for logging: the first 8 characters followed by `...`.
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(VISIBLE_SECRET_CHARS).collect();
    format!("{prefix}...")
}

/// Resolves when the process receives Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
