use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Create a `CancellationToken` and spawn a task that cancels it on
/// SIGINT or SIGTERM. The HTTP server and the dispatcher run loop each
/// hold a clone; cancellation stops accepting requests and drains any
/// queued creation events.
pub fn create_shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let signal = shutdown_signal().await;
        info!(signal, "shutdown requested, stopping alert dispatch");
        token_clone.cancel();
    });

    token
}

/// Wait for SIGINT or SIGTERM, returning the name of whichever arrived
/// first.
async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    }
}
