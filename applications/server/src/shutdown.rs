/// Graceful shutdown on process signals
use std::time::Duration;

/// Resolve once SIGINT, SIGTERM, SIGHUP or SIGQUIT arrives.
///
/// Only Ctrl-C is watched on platforms without Unix signals.
pub async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let unix_signal = |kind: SignalKind| async move {
            match signal(kind) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    tracing::error!("Failed to install signal handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            () = ctrl_c => {},
            () = unix_signal(SignalKind::terminate()) => {},
            () = unix_signal(SignalKind::hangup()) => {},
            () = unix_signal(SignalKind::quit()) => {},
        }
    }

    #[cfg(not(unix))]
    ctrl_c.await;
}

/// Shutdown future for `axum::serve(..).with_graceful_shutdown`.
///
/// After the signal, in-flight requests get `deadline` to drain; past it the
/// process exits with status 1.
pub async fn graceful(deadline: Duration) {
    wait_for_signal().await;
    tracing::info!("Shutdown signal received, draining connections");

    tokio::spawn(async move {
        tokio::time::sleep(deadline).await;
        tracing::error!("Graceful shutdown timed out after {:?}, forcing exit", deadline);
        std::process::exit(1);
    });
}
