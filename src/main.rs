//! `mailflow` binary entrypoint.
//!
//! Loads configuration from environment variables, starts the HTTP server, and
//! on a termination signal drains in-flight flows within the grace period.

#![forbid(unsafe_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use mailflow::observability::init_logging;
use mailflow::{api, wait_for_shutdown_signal, Config, FlowRuntime, Subscribe};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_logging(config.log_format);

    #[cfg(feature = "logging")]
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(mailflow::LogWriter::new())];
    #[cfg(not(feature = "logging"))]
    let subs: Vec<Arc<dyn Subscribe>> = Vec::new();

    let runtime = FlowRuntime::builder(config.clone())
        .with_subscribers(subs)
        .build();

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    tracing::info!(
        %addr,
        max_delay = ?config.limits.delay_limit(),
        max_messages = ?config.limits.message_limit(),
        "mailflow listening"
    );

    api::serve(listener, Arc::clone(&runtime), shutdown_signal())
        .await
        .context("http server error")?;

    if let Err(err) = runtime.shutdown().await {
        tracing::warn!(label = err.as_label(), error = %err, "shutdown incomplete");
        return Err(err.into());
    }
    Ok(())
}

async fn shutdown_signal() {
    match wait_for_shutdown_signal().await {
        Ok(signal) => tracing::info!(signal, "termination signal received; draining flows"),
        Err(err) => {
            tracing::error!(error = %err, "failed to install signal handlers; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
