//! Service lifecycle: bind, serve, shut down.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::http_server;
use crate::service_config::Config;
use crate::service_state::{State, StateSetupError};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Setup(#[from] StateSetupError),

    #[error("failed to bind {0}: {1}")]
    Bind(SocketAddr, #[source] std::io::Error),
}

/// Handle over a running service. Dropping it without calling
/// [`ShutdownHandle::shutdown`] leaves the server running until the
/// process exits.
#[derive(Debug)]
pub struct ShutdownHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ShutdownHandle {
    /// Signals the server to stop accepting connections and drain.
    pub fn shutdown(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }
    }

    /// Waits for the serve task to finish.
    pub async fn wait(self) {
        let _ = self.task.await;
    }
}

/// Starts the document service and HTTP server, returning the live
/// state and a handle to stop it. The returned state already reflects
/// the initial scan of the docs directory.
pub async fn start_service(config: &Config) -> Result<(State, ShutdownHandle), ServiceError> {
    let state = State::from_config(config).await?;
    let app = http_server::router(state.clone(), config.assets_dir.as_deref());

    let listener = TcpListener::bind(config.api_listen_addr)
        .await
        .map_err(|e| ServiceError::Bind(config.api_listen_addr, e))?;
    let addr = listener
        .local_addr()
        .map_err(|e| ServiceError::Bind(config.api_listen_addr, e))?;
    tracing::info!(%addr, docs_dir = %state.docs_dir().display(), "fastdoc api listening");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await;
        if let Err(e) = result {
            tracing::error!(error = %e, "http server exited with an error");
        }
    });

    Ok((
        state,
        ShutdownHandle {
            shutdown: Some(shutdown_tx),
            task,
        },
    ))
}

/// Runs the service in the foreground until Ctrl-C.
pub async fn spawn_service(config: &Config) -> Result<(), ServiceError> {
    let _log_guard = init_tracing(config);

    let (_state, mut handle) = start_service(config).await?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
    handle.shutdown();
    handle.wait().await;

    Ok(())
}

/// Installs the global tracing subscriber. The returned guard must
/// stay alive for the duration of the process when file logging is
/// enabled, or buffered log lines are lost.
fn init_tracing(config: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(config.log_level.into());

    match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "fastdoc.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init();
            Some(guard)
        }
        None => {
            let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
            None
        }
    }
}
