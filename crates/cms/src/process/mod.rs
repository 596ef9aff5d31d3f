mod utils;

use std::time::Duration;

use tokio::time::timeout;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::http_server;
use crate::session_store;
use crate::{ServiceConfig, ServiceState};

const FINAL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("failed to set up service state: {0}")]
    State(#[from] crate::service_state::StateSetupError),
    #[error("failed to install signal handlers: {0}")]
    Signals(std::io::Error),
    #[error("http server failed: {0}")]
    Http(#[from] http_server::HttpServerError),
    #[error("http server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("failed to shut down within {} seconds", FINAL_SHUTDOWN_TIMEOUT.as_secs())]
    ShutdownTimeout,
}

/// Run the document service until SIGINT or SIGTERM.
pub async fn spawn_service(service_config: &ServiceConfig) -> Result<(), ServiceError> {
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let env_filter = EnvFilter::builder()
        .with_default_directive(service_config.log_level.into())
        .from_env_lossy();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stdout_layer).init();

    utils::register_panic_logger();
    utils::report_build_info();

    let state = ServiceState::from_config(service_config).map_err(|e| {
        tracing::error!("error creating server state: {}", e);
        e
    })?;

    let (graceful_waiter, shutdown_rx) =
        utils::graceful_shutdown_blocker().map_err(ServiceError::Signals)?;

    let http_config = http_server::Config::new(
        service_config.listen_addr,
        service_config.secure_cookies,
        service_config.session_inactivity,
    );
    tokio::spawn(session_store::reap_expired(
        state.sessions().clone(),
        session_store::REAP_INTERVAL,
        shutdown_rx.clone(),
    ));

    let mut http_handle = tokio::spawn(async move {
        tracing::info!("Starting HTML server on {}", http_config.listen_addr);
        http_server::run(http_config, state, shutdown_rx).await
    });

    // the server only returns on its own when it failed to bind or serve
    tokio::select! {
        result = &mut http_handle => {
            return match result? {
                Ok(()) => Ok(()),
                Err(e) => {
                    tracing::error!("HTML server error: {}", e);
                    Err(e.into())
                }
            };
        }
        _ = graceful_waiter => {}
    }

    match timeout(FINAL_SHUTDOWN_TIMEOUT, http_handle).await {
        Ok(result) => Ok(result??),
        Err(_) => {
            tracing::error!(
                "Failed to shut down within {} seconds",
                FINAL_SHUTDOWN_TIMEOUT.as_secs()
            );
            Err(ServiceError::ShutdownTimeout)
        }
    }
}
