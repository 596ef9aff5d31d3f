use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use cms::process::ServiceError;
use cms::state::{AppState, StateError};
use cms::{spawn_service, ServiceConfig};

#[derive(Args, Debug, Clone)]
pub struct Serve {
    /// Override the HTML server port from config.toml
    #[arg(long)]
    pub port: Option<u16>,

    /// Override the document directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Override the credential file
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("state error: {0}")]
    State(#[from] StateError),

    #[error("service failed: {0}")]
    Service(#[from] ServiceError),
}

impl Serve {
    fn service_config(&self, state: AppState) -> ServiceConfig {
        let port = self.port.unwrap_or(state.config.app_port);

        ServiceConfig {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port),
            data_dir: self.data_dir.clone().unwrap_or(state.data_path),
            credentials_path: self.credentials.clone().unwrap_or(state.credentials_path),
            secure_cookies: state.config.secure_cookies,
            session_inactivity: Duration::from_secs(state.config.session_inactivity_secs),
            log_level: self.log_level,
        }
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Serve {
    type Error = ServeError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = AppState::load(ctx.config_path.clone())?;
        let config = self.service_config(state);

        spawn_service(&config).await?;
        Ok("service stopped".to_string())
    }
}
