use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Args;

use fastdoc_daemon::state::AppState;
use fastdoc_daemon::{spawn_service, ServiceConfig, ServiceError};

/// Run the document server in the foreground.
#[derive(Args, Debug, Clone)]
pub struct Daemon {
    /// Override the API port from config
    #[arg(long, env = "FASTDOC_PORT")]
    pub port: Option<u16>,

    /// Address to bind the API on
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Override the documents directory from config
    #[arg(long)]
    pub docs_dir: Option<PathBuf>,

    /// Override the assets directory from config
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,

    /// Write rolling daily logs to this directory instead of stdout
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("state error: {0}")]
    State(#[from] fastdoc_daemon::state::StateError),

    #[error("daemon failed: {0}")]
    Service(#[from] ServiceError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Daemon {
    type Error = DaemonError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let state = AppState::load(ctx.config_path.clone())?;

        let api_port = self.port.unwrap_or(state.config.api_port);
        let docs_dir = self.docs_dir.clone().unwrap_or(state.docs_dir);
        let assets_dir = self.assets_dir.clone().or(state.config.assets_dir);

        let config = ServiceConfig {
            api_listen_addr: SocketAddr::new(self.host, api_port),
            docs_dir,
            assets_dir,
            log_level: self.log_level,
            log_dir: self.log_dir.clone(),
        };

        spawn_service(&config).await?;
        Ok("daemon stopped".to_string())
    }
}
