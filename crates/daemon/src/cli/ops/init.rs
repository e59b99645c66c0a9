use std::fmt;
use std::path::PathBuf;

use clap::Args;
use owo_colors::OwoColorize;

use fastdoc_daemon::state::{AppConfig, AppState, DEFAULT_API_PORT};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Port the HTTP API listens on
    #[arg(long, default_value_t = DEFAULT_API_PORT)]
    pub api_port: u16,

    /// Documents directory (defaults to <fastdoc dir>/docs)
    #[arg(long)]
    pub docs_dir: Option<PathBuf>,

    /// Directory of static web UI assets served at the root
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub struct InitOutput {
    pub app_dir: PathBuf,
    pub docs_dir: PathBuf,
    pub config_path: PathBuf,
    pub api_port: u16,
}

impl fmt::Display for InitOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} fastdoc at {}",
            "Initialized".green().bold(),
            self.app_dir.display().to_string().bold()
        )?;
        writeln!(f, "  {} {}", "Docs:".dimmed(), self.docs_dir.display())?;
        writeln!(f, "  {} {}", "Config:".dimmed(), self.config_path.display())?;
        write!(f, "  {} {}", "API port:".dimmed(), self.api_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] fastdoc_daemon::state::StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = InitOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            api_port: self.api_port,
            docs_dir: self.docs_dir.clone(),
            assets_dir: self.assets_dir.clone(),
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        Ok(InitOutput {
            app_dir: state.app_dir,
            docs_dir: state.docs_dir,
            config_path: state.config_path,
            api_port: state.config.api_port,
        })
    }
}
