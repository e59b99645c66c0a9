use std::fmt;
use std::path::PathBuf;

use clap::Args;
use owo_colors::OwoColorize;

use fastdoc_daemon::http_server::health::version::VersionRequest;
use fastdoc_daemon::state::AppState;

#[derive(Args, Debug, Clone)]
pub struct Health;

#[derive(Debug)]
pub struct ConfigInfo {
    pub directory: PathBuf,
    pub docs_dir: PathBuf,
    pub docs_dir_exists: bool,
    pub api_port: u16,
}

#[derive(Debug)]
pub enum EndpointStatus {
    Ok,
    Unhealthy(String),
    NotReachable,
}

#[derive(Debug)]
pub struct DaemonInfo {
    pub url: String,
    pub livez: EndpointStatus,
    pub version: Option<String>,
}

#[derive(Debug)]
pub struct HealthOutput {
    pub config: Option<ConfigInfo>,
    pub config_error: Option<String>,
    pub daemon: DaemonInfo,
}

impl fmt::Display for HealthOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", "Config".bold())?;
        match &self.config {
            Some(info) => {
                writeln!(
                    f,
                    "  {} {}",
                    "directory:".dimmed(),
                    info.directory.display()
                )?;
                writeln!(f, "  {} {}", "config.toml:".dimmed(), "OK".green())?;
                let docs_status = if info.docs_dir_exists {
                    "OK".green().to_string()
                } else {
                    "MISSING".red().to_string()
                };
                writeln!(
                    f,
                    "  {} {} ({})",
                    "docs dir:".dimmed(),
                    info.docs_dir.display(),
                    docs_status
                )?;
                writeln!(f, "  {} {}", "api_port:".dimmed(), info.api_port)?;
            }
            None => {
                if let Some(err) = &self.config_error {
                    writeln!(f, "  {} {}", "error:".red(), err)?;
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "{} ({}):", "Daemon".bold(), self.daemon.url)?;

        let livez_str = match &self.daemon.livez {
            EndpointStatus::Ok => "OK".green().to_string(),
            EndpointStatus::Unhealthy(code) => format!("{} ({})", "UNHEALTHY".red(), code),
            EndpointStatus::NotReachable => "NOT REACHABLE".red().to_string(),
        };
        writeln!(f, "  {} {}", "livez:".dimmed(), livez_str)?;

        match &self.daemon.version {
            Some(version) => write!(f, "  {} {}", "version:".dimmed(), version),
            None => write!(
                f,
                "  {} {}",
                "version:".dimmed(),
                "NOT REACHABLE".red()
            ),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("health check failed: {0}")]
    Failed(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Health {
    type Error = HealthError;
    type Output = HealthOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (config, config_error) = match AppState::load(ctx.config_path.clone()) {
            Ok(state) => (
                Some(ConfigInfo {
                    directory: state.app_dir,
                    docs_dir_exists: state.docs_dir.is_dir(),
                    docs_dir: state.docs_dir,
                    api_port: state.config.api_port,
                }),
                None,
            ),
            Err(e) => (None, Some(e.to_string())),
        };

        let base = ctx.client.base_url().clone();
        let client = ctx.client.http_client().clone();

        let livez_url = format!("{}/_status/livez", base.as_str().trim_end_matches('/'));
        let livez = match client.get(&livez_url).send().await {
            Ok(resp) if resp.status().is_success() => EndpointStatus::Ok,
            Ok(resp) => EndpointStatus::Unhealthy(resp.status().to_string()),
            Err(_) => EndpointStatus::NotReachable,
        };

        let mut api = ctx.client.clone();
        let version = api
            .call(VersionRequest {})
            .await
            .ok()
            .map(|info| info.to_string());

        Ok(HealthOutput {
            config,
            config_error,
            daemon: DaemonInfo {
                url: base.to_string(),
                livez,
                version,
            },
        })
    }
}
