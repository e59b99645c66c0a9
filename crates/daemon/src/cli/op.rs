use std::fmt::Display;
use std::path::PathBuf;

use url::Url;

use fastdoc_daemon::http_server::api::client::ApiClient;
use fastdoc_daemon::state::{AppState, DEFAULT_API_PORT};

/// Shared context handed to every CLI operation.
#[derive(Debug, Clone)]
pub struct OpContext {
    /// Override for the fastdoc directory (defaults to `~/.fastdoc`)
    pub config_path: Option<PathBuf>,
    /// Client pointed at the daemon API
    pub client: ApiClient,
}

impl OpContext {
    /// Builds the context from the global CLI flags.
    ///
    /// An explicit `--remote` URL wins; otherwise the configured API
    /// port is used, falling back to the default port when fastdoc has
    /// not been initialized yet.
    pub fn new(config_path: Option<PathBuf>, remote: Option<Url>) -> anyhow::Result<Self> {
        let remote = match remote {
            Some(url) => url,
            None => {
                let api_port = AppState::load(config_path.clone())
                    .map(|state| state.config.api_port)
                    .unwrap_or(DEFAULT_API_PORT);
                Url::parse(&format!("http://localhost:{}", api_port))?
            }
        };
        let client = ApiClient::new(&remote)?;

        Ok(Self {
            config_path,
            client,
        })
    }
}

/// A single CLI operation: parsed arguments in, displayable output
/// out. Errors must be real error types so the runner can wrap them
/// uniformly.
#[async_trait::async_trait]
pub trait Op {
    type Error: std::error::Error + Send + Sync + 'static;
    type Output: Display + Send;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}
