use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime configuration for a fastdoc service instance.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP API binds to
    pub api_listen_addr: SocketAddr,

    /// Directory of documents to watch and serve (the sandbox root)
    pub docs_dir: PathBuf,

    /// Optional directory of static web UI assets
    pub assets_dir: Option<PathBuf>,

    /// Log verbosity for the daemon process
    pub log_level: tracing::Level,

    /// Optional directory for rolling file logs
    pub log_dir: Option<PathBuf>,
}
