// Service modules (daemon functionality)
pub mod http_server;
pub mod process;
pub mod service_config;
pub mod service_state;

// App state (configuration, paths)
pub mod state;

// Re-exports for consumers
pub use process::{spawn_service, start_service, ServiceError, ShutdownHandle};
pub use service_config::Config as ServiceConfig;
pub use service_state::{State as ServiceState, StateSetupError};
pub use state::{AppConfig, AppState, StateError};

/// Daemon-specific build info that uses the daemon's BUILD_TIMESTAMP.
///
/// This is needed because `common::version::BuildInfo::new()` reads
/// BUILD_TIMESTAMP from common's compile environment, not daemon's.
pub fn build_info() -> common::version::BuildInfo {
    let mut info = common::version::BuildInfo::new();
    // Override with daemon's build stamp
    info.version = env!("CARGO_PKG_VERSION").to_string();
    info.build_timestamp = option_env!("BUILD_TIMESTAMP").unwrap_or("unknown").to_string();
    info.build_profile = option_env!("BUILD_PROFILE").unwrap_or("unknown").to_string();
    info
}
