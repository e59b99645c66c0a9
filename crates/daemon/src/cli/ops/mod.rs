pub mod add;
pub mod cat;
pub mod daemon;
pub mod health;
pub mod init;
pub mod ls;
pub mod rm;
pub mod search;
pub mod version;

pub use add::Add;
pub use cat::Cat;
pub use daemon::Daemon;
pub use health::Health;
pub use init::Init;
pub use ls::Ls;
pub use rm::Rm;
pub use search::Search;
pub use version::Version;
