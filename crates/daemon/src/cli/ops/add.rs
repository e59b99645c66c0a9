use std::env;
use std::fmt;
use std::path::PathBuf;

use clap::Args;
use owo_colors::OwoColorize;

use fastdoc_daemon::http_server::api::client::ApiError;
use fastdoc_daemon::http_server::api::v0::docs::{RegisterRequest, RegisterResponse};

#[derive(Args, Debug, Clone)]
pub struct Add {
    /// Markdown or HTML file to copy into the docs directory
    pub path: String,
}

#[derive(Debug)]
pub struct AddOutput {
    pub path: String,
    pub name: String,
}

impl fmt::Display for AddOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", "Added".green().bold(), self.name.bold())?;
        write!(f, "  {} {}", "path:".dimmed(), self.path)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AddError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Add {
    type Error = AddError;
    type Output = AddOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();

        // Resolve against this process's working directory, not the
        // daemon's
        let path = PathBuf::from(&self.path);
        let absolute_path = if path.is_absolute() {
            path
        } else {
            env::current_dir()?.join(&path)
        };

        let request = RegisterRequest {
            source_path: absolute_path.display().to_string(),
        };
        let response: RegisterResponse = client.call(request).await?;

        Ok(AddOutput {
            path: response.path,
            name: response.name,
        })
    }
}
