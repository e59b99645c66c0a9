use std::fmt;

use clap::Args;
use owo_colors::OwoColorize;

use fastdoc_daemon::http_server::api::client::ApiError;
use fastdoc_daemon::http_server::api::v0::docs::{DeleteRequest, DeleteResponse};

#[derive(Args, Debug, Clone)]
pub struct Rm {
    #[command(flatten)]
    pub request: DeleteRequest,
}

#[derive(Debug)]
pub struct RmOutput {
    pub path: String,
}

impl fmt::Display for RmOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", "Deleted".green().bold(), self.path.bold())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RmError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Rm {
    type Error = RmError;
    type Output = RmOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let _response: DeleteResponse = client.call(self.request.clone()).await?;

        Ok(RmOutput {
            path: self.request.path.clone(),
        })
    }
}
