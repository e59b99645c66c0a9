use std::fmt;

use clap::Args;
use comfy_table::Table;

use common::index::DocMeta;
use fastdoc_daemon::http_server::api::client::ApiError;
use fastdoc_daemon::http_server::api::v0::docs::{ListRequest, ListResponse};

#[derive(Args, Debug, Clone)]
pub struct Ls;

#[derive(Debug)]
pub struct LsOutput {
    pub docs: Vec<DocMeta>,
}

impl fmt::Display for LsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.docs.is_empty() {
            return write!(f, "No documents found");
        }

        let mut table = Table::new();
        table.set_header(vec!["NAME", "PATH", "TYPE", "MODIFIED"]);
        for doc in &self.docs {
            table.add_row(vec![
                doc.name.clone(),
                doc.path.clone(),
                doc.ext.clone(),
                format_mtime(doc.mtime),
            ]);
        }
        write!(f, "{table}")
    }
}

fn format_mtime(mtime: u64) -> String {
    chrono::DateTime::from_timestamp_millis(mtime as i64)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum LsError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Ls {
    type Error = LsError;
    type Output = LsOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();
        let response: ListResponse = client.call(ListRequest {}).await?;

        Ok(LsOutput {
            docs: response.docs,
        })
    }
}
