pub mod op;
pub mod ops;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

use op::{Op, OpContext};

/// Generates the clap subcommand enum for a set of operations, plus
/// aggregate output and error enums that forward to whichever
/// operation matched.
#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $op:ty)),+ $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($op),)+
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$op as Op>::Output),)+
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(OpOutput::$variant(output) => std::fmt::Display::fmt(output, f),)+
                }
            }
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$op as Op>::Error),
            )+
        }

        #[async_trait::async_trait]
        impl Op for Command {
            type Error = OpError;
            type Output = OpOutput;

            async fn execute(
                &self,
                ctx: &$crate::cli::op::OpContext,
            ) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => op
                            .execute(ctx)
                            .await
                            .map(OpOutput::$variant)
                            .map_err(OpError::$variant),
                    )+
                }
            }
        }
    };
}

command_enum! {
    (Init, ops::init::Init),
    (Daemon, ops::daemon::Daemon),
    (Ls, ops::ls::Ls),
    (Search, ops::search::Search),
    (Add, ops::add::Add),
    (Cat, ops::cat::Cat),
    (Rm, ops::rm::Rm),
    (Health, ops::health::Health),
    (Version, ops::version::Version),
}

#[derive(Parser, Debug)]
#[command(
    name = "fastdoc",
    version,
    about = "Self-hosted documentation server for markdown and HTML files"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the fastdoc directory (defaults to ~/.fastdoc)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Base URL of the daemon API (defaults to the configured local port)
    #[arg(long, global = true, env = "FASTDOC_REMOTE")]
    pub remote: Option<Url>,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let ctx = OpContext::new(cli.config_path.clone(), cli.remote.clone())?;

    let output = cli
        .command
        .execute(&ctx)
        .await
        .map_err(anyhow::Error::new)?;
    println!("{output}");

    Ok(())
}
