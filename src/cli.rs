mod api;
mod fetch;

use clap::{Parser, Subcommand};

pub use self::fetch::fetch;
use crate::cli::{api::ApiArgs, fetch::FetchArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the prices and print them per area.
    #[clap(name = "fetch")]
    Fetch(Box<FetchArgs>),

    /// List the known bidding areas.
    #[clap(name = "areas")]
    Areas,
}
