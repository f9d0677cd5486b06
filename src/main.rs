mod cli;
mod prelude;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, fetch},
    prelude::*,
    tables::build_areas_table,
};

#[tokio::main]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();

    match args.command {
        Command::Fetch(fetch_args) => {
            fetch(&args.api, &fetch_args).await?;
        }
        Command::Areas => {
            println!("{}", build_areas_table());
        }
    }

    info!("done!");
    Ok(())
}
