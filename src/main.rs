mod api;
mod app;
mod cli;
mod config;
mod genres;
mod http;
mod logging;
mod model;
mod paths;

#[cfg(test)]
mod test_server;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logging::init(&cli)?;
    app::run(cli)
}
