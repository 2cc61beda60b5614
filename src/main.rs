use anyhow::Result;
use clap::Parser;
use creatilink_client::{app, cli::Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    app::run(cli)
}
