//! CID CLI - Command line tool for California infectious disease data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cid-cli",
    version,
    about = "California infectious disease dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: cid_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("cid-cli {}", env!("CARGO_PKG_VERSION"));
    cid_cmd::run(cli.command).await
}
