use anyhow::Result;
use blackstar_lib::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
  blackstar_lib::init_tracing();
  blackstar_lib::run(Cli::parse()).await
}
