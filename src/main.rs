use anyhow::Result;
use clap::Parser;
use cookie_cost::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
