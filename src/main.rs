use clap::Parser;
use hippodrome::adapter::inbound::cli::command::{Cli, Commands};
use hippodrome::adapter::inbound::cli::{check, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run::execute(&args).await?,
        Commands::Check(args) => check::execute(&args)?,
    }

    Ok(())
}
