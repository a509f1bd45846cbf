//! Handler for the `run` command.

use tokio::io::{stdout, AsyncWriteExt};
use tokio::signal;
use tracing::{info, warn};

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::console::{spawn_line_reader, Console, ConsoleExit};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Environment variable holding the console's admin token.
pub const ADMIN_TOKEN_ENV: &str = "HIPPODROME_ADMIN_TOKEN";

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    config.init_logging();
    info!("hippodrome starting");

    let house = bootstrap::assemble(&config);

    if args.events {
        let mut feed = house.events.subscribe();
        tokio::spawn(async move {
            let mut out = stdout();
            loop {
                match feed.recv().await {
                    Ok(event) => {
                        let Ok(line) = serde_json::to_string(&event) else {
                            continue;
                        };
                        if out.write_all(format!("{line}\n").as_bytes()).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Event printer lagged");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    if args.autostart {
        house.engine.start().await?;
    }

    let console = Console::new(house.desk.clone(), admin_token(args, &config));
    let lines = spawn_line_reader(std::io::BufReader::new(std::io::stdin()))?;
    tokio::select! {
        exit = console.serve(lines, stdout()) => {
            if exit? == ConsoleExit::EndOfInput {
                info!("Console closed, running until interrupted");
                signal::ctrl_c().await?;
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    house.shutdown();
    info!("hippodrome stopped");
    Ok(())
}

fn admin_token(args: &RunArgs, config: &Config) -> Option<String> {
    args.admin_token
        .clone()
        .or_else(|| std::env::var(ADMIN_TOKEN_ENV).ok())
        .or_else(|| {
            config
                .identities
                .iter()
                .find(|identity| identity.admin)
                .map(|identity| identity.token.clone())
        })
}
