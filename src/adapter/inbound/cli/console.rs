//! Line console on stdin.
//!
//! One command per line:
//!
//! ```text
//! start
//! pause
//! status
//! balance <token>
//! bet <token> <participant> <amount>
//! help
//! quit
//! ```
//!
//! `start` and `pause` use the console's admin token. Every reply is one
//! line; failures are reported as `error: ...` and never end the console.
//!
//! The binary reads stdin on its own OS thread ([`spawn_line_reader`]) and
//! feeds the console through a channel. A blocked read then never holds up
//! runtime shutdown.

use std::io::BufRead;
use std::str::FromStr;
use std::sync::Arc;
use std::thread;

use rust_decimal::Decimal;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::application::desk::RaceDesk;
use crate::domain::ParticipantId;
use crate::error::Result;

const HELP: &str =
    "commands: start | pause | status | balance <token> | bet <token> <participant> <amount> | quit";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Start,
    Pause,
    Status,
    Balance {
        token: String,
    },
    Bet {
        token: String,
        participant: ParticipantId,
        amount: Decimal,
    },
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["start"] => Ok(Self::Start),
            ["pause"] => Ok(Self::Pause),
            ["status"] => Ok(Self::Status),
            ["balance", token] => Ok(Self::Balance {
                token: (*token).to_string(),
            }),
            ["bet", token, participant, amount] => {
                let amount = amount
                    .parse::<Decimal>()
                    .map_err(|_| format!("not an amount: {amount}"))?;
                Ok(Self::Bet {
                    token: (*token).to_string(),
                    participant: ParticipantId::from(*participant),
                    amount,
                })
            }
            ["help"] => Ok(Self::Help),
            ["quit"] | ["exit"] => Ok(Self::Quit),
            _ => Err(format!("unknown command: {}", line.trim())),
        }
    }
}

/// Why the console stopped reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleExit {
    Quit,
    EndOfInput,
}

/// Console bound to a race desk.
pub struct Console {
    desk: Arc<RaceDesk>,
    admin_token: Option<String>,
}

impl Console {
    pub fn new(desk: Arc<RaceDesk>, admin_token: Option<String>) -> Self {
        Self { desk, admin_token }
    }

    /// Read commands until `quit` or end of input.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> Result<ConsoleExit>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if !self.respond(&line, &mut output).await? {
                return Ok(ConsoleExit::Quit);
            }
        }
        Ok(ConsoleExit::EndOfInput)
    }

    /// Like [`Console::run`], over lines delivered by a channel.
    ///
    /// The input ends when every sender is gone.
    pub async fn serve<W>(
        &self,
        mut lines: mpsc::UnboundedReceiver<String>,
        mut output: W,
    ) -> Result<ConsoleExit>
    where
        W: AsyncWrite + Unpin,
    {
        while let Some(line) = lines.recv().await {
            if !self.respond(&line, &mut output).await? {
                return Ok(ConsoleExit::Quit);
            }
        }
        Ok(ConsoleExit::EndOfInput)
    }

    /// Answer one line. Returns false on `quit`.
    async fn respond<W>(&self, line: &str, output: &mut W) -> Result<bool>
    where
        W: AsyncWrite + Unpin,
    {
        if line.trim().is_empty() {
            return Ok(true);
        }
        let reply = match line.parse::<ConsoleCommand>() {
            Ok(ConsoleCommand::Quit) => return Ok(false),
            Ok(command) => self.execute(command).await,
            Err(err) => format!("error: {err}"),
        };
        output.write_all(reply.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
        Ok(true)
    }

    /// Run one command and render the reply.
    pub async fn execute(&self, command: ConsoleCommand) -> String {
        debug!(?command, "Console command");
        let admin = self.admin_token.as_deref().unwrap_or_default();
        let reply = match command {
            ConsoleCommand::Start => self
                .desk
                .start(admin)
                .await
                .map(|()| "Race cycle started".to_string()),
            ConsoleCommand::Pause => self
                .desk
                .pause(admin)
                .await
                .map(|outcome| outcome.message().to_string()),
            ConsoleCommand::Status => self.desk.status(admin).await.and_then(|status| {
                serde_json::to_string(&status).map_err(Into::into)
            }),
            ConsoleCommand::Balance { token } => self
                .desk
                .balance(&token)
                .await
                .map(|balance| format!("balance: {balance}")),
            ConsoleCommand::Bet {
                token,
                participant,
                amount,
            } => self
                .desk
                .place_bet(&token, &participant, amount)
                .await
                .map(|bet| format!("bet accepted: {} on {}", bet.amount, bet.participant)),
            ConsoleCommand::Help => Ok(HELP.to_string()),
            ConsoleCommand::Quit => Ok(String::new()),
        };
        reply.unwrap_or_else(|err| format!("error: {err}"))
    }
}

/// Read `input` line by line on a dedicated thread.
///
/// The thread stops at end of input, on a read error, or once the receiver
/// is dropped. It is detached, so a read blocked on a terminal does not keep
/// the process alive after shutdown.
pub fn spawn_line_reader<R>(input: R) -> std::io::Result<mpsc::UnboundedReceiver<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    thread::Builder::new()
        .name("console-input".into())
        .spawn(move || {
            for line in input.lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "Console input failed");
                        break;
                    }
                }
            }
            debug!("Console input closed");
        })?;
    Ok(rx)
}
