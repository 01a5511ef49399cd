//! Interactive command input.
//!
//! Reads line-oriented commands from stdin and hands them to the session.
//! Grammar:
//!
//! ```text
//! force <host> <load>    pin an instance's load
//! reset <host>           clear the pin
//! start                  start the fleet
//! stop                   stop the fleet
//! join                   look up an instance to join (player variant)
//! quit                   exit the dashboard
//! ```

use tokio::io::AsyncBufReadExt;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

/// A parsed operator/player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ForceSet { host: String, load: u32 },
    Reset { host: String },
    StartFleet,
    StopFleet,
    Join,
    Quit,
}

/// Parse one input line. Blank lines yield no command.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };

    let command = match word {
        "force" => {
            let host = parts
                .next()
                .ok_or("usage: force <host> <load>")?
                .to_string();
            let load = parts
                .next()
                .ok_or("usage: force <host> <load>")?
                .parse::<u32>()
                .map_err(|e| format!("load must be an integer: {e}"))?;
            Command::ForceSet { host, load }
        }
        "reset" => Command::Reset {
            host: parts.next().ok_or("usage: reset <host>")?.to_string(),
        },
        "start" => Command::StartFleet,
        "stop" => Command::StopFleet,
        "join" => Command::Join,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other}")),
    };

    Ok(Some(command))
}

/// Read commands from stdin until it closes or shutdown is signalled.
pub async fn run_input_loop(commands: mpsc::Sender<Command>, mut shutdown: watch::Receiver<bool>) {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => match parse_command(&line) {
                    Ok(Some(command)) => {
                        if commands.send(command).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "Ignoring input line"),
                },
                Ok(None) => {
                    debug!("Stdin closed");
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read input");
                    break;
                }
            },
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    break;
                }
            }
        }
    }
}
