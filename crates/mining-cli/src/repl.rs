//! Interactive loops: strategist chat and the analyst REPL

use crate::{print_reply, render};
use mining_agent::{Command, Shell, ShellAction, ShellError};
use mining_agent::shell::HELP_TEXT;
use mining_core::ChatRole;
use std::io::{self, BufRead, Write};
use tracing::warn;

const CHAT_BANNER: &str = "\
Mining Industry AI Agent
Ask about mining companies, markets and strategy. Type /exit to leave.
";

const ANALYST_BANNER: &str = "\
Mining Industry Analyst
Type a question, or /help for commands.
";

/// Read one line; `None` on end of input
fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// Free-text chat with the tool-using strategist
pub async fn run_chat(shell: &mut Shell) -> anyhow::Result<()> {
    println!("{CHAT_BANNER}");

    while let Some(input) = read_line("user> ")? {
        if input.is_empty() {
            continue;
        }
        if matches!(input.as_str(), "/exit" | "/quit") {
            break;
        }

        match shell.handle(ShellAction::Chat(input)).await {
            Ok(reply) => println!("{}\n", render::bubble(ChatRole::Assistant, &reply.text())),
            Err(e) => report(&e),
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Analyst session: free-text queries plus slash commands
pub async fn run_analyst(shell: &mut Shell) -> anyhow::Result<()> {
    println!("{ANALYST_BANNER}");

    while let Some(input) = read_line("user> ")? {
        if input.is_empty() {
            continue;
        }

        let command = match Command::parse(&input) {
            Ok(command) => command,
            Err(e) => {
                report(&e);
                continue;
            }
        };

        let action = match command {
            Command::Exit => break,
            Command::Help => {
                println!("{HELP_TEXT}\n");
                continue;
            }
            Command::History => {
                println!("{}\n", render::history(shell.history()));
                continue;
            }
            Command::Analyze(request) => {
                println!("Running {} analysis...", request.analysis_type());
                ShellAction::Analyze(request)
            }
            Command::Lookup(symbol) => ShellAction::Lookup(symbol),
            Command::Query(query) => ShellAction::Ask {
                query,
                context: None,
            },
        };

        match shell.handle(action).await {
            Ok(reply) => {
                print_reply(&reply, false)?;
                println!();
            }
            Err(e) => report(&e),
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn report(error: &ShellError) {
    warn!("Action refused: {error}");
    eprintln!("Error: {error}\n");
}
