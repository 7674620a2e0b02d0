//! Interactive shell mode for TravelX CLI
//!
//! Provides a REPL with command history and tab completion. All commands in
//! one session share the destination and the assistant quota flag.

use anyhow::Result;
use clap::Parser;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Config, Editor, Helper};

use super::output::print_error;
use super::{dispatch, Cli, Commands, Session};

/// Command completer for the shell
#[derive(Default)]
struct ShellCompleter {
    commands: Vec<(&'static str, Vec<&'static str>)>,
}

impl ShellCompleter {
    fn new() -> Self {
        Self {
            commands: vec![
                ("go", vec![]),
                ("where", vec![]),
                ("weather", vec![]),
                ("images", vec![]),
                ("activities", vec![]),
                ("ask", vec![]),
                ("config", vec!["show", "get", "set", "path"]),
                ("help", vec![]),
                ("exit", vec![]),
                ("quit", vec![]),
            ],
        }
    }

    fn pairs<'a>(items: impl Iterator<Item = &'a &'static str>) -> Vec<Pair> {
        items
            .map(|item| Pair {
                display: item.to_string(),
                replacement: item.to_string(),
            })
            .collect()
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let words: Vec<&str> = line.split_whitespace().collect();
        let start = line.rfind(' ').map(|i| i + 1).unwrap_or(0);

        match words.as_slice() {
            [] => Ok((0, Self::pairs(self.commands.iter().map(|(cmd, _)| cmd)))),
            [cmd] if line.ends_with(' ') => {
                // Command complete, suggest subcommands
                let subs = self
                    .commands
                    .iter()
                    .find(|(c, _)| c == cmd)
                    .map(|(_, subs)| Self::pairs(subs.iter()))
                    .unwrap_or_default();
                Ok((pos, subs))
            }
            [prefix] => Ok((
                start,
                Self::pairs(
                    self.commands
                        .iter()
                        .map(|(cmd, _)| cmd)
                        .filter(|cmd| cmd.starts_with(prefix)),
                ),
            )),
            [cmd, prefix] if !line.ends_with(' ') => {
                let subs = self
                    .commands
                    .iter()
                    .find(|(c, _)| c == cmd)
                    .map(|(_, subs)| Self::pairs(subs.iter().filter(|sub| sub.starts_with(prefix))))
                    .unwrap_or_default();
                Ok((start, subs))
            }
            _ => Ok((pos, vec![])),
        }
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for ShellCompleter {}
impl Validator for ShellCompleter {}
impl Helper for ShellCompleter {}

/// Parse a command line into arguments, handling quotes
fn parse_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quote_char = ' ';

    for c in line.chars() {
        match c {
            '"' | '\'' if !in_quotes => {
                in_quotes = true;
                quote_char = c;
            }
            c if c == quote_char && in_quotes => {
                in_quotes = false;
            }
            ' ' if !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => {
                current.push(c);
            }
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}

/// Run a single command in the shell.
/// Returns Ok(true) to continue, Ok(false) to exit gracefully.
async fn run_command(args: Vec<String>, session: &mut Session) -> Result<bool> {
    let Some(cmd) = args.first() else {
        return Ok(true);
    };

    // Handle shell built-in commands
    match cmd.as_str() {
        "help" => {
            print_help();
            return Ok(true);
        }
        "exit" | "quit" => {
            return Ok(false);
        }
        "where" => {
            println!("{}", session.destination.read());
            return Ok(true);
        }
        "go" => {
            let city = args[1..].join(" ");
            if city.trim().is_empty() {
                println!("Usage: go <city>");
            } else {
                session.destination.write(city.trim());
                println!("Destination set to {}", city.trim());
            }
            return Ok(true);
        }
        _ => {}
    }

    // Build a fake argv for clap: ["travelx", ...args]
    let mut argv: Vec<String> = vec!["travelx".to_string()];
    argv.extend(args);

    let cli = match Cli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            // Print clap's error message (includes usage hints)
            println!("{}", e);
            return Ok(true);
        }
    };

    match cli.command {
        Some(Commands::Shell) => println!("Already in shell mode."),
        Some(command) => dispatch(command, session, &cli.output).await?,
        None => print_help(),
    }

    Ok(true)
}

fn print_help() {
    println!(
        r#"TravelX Interactive Shell

Commands:
  go <city>                  Set the destination
  where                      Show the destination

  weather [city]             Current weather (add --fahrenheit for °F)
  images [query]             Photo search (--limit N)
  activities [city]          Things to do
  ask <question>             Ask the travel assistant

  config show                Show current configuration
  config get <key>           Get a specific setting
  config set <key> <value>   Set a configuration value
  config path                Show config file path

  help                       Show this help
  exit, quit                 Exit the shell

Commands without a city use the destination; naming a city also makes it
the destination.

Flags (can be added to any command):
  --json                     Output in JSON format
  --quiet, -q                Suppress non-essential output
"#
    );
}

/// Get the history file path
fn history_path() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("com", "travelx", "TravelX")
        .map(|dirs| dirs.data_dir().join("shell_history"))
}

/// Run the interactive shell
pub async fn run(session: &mut Session) -> Result<()> {
    println!("TravelX Interactive Shell v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for available commands, 'exit' to quit.\n");

    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(ShellCompleter::new()));

    if let Some(path) = history_path() {
        let _ = rl.load_history(&path);
    }

    loop {
        let prompt = format!("travelx [{}]> ", session.destination.read());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                rl.add_history_entry(line)?;

                let args = parse_args(line);
                match run_command(args, session).await {
                    Ok(true) => continue,
                    Ok(false) => break,
                    Err(e) => print_error(&format!("{:#}", e)),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                print_error(&format!("{:?}", err));
                break;
            }
        }
    }

    if let Some(path) = history_path() {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.save_history(&path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config as AppConfig;
    use crate::providers::Credentials;

    fn session() -> Session {
        Session::new(AppConfig::default(), Credentials::default()).unwrap()
    }

    #[test]
    fn test_parse_args_quotes() {
        assert_eq!(
            parse_args(r#"ask "where to eat" in Rome"#),
            vec!["ask", "where to eat", "in", "Rome"]
        );
        assert_eq!(parse_args("go  'San Sebastian'"), vec!["go", "San Sebastian"]);
        assert!(parse_args("   ").is_empty());
    }

    #[tokio::test]
    async fn test_go_sets_destination_for_later_commands() {
        let mut session = session();
        let keep = run_command(parse_args("go Buenos Aires"), &mut session)
            .await
            .unwrap();
        assert!(keep);
        assert_eq!(session.destination.read(), "Buenos Aires");
        assert_eq!(session.resolve_city(None), "Buenos Aires");
    }

    #[tokio::test]
    async fn test_exit_stops_loop() {
        let mut session = session();
        assert!(!run_command(parse_args("quit"), &mut session).await.unwrap());
    }

    #[tokio::test]
    async fn test_parse_errors_keep_shell_running() {
        let mut session = session();
        assert!(run_command(parse_args("fly to the moon"), &mut session)
            .await
            .unwrap());
    }

    #[test]
    fn test_completion_candidates() {
        let completer = ShellCompleter::new();
        let history = rustyline::history::DefaultHistory::new();
        let ctx = rustyline::Context::new(&history);

        let (start, pairs) = completer.complete("we", 2, &ctx).unwrap();
        assert_eq!(start, 0);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].replacement, "weather");

        let (_, pairs) = completer.complete("config s", 8, &ctx).unwrap();
        let names: Vec<_> = pairs.iter().map(|p| p.replacement.as_str()).collect();
        assert_eq!(names, vec!["show", "set"]);
    }
}
