//! CLI module for TravelX
//!
//! Every lookup the GUI offers is also available from the command line.
//! Running without a subcommand starts the GUI.

mod commands;
mod output;
mod shell;

use clap::{Parser, Subcommand};

use commands::Session;
use output::OutputFormat;

pub use output::print_error;

/// TravelX - travel planning companion
#[derive(Parser, Debug)]
#[command(name = "travelx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Current weather for a city (defaults to the destination)
    Weather {
        city: Option<String>,

        /// Show temperatures in Fahrenheit
        #[arg(long)]
        fahrenheit: bool,
    },

    /// Search destination photos
    Images {
        query: Option<String>,

        /// Maximum number of photos
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Things to do in a city (defaults to the destination)
    Activities { city: Option<String> },

    /// Ask the travel assistant a question
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },

    /// Interactive shell
    Shell,
}

/// Run one parsed command against `session`
async fn dispatch(
    command: Commands,
    session: &mut Session,
    options: &OutputOptions,
) -> anyhow::Result<()> {
    let format = options.format();
    let quiet = options.quiet;

    match command {
        Commands::Weather { city, fahrenheit } => {
            commands::lookup::weather(session, city, fahrenheit, format).await
        }
        Commands::Images { query, limit } => {
            commands::lookup::images(session, query, limit, format).await
        }
        Commands::Activities { city } => commands::lookup::activities(session, city, format).await,
        Commands::Ask { question } => commands::ask::run(session, question, format).await,
        Commands::Config { command } => {
            commands::config::run(command, session, format, quiet).await
        }
        Commands::Shell => {
            println!("Already in shell mode.");
            Ok(())
        }
    }
}

/// Run the CLI with a parsed command
pub async fn run(command: Commands, options: &OutputOptions) -> anyhow::Result<()> {
    let mut session = Session::load()?;
    match command {
        Commands::Shell => shell::run(&mut session).await,
        command => dispatch(command, &mut session, options).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_no_subcommand_means_gui() {
        assert!(parse(&["travelx"]).command.is_none());
    }

    #[test]
    fn test_weather_args() {
        let cli = parse(&["travelx", "weather", "Oslo", "--fahrenheit", "--json"]);
        assert!(cli.output.json);
        assert!(matches!(
            cli.command,
            Some(Commands::Weather { city: Some(ref c), fahrenheit: true }) if c == "Oslo"
        ));

        let cli = parse(&["travelx", "weather"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Weather { city: None, fahrenheit: false })
        ));
    }

    #[test]
    fn test_images_limit() {
        let cli = parse(&["travelx", "-q", "images", "beaches", "--limit", "3"]);
        assert!(cli.output.quiet);
        assert!(matches!(
            cli.command,
            Some(Commands::Images { query: Some(_), limit: Some(3) })
        ));
    }

    #[test]
    fn test_ask_joins_words() {
        let cli = parse(&["travelx", "ask", "best", "tapas", "in", "Madrid?"]);
        let Some(Commands::Ask { question }) = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(question.join(" "), "best tapas in Madrid?");
    }

    #[test]
    fn test_ask_requires_question() {
        assert!(Cli::try_parse_from(["travelx", "ask"]).is_err());
    }

    #[test]
    fn test_config_set() {
        let cli = parse(&["travelx", "config", "set", "weather.units", "fahrenheit"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: commands::config::ConfigCommands::Set { .. }
            })
        ));
    }
}
