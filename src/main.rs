use anyhow::Context;
use breathwork::{
    App, Config, Overrides, Settings,
    logging::{self, LogTarget},
    simulate::simulate,
};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use std::{path::PathBuf, time::Duration};
use tracing::info;

/// Run a guided breathing session in your terminal.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// The path to the configuration file.
    #[clap(short, long, env = "BREATHWORK_CONFIG")]
    config: Option<PathBuf>,

    /// The pattern to use, by name or slug.
    #[clap(short, long)]
    pattern: Option<String>,

    /// The session length in minutes.
    #[clap(short, long)]
    minutes: Option<u32>,

    /// Write logs to this file.
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// Print the JSON schema for the configuration file and exit.
    #[cfg(feature = "json-schema")]
    #[clap(long)]
    generate_config_schema: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the interactive session. This is the default.
    Run,

    /// List the available breathing patterns.
    Patterns,

    /// Run a session without a terminal and print the phases it goes through.
    Simulate {
        /// How many seconds to simulate. Defaults to the whole session.
        #[clap(long)]
        seconds: Option<u64>,

        /// Print the timeline as JSON.
        #[clap(long)]
        json: bool,
    },
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let config = Config::load_or_default(cli.config.as_deref()).context("loading configuration")?;
    let overrides = Overrides { pattern: cli.pattern.clone(), minutes: cli.minutes };
    let settings = config.resolve(&overrides).context("invalid configuration")?;
    info!(pattern = settings.pattern.name(), minutes = settings.session.minutes(), "configuration loaded");
    Ok(settings)
}

/// One line per pattern, marking the one a session would start with.
fn pattern_listing(settings: &Settings) -> String {
    settings
        .catalog
        .iter()
        .map(|pattern| {
            let marker = if pattern == &settings.pattern { "*" } else { " " };
            format!("{marker} {:<20} {:<28} {}", pattern.name(), pattern.summary(), pattern.description())
        })
        .join("\n")
}

fn run(cli: Cli) -> anyhow::Result<()> {
    #[cfg(feature = "json-schema")]
    if cli.generate_config_schema {
        let schema = schemars::schema_for!(Config);
        println!("{}", serde_json::to_string_pretty(&schema).context("serializing schema")?);
        return Ok(());
    }

    let command = cli.command.as_ref().unwrap_or(&Command::Run);
    let target = match (command, &cli.log_file) {
        (_, Some(path)) => LogTarget::File(path),
        (Command::Run, None) => LogTarget::Disabled,
        (Command::Patterns | Command::Simulate { .. }, None) => LogTarget::Stderr,
    };
    logging::init(target).context("setting up logging")?;

    let settings = load_settings(&cli)?;
    match command {
        Command::Run => App::new(settings).run().context("running session")?,
        Command::Patterns => println!("{}", pattern_listing(&settings)),
        Command::Simulate { seconds, json } => {
            let limit = seconds.map(Duration::from_secs).unwrap_or_else(|| settings.session.as_duration());
            let timeline = simulate(&settings, limit);
            if *json {
                println!("{}", serde_json::to_string_pretty(&timeline).context("serializing timeline")?);
            } else {
                println!("{timeline}");
            }
        }
    };
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_marks_selected_pattern() {
        let overrides = Overrides { pattern: Some("4-7-8-breathing".into()), minutes: None };
        let settings = Config::default().resolve(&overrides).expect("resolve failed");
        let listing = pattern_listing(&settings);
        let lines: Vec<_> = listing.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("  Calm Breathing"));
        assert!(lines[2].starts_with("* 4-7-8 Breathing"));
        assert!(lines[2].contains("4s in • 7s hold • 8s out"));
        assert!(lines[2].ends_with("Dr. Weil's technique for better sleep"));
        assert_eq!(lines.iter().filter(|line| line.starts_with('*')).count(), 1);
    }

    #[test]
    fn cli_parses_simulate() {
        let cli = Cli::try_parse_from(["breathwork", "--pattern", "box", "-m", "10", "simulate", "--json"])
            .expect("parse failed");
        assert_eq!(cli.pattern.as_deref(), Some("box"));
        assert_eq!(cli.minutes, Some(10));
        assert!(matches!(cli.command, Some(Command::Simulate { seconds: None, json: true })));
    }
}
