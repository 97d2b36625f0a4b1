// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use atelier_client::RuleClient;
use atelier_core::{APP_NAME, Atelier};
use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::BoxFuture};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_rule::{CmdRuleDelete, CmdRuleEdit, CmdRuleList, CmdRuleNew};
use crate::cmd_sessions::CmdSessions;
use crate::config::parse_config;

/// Run the Atelier command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    init_tracing();
    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let res = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if let Err(e) = res {
        eprintln!("Failed to install log subscriber: {e}");
    }
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Recurring session scheduling for studios, retreats and workshops.")
            .author("Atelier Developers <dev@atelier.example>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/atelier/config.toml on Linux and \
MacOS, %APPDATA%/atelier/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath)
                    .global(true),
            )
            .subcommand(
                Command::new("rule")
                    .alias("r")
                    .about("Manage recurring rules")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdRuleList::command())
                    .subcommand(CmdRuleNew::command())
                    .subcommand(CmdRuleEdit::command())
                    .subcommand(CmdRuleDelete::command()),
            )
            .subcommand(CmdSessions::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some(("rule", matches)) => match matches.subcommand() {
                Some((CmdRuleList::NAME, matches)) => RuleList(CmdRuleList::from(matches)),
                Some((CmdRuleNew::NAME, matches)) => RuleNew(CmdRuleNew::from(matches)?),
                Some((CmdRuleEdit::NAME, matches)) => RuleEdit(CmdRuleEdit::from(matches)),
                Some((CmdRuleDelete::NAME, matches)) => RuleDelete(CmdRuleDelete::from(matches)),
                _ => unreachable!(),
            },
            Some((CmdSessions::NAME, matches)) => Sessions(CmdSessions::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// List recurring rules
    RuleList(CmdRuleList),

    /// Add a recurring rule
    RuleNew(CmdRuleNew),

    /// Edit a recurring rule
    RuleEdit(CmdRuleEdit),

    /// Delete recurring rules
    RuleDelete(CmdRuleDelete),

    /// List sessions in a date window
    Sessions(CmdSessions),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            RuleList(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            RuleNew(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            RuleEdit(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            RuleDelete(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            Sessions(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a Atelier<RuleClient>) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let (core_config, api_config) = parse_config(config).await?;
        let client = RuleClient::new(api_config)?;
        let atelier = Atelier::new(core_config, client)?;

        f(&atelier).await
    }
}
