// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::builder::styling;
use clap::{ArgMatches, Command, ValueHint, arg, crate_authors, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::LocalBoxFuture};
use yearmark_core::{APP_NAME, YearProgress};

use crate::cmd_backup::{CmdExport, CmdImport};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_progress::CmdProgress;
use crate::cmd_tui::CmdTui;
use crate::config::parse_config;
use crate::logging::{LogTarget, init_tracing};

/// Run the yearmark command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                eprintln!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => eprintln!("{} {}", "Error:".red(), e),
    };
    Ok(())
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
            .about("See your year at a glance, one annotated dot per day.")
            .author(crate_authors!())
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to tui
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/yearmark/config.toml on Linux and \
MacOS, %LOCALAPPDATA%/yearmark/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdTui::command())
            .subcommand(CmdProgress::command())
            .subcommand(CmdExport::command())
            .subcommand(CmdImport::command())
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
            Some((CmdTui::NAME, matches)) => Tui(CmdTui::from(matches)),
            Some((CmdProgress::NAME, matches)) => Progress(CmdProgress::from(matches)),
            Some((CmdExport::NAME, matches)) => Export(CmdExport::from(matches)),
            Some((CmdImport::NAME, matches)) => Import(CmdImport::from(matches)?),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Tui(CmdTui::default()),
            Some((name, _)) => return Err(format!("Unknown command: {name}").into()),
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
    /// Open the year grid
    Tui(CmdTui),

    /// Print the progress of a year
    Progress(CmdProgress),

    /// Export a backup
    Export(CmdExport),

    /// Restore a backup
    Import(CmdImport),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Tui(a)      => Self::run_with(config, LogTarget::StateFile, |x| a.run(x).boxed_local()).await,
            Progress(a) => Self::run_with(config, LogTarget::Stderr, |x| a.run(x).boxed_local()).await,
            Export(a)   => Self::run_with(config, LogTarget::Stderr, |x| a.run(x).boxed_local()).await,
            Import(a)   => Self::run_with(config, LogTarget::Stderr, |x| a.run(x).boxed_local()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(
        config: Option<PathBuf>,
        log_target: LogTarget,
        f: F,
    ) -> Result<(), Box<dyn Error>>
    where
        F: FnOnce(YearProgress) -> LocalBoxFuture<'static, Result<(), Box<dyn Error>>>,
    {
        let mut core_config = parse_config(config).await?;
        core_config.normalize()?;
        init_tracing(log_target, core_config.state_dir.as_deref());

        tracing::debug!(?core_config, "loading annotations...");
        let app = YearProgress::new(core_config)?;
        f(app).await
    }
}
