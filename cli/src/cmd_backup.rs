// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use colored::Colorize;
use yearmark_core::{Confirmation, ImportOutcome, YearProgress};

use crate::prompt::prompt_confirm_import;

#[derive(Debug, Clone)]
pub struct CmdExport {
    pub output: Option<PathBuf>,
}

impl CmdExport {
    pub const NAME: &str = "export";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Export all annotations to a backup file")
            .arg(
                arg!(-o --output <PATH> "Directory or file to write the backup to")
                    .long_help(
                        "\
Directory or file to write the backup to. A directory receives \
year-progress-backup-<year>.json. Defaults to the configured backup_dir, or the current directory.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::AnyPath),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output: matches.get_one("output").cloned(),
        }
    }

    pub async fn run(self, app: YearProgress) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "exporting backup...");
        let path = app.export_to(self.output.as_deref()).await?;
        println!(
            "{} {} marked day(s) exported to {}",
            "✔".green(),
            app.store().marks().len(),
            path.display().to_string().bold()
        );
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdImport {
    pub file: PathBuf,
    pub yes: bool,
}

impl CmdImport {
    pub const NAME: &str = "import";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Restore annotations from a backup file")
            .arg(
                arg!(file: <FILE> "The backup file to restore")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(arg!(-y --yes "Replace existing annotations without asking"))
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let file = matches
            .get_one::<PathBuf>("file")
            .cloned()
            .ok_or("A backup file is required")?;

        Ok(Self {
            file,
            yes: matches.get_flag("yes"),
        })
    }

    pub async fn run(self, mut app: YearProgress) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "importing backup...");
        let plan = app.plan_import_file(&self.file).await?;

        let confirmation = if plan.requires_confirmation() && !self.yes {
            let current = app.store().marks().len();
            let incoming = plan.backup().marks.len();
            prompt_confirm_import(&self.file, current, incoming)?.into()
        } else {
            Confirmation::Confirmed
        };

        match app.apply_import(plan, confirmation) {
            ImportOutcome::Applied { marks } => {
                // surface write failures here, the TUI would only log them
                app.save()?;
                println!(
                    "{} {} marked day(s) restored from {}",
                    "✔".green(),
                    marks,
                    self.file.display().to_string().bold()
                );
            }
            ImportOutcome::Cancelled => {
                tracing::info!("user cancelled the import");
            }
        }
        Ok(())
    }
}
