// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use yearmark_core::YearProgress;

use crate::tui;
use crate::util::{arg_year, get_year};

#[derive(Debug, Clone, Default)]
pub struct CmdTui {
    pub year: Option<i32>,
}

impl CmdTui {
    pub const NAME: &str = "tui";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Open the year grid, the default when no command is given")
            .arg(arg_year())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            year: get_year(matches),
        }
    }

    pub async fn run(self, mut app: YearProgress) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "starting tui...");
        if let Some(year) = self.year {
            app.select_year(year);
        }

        let app = tui::run_year_progress(app).await?;
        tracing::debug!(year = app.year(), "tui closed");
        app.save()?;
        Ok(())
    }
}
