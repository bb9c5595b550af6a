// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{ArgMatches, Command};
use colored::Colorize;
use serde::Serialize;
use yearmark_core::{YearGrid, YearProgress};

use crate::util::{ArgOutputFormat, arg_year, get_year};

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone)]
pub struct CmdProgress {
    pub year: Option<i32>,
    pub output_format: ArgOutputFormat,
}

impl CmdProgress {
    pub const NAME: &str = "progress";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show how far a year has advanced")
            .arg(arg_year())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            year: get_year(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: YearProgress) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "computing progress...");

        // peek at another year without touching the persisted selection
        let summary = match self.year {
            Some(year) if year != app.year() => {
                let grid = YearGrid::build(year, app.store().marks(), app.today());
                ProgressSummary::new(&grid)
            }
            _ => ProgressSummary::new(app.grid()),
        };

        let mut stdout = io::stdout().lock();
        match self.output_format {
            ArgOutputFormat::Json => summary.write_json(&mut stdout)?,
            ArgOutputFormat::Table => summary.write_table(&mut stdout)?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressSummary {
    year: i32,
    day_count: u32,
    today_index: u32,
    days_passed: u32,
    days_remaining: u32,
    percentage: f64,
    marked_days: usize,
}

impl ProgressSummary {
    fn new(grid: &YearGrid) -> Self {
        let progress = grid.progress();
        Self {
            year: grid.year(),
            day_count: progress.day_count,
            today_index: progress.today_index,
            days_passed: progress.days_passed,
            days_remaining: progress.days_remaining,
            percentage: progress.percentage,
            marked_days: grid.cells().filter(|cell| cell.mark.is_some()).count(),
        }
    }

    fn write_json(&self, w: &mut impl io::Write) -> Result<(), Box<dyn Error>> {
        serde_json::to_writer_pretty(&mut *w, self)?;
        writeln!(w)?;
        Ok(())
    }

    fn write_table(&self, w: &mut impl io::Write) -> Result<(), Box<dyn Error>> {
        writeln!(w, "🗓️ {}", self.year.to_string().bold())?;
        writeln!(
            w,
            " {} {} days left · {}%",
            "►".green(),
            self.days_remaining.to_string().bold(),
            format!("{:.1}", self.percentage).bold()
        )?;
        writeln!(
            w,
            " {} {} of {} days passed",
            "►".green(),
            self.days_passed,
            self.day_count
        )?;
        writeln!(
            w,
            " {} {} marked day(s)",
            "►".green(),
            self.marked_days
        )?;
        writeln!(w, " {}", self.bar())?;
        Ok(())
    }

    fn bar(&self) -> String {
        let filled = if self.day_count == 0 {
            0
        } else {
            (self.days_passed as usize * BAR_WIDTH).div_ceil(self.day_count as usize)
        };
        let filled = filled.min(BAR_WIDTH);
        format!(
            "{}{}",
            "█".repeat(filled).magenta(),
            "░".repeat(BAR_WIDTH - filled).dimmed()
        )
    }
}
