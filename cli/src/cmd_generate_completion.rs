// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{ArgMatches, Command, arg};
use clap_complete::{Shell, generate};
use clap_complete_nushell::Nushell;
use yearmark_core::APP_NAME;

use crate::Cli;

const SHELLS: &str = "bash, elvish, fish, nushell, powershell, zsh";

/// Shells with a completion generator: the ones `clap_complete` knows, plus nushell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionShell {
    Clap(Shell),
    Nushell,
}

fn parse_shell(value: &str) -> Result<CompletionShell, String> {
    if value.eq_ignore_ascii_case("nushell") {
        return Ok(CompletionShell::Nushell);
    }
    value
        .parse::<Shell>()
        .map(CompletionShell::Clap)
        .map_err(|_| format!("unsupported shell `{value}`, expected one of: {SHELLS}"))
}

/// Print a completion script for `yearmark` to stdout.
#[derive(Debug, Clone, Copy)]
pub struct CmdGenerateCompletion {
    pub shell: CompletionShell,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Generate shell completion")
            .hide(true)
            .arg(
                arg!(shell: <SHELL> "The shell to generate for")
                    .long_help(format!("The shell to generate for, one of: {SHELLS}"))
                    .value_parser(parse_shell),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            shell: matches
                .get_one::<CompletionShell>("shell")
                .copied()
                .unwrap_or(CompletionShell::Clap(Shell::Bash)),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating shell completion...");
        self.write_to(&mut io::stdout());
        Ok(())
    }

    fn write_to(self, buf: &mut impl io::Write) {
        let mut cmd = Cli::command();
        match self.shell {
            CompletionShell::Clap(shell) => generate(shell, &mut cmd, APP_NAME, buf),
            CompletionShell::Nushell => generate(Nushell {}, &mut cmd, APP_NAME, buf),
        }
    }
}
