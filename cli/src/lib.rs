// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod cli;
mod cmd_backup;
mod cmd_generate_completion;
mod cmd_progress;
mod cmd_tui;
mod config;
mod logging;
mod prompt;
mod tui;
mod util;

pub use crate::cli::{Cli, Commands, run};
