// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use cliclack::{confirm, intro, note, outro, outro_cancel};

/// Ask before a backup replaces existing annotations.
pub fn prompt_confirm_import(
    file: &Path,
    current: usize,
    incoming: usize,
) -> Result<bool, Box<dyn std::error::Error>> {
    intro("Restore Backup")?;
    note(
        "This will replace your current data:",
        import_summary(file, current, incoming),
    )?;

    let confirmed = confirm("Replace current annotations?")
        .initial_value(false)
        .interact()?;

    if confirmed {
        outro("Restoring backup")?;
    } else {
        outro_cancel("Import cancelled, nothing changed")?;
    }
    Ok(confirmed)
}

fn import_summary(file: &Path, current: usize, incoming: usize) -> String {
    format!(
        "• File:     {}\n• Current:  {} marked day(s)\n• Incoming: {} marked day(s)",
        file.display(),
        current,
        incoming
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_summary() {
        let summary = import_summary(Path::new("backup.json"), 3, 12);
        assert!(summary.contains("backup.json"));
        assert!(summary.contains("Current:  3 marked"));
        assert!(summary.contains("Incoming: 12 marked"));
    }
}
