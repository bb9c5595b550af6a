// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::str::FromStr;

use clap::{Arg, ArgMatches, arg, value_parser};
use ratatui::style::Color;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArgOutputFormat {
    Json,
    Table,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(ArgOutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(ArgOutputFormat::Table)
    }
}

pub fn arg_year() -> Arg {
    arg!(-y --year <YEAR> "The year to show, defaults to the selected year")
        .value_parser(value_parser!(i32).range(1..))
}

pub fn get_year(matches: &ArgMatches) -> Option<i32> {
    matches.get_one("year").copied()
}

/// Parse a `#RRGGBB` color for the terminal.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    Color::from_str(hex).ok()
}

/// Display width of the first `first_n` grapheme clusters of `s`.
pub fn unicode_width_of_slice(s: &str, first_n: usize) -> usize {
    let end = byte_index_of_grapheme(s, first_n);
    s[..end].width()
}

/// Byte offset where the grapheme cluster at `g_idx` starts, or the length of
/// `s` when out of bounds.
pub fn byte_index_of_grapheme(s: &str, g_idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Return the byte range of the grapheme cluster at index `g_idx` in `s`.
/// If out of bounds, returns None.
pub fn byte_range_of_grapheme_at(s: &str, g_idx: usize) -> Option<std::ops::Range<usize>> {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(start, g)| start..start + g.len())
}

pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}
