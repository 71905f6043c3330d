//! Output formatting for route rendering.
//!
//! This module provides formatters for rendering route summaries in the
//! formats selectable with `--format`.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;
use tube_router_lib::{RouteRenderMode, RouteSummary};

use crate::terminal::{format_minutes, plural, supports_unicode, ColorPalette};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Tagged step list with line names and timings.
    #[default]
    Text,
    /// Numbered station list followed by the legs, without colour.
    Plain,
    /// Markdown-flavoured summary.
    Rich,
    /// Compact station list.
    Note,
    /// `+`/`|`/`-` prefixed station names.
    Basic,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Print a route summary to stdout in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout or JSON serialization fails.
    pub fn render_route_result(self, summary: &RouteSummary, show_stats: bool) -> io::Result<()> {
        let text = match self {
            OutputFormat::Text => {
                TextRenderer::new(ColorPalette::detect(), supports_unicode()).render(summary)
            }
            OutputFormat::Plain => summary.render(RouteRenderMode::PlainText),
            OutputFormat::Rich => summary.render(RouteRenderMode::RichText),
            OutputFormat::Note => summary.render(RouteRenderMode::Note),
            OutputFormat::Basic => render_basic(summary),
            OutputFormat::Json => return render_json(summary),
        };

        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        if show_stats {
            writeln!(stdout, "{}", render_stats(summary))?;
        }
        Ok(())
    }
}

/// Render a route summary in JSON format.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Render a route summary in basic path format.
///
/// Uses `+`/`|`/`-` prefixes for first/middle/last steps.
pub fn render_basic(summary: &RouteSummary) -> String {
    let mut buffer = String::new();
    let len = summary.steps.len();
    for (i, step) in summary.steps.iter().enumerate() {
        let prefix = if i == 0 {
            '+'
        } else if i + 1 == len {
            '-'
        } else {
            '|'
        };
        let _ = writeln!(buffer, "{} {}", prefix, step.display_name());
    }
    let _ = writeln!(
        buffer,
        "{} with {}",
        format_minutes(summary.total_minutes),
        plural(summary.transfers, "transfer")
    );
    buffer
}

/// Diagnostic counters line printed for `--show-stats`.
pub fn render_stats(summary: &RouteSummary) -> String {
    format!(
        "Search: expanded {} states, pushed {} (algorithm: {}, transfer penalty: {} min)",
        summary.stats.expanded,
        summary.stats.pushed,
        summary.algorithm,
        summary.transfer_penalty
    )
}

/// Renderer for the default text format with tagged steps.
pub struct TextRenderer {
    palette: ColorPalette,
    unicode: bool,
}

impl TextRenderer {
    #[must_use]
    pub const fn new(palette: ColorPalette, unicode: bool) -> Self {
        Self { palette, unicode }
    }

    /// Render a route summary.
    pub fn render(&self, summary: &RouteSummary) -> String {
        let p = &self.palette;
        let mut buffer = String::new();
        let start = summary.start.name.as_deref().unwrap_or("<unknown>");
        let goal = summary.goal.name.as_deref().unwrap_or("<unknown>");

        let _ = writeln!(
            buffer,
            "Route from {}{}{} to {}{}{} ({}, {}; algorithm: {}):",
            p.white_bold,
            start,
            p.reset,
            p.white_bold,
            goal,
            p.reset,
            format_minutes(summary.total_minutes),
            plural(summary.transfers, "transfer"),
            summary.algorithm
        );

        if let Some(first) = summary.steps.first() {
            let _ = writeln!(
                buffer,
                "{} STRT {} {}{}{}",
                p.tag_start,
                p.reset,
                p.white_bold,
                first.display_name(),
                p.reset
            );
        }

        let last = summary.legs.len().saturating_sub(1);
        for (index, leg) in summary.legs.iter().enumerate() {
            let (tag_color, tag) = if index == last {
                (p.tag_goal, " GOAL ")
            } else if leg.transfer {
                (p.tag_change, " CHNG ")
            } else {
                (p.tag_ride, " RIDE ")
            };
            let _ = writeln!(
                buffer,
                "{}{}{} {}{}{} ({}{}{}, {}{}{})",
                tag_color,
                tag,
                p.reset,
                p.white_bold,
                leg.to,
                p.reset,
                p.cyan,
                leg.line,
                p.reset,
                p.green,
                format_minutes(u64::from(leg.minutes)),
                p.reset
            );
        }

        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "{}{}{}", p.gray, self.rule(), p.reset);
        let _ = writeln!(
            buffer,
            "  {}Total time:{} {}",
            p.green,
            p.reset,
            format_minutes(summary.total_minutes)
        );
        let _ = writeln!(
            buffer,
            "  {}Transfers:{}  {}",
            p.orange, p.reset, summary.transfers
        );
        buffer
    }

    fn rule(&self) -> String {
        let glyph = if self.unicode { "─" } else { "-" };
        glyph.repeat(39)
    }
}
