//! Diagnostic reporting for the assembly pipeline.
//!
//! Every message surfaced to the user goes through the [`Diagnostic`] trait:
//! the engine's own header-scan warnings as well as whatever the external
//! compile gateway hands back. Reports are formatted with colored severity
//! markers and, when a fragment location is known, an underlined source
//! excerpt.

use std::fmt::Debug;

use colored::*;
use unicode_width::UnicodeWidthStr;

use crate::source::Source;

pub mod collector;

/// Severity of a reported diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportSeverity {
    Error,
    Warning,
    Info,
}

/// A location inside a fragment, as a half-open character-offset span.
#[derive(Debug, Clone)]
pub struct SourceLocation {
    pub span: (usize, usize),
    pub source: Source,
}

/// Anything reportable to the user.
///
/// Implementors provide severity, title, message and optionally a fragment
/// location plus a help text; `format_report` turns that into a colored,
/// human-readable block.
pub trait Diagnostic: Debug + Send + Sync {
    fn severity(&self) -> ReportSeverity;
    fn title(&self) -> String;
    fn message(&self) -> String;
    fn location(&self) -> Option<SourceLocation>;
    fn help(&self) -> Option<String>;
    fn copy(&self) -> Box<dyn Diagnostic>;

    fn format_report(&self) -> String {
        let color = match self.severity() {
            ReportSeverity::Error => Color::BrightRed,
            ReportSeverity::Warning => Color::Yellow,
            ReportSeverity::Info => Color::BrightCyan,
        };

        let mut report = format!("{}: {}", self.title().color(color).bold(), self.message());

        if let Some(loc) = self.location() {
            let content = loc.source.content_str();
            let lines: Vec<&str> = content.lines().collect();

            let (start_line, start_col) = find_line_and_col(&content, loc.span.0);
            let (end_line, end_col) = find_line_and_col(&content, loc.span.1);

            match loc.source.file_path() {
                Some(path) => {
                    report.push_str(&format!(
                        "\n  {} {}:{} in {}\n",
                        "-->".bright_blue().bold(),
                        (start_line + 1).to_string().bright_cyan(),
                        (start_col + 1).to_string().bright_cyan(),
                        path.display().to_string().bright_yellow().underline()
                    ));
                }
                None => {
                    report.push_str(&format!(
                        "\n  {} {}:{}\n",
                        "-->".bright_blue().bold(),
                        (start_line + 1).to_string().bright_cyan(),
                        (start_col + 1).to_string().bright_cyan()
                    ));
                }
            }

            for i in start_line..=end_line {
                if let Some(line_text) = lines.get(i) {
                    report.push_str(&format!(
                        " {:>4} {} {}\n",
                        (i + 1).to_string().bright_cyan(),
                        "|".bright_blue().bold(),
                        line_text.white()
                    ));
                    let underline =
                        build_underline(i, start_line, end_line, start_col, end_col, line_text);
                    report.push_str(&format!(
                        "      {} {}\n",
                        "|".bright_blue().bold(),
                        underline.color(color).bold()
                    ));
                }
            }
        }

        if let Some(help_text) = self.help() {
            report.push_str(&format!("\n{}: {}", "Help".bright_green(), help_text));
        }

        report
    }
}

/// Underline for one line of a (possibly multi-line) span.
fn build_underline(
    line_idx: usize,
    start_line: usize,
    end_line: usize,
    start_col: usize,
    end_col: usize,
    line_text: &str,
) -> String {
    let width_up_to = |col: usize| -> usize {
        line_text.chars().take(col).collect::<String>().width()
    };

    let (prefix, marked) = if line_idx == start_line && line_idx == end_line {
        let prefix = width_up_to(start_col);
        (prefix, width_up_to(end_col).saturating_sub(prefix))
    } else if line_idx == start_line {
        let prefix = width_up_to(start_col);
        (prefix, line_text.width().saturating_sub(prefix))
    } else if line_idx == end_line {
        (0, width_up_to(end_col))
    } else {
        (0, line_text.width())
    };

    format!("{}{}", " ".repeat(prefix), "^".repeat(marked.max(1)))
}

/// 0-indexed line and column of a character offset, tolerant of CRLF and
/// lone-CR line endings.
fn find_line_and_col(source: &str, char_pos: usize) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;
    let mut prev_was_cr = false;

    for (i, ch) in source.chars().enumerate() {
        if i == char_pos {
            return (line, col);
        }
        match ch {
            '\n' => {
                line += 1;
                col = 0;
                prev_was_cr = false;
            }
            '\r' => {
                prev_was_cr = true;
            }
            _ => {
                if prev_was_cr {
                    // lone CR line ending
                    line += 1;
                    col = 0;
                    prev_was_cr = false;
                }
                col += 1;
            }
        }
    }

    (line, col)
}
