//! Header extraction: splits a fragment into its directive lines and its
//! opaque body.
//!
//! Only the contiguous group of directive and blank lines at the top of a
//! fragment is scanned. The first line that is neither ends the header, so a
//! directive keyword occurring later in the body (inside a string literal,
//! say) is never consumed.

use log::warn;
use regex::Regex;

use crate::config::AssemblerConfig;
use crate::diagnostics::collector::DiagnosticCollector;
use crate::diagnostics::{Diagnostic, ReportSeverity, SourceLocation};
use crate::source::Source;

/// Half-open character-offset range into a fragment.
///
/// Produced only through [`Span::checked`], so every span handed out is
/// in-bounds for the text it was measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Validated constructor: `0 <= start <= end <= len`.
    pub fn checked(start: usize, end: usize, len: usize) -> Option<Self> {
        if start <= end && end <= len {
            Some(Span { start, end })
        } else {
            None
        }
    }

    pub fn full(len: usize) -> Self {
        Span { start: 0, end: len }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The spanned text of `source`.
    pub fn slice(&self, source: &Source) -> String {
        source
            .content()
            .iter()
            .skip(self.start)
            .take(self.len())
            .collect()
    }
}

/// Result of a header scan: the normalized directive lines in source order,
/// and the span of everything after them.
#[derive(Debug, Clone)]
pub struct HeaderScan {
    pub directives: Vec<String>,
    pub body: Span,
}

#[derive(Debug, Clone)]
pub enum ExtractDiagnostic {
    /// The header scan consumed nothing, yet a directive keyword opens a
    /// later line. The whole fragment is kept as body.
    DirectiveParseAmbiguity { location: SourceLocation },
}

impl Diagnostic for ExtractDiagnostic {
    fn severity(&self) -> ReportSeverity {
        ReportSeverity::Warning
    }

    fn title(&self) -> String {
        "Header Scan Warning".to_string()
    }

    fn message(&self) -> String {
        match self {
            ExtractDiagnostic::DirectiveParseAmbiguity { .. } => {
                "directive keyword appears outside the fragment header; the whole fragment is kept as body"
                    .to_string()
            }
        }
    }

    fn location(&self) -> Option<SourceLocation> {
        match self {
            ExtractDiagnostic::DirectiveParseAmbiguity { location } => Some(location.clone()),
        }
    }

    fn help(&self) -> Option<String> {
        Some(
            "directives are only recognized in the contiguous line group at the top of a fragment"
                .to_string(),
        )
    }

    fn copy(&self) -> Box<dyn Diagnostic> {
        Box::new(self.clone())
    }
}

/// Line-anchored directive scanner for one build's directive grammar.
pub struct HeaderExtractor {
    directive_line: Regex,
    keyword_probe: Regex,
}

impl HeaderExtractor {
    pub fn new(config: &AssemblerConfig) -> Self {
        let keyword = regex::escape(&config.directive_keyword);
        let terminator = regex::escape(&config.directive_terminator);
        let directive_line = Regex::new(&format!(
            r"^{keyword}\s+[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*\s*{terminator}$"
        ))
        .expect("directive pattern is built from escaped literals");
        let keyword_probe = Regex::new(&format!(r"^{keyword}\b"))
            .expect("keyword probe is built from an escaped literal");
        Self {
            directive_line,
            keyword_probe,
        }
    }

    /// Scan the leading header group of `source`.
    ///
    /// Total over its input: a fragment with no recognizable header comes
    /// back with zero directives and a body spanning the whole text. The
    /// body span starts immediately after the terminator of the last
    /// directive found, so line endings separating header and body stay in
    /// the body.
    pub fn extract(&self, collector: &mut DiagnosticCollector, source: &Source) -> HeaderScan {
        let text = source.content_str();
        let total = source.len();

        let mut directives = Vec::new();
        let mut consumed = 0usize;
        let mut offset = 0usize;

        for line in text.split_inclusive('\n') {
            let stripped = line.trim_end();
            if stripped.is_empty() {
                // Blank lines may sit between directives inside the header.
                offset += line.chars().count();
                continue;
            }
            if self.directive_line.is_match(stripped) {
                directives.push(stripped.to_string());
                consumed = offset + stripped.chars().count();
                offset += line.chars().count();
            } else {
                break;
            }
        }

        if directives.is_empty() && consumed != 0 {
            // Inconsistent scan state; fall back to treating everything as body.
            warn!("header scan consumed {consumed} chars but found no directives in {source}");
            consumed = 0;
        }

        if directives.is_empty() {
            self.probe_for_stray_keyword(collector, source, &text);
        }

        let body = match Span::checked(consumed, total, total) {
            Some(span) => span,
            None => {
                warn!("discarding out-of-bounds header span {consumed}..{total} for {source}");
                Span::full(total)
            }
        };

        HeaderScan { directives, body }
    }

    /// Warn when no directive was extracted but some line still opens with
    /// the directive keyword (typically a malformed or mid-body directive).
    fn probe_for_stray_keyword(
        &self,
        collector: &mut DiagnosticCollector,
        source: &Source,
        text: &str,
    ) {
        let mut line_start = 0usize;
        for line in text.split_inclusive('\n') {
            let stripped = line.trim_end();
            if self.keyword_probe.is_match(stripped) {
                let span = (line_start, line_start + stripped.chars().count());
                warn!("stray directive keyword at offset {line_start} in {source}");
                collector.report(ExtractDiagnostic::DirectiveParseAmbiguity {
                    location: SourceLocation {
                        span,
                        source: source.clone(),
                    },
                });
                return;
            }
            line_start += line.chars().count();
        }
    }
}
