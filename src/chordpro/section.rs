//! Balancing of `{start_of_*}` / `{end_of_*}` directive pairs.
//!
//! Input text carries start directives freely (rewritten from `Intro:` cues
//! or `!Chorus` labels) and only occasionally a matching end. The tracker
//! walks the lines once and guarantees that every opened section is closed,
//! in reverse order of opening, before a new one starts and before the text
//! runs out.

use super::{end_directive, is_end_directive, is_start_directive, SectionKind};

/// Stack of currently open sections.
#[derive(Debug, Default)]
pub struct SectionTracker {
    open: Vec<SectionKind>,
}

impl SectionTracker {
    /// Create an empty tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self { open: Vec::new() }
    }

    /// Process one line, appending it and any synthesized closings to `out`.
    ///
    /// A start directive first closes all open sections, newest first. An
    /// end directive is kept only when it matches the innermost open
    /// section; a stray one is dropped.
    pub fn feed(&mut self, line: &str, out: &mut Vec<String>) {
        let trimmed = line.trim();
        if is_start_directive(trimmed) {
            while let Some(kind) = self.open.pop() {
                out.push(end_directive(kind));
            }
            out.push(trimmed.to_string());
            if let Some(kind) = SectionKind::from_directive(trimmed) {
                self.open.push(kind);
            }
        } else if is_end_directive(trimmed) {
            match (self.open.last().copied(), SectionKind::from_directive(trimmed)) {
                (Some(top), Some(kind)) if top == kind => {
                    self.open.pop();
                    out.push(trimmed.to_string());
                }
                _ => {
                    tracing::debug!("dropping unmatched close: {trimmed}");
                }
            }
        } else {
            out.push(line.trim_end().to_string());
        }
    }

    /// Close every section still open, newest first.
    pub fn finish(&mut self, out: &mut Vec<String>) {
        while let Some(kind) = self.open.pop() {
            out.push(end_directive(kind));
        }
    }

    /// Sections currently open, oldest first.
    #[must_use]
    pub fn open_kinds(&self) -> &[SectionKind] {
        &self.open
    }
}

/// Run a full line list through a fresh tracker.
#[must_use]
pub fn balance_lines(lines: &[String]) -> Vec<String> {
    let mut tracker = SectionTracker::new();
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        tracker.feed(line, &mut out);
    }
    tracker.finish(&mut out);
    out
}
