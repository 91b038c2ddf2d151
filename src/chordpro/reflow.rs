//! Whitespace normalization for ChordPro output.
//!
//! [`reflow_lines`] settles blank lines around section directives into a
//! fixed shape: one blank before a section heading, none right after it,
//! none right before an `{end_of_*}`, one between an `{end_of_*}` and
//! following lyric content. Running it twice yields the same result, so
//! already-clean documents pass through unchanged.
//!
//! [`unwrap_lyric_lines`] undoes the hard wrapping that PDF text extraction
//! leaves in lyric lines by joining every line that does not end in a
//! directive or chord marker with the line after it.

use super::{
    is_comment_directive, is_directive, is_end_directive, is_metadata_directive,
    is_start_directive,
};

/// Normalize blank lines around section directives.
#[must_use]
pub fn reflow_lines(lines: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            let keep = out.last().is_some_and(|prev| {
                !prev.is_empty() && !is_start_directive(prev) && !is_comment_directive(prev)
            });
            if keep {
                out.push(String::new());
            }
            continue;
        }
        if is_end_directive(trimmed) {
            while out.last().is_some_and(|prev| prev.is_empty()) {
                out.pop();
            }
        } else if is_start_directive(trimmed) || is_comment_directive(trimmed) {
            let wants_blank = out
                .last()
                .is_some_and(|prev| !prev.is_empty() && !is_metadata_directive(prev));
            if wants_blank {
                out.push(String::new());
            }
        } else if !is_directive(trimmed) && out.last().is_some_and(|prev| is_end_directive(prev)) {
            out.push(String::new());
        }
        out.push(trimmed.to_string());
    }
    while out.last().is_some_and(|prev| prev.is_empty()) {
        out.pop();
    }
    out
}

/// [`reflow_lines`] over a full text, returning it newline-terminated.
#[must_use]
pub fn reflow_text(text: &str) -> String {
    let lines: Vec<String> = text.lines().map(ToString::to_string).collect();
    let mut out = reflow_lines(&lines).join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Join hard-wrapped lyric lines back into full sentences.
///
/// A line ending in `}`, `]`, `/` or `|` is a directive or chord line and
/// keeps its break. Any other non-blank line is glued to the next with a
/// space. Blank runs collapse and survive only next to a directive line,
/// never right after a `start_of` directive.
#[must_use]
pub fn unwrap_lyric_lines(text: &str) -> String {
    let entries: Vec<(&str, bool)> = text
        .lines()
        .map(|raw| {
            let line = raw.trim_end_matches('\r');
            let soft = !line.is_empty() && !line.ends_with(['}', ']', '/', '|']);
            (line, soft)
        })
        .collect();

    let mut out = String::new();
    let mut i = 0;
    while i < entries.len() {
        let (line, soft) = entries[i];
        if line.trim().is_empty() {
            let run_start = i;
            while i + 1 < entries.len() && entries[i + 1].0.trim().is_empty() {
                i += 1;
            }
            let before = run_start.checked_sub(1).map(|b| entries[b].0.trim());
            let after = entries.get(i + 1).map(|e| e.0.trim());
            let near_directive = before.is_some_and(is_directive_line)
                || after.is_some_and(is_directive_line);
            let after_start = before.is_some_and(|b| b.to_lowercase().contains("start_of"));
            if near_directive && !after_start && !out.is_empty() {
                while out.ends_with(' ') {
                    out.pop();
                }
                out.push('\n');
            }
        } else {
            // A directive never continues a joined lyric line.
            if is_directive_line(line.trim()) {
                while out.ends_with(' ') {
                    out.pop();
                }
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            out.push_str(line);
            out.push(if soft { ' ' } else { '\n' });
        }
        i += 1;
    }
    while out.ends_with(' ') {
        out.pop();
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn is_directive_line(line: &str) -> bool {
    line.starts_with('{') && line.ends_with('}')
}
