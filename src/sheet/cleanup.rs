//! Spacing and notation cleanup for separated sheet text.
//!
//! Runs after chord separation and cue rewriting: collapses horizontal
//! whitespace without touching line structure, rewrites `|F/A |Bb2 |`
//! progression runs into space-joined bracketed cells, and trims stray
//! spaces inside chord brackets.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static RE_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid regex: RE_SPACES"));

#[allow(clippy::expect_used)]
static RE_TRAILING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").expect("valid regex: RE_TRAILING"));

#[allow(clippy::expect_used)]
static RE_BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex: RE_BLANK_RUN"));

#[allow(clippy::expect_used)]
static RE_PIPE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\|[^|\n]*(?:\|[^|\n]*)*\|").expect("valid regex: RE_PIPE_RUN")
});

#[allow(clippy::expect_used)]
static RE_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*([^\]]*?)\s*\]").expect("valid regex: RE_BRACKET"));

/// Normalize spacing and progression notation in `text`.
///
/// Whitespace collapse is horizontal only; blank-line structure is left to
/// the reflow pass, apart from capping runs at one blank line.
#[must_use]
pub fn clean(text: &str) -> String {
    let text = RE_SPACES.replace_all(text, " ");
    let text = RE_TRAILING.replace_all(&text, "");
    let text = RE_BLANK_RUN.replace_all(&text, "\n\n");
    let text = convert_pipe_runs(&text);
    let text = RE_BRACKET.replace_all(&text, "[$1]");
    text.trim().to_string()
}

/// Rewrite every `|cell |cell |` run into space-joined bracketed cells.
///
/// Cells already bracketed by chord separation pass through unchanged. A
/// run that starts mid-line and opens with a chord moves to its own line.
fn convert_pipe_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for m in RE_PIPE_RUN.find_iter(text) {
        out.push_str(&text[cursor..m.start()]);
        cursor = m.end();
        let cells: Vec<&str> = m
            .as_str()
            .split('|')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .collect();
        if cells.is_empty() {
            continue;
        }
        let chordish = cells[0].starts_with('[')
            || cells[0].starts_with(|c: char| c.is_ascii_uppercase() && c <= 'G');
        let at_line_start = out.is_empty() || out.ends_with('\n');
        if chordish && !at_line_start {
            while out.ends_with(' ') {
                out.pop();
            }
            out.push('\n');
        }
        let rendered: Vec<String> = cells
            .iter()
            .map(|cell| {
                if cell.starts_with('[') {
                    (*cell).to_string()
                } else {
                    format!("[{cell}]")
                }
            })
            .collect();
        out.push_str(&rendered.join(" "));
    }
    out.push_str(&text[cursor..]);
    out
}
