//! Song metadata extraction and ChordPro document assembly.
//!
//! Opwekking sheets open with a number-and-title line and a tempo line, and
//! close with a copyright block introduced by one of a few fixed marker
//! phrases. Absent pieces are omitted from output, never emitted as empty
//! placeholders.

use std::sync::LazyLock;

use regex::Regex;

/// Regex matching a `566 Machtig Heer` style header line.
#[allow(clippy::expect_used)]
static RE_NUMBER_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(.+)$").expect("valid regex: RE_NUMBER_TITLE")
});

/// Marker phrases that introduce the trailing copyright block.
const COPYRIGHT_MARKERS: &[&str] = &["Oorspr. titel:", "Tekst & muziek:", "Ned. tekst:", "©"];

/// Metadata extracted from one chord sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Songbook number, e.g. `566`.
    pub number: Option<String>,
    /// Song title.
    pub title: Option<String>,
    /// Tempo line as printed on the sheet, e.g. `76 bpm`.
    pub tempo: Option<String>,
    /// Copyright block, newlines intact.
    pub copyright: Option<String>,
}

impl Metadata {
    /// Split a raw sheet into its metadata and the lyric remainder.
    ///
    /// Header lines and the copyright block are consumed; malformed or
    /// missing pieces are silently skipped.
    #[must_use]
    pub fn extract(text: &str) -> (Self, String) {
        let lines: Vec<&str> = text.lines().collect();
        let mut meta = Self::default();
        let mut content_start = 0;

        if let Some(caps) = lines.first().and_then(|l| RE_NUMBER_TITLE.captures(l.trim())) {
            meta.number = Some(caps[1].to_string());
            meta.title = Some(caps[2].trim().to_string());
            content_start = 1;
        }

        if lines
            .get(content_start)
            .is_some_and(|l| l.to_lowercase().contains("bpm"))
        {
            meta.tempo = Some(lines[content_start].trim().to_string());
            content_start += 1;
        }

        let marker = lines
            .iter()
            .position(|l| COPYRIGHT_MARKERS.iter().any(|m| l.contains(m)));
        let remainder = match marker {
            Some(idx) => {
                meta.copyright = Some(lines[idx..].join("\n"));
                if idx > content_start {
                    lines[content_start..idx].join("\n")
                } else {
                    String::new()
                }
            }
            None => lines.get(content_start..).unwrap_or_default().join("\n"),
        };

        (meta, remainder)
    }

    /// Assemble the final ChordPro document around a converted body.
    ///
    /// Emission order: `{t:}`, `{tempo:}`, blank line, body, blank line,
    /// `{c:}` with copyright newlines replaced by `" | "`. Each piece is
    /// emitted only when present.
    #[must_use]
    pub fn render_document(&self, body: &str) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(title) = &self.title {
            parts.push(format!("{{t: {title}}}"));
        }
        if let Some(tempo) = &self.tempo {
            parts.push(format!("{{tempo: {tempo}}}"));
        }
        if !parts.is_empty() {
            parts.push(String::new());
        }
        parts.push(body.to_string());
        if let Some(copyright) = &self.copyright {
            parts.push(String::new());
            parts.push(format!("{{c: {}}}", copyright.replace('\n', " | ")));
        }
        let mut doc = parts.join("\n");
        doc.push('\n');
        doc
    }
}
