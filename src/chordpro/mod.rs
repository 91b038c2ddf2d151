//! ChordPro directive vocabulary shared by both pipelines.
//!
//! Section kinds are an enumerated type so that directive construction and
//! recognition happen in one place instead of string matching at every call
//! site.

pub mod metadata;
pub mod reflow;
pub mod section;

/// Canonical section kinds used in `{start_of_*}` / `{end_of_*}` pairs.
///
/// `Tab` covers the instrumental-flavored labels (intro, interlude,
/// instrumental, outro, coda).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Chorus, refrain, pre/post-chorus, tag.
    Chorus,
    /// Numbered or bare verses.
    Verse,
    /// Bridge.
    Bridge,
    /// Instrumental blocks rendered as tab sections.
    Tab,
}

impl SectionKind {
    /// Directive name fragment for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chorus => "chorus",
            Self::Verse => "verse",
            Self::Bridge => "bridge",
            Self::Tab => "tab",
        }
    }

    /// Infer the kind from a start or end directive line, by substring.
    #[must_use]
    pub fn from_directive(line: &str) -> Option<Self> {
        if line.contains("chorus") {
            Some(Self::Chorus)
        } else if line.contains("verse") {
            Some(Self::Verse)
        } else if line.contains("bridge") {
            Some(Self::Bridge)
        } else if line.contains("tab") {
            Some(Self::Tab)
        } else {
            None
        }
    }
}

/// Build a `{start_of_<kind>}` directive, with an optional display label.
#[must_use]
pub fn start_directive(kind: SectionKind, label: Option<&str>) -> String {
    label.map_or_else(
        || format!("{{start_of_{}}}", kind.as_str()),
        |label| format!("{{start_of_{}: {label}}}", kind.as_str()),
    )
}

/// Build the matching `{end_of_<kind>}` directive.
#[must_use]
pub fn end_directive(kind: SectionKind) -> String {
    format!("{{end_of_{}}}", kind.as_str())
}

/// Whether a line opens a section.
#[must_use]
pub fn is_start_directive(line: &str) -> bool {
    line.trim_start().starts_with("{start_of_")
}

/// Whether a line closes a section.
#[must_use]
pub fn is_end_directive(line: &str) -> bool {
    line.trim_start().starts_with("{end_of_")
}

/// Whether a line is a `{comment: ...}` directive.
#[must_use]
pub fn is_comment_directive(line: &str) -> bool {
    line.trim_start().starts_with("{comment:")
}

/// Whether a line is any brace-delimited directive.
#[must_use]
pub fn is_directive(line: &str) -> bool {
    line.trim_start().starts_with('{')
}

/// Whether a line is a song-metadata directive (title/key/subtitle/artist).
///
/// These hug the following section start with no blank line between them.
#[must_use]
pub fn is_metadata_directive(line: &str) -> bool {
    let trimmed = line.trim_start();
    ["{title:", "{key:", "{subtitle:", "{artist:"]
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
}
