//! Chord token grammar and candidate scanning.
//!
//! The grammar recognizes a root note `A`-`G`, an optional accidental, any
//! run of quality suffixes (`sus`, `maj`, `m`, digits, ...) and an optional
//! slash bass. It deliberately carries no word-boundary anchors: PDF text
//! extraction merges chord glyphs into the middle of lyric words
//! (`aanBb2wezigheid`), and anchored matching can never see those. The
//! [`classify`] module decides which candidates are real chords.

use std::sync::LazyLock;

use regex::Regex;

pub mod classify;

/// Regex matching one chord candidate, e.g. `Bb2`, `C/D`, `Gm7`, `Dsus4`.
#[allow(clippy::expect_used)]
static RE_CHORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-G][#b]?(?:sus|maj|min|m|M|add|dim|aug|\d)*(?:/[A-G][#b]?)?")
        .expect("valid regex: RE_CHORD")
});

/// One chord candidate found in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordToken {
    /// The matched chord text, e.g. `Bb2/C`.
    pub text: String,
    /// Byte offset of the first character of the match.
    pub start: usize,
    /// Byte offset just past the last character of the match.
    pub end: usize,
}

impl ChordToken {
    /// Length of the matched text in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the token is empty (never true for scanner output).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Scan a text for chord candidates, left to right, non-overlapping,
/// longest match per start position.
pub fn scan(text: &str) -> Vec<ChordToken> {
    RE_CHORD
        .find_iter(text)
        .map(|m| ChordToken {
            text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}
