//! Pulls embedded chord names out of lyric text.
//!
//! PDF extraction of two-layer chord sheets collapses the chord layer into
//! the lyric layer, gluing chord names into the middle of words
//! (`aanBb2wezigC/Dheid`). Separation removes every accepted chord token,
//! then reinserts it as a bracketed `[Chord]` at the nearest word boundary
//! to its left. Removal shifts every later offset, so insertion positions
//! are projected through an [`OffsetMap`] of the removals made so far.

use crate::chord::classify::{Classifier, Verdict};
use crate::chord::{scan, ChordToken};

/// Removals applied to a text, in ascending order of start offset.
#[derive(Debug, Default)]
struct OffsetMap {
    removals: Vec<(usize, usize)>,
}

impl OffsetMap {
    /// Position of `offset` after all removals that started before it.
    fn project(&self, offset: usize) -> usize {
        let shift: usize = self
            .removals
            .iter()
            .filter(|&&(start, _)| start < offset)
            .map(|&(_, len)| len)
            .sum();
        offset - shift
    }
}

/// Detect embedded chords in `text` and move them to word boundaries.
///
/// Tokens the classifier rejects stay untouched. The output contains the
/// same characters as the input plus one `[` `]` pair per accepted chord.
#[must_use]
pub fn separate(text: &str, classifier: &Classifier) -> String {
    let tokens: Vec<ChordToken> = scan(text)
        .into_iter()
        .filter(|token| classifier.verdict(text, token) == Verdict::Chord)
        .collect();
    if tokens.is_empty() {
        return text.to_string();
    }
    let count = tokens.len();
    tracing::debug!("separating {count} embedded chords");

    let mut map = OffsetMap::default();
    let mut stripped = String::with_capacity(text.len());
    let mut cursor = 0;
    for token in &tokens {
        stripped.push_str(&text[cursor..token.start]);
        map.removals.push((token.start, token.len()));
        cursor = token.end;
    }
    stripped.push_str(&text[cursor..]);

    // Scars are the projected offsets where earlier chords were cut out; a
    // word continuing across a scar was only glued together by the cut.
    let mut scars: Vec<usize> = Vec::with_capacity(count);
    let mut placements: Vec<(usize, &str)> = Vec::with_capacity(count);
    for token in &tokens {
        let adjusted = map.project(token.start);
        let position = insertion_point(&stripped, adjusted, &scars);
        scars.push(adjusted);
        placements.push((position, token.text.as_str()));
    }
    placements.sort_by_key(|&(position, _)| position);

    let mut out = String::with_capacity(text.len() + count * 2);
    let mut cursor = 0;
    for (position, chord) in placements {
        out.push_str(&stripped[cursor..position]);
        out.push('[');
        out.push_str(chord);
        out.push(']');
        cursor = position;
    }
    out.push_str(&stripped[cursor..]);
    out
}

/// Walk left from `offset` to the start of the enclosing word.
///
/// The walk stops at the first non-alphabetic character. Stepping onto a
/// scar means the word to the left belonged to an earlier chord's removal
/// site, so the chord stays at its own offset instead.
fn insertion_point(stripped: &str, offset: usize, scars: &[usize]) -> usize {
    let mut position = offset;
    loop {
        let Some(prev) = stripped[..position].chars().next_back() else {
            break;
        };
        if !prev.is_alphabetic() {
            break;
        }
        let candidate = position - prev.len_utf8();
        if scars.contains(&candidate) {
            return offset;
        }
        position = candidate;
    }
    position
}
