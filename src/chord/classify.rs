//! Chord/lyric disambiguation.
//!
//! A grammar match is only a candidate: short capitalized words (`Dat`,
//! `Geest`) and word fragments also fit the chord shape. The verdict is a
//! heuristic over the local context of the match, kept as a pure function so
//! it can be table-tested in isolation. False verdicts on ambiguous short
//! words are a documented limitation, tuned via the deny-list rather than
//! eliminated.

use std::collections::HashSet;

use super::ChordToken;

/// Common short Dutch words that coincidentally fit the chord grammar.
///
/// Matched against the lower-cased enclosing word of a candidate. The list is
/// corpus-dependent; [`crate::config::Config`] can replace it.
pub const DEFAULT_DENY_WORDS: &[&str] =
    &["dat", "aan", "een", "van", "met", "als", "bij", "dit", "hij", "zij"];

/// Classification of one chord candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The candidate is a real chord and should be separated out.
    Chord,
    /// The candidate is part of a lyric word and must be left alone.
    Lyric,
}

impl Verdict {
    /// Lower-case name, for logs and the dump tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chord => "chord",
            Self::Lyric => "lyric",
        }
    }
}

/// Chord/lyric disambiguator with a configurable word deny-list.
#[derive(Debug, Clone)]
pub struct Classifier {
    deny: HashSet<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            deny: DEFAULT_DENY_WORDS.iter().map(|w| (*w).to_string()).collect(),
        }
    }
}

impl Classifier {
    /// Create a classifier with the given deny-list (replaces the default).
    pub fn new(deny_words: &[String]) -> Self {
        Self {
            deny: deny_words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Decide whether a scanned token is a chord or part of a lyric word.
    pub fn verdict(&self, text: &str, token: &ChordToken) -> Verdict {
        let before = text[..token.start].chars().next_back();
        let after = text[token.end..].chars().next();

        if token.text.chars().all(char::is_alphabetic) {
            // Flanked by lowercase on both sides, a pure-letter candidate is
            // the interior of a word. Tokens carrying a digit, accidental or
            // slash bass are exempt: those are what embedded chords look like.
            if before.is_some_and(char::is_lowercase) && after.is_some_and(char::is_lowercase) {
                return Verdict::Lyric;
            }

            // A lone capital glued to another letter reads as a word initial
            // (`Geest`, `Dat`), not as a chord.
            if token.text.chars().count() == 1
                && (before.is_some_and(char::is_alphabetic)
                    || after.is_some_and(char::is_alphabetic))
            {
                return Verdict::Lyric;
            }
        }

        let word = enclosing_word(text, token.start, token.end).to_lowercase();
        if self.deny.contains(&word) {
            return Verdict::Lyric;
        }

        Verdict::Chord
    }
}

/// Expand a span to the full alphabetic run that encloses it.
///
/// Walks left from `start` and right from `end` over alphabetic characters;
/// the result includes the span itself.
#[must_use]
pub fn enclosing_word(text: &str, start: usize, end: usize) -> &str {
    let left: usize = text[..start]
        .chars()
        .rev()
        .take_while(|c| c.is_alphabetic())
        .map(char::len_utf8)
        .sum();
    let right: usize = text[end..]
        .chars()
        .take_while(|c| c.is_alphabetic())
        .map(char::len_utf8)
        .sum();
    &text[start - left..end + right]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::chord::scan;

    /// Verdict of the token whose text equals `token_text` in `text`.
    fn verdict_of(classifier: &Classifier, text: &str, token_text: &str) -> Verdict {
        let token = scan(text)
            .into_iter()
            .find(|t| t.text == token_text)
            .unwrap_or_else(|| panic!("no token {token_text:?} in {text:?}"));
        classifier.verdict(text, &token)
    }

    #[test]
    fn test_verdict_fixtures() {
        let classifier = Classifier::default();
        let cases: &[(&str, &str, Verdict)] = &[
            // Embedded chords carrying a digit or slash are accepted even
            // when flanked by lowercase letters.
            ("aanBb2wezigheid", "Bb2", Verdict::Chord),
            ("wezigC/Dheid", "C/D", Verdict::Chord),
            ("mijn Gm7wegen leidt", "Gm7", Verdict::Chord),
            // A pure-letter token at the end of a word, next char non-letter.
            ("heidDm in", "Dm", Verdict::Chord),
            ("mijn Bbleven aan", "Bb", Verdict::Chord),
            // Standalone chords and progression cells.
            ("|C Am7 |", "C", Verdict::Chord),
            ("|C Am7 |", "Am7", Verdict::Chord),
            ("toe. F Am7", "F", Verdict::Chord),
            // Word initials: a lone capital glued to letters is lyric text.
            ("Geest", "G", Verdict::Lyric),
            ("uw Geest mij", "G", Verdict::Lyric),
            ("Come to me", "C", Verdict::Lyric),
            // Deny-listed Dutch words, capitalized at sentence start.
            ("Dat uw Geest", "D", Verdict::Lyric),
            ("Een dag", "E", Verdict::Lyric),
        ];
        for (text, token_text, expected) in cases {
            assert_eq!(
                verdict_of(&classifier, text, token_text),
                *expected,
                "text={text:?} token={token_text:?}"
            );
        }
    }

    #[test]
    fn test_pure_letter_interior_rejected() {
        // A pure-letter fragment with lowercase on both sides stays a word.
        let classifier = Classifier::default();
        assert_eq!(verdict_of(&classifier, "aGile", "G"), Verdict::Lyric);
    }

    #[test]
    fn test_deny_list_is_pluggable() {
        let default = Classifier::default();
        let custom = Classifier::new(&["dm".to_string()]);
        assert_eq!(verdict_of(&default, "Dm is goed", "Dm"), Verdict::Chord);
        assert_eq!(verdict_of(&custom, "Dm is goed", "Dm"), Verdict::Lyric);
    }

    #[test]
    fn test_enclosing_word_expands_both_ways() {
        let text = "Ik verlang naar uw aanBb2wezigheid";
        let token = scan(text).into_iter().find(|t| t.text == "Bb2").unwrap();
        assert_eq!(enclosing_word(text, token.start, token.end), "aanBb2wezigheid");
    }

    #[test]
    fn test_enclosing_word_stops_at_non_alphabetic() {
        assert_eq!(enclosing_word("x1abc2y", 2, 5), "abc");
    }

    #[test]
    fn test_default_deny_words_present() {
        for word in ["dat", "een", "van", "zij"] {
            assert!(DEFAULT_DENY_WORDS.contains(&word));
        }
    }
}
