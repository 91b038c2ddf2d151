//! Multi-song OnSong export handling.
//!
//! An export is one text file with songs separated by a `{new_song}`
//! marker. Each song is normalized on its own: section labels become
//! directives, sections get balanced closings, and blank lines settle
//! into the reflowed shape.

pub mod label;

use crate::chordpro::reflow::reflow_lines;
use crate::chordpro::section::balance_lines;

/// Marker separating songs in an OnSong export.
pub const SONG_DELIMITER: &str = "{new_song}";

/// One song cut from an export.
#[derive(Debug, Clone)]
pub struct Song {
    /// Position in the export, starting at zero.
    pub index: usize,
    /// Raw song text between delimiters.
    pub body: String,
}

/// Split an export on [`SONG_DELIMITER`], dropping empty segments.
#[must_use]
pub fn split_songs(export: &str) -> Vec<Song> {
    export
        .split(SONG_DELIMITER)
        .filter(|segment| !segment.trim().is_empty())
        .enumerate()
        .map(|(index, segment)| Song {
            index,
            body: segment.to_string(),
        })
        .collect()
}

/// Normalize one song body into balanced, reflowed ChordPro.
#[must_use]
pub fn normalize(body: &str) -> String {
    let lines: Vec<String> = body.lines().map(label::to_directive).collect();
    let balanced = balance_lines(&lines);
    let mut out = reflow_lines(&balanced).join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::chordpro::{is_end_directive, is_start_directive};

    const EXPORT: &str = "{title: Eerste}\n{subtitle: Band}\n!Chorus\nregel een\n\n{new_song}\n{title: Tweede}\nVerse 2\nregel twee\n";

    #[test]
    fn test_split_on_delimiter() {
        let songs = split_songs(EXPORT);
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].index, 0);
        assert!(songs[0].body.contains("Eerste"));
        assert!(songs[1].body.contains("Tweede"));
    }

    #[test]
    fn test_split_drops_empty_segments() {
        let songs = split_songs("{new_song}\n\n{new_song}lied{new_song}");
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].body, "lied");
    }

    #[test]
    fn test_export_starting_with_delimiter_has_no_leading_song() {
        let songs = split_songs("{new_song}A\n{new_song}B");
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].body.trim(), "A");
        assert_eq!(songs[1].body.trim(), "B");
    }

    #[test]
    fn test_normalize_balances_and_reflows() {
        let songs = split_songs(EXPORT);
        assert_eq!(
            normalize(&songs[0].body),
            "{title: Eerste}\n{subtitle: Band}\n{start_of_chorus}\nregel een\n{end_of_chorus}\n"
        );
        assert_eq!(
            normalize(&songs[1].body),
            "{title: Tweede}\n{start_of_verse: Verse 2}\nregel twee\n{end_of_verse}\n"
        );
    }

    #[test]
    fn test_normalize_closes_every_section() {
        for song in split_songs(EXPORT) {
            let normalized = normalize(&song.body);
            let starts = normalized.lines().filter(|l| is_start_directive(l)).count();
            let ends = normalized.lines().filter(|l| is_end_directive(l)).count();
            assert_eq!(starts, ends, "unbalanced sections in song {}", song.index);
        }
    }
}
