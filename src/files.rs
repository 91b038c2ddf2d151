//! File discovery, naming and batch conversion.
//!
//! Batch runs fan out over rayon: each input file is read, converted and
//! written independently, and one bad file only costs that file. Output
//! names are derived from song metadata through a single sanitizer so
//! every pipeline names files the same way.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;
use walkdir::WalkDir;

use crate::chord::classify::Classifier;
use crate::chordpro::metadata::Metadata;
use crate::chordpro::reflow::unwrap_lyric_lines;
use crate::error::{Error, Result};
use crate::sheet;
use crate::songbook::{self, Song};

#[allow(clippy::expect_used)]
static RE_NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex: RE_NON_WORD"));

#[allow(clippy::expect_used)]
static RE_DASH_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("valid regex: RE_DASH_RUN"));

#[allow(clippy::expect_used)]
static RE_TITLE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{t(?:itle)?:\s*(.+?)\}").expect("valid regex: RE_TITLE_DIRECTIVE")
});

#[allow(clippy::expect_used)]
static RE_ARTIST_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{a(?:rtist)?:\s*(.+?)\}").expect("valid regex: RE_ARTIST_DIRECTIVE")
});

/// Outcome counts of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files written successfully.
    pub written: usize,
    /// Inputs skipped after an error.
    pub failed: usize,
}

/// Turn a free-form name into a safe lowercase file stem.
#[must_use]
pub fn sanitize(name: &str) -> String {
    let cleaned = RE_NON_WORD.replace_all(name, "");
    let cleaned = RE_DASH_RUN.replace_all(&cleaned, "-");
    cleaned.trim_matches('-').to_lowercase()
}

/// Output name for one song cut from a songbook export.
///
/// Prefers `artist-title.chopro` from the song's own directives; a song
/// with neither directive falls back to its position in the export.
#[must_use]
pub fn songbook_filename(content: &str, index: usize) -> String {
    let title = directive_value(content, "title");
    let artist = directive_value(content, "subtitle");
    if title.is_none() && artist.is_none() {
        return format!("song-{}.chopro", index + 1);
    }
    let title = sanitized_or_unknown(title);
    let artist = sanitized_or_unknown(artist);
    format!("{artist}-{title}.chopro")
}

/// Output name for a converted chord sheet.
#[must_use]
pub fn sheet_filename(metadata: &Metadata, fallback_stem: &str) -> String {
    match (&metadata.number, &metadata.title) {
        (Some(number), Some(title)) => format!("{number}-{}.cho", sanitize(title)),
        (None, Some(title)) => format!("{}.cho", sanitize(title)),
        _ => {
            let stem = sanitize(fallback_stem);
            if stem.is_empty() {
                "song.cho".to_string()
            } else {
                format!("{stem}.cho")
            }
        }
    }
}

/// Output name for an unwrapped file, from its `{t:}` and `{a:}` directives.
#[must_use]
pub fn unwrap_filename(content: &str) -> Option<String> {
    let title = RE_TITLE_DIRECTIVE.captures(content).map(|caps| caps[1].to_string())?;
    let artist = RE_ARTIST_DIRECTIVE.captures(content).map(|caps| caps[1].to_string())?;
    Some(format!("{}-{}.cho", sanitize(&artist), sanitize(&title)))
}

/// Expand directories into the `.txt` files inside them, in sorted order.
#[must_use]
pub fn collect_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut inputs = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_map(std::result::Result::ok)
            {
                if entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|ext| ext == "txt")
                {
                    inputs.push(entry.into_path());
                }
            }
        } else {
            inputs.push(path.clone());
        }
    }
    inputs.sort();
    inputs
}

/// Convert every input sheet, writing next to it or into `out_dir`.
pub fn convert_files(
    inputs: &[PathBuf],
    out_dir: Option<&Path>,
    classifier: &Classifier,
) -> Result<BatchSummary> {
    if let Some(dir) = out_dir {
        fs_err::create_dir_all(dir).map_err(|e| Error::io(e, dir.to_path_buf()))?;
    }
    let outcomes: Vec<bool> = inputs
        .par_iter()
        .map(|input| {
            convert_one(input, out_dir, classifier).map_or_else(
                |e| {
                    tracing::warn!("skipping {}: {e}", input.display());
                    false
                },
                |()| true,
            )
        })
        .collect();
    let written = outcomes.iter().filter(|ok| **ok).count();
    Ok(BatchSummary {
        written,
        failed: outcomes.len() - written,
    })
}

/// Convert a single sheet to an explicit output path.
pub fn convert_file_to(input: &Path, output: &Path, classifier: &Classifier) -> Result<()> {
    let text = fs_err::read_to_string(input).map_err(|e| Error::io(e, input.to_path_buf()))?;
    let conversion = sheet::convert(&text, classifier);
    fs_err::write(output, conversion.document).map_err(|e| Error::io(e, output.to_path_buf()))?;
    tracing::info!("wrote {}", output.display());
    Ok(())
}

/// Split a songbook export and write each song to `out_dir`.
pub fn split_export(path: &Path, out_dir: &Path) -> Result<BatchSummary> {
    let text = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    let songs = songbook::split_songs(&text);
    if songs.is_empty() {
        return Err(Error::parse("no songs in export", path.to_path_buf()));
    }
    fs_err::create_dir_all(out_dir).map_err(|e| Error::io(e, out_dir.to_path_buf()))?;
    let outcomes: Vec<bool> = songs
        .par_iter()
        .map(|song| {
            write_song(song, out_dir).map_or_else(
                |e| {
                    tracing::warn!("skipping song {}: {e}", song.index + 1);
                    false
                },
                |()| true,
            )
        })
        .collect();
    let written = outcomes.iter().filter(|ok| **ok).count();
    Ok(BatchSummary {
        written,
        failed: outcomes.len() - written,
    })
}

/// Unwrap hard-wrapped lyric lines in a ChordPro file.
///
/// Without an explicit output the result lands next to the input, named
/// from the file's title and artist directives.
pub fn unwrap_file(input: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let text = fs_err::read_to_string(input).map_err(|e| Error::io(e, input.to_path_buf()))?;
    let unwrapped = unwrap_lyric_lines(&text);
    let target = output.map_or_else(
        || {
            let name = unwrap_filename(&text).unwrap_or_else(|| "output.cho".to_string());
            input.with_file_name(name)
        },
        Path::to_path_buf,
    );
    fs_err::write(&target, unwrapped).map_err(|e| Error::io(e, target.clone()))?;
    tracing::info!("wrote {}", target.display());
    Ok(target)
}

fn convert_one(input: &Path, out_dir: Option<&Path>, classifier: &Classifier) -> Result<()> {
    let text = fs_err::read_to_string(input).map_err(|e| Error::io(e, input.to_path_buf()))?;
    let conversion = sheet::convert(&text, classifier);
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("song");
    let name = sheet_filename(&conversion.metadata, stem);
    let output = match out_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    };
    fs_err::write(&output, conversion.document).map_err(|e| Error::io(e, output.clone()))?;
    tracing::info!("wrote {}", output.display());
    Ok(())
}

fn write_song(song: &Song, out_dir: &Path) -> Result<()> {
    let normalized = songbook::normalize(&song.body);
    let name = songbook_filename(&song.body, song.index);
    let output = out_dir.join(name);
    fs_err::write(&output, normalized).map_err(|e| Error::io(e, output.clone()))?;
    tracing::info!("wrote {}", output.display());
    Ok(())
}

/// First value of a `{name: value}` directive in `content`.
fn directive_value<'a>(content: &'a str, name: &str) -> Option<&'a str> {
    content.lines().find_map(|line| {
        line.trim()
            .strip_prefix('{')
            .and_then(|rest| rest.strip_prefix(name))
            .and_then(|rest| rest.strip_prefix(':'))
            .and_then(|rest| rest.strip_suffix('}'))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    })
}

fn sanitized_or_unknown(value: Option<&str>) -> String {
    let clean = sanitize(value.unwrap_or(""));
    if clean.is_empty() {
        "unknown".to_string()
    } else {
        clean
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Mighty God!"), "mighty-god");
        assert_eq!(sanitize("  Lord of All  "), "lord-of-all");
        assert_eq!(sanitize("Heer, U bent © 2024"), "heer-u-bent-2024");
        assert_eq!(sanitize("???"), "");
    }

    #[test]
    fn test_songbook_filename_from_directives() {
        let content = "{title: Lied}\n{subtitle: Band}\nregel";
        assert_eq!(songbook_filename(content, 0), "band-lied.chopro");
    }

    #[test]
    fn test_songbook_filename_single_side_defaults() {
        assert_eq!(songbook_filename("{title: Lied}\nregel", 0), "unknown-lied.chopro");
        assert_eq!(songbook_filename("{subtitle: Band}\nregel", 0), "band-unknown.chopro");
    }

    #[test]
    fn test_songbook_filename_positional_fallback() {
        assert_eq!(songbook_filename("alleen tekst", 2), "song-3.chopro");
    }

    #[test]
    fn test_songbook_filename_first_directive_wins() {
        let content = "{title: Eerste}\nregel\n{title: Tweede}\n{subtitle: Band}";
        assert_eq!(songbook_filename(content, 0), "band-eerste.chopro");
    }

    #[test]
    fn test_sheet_filename() {
        let full = Metadata {
            number: Some("566".to_string()),
            title: Some("Machtig Heer".to_string()),
            ..Metadata::default()
        };
        assert_eq!(sheet_filename(&full, "x"), "566-machtig-heer.cho");

        let titled = Metadata {
            title: Some("Machtig Heer".to_string()),
            ..Metadata::default()
        };
        assert_eq!(sheet_filename(&titled, "x"), "machtig-heer.cho");

        assert_eq!(sheet_filename(&Metadata::default(), "Input 1"), "input-1.cho");
        assert_eq!(sheet_filename(&Metadata::default(), "???"), "song.cho");
    }

    #[test]
    fn test_unwrap_filename_needs_both_directives() {
        let content = "{t: The Joy}\n{a: Belonging Co}\nregel]";
        assert_eq!(
            unwrap_filename(content).as_deref(),
            Some("belonging-co-the-joy.cho")
        );
        assert_eq!(unwrap_filename("{t: The Joy}\nregel]"), None);
    }

    #[test]
    fn test_collect_inputs_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("binnen");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("a.txt"), "x").unwrap();
        std::fs::write(nested.join("b.txt"), "x").unwrap();
        std::fs::write(dir.path().join("c.md"), "x").unwrap();

        let inputs = collect_inputs(&[dir.path().to_path_buf()]);
        assert_eq!(inputs.len(), 2);
        assert!(inputs.iter().all(|p| p.extension().is_some_and(|e| e == "txt")));
    }

    #[test]
    fn test_convert_files_writes_named_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("invoer.txt");
        std::fs::write(&input, "566 Lied\nRefrein:\nU bent goed").unwrap();
        let out_dir = dir.path().join("uit");

        let summary =
            convert_files(&[input], Some(&out_dir), &Classifier::default()).unwrap();
        assert_eq!(summary, BatchSummary { written: 1, failed: 0 });

        let document = std::fs::read_to_string(out_dir.join("566-lied.cho")).unwrap();
        assert!(document.starts_with("{t: Lied}"));
    }

    #[test]
    fn test_convert_files_counts_missing_input_as_failed() {
        let dir = tempfile::tempdir().unwrap();
        let summary = convert_files(
            &[dir.path().join("bestaat-niet.txt")],
            None,
            &Classifier::default(),
        )
        .unwrap();
        assert_eq!(summary, BatchSummary { written: 0, failed: 1 });
    }

    #[test]
    fn test_split_export_writes_each_song() {
        let dir = tempfile::tempdir().unwrap();
        let export = dir.path().join("export.txt");
        std::fs::write(
            &export,
            "{title: Eerste}\n{subtitle: Band}\n!Chorus\nregel\n{new_song}\n{title: Tweede}\nVerse 2\nregel\n",
        )
        .unwrap();
        let out_dir = dir.path().join("songs");

        let summary = split_export(&export, &out_dir).unwrap();
        assert_eq!(summary, BatchSummary { written: 2, failed: 0 });
        assert!(out_dir.join("band-eerste.chopro").is_file());
        assert!(out_dir.join("unknown-tweede.chopro").is_file());
    }

    #[test]
    fn test_split_export_rejects_empty_export() {
        let dir = tempfile::tempdir().unwrap();
        let export = dir.path().join("leeg.txt");
        std::fs::write(&export, "\n\n").unwrap();
        let err = split_export(&export, &dir.path().join("songs")).unwrap_err();
        assert!(err.to_string().contains("no songs"));
    }

    #[test]
    fn test_unwrap_file_names_output_from_directives() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("wrapped.cho");
        std::fs::write(&input, "{t: The Joy}\n{a: Belonging Co}\nthe joy the\nbelonging\n").unwrap();

        let target = unwrap_file(&input, None).unwrap();
        assert_eq!(
            target.file_name().and_then(|n| n.to_str()),
            Some("belonging-co-the-joy.cho")
        );
        let text = std::fs::read_to_string(target).unwrap();
        assert!(text.contains("the joy the belonging\n"));
    }
}
