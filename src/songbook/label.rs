//! OnSong section label recognition and rewriting.
//!
//! Exported songs mark sections either with a `!` prefix (`!Chorus`) or a
//! bare label (`Verse 2`, `Bridge`). Known labels map onto the four
//! ChordPro section kinds; anything else marked with `!` or a trailing
//! qualifier becomes a `{comment: ...}` heading.

use crate::chordpro::{start_directive, SectionKind};

/// Labels recognized without a `!` prefix, lowercased.
const SECTION_LABELS: &[&str] = &[
    "chorus",
    "verse",
    "bridge",
    "intro",
    "interlude",
    "pre-chorus",
    "post-chorus",
    "tag",
    "instrumental",
    "outro",
    "refrain",
];

/// Whether `line` is a section label rather than lyric content.
///
/// A bare label must be the whole line or be followed by a qualifier
/// separated with a space, so lyric lines that merely open with a label
/// word (`Tagged and bound`) pass through.
#[must_use]
pub fn is_section_label(line: &str) -> bool {
    let lower = line.trim().to_lowercase();
    if lower.starts_with('!') {
        return true;
    }
    SECTION_LABELS.iter().any(|label| {
        lower
            .strip_prefix(label)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
    })
}

/// Rewrite a section label into its ChordPro directive.
///
/// Non-label lines come back unchanged apart from edge trimming. Verse
/// labels with a number keep it as the section label; labels that have no
/// section kind of their own become comment headings.
#[must_use]
pub fn to_directive(line: &str) -> String {
    let trimmed = line.trim();
    if !is_section_label(trimmed) {
        return trimmed.to_string();
    }
    let label = trimmed.strip_prefix('!').unwrap_or(trimmed);
    let lower = label.to_lowercase();
    if lower == "chorus" || lower == "refrain" {
        start_directive(SectionKind::Chorus, None)
    } else if lower.starts_with("verse") {
        if label.split_whitespace().count() > 1 {
            start_directive(SectionKind::Verse, Some(label))
        } else {
            start_directive(SectionKind::Verse, None)
        }
    } else if lower == "bridge" {
        start_directive(SectionKind::Bridge, None)
    } else if lower.starts_with("pre-chorus") {
        start_directive(SectionKind::Chorus, Some("Pre-Chorus"))
    } else if lower.starts_with("post-chorus") {
        start_directive(SectionKind::Chorus, Some("Post-Chorus"))
    } else if lower.starts_with("intro") {
        start_directive(SectionKind::Tab, Some("Intro"))
    } else if lower.starts_with("interlude") {
        start_directive(SectionKind::Tab, Some("Interlude"))
    } else if lower == "tag" {
        start_directive(SectionKind::Chorus, Some("Tag"))
    } else if lower.starts_with("instrumental") {
        start_directive(SectionKind::Tab, Some("Instrumental"))
    } else if lower == "outro" {
        start_directive(SectionKind::Tab, Some("Outro"))
    } else {
        format!("{{comment: {label}}}")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_known_labels_map_to_directives() {
        let cases = [
            ("Chorus", "{start_of_chorus}"),
            ("Refrain", "{start_of_chorus}"),
            ("!Chorus", "{start_of_chorus}"),
            ("Verse", "{start_of_verse}"),
            ("Verse 2", "{start_of_verse: Verse 2}"),
            ("!Verse 3", "{start_of_verse: Verse 3}"),
            ("Bridge", "{start_of_bridge}"),
            ("Pre-Chorus", "{start_of_chorus: Pre-Chorus}"),
            ("Post-Chorus", "{start_of_chorus: Post-Chorus}"),
            ("Intro", "{start_of_tab: Intro}"),
            ("Interlude", "{start_of_tab: Interlude}"),
            ("Tag", "{start_of_chorus: Tag}"),
            ("Instrumental", "{start_of_tab: Instrumental}"),
            ("Outro", "{start_of_tab: Outro}"),
        ];
        for (label, directive) in cases {
            assert_eq!(to_directive(label), directive, "label {label:?}");
        }
    }

    #[test]
    fn test_unknown_qualified_label_becomes_comment() {
        assert_eq!(to_directive("Chorus 2"), "{comment: Chorus 2}");
        assert_eq!(to_directive("!Guitar Solo"), "{comment: Guitar Solo}");
    }

    #[test]
    fn test_lyric_line_passes_through() {
        assert_eq!(to_directive("Verses of old they sang"), "Verses of old they sang");
        assert_eq!(to_directive("gewone regel"), "gewone regel");
    }

    #[test]
    fn test_label_detection() {
        assert!(is_section_label("!anything at all"));
        assert!(is_section_label("  Verse 2  "));
        assert!(is_section_label("outro"));
        assert!(!is_section_label("Tagged and bound"));
        assert!(!is_section_label("zing het uit"));
    }
}
