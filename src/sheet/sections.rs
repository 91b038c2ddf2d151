//! Rewrites Opwekking section cues into ChordPro start directives.
//!
//! Sheets label sections inline with cues like `Intro:`, `Refrein:` or
//! `Vers 2:`. Each cue becomes a `{start_of_*}` directive on its own line;
//! the matching `{end_of_*}` is synthesized later by the section tracker.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::chordpro::{start_directive, SectionKind};

/// Cue regex. `Refrein 2x` must come before `Refrein` so the longer
/// alternative wins.
#[allow(clippy::expect_used)]
static RE_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(Intro|Refrein 2x|Refrein|Coda|Vers \d+):\s*")
        .expect("valid regex: RE_CUE")
});

/// Replace every section cue in `text` with a start directive line.
#[must_use]
pub fn rewrite_cues(text: &str) -> String {
    RE_CUE
        .replace_all(text, |caps: &Captures<'_>| {
            format!("\n{}\n", cue_directive(&caps[1]))
        })
        .into_owned()
}

/// Directive for one cue name, keeping the name as the section label where
/// the kind alone would lose it.
fn cue_directive(cue: &str) -> String {
    match cue {
        "Refrein" => start_directive(SectionKind::Chorus, None),
        "Refrein 2x" => start_directive(SectionKind::Chorus, Some(cue)),
        "Intro" | "Coda" => start_directive(SectionKind::Tab, Some(cue)),
        verse => start_directive(SectionKind::Verse, Some(verse)),
    }
}
