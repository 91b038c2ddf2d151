//! Conversion pipeline for single chord sheets.
//!
//! A sheet flows through five stages: metadata extraction, embedded chord
//! separation, section cue rewriting, spacing cleanup, and section
//! balancing with reflow. The copyright block is pulled out before chord
//! separation so names and years are never mistaken for chords.

pub mod cleanup;
pub mod sections;
pub mod separate;

use crate::chord::classify::Classifier;
use crate::chordpro::metadata::Metadata;
use crate::chordpro::reflow::reflow_lines;
use crate::chordpro::section::balance_lines;

/// Result of converting one chord sheet.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Final ChordPro document, newline terminated.
    pub document: String,
    /// Metadata pulled from the sheet header and footer.
    pub metadata: Metadata,
}

/// Convert raw chord sheet text into a ChordPro document.
#[must_use]
pub fn convert(text: &str, classifier: &Classifier) -> Conversion {
    let (metadata, remainder) = Metadata::extract(text);
    let separated = separate::separate(&remainder, classifier);
    let cued = sections::rewrite_cues(&separated);
    let cleaned = cleanup::clean(&cued);
    let lines: Vec<String> = cleaned.lines().map(ToString::to_string).collect();
    let balanced = balance_lines(&lines);
    let body = reflow_lines(&balanced).join("\n");
    let document = metadata.render_document(&body);
    Conversion { document, metadata }
}
