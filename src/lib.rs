//! `ChordFlow` - chord sheet to `ChordPro` conversion tool.
//!
//! This crate converts two kinds of messy song text into clean `ChordPro`:
//! PDF-extracted chord sheets with chord names embedded inside lyric words,
//! and multi-song `OnSong` exports with loose section labels.

// Re-export public modules for use in integration tests and as a library
pub mod chord;
pub mod chordpro;
pub mod config;
pub mod error;
pub mod files;
pub mod sheet;
pub mod songbook;
