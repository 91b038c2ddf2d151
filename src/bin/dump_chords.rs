//! Debug tool to dump chord token classification for a chord sheet.
//!
//! Usage:
//!   `cargo run --bin dump_chords -- <sheet.txt>`
//!   `cargo run --bin dump_chords -- <sheet.txt> --json`
//!   `cargo run --bin dump_chords -- <sheet.txt> --deny dat,aan`
//!
//! Prints every chord-shaped token the scanner finds, the word it sits in,
//! and the verdict the classifier reaches, for debugging lyric words that
//! get mistaken for chords.

// Development/debug binary - allow expect/unwrap for simpler error handling
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::env;
use std::fs;
use std::path::Path;

use serde::Serialize;

use chordflow::chord::classify::{enclosing_word, Classifier};
use chordflow::chord::scan;

#[derive(Serialize)]
struct TokenReport<'a> {
    text: &'a str,
    start: usize,
    end: usize,
    word: &'a str,
    verdict: &'a str,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <sheet.txt> [--json] [--deny woord,woord]", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {e}", path.display());
        std::process::exit(1);
    });

    let classifier =
        deny_override(&args).map_or_else(Classifier::default, |words| Classifier::new(&words));

    let tokens = scan(&text);
    let reports: Vec<TokenReport<'_>> = tokens
        .iter()
        .map(|token| TokenReport {
            text: &token.text,
            start: token.start,
            end: token.end,
            word: enclosing_word(&text, token.start, token.end),
            verdict: classifier.verdict(&text, token).as_str(),
        })
        .collect();

    if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string_pretty(&reports).unwrap());
    } else {
        println!("{} chord-shaped tokens in {}", reports.len(), path.display());
        for report in &reports {
            println!(
                "{:>5}..{:<5} {:<10} {:<6} in {:?}",
                report.start, report.end, report.text, report.verdict, report.word
            );
        }
    }
}

/// Words following a `--deny` flag, comma separated.
fn deny_override(args: &[String]) -> Option<Vec<String>> {
    let position = args.iter().position(|arg| arg == "--deny")?;
    let csv = args.get(position + 1)?;
    Some(
        csv.split(',')
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .collect(),
    )
}
