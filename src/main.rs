//! `ChordFlow` - chord sheet to `ChordPro` conversion tool.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chordflow::chord::classify::Classifier;
use chordflow::config::Config;
use chordflow::files;

/// Command-line arguments for chordflow
#[derive(Parser, Debug)]
#[command(name = "chordflow")]
#[command(about = "Convert chord sheets and songbook exports to ChordPro")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert chord sheet text files to ChordPro
    Convert {
        /// Sheet files, or directories searched for .txt sheets
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Explicit output path (single input only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory to write converted files into
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Split a songbook export into one ChordPro file per song
    Split {
        /// Export file containing {new_song} markers
        export: PathBuf,

        /// Directory to write songs into
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Join hard-wrapped lyric lines in a ChordPro file
    Unwrap {
        /// ChordPro file to unwrap
        input: PathBuf,

        /// Output path; defaults to a name derived from the file's directives
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chordflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::load().context("Failed to load configuration")?;

    match args.command {
        Command::Convert {
            inputs,
            output,
            out_dir,
        } => {
            let classifier = Classifier::new(&config.deny_words);
            if let Some(output) = output {
                if inputs.len() != 1 {
                    bail!("--output requires exactly one input file");
                }
                files::convert_file_to(&inputs[0], &output, &classifier)?;
            } else {
                let inputs = files::collect_inputs(&inputs);
                let out_dir = out_dir.or(config.out_dir);
                let summary = files::convert_files(&inputs, out_dir.as_deref(), &classifier)?;
                info!("{} written, {} failed", summary.written, summary.failed);
                if summary.failed > 0 {
                    bail!("{} of {} inputs failed", summary.failed, inputs.len());
                }
            }
        }
        Command::Split { export, out_dir } => {
            let out_dir = out_dir
                .or(config.out_dir)
                .unwrap_or_else(|| PathBuf::from("songs"));
            let summary = files::split_export(&export, &out_dir)?;
            info!("{} songs written to {}", summary.written, out_dir.display());
            if summary.failed > 0 {
                bail!("{} songs failed", summary.failed);
            }
        }
        Command::Unwrap { input, output } => {
            files::unwrap_file(&input, output.as_deref())?;
        }
    }

    Ok(())
}
