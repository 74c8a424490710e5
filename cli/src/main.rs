//! isowalk - list the contents of an ISO9660 image
//!
//! Prints the primary volume descriptor followed by every directory of the
//! image, depth first. Diagnostics go to stderr.

mod dump;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use iso9660::{Image, ImageReader, WalkOptions};
use tracing_subscriber::EnvFilter;

use dump::Dump;

#[derive(Parser, Debug)]
#[command(version, about = "List the contents of an ISO9660 image")]
struct Args {
    /// Image file (2048-byte sectors, or 2352-byte raw CD sectors)
    image: PathBuf,

    /// More diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Skip the primary volume descriptor fields
    #[arg(long)]
    no_header: bool,

    /// Indent entries by directory depth
    #[arg(long)]
    indent: bool,

    /// Exit with failure if any part of the tree could not be read
    #[arg(long)]
    strict: bool,

    /// Deepest directory level to enter
    #[arg(long, default_value_t = 64)]
    max_depth: usize,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Returns false when `--strict` is set and the walk was incomplete
fn run(args: &Args) -> Result<bool> {
    let file = File::open(&args.image)
        .with_context(|| format!("failed to open {}", args.image.display()))?;
    let mut image = Image::open(ImageReader::new(BufReader::new(file)))
        .with_context(|| format!("failed to decode {}", args.image.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if !args.no_header {
        for (label, value) in image.primary().fields() {
            writeln!(out, "{}: {}", label, value)?;
        }
        writeln!(out)?;
    }

    let options = WalkOptions {
        max_depth: args.max_depth,
    };
    let mut dump = Dump::new(&mut out, io::stderr().lock(), args.indent);
    let summary = image.walk(&mut dump, &options);
    dump.finish().context("failed to write listing")?;

    tracing::info!(
        "{} directories, {} entries",
        summary.directories,
        summary.entries
    );
    if summary.is_degraded() {
        tracing::warn!("{} parts of the tree could not be read", summary.issues);
    }

    Ok(!(args.strict && summary.is_degraded()))
}
