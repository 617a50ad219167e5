#![forbid(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lsl::cli::{Args, ListConfig};
use lsl::entry::SortedEntries;
use lsl::meta::SystemMetadata;
use lsl::render::render_report;
use lsl::resolve::resolve_path;
use lsl::widths::ColumnWidths;

fn main() {
    // clap reports unknown options itself and exits 2, matching ls(1);
    // the mandatory -l is enforced here, after parsing.
    let args = Args::parse();
    if !args.long {
        eprintln!("lsl: option '-l' must be specified");
        eprintln!("Try 'lsl --help' for more information.");
        std::process::exit(2);
    }

    if let Err(e) = run(&args) {
        eprintln!("lsl: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = ListConfig::from_env();
    let source = SystemMetadata::new();
    let mut widths = ColumnWidths::default();
    let mut entries = SortedEntries::new();

    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths.clone()
    };

    // Collect everything before printing: the column widths depend on the
    // whole result set. Unreadable paths are reported and skipped; the run
    // still succeeds with whatever could be read.
    for path in &paths {
        match resolve_path(&source, &config, &mut widths, path) {
            Ok(entry) => entries.insert(entry),
            Err(err) => eprintln!("lsl: {err}"),
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render_report(&mut out, &entries, &widths, &config).context("failed to write listing")?;
    out.flush().context("failed to write listing")?;
    Ok(())
}
