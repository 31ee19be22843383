//! Decode a binary file against a layout and print the field tree.
//!
//! Usage:
//!   binspect [OPTIONS] LAYOUT FILE
//!
//! Options:
//!   --big, -b        Big-endian integers (default: native byte order)
//!   --little, -l     Little-endian integers
//!   --gaps, -g       Report byte ranges no field claimed
//!   --lenient, -k    Record field errors and keep going instead of stopping
//!
//! Set RUST_LOG=binspect=debug to trace field resolution on stderr.

use anyhow::Context;
use binspect::dump::Tree;
use binspect::{parse, BinaryFile, Endianness, Reader, ReaderOpts};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn take_flag(args: &mut Vec<String>, long: &str, short: &str) -> bool {
    if let Some(pos) = args.iter().position(|a| a == long || a == short) {
        args.remove(pos);
        true
    } else {
        false
    }
}

fn usage() -> ! {
    eprintln!("usage: binspect [--big|--little] [--gaps] [--lenient] LAYOUT FILE");
    std::process::exit(2);
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if take_flag(&mut args, "--help", "-h") {
        usage();
    }
    let big = take_flag(&mut args, "--big", "-b");
    let little = take_flag(&mut args, "--little", "-l");
    let endianness = match (big, little) {
        (true, true) => anyhow::bail!("--big and --little are mutually exclusive"),
        (true, false) => Endianness::Big,
        (false, true) => Endianness::Little,
        (false, false) => Endianness::native(),
    };
    let mut opts = ReaderOpts::default();
    if take_flag(&mut args, "--gaps", "-g") {
        opts = opts.with_gaps();
    }
    if take_flag(&mut args, "--lenient", "-k") {
        opts = opts.lenient();
    }
    let (layout_path, file_path) = match args.as_slice() {
        [layout, file] => (layout.clone(), file.clone()),
        _ => usage(),
    };

    let layout_src = std::fs::read_to_string(&layout_path)
        .with_context(|| format!("reading layout {}", layout_path))?;
    let fields = parse(&layout_src).with_context(|| format!("parsing layout {}", layout_path))?;
    let reader = Reader::new(fields, opts)?;

    let label = Path::new(&file_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.clone());
    let file = BinaryFile::open(&file_path, label, endianness)
        .with_context(|| format!("opening {}", file_path))?;

    let result = reader
        .read_binary(&file)
        .with_context(|| format!("decoding {}", file_path))?;
    print!("{}", Tree(&result));

    if !result.is_complete() {
        std::process::exit(1);
    }
    Ok(())
}
