//! Layout fuzz target: the first byte splits the input into layout text and file bytes.
//! Parsing and reading must not panic, in strict or lenient mode.
//! Build with: cargo fuzz run layout_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    use binspect::{parse, Endianness, Reader, ReaderOpts};

    let Some((&split, rest)) = data.split_first() else { return };
    let split = (split as usize).min(rest.len());
    let (layout, bytes) = rest.split_at(split);
    let Ok(src) = std::str::from_utf8(layout) else { return };
    let Ok(fields) = parse(src) else { return };
    for opts in [ReaderOpts::default().with_gaps(), ReaderOpts::default().with_gaps().lenient()] {
        if let Ok(reader) = Reader::new(fields.clone(), opts) {
            let _ = reader.read_slice(bytes, Endianness::Little);
        }
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run layout_fuzz");
}
