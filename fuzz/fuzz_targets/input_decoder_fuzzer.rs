//! Fuzz target for the terminal input decoder
//!
//! Client bytes arrive in arbitrary chunks over SSH. The decoder must cope
//! with any split of any byte sequence.
//!
//! # Invariants
//!
//! - NEVER panic, whatever the bytes or chunk boundaries
//! - Never more inputs than bytes fed
//! - Pending state stays bounded (garbage sequences are discarded)
//! - Re-chunking a stream of complete sequences yields the same inputs

#![no_main]

use libfuzzer_sys::fuzz_target;
use unari_tui::InputDecoder;

fuzz_target!(|chunks: Vec<Vec<u8>>| {
    let mut decoder = InputDecoder::new();
    let mut decoded = Vec::new();
    let mut fed = 0usize;

    for chunk in &chunks {
        fed += chunk.len();
        decoded.extend(decoder.feed(chunk));
        assert!(decoded.len() <= fed, "more inputs than bytes");
    }

    // Printable ASCII is one key per byte regardless of chunking.
    let printable: Vec<u8> = chunks.concat().into_iter().filter(|b| (0x20..0x7f).contains(b)).collect();
    let whole = InputDecoder::new().feed(&printable);
    let mut split = InputDecoder::new();
    let pieces: Vec<_> = printable.chunks(3).flat_map(|c| split.feed(c)).collect();
    assert_eq!(whole, pieces);
    assert_eq!(whole.len(), printable.len());
});
