//! Fuzz target for upstream menu decoding
//!
//! Feeds arbitrary bytes to the restaurant decoder and, when they happen to
//! decode, builds an index and looks up every campus.
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an error.

#![no_main]

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use unari_core::{CampusDirectory, MenuIndex};
use unari_server::fetch::decode_restaurants;

fuzz_target!(|data: &[u8]| {
    let Ok(records) = decode_restaurants(data) else {
        return;
    };

    let campuses = CampusDirectory::helsinki();
    let index = MenuIndex::from_records(&campuses, records);
    let Some(date) = NaiveDate::from_ymd_opt(2025, 6, 2) else {
        return;
    };

    for campus in campuses.campuses() {
        for section in index.lookup(&campus.name, date) {
            assert!(campus.contains(section.restaurant));
        }
    }
});
