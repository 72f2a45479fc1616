//! Fuzz target for the untyped load-options boundary.
//!
//! Arbitrary JSON is turned into `LoadOptions`, checked against every reader,
//! then split into the per-strategy option structs, checking for panics.

#![no_main]

use dataset_loader::options::fuzz_parse_load_options;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let _ = fuzz_parse_load_options(data);
});
