//! Fuzz target for split inference and file selection.
//!
//! Each input line is treated as a repository path.

#![no_main]

use dataset_loader::hub::select::{infer_split_from_path, select_split_files};
use dataset_loader::Split;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let listing: Vec<String> = text.lines().map(str::to_string).collect();

    for path in &listing {
        let _ = infer_split_from_path(path);
    }
    for split in Split::ALL {
        if let Some(selected) = select_split_files(&listing, split, None) {
            assert!(!selected.files.is_empty());
        }
    }
});
