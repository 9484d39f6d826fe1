//! Fuzz target for Java archive inspection.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_archive_inspector
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = depreport_repo::fuzz::inspect_archive(data);
});
