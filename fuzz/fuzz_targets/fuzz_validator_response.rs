#![no_main]

use libfuzzer_sys::fuzz_target;
use metadelta::infrastructure::validator::parse_response;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        // Garbage must come back as an error, never a panic
        let _ = parse_response(raw);
    }
});
