#![no_main]

use libfuzzer_sys::fuzz_target;
use metadelta::domain::services::manifest::{generate, parse};

fuzz_target!(|data: &[u8]| {
    if let Ok(xml) = std::str::from_utf8(data) {
        // Parsing arbitrary input, and regenerating whatever parsed, should never panic
        if let Ok(parsed) = parse(xml) {
            let _ = generate(&parsed.artifacts, "60.0");
        }
    }
});
