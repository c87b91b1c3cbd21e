#![no_main]

use libfuzzer_sys::fuzz_target;
use metadelta::domain::services::DiagnosticRules;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let rules = DiagnosticRules::builtin();
        let parsed = rules.parse(&[text]);
        for matched in parsed.matched {
            assert!(!matched.artifact.member().is_empty());
        }
    }
});
