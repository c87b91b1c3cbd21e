//! Property tests for manifest generation and parsing.

use proptest::prelude::*;

use metadelta::domain::services::manifest::{generate, parse};
use metadelta::{ArtifactRef, ArtifactSet};

const TYPES: &[&str] = &[
    "ApexClass",
    "ApexTrigger",
    "CustomField",
    "CustomObject",
    "LightningComponentBundle",
    "Report",
];

fn artifact() -> impl Strategy<Value = ArtifactRef> {
    let member = proptest::string::string_regex("[A-Za-z][A-Za-z0-9_.&/<>-]{0,16}").unwrap();
    (proptest::sample::select(TYPES), member).prop_map(|(t, m)| ArtifactRef::new(t, m))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Insertion order never changes the generated bytes.
    #[test]
    fn property_generation_is_deterministic(
        artifacts in proptest::collection::vec(artifact(), 0..24)
    ) {
        let forward: ArtifactSet = artifacts.iter().cloned().collect();
        let backward: ArtifactSet = artifacts.iter().rev().cloned().collect();

        prop_assert_eq!(
            generate(&forward, "60.0").into_string(),
            generate(&backward, "60.0").into_string()
        );
    }

    /// PROPERTY: `parse(generate(set))` recovers the set and version.
    #[test]
    fn property_generate_then_parse_recovers_set(
        artifacts in proptest::collection::vec(artifact(), 0..24)
    ) {
        let set: ArtifactSet = artifacts.into_iter().collect();
        let parsed = parse(generate(&set, "61.0").as_str()).unwrap();

        prop_assert_eq!(parsed.artifacts, set);
        prop_assert_eq!(parsed.api_version.as_deref(), Some("61.0"));
    }

    /// PROPERTY: Parsing arbitrary text never panics.
    #[test]
    fn property_parse_never_panics(s in "(?s).{0,512}") {
        let _ = parse(&s);
    }
}
