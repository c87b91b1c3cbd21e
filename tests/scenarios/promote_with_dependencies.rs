//! Scenario: Promotion that needs one extra dependency
//!
//! Journey: A developer changed `Billing`, which now calls `Helper`. `Helper`
//! exists in the source project but not in the target environment.
//!
//! Steps:
//! 1. Compare source and target: only `Billing` changed
//! 2. First validation fails with "Invalid type: Helper"
//! 3. `Helper` is found in the source and added
//! 4. Second validation passes
//!
//! Success Criteria:
//! - Two iteration descriptors, the second a superset of the first
//! - Final package lists both classes
//! - No manual-steps document

use crate::common::*;

#[test]
fn scenario_promote_adds_missing_class_and_succeeds() {
    let env = TestEnv::new();
    env.install_fake_sf(SF_NEEDS_HELPER);
    env.write("source/classes/Billing.cls", APEX_CLASS_V2);
    env.write("target/classes/Billing.cls", APEX_CLASS_V1);
    env.write("source/classes/Helper.cls", HELPER_CLASS);
    env.write("source/classes/Helper.cls-meta.xml", APEX_META);
    env.write("target/classes/Helper.cls", HELPER_CLASS);
    env.write("target/classes/Helper.cls-meta.xml", APEX_META);

    let result = env.run(&[
        "--json",
        "promote",
        "--source",
        "source",
        "--target",
        "target",
        "--output",
        "out",
        "--target-org",
        "qa",
        "--yes",
    ]);

    assert!(result.is_success(), "{}", result.combined_output());

    let first = env.read("out/iteration-1/package.xml");
    let second = env.read("out/iteration-2/package.xml");
    assert!(first.contains("<members>Billing</members>"));
    assert!(!first.contains("<members>Helper</members>"));
    assert!(second.contains("<members>Billing</members>"));
    assert!(second.contains("<members>Helper</members>"));
    assert_eq!(env.read("out/package.xml"), second);
    assert!(!env.path("out/MANUAL_STEPS.md").exists());

    let events = result.events();
    let finished = events
        .iter()
        .find(|e| e["event"] == "resolve_finished")
        .expect("resolve_finished event");
    assert_eq!(finished["outcome"], "succeeded");
    assert_eq!(finished["iterations"], 2);
    assert!(events.iter().any(|e| e["event"] == "candidate_found"
        && e["artifact"]["member"] == "Helper"
        && e["classification"] == "deployable"));
}
