//! Scenario: Nothing to promote
//!
//! Journey: Source and target are already in sync. The developer runs
//! `promote` anyway and expects no validation call at all.
//!
//! Success Criteria:
//! - An empty package descriptor is still written
//! - No iteration directory is created

use crate::assert_output_contains;
use crate::common::*;

#[test]
fn scenario_promote_in_sync_trees_skips_validation() {
    let env = TestEnv::new();
    env.write_both("classes/Billing.cls", APEX_CLASS_V1);
    env.write_both("classes/Billing.cls-meta.xml", APEX_META);

    let result = env.run(&[
        "promote",
        "--source",
        "source",
        "--target",
        "target",
        "--output",
        "out",
        "--target-org",
        "qa",
    ]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert_output_contains!(result, "Nothing to validate.");
    assert!(env.read("out/package.xml").contains("<version>60.0</version>"));
    assert!(!env.path("out/iteration-1").exists());
}
