//! Scenario: Promotion blocked by an application that only exists in setup
//!
//! Journey: The target rejects the package because the `Console` app is
//! missing, and a class it needs is also missing. The class is in the source;
//! the app is not.
//!
//! Steps:
//! 1. Compare: only `Billing` changed
//! 2. Validation 1 names `Helper` and `Console`; `Helper` is added
//! 3. Validation 2 names only `Console`; nothing left to add
//!
//! Success Criteria:
//! - Run ends "exhausted" with exit code 0
//! - MANUAL_STEPS.md explains how to activate `Console`
//! - The report records both iterations

use crate::assert_output_contains;
use crate::common::*;

#[test]
fn scenario_promote_ends_with_manual_instructions() {
    let env = TestEnv::new();
    env.install_fake_sf(SF_NEEDS_HELPER_AND_CONSOLE);
    env.write("source/classes/Billing.cls", APEX_CLASS_V2);
    env.write("target/classes/Billing.cls", APEX_CLASS_V1);
    env.write_both("classes/Helper.cls", HELPER_CLASS);

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
        "--yes",
    ]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert_eq!(result.exit_code, 0);
    assert_output_contains!(result, "manual steps required");

    let manual = env.read("out/MANUAL_STEPS.md");
    assert!(manual.contains("## CustomApplication"));
    assert!(manual.contains("**Console**"));
    assert!(manual.contains("App Manager"));
    assert!(!manual.contains("**Helper**"));

    let report: serde_json::Value =
        serde_json::from_str(&env.read("out/resolution-report.json")).unwrap();
    assert_eq!(report["outcome"]["status"], "exhausted");
    assert_eq!(report["outcome"]["reason"], "no_deployable_dependencies_found");
    assert_eq!(report["iterations"].as_array().unwrap().len(), 2);
}

#[test]
fn scenario_iteration_bound_stops_the_loop() {
    let env = TestEnv::new();
    env.install_fake_sf(SF_NEEDS_HELPER_AND_CONSOLE);
    env.write("source/classes/Billing.cls", APEX_CLASS_V2);
    env.write("target/classes/Billing.cls", APEX_CLASS_V1);
    env.write_both("classes/Helper.cls", HELPER_CLASS);

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
        "--max-iterations",
        "1",
        "--yes",
    ]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert_output_contains!(result, "iteration bound exceeded");
    assert!(!env.path("out/iteration-2").exists());
    assert!(env.path("out/MANUAL_STEPS.md").exists());
}
