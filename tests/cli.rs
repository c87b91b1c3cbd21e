//! CLI tests: run the built binary against temp trees.

mod common;

use common::*;

#[test]
fn help_lists_commands() {
    let env = TestEnv::new();
    let result = env.run(&["--help"]);

    assert!(result.is_success());
    for command in ["compare", "resolve", "promote", "catalog"] {
        assert_output_contains!(result, command);
    }
}

#[test]
fn version_prints_package_version() {
    let env = TestEnv::new();
    let result = env.run(&["--version"]);

    assert!(result.is_success());
    assert_output_contains!(result, env!("CARGO_PKG_VERSION"));
}

#[test]
fn compare_packages_changed_class_with_companion() {
    let env = TestEnv::new();
    env.write("source/classes/Billing.cls", APEX_CLASS_V2);
    env.write_both("classes/Billing.cls-meta.xml", APEX_META);
    env.write("target/classes/Billing.cls", APEX_CLASS_V1);
    env.write_both("classes/Unchanged.cls", "public class Unchanged {}");

    let result = env.run(&["compare", "--source", "source", "--target", "target", "--output", "out"]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert_packaged!(env, "classes/Billing.cls");
    assert_packaged!(env, "classes/Billing.cls-meta.xml");
    assert_not_packaged!(env, "classes/Unchanged.cls");
    let package = env.read("out/package.xml");
    assert!(package.contains("<members>Billing</members>"));
    assert!(!package.contains("Unchanged"));
    assert_output_contains!(result, "1 additive, 0 destructive");
}

#[test]
fn compare_writes_destructive_manifest_for_removed_artifacts() {
    let env = TestEnv::new();
    env.write("target/classes/Legacy.cls", "public class Legacy {}");

    let result = env.run(&["compare", "--source", "source", "--target", "target", "-o", "out"]);

    assert!(result.is_success(), "{}", result.combined_output());
    let destructive = env.read("out/destructiveChanges.xml");
    assert!(destructive.contains("<members>Legacy</members>"));
}

#[test]
fn compare_identical_trees_reports_no_changes() {
    let env = TestEnv::new();
    env.write_both("classes/Billing.cls", APEX_CLASS_V1);

    let result = env.run(&["compare", "--source", "source", "--target", "target", "-o", "out"]);

    assert!(result.is_success());
    assert_output_contains!(result, "No changes");
    assert!(!env.path("out/destructiveChanges.xml").exists());
}

#[test]
fn compare_json_emits_summary_event() {
    let env = TestEnv::new();
    env.write("source/classes/Billing.cls", APEX_CLASS_V1);
    env.write("source/mysteryFolder/thing.xml", "<x/>");

    let result = env.run(&[
        "--json", "compare", "--source", "source", "--target", "target", "-o", "out",
    ]);

    assert!(result.is_success(), "{}", result.combined_output());
    let events = result.events();
    let summary = events
        .iter()
        .find(|e| e["event"] == "compare_completed")
        .expect("compare_completed event");
    assert_eq!(summary["command"], "compare");
    assert_eq!(summary["additive"], 1);
    assert_eq!(summary["unrecognized_folders"][0], "mysteryFolder");
}

#[test]
fn compare_missing_source_fails() {
    let env = TestEnv::new();
    let result = env.run(&["compare", "--source", "nope", "--target", "target", "-o", "out"]);

    assert!(!result.is_success());
    assert_output_contains!(result, "directory not found");
}

#[test]
fn resolve_rejects_malformed_manifest() {
    let env = TestEnv::new();
    env.write("package.xml", "<Package><types><members>A</members></types></Package>");

    let result = env.run(&["resolve", "--manifest", "package.xml", "--target-org", "qa", "--yes"]);

    assert!(!result.is_success());
    assert_output_contains!(result, "malformed manifest");
}

#[test]
fn invalid_config_is_reported() {
    let env = TestEnv::new();
    env.write("metadelta.toml", "[resolve]\nmax_iterations = 0\n");

    let result = env.run(&["catalog", "show"]);

    assert!(!result.is_success());
    assert_output_contains!(result, "max_iterations");
}

#[test]
fn unknown_config_key_warns_but_runs() {
    let env = TestEnv::new();
    env.write("metadelta.toml", "[resolve]\nmax_iteratons = 3\n");

    let result = env.run(&["catalog", "show"]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert_output_contains!(result, "did you mean 'max_iterations'?");
}

#[test]
fn catalog_show_without_cache_uses_builtin() {
    let env = TestEnv::new();
    env.write_config("");

    let result = env.run(&["catalog", "show"]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert_output_contains!(result, "Built-in catalog");
    assert_output_contains!(result, "ApexClass");
}

#[cfg(unix)]
#[test]
fn catalog_refresh_failure_is_an_error() {
    let env = TestEnv::new();
    env.install_fake_sf(SF_ALWAYS_PASSES);

    let result = env.run(&["catalog", "refresh", "--target-org", "qa"]);

    assert!(!result.is_success());
    assert_output_contains!(result, "failed to refresh the catalog of qa");
}

#[cfg(unix)]
#[test]
fn resolve_succeeds_first_time() {
    let env = TestEnv::new();
    env.install_fake_sf(SF_ALWAYS_PASSES);
    env.write("work/package.xml", MANIFEST_BILLING);
    env.write("source/classes/Billing.cls", APEX_CLASS_V1);

    let result = env.run(&[
        "resolve",
        "--manifest",
        "work/package.xml",
        "--project",
        "source",
        "--target-org",
        "qa",
        "--yes",
    ]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert_output_contains!(result, "Succeeded after 1 validation(s)");
    assert!(env.path("work/iteration-1/package.xml").exists());
    assert!(env.path("work/resolution-report.json").exists());
    assert!(!env.path("work/MANUAL_STEPS.md").exists());
}

#[cfg(unix)]
#[test]
fn resolve_without_yes_off_terminal_stops_after_first_failure() {
    let env = TestEnv::new();
    env.install_fake_sf(SF_NEEDS_HELPER);
    env.write("work/package.xml", MANIFEST_BILLING);
    env.write("source/classes/Helper.cls", HELPER_CLASS);

    let result = env.run(&[
        "resolve",
        "--manifest",
        "work/package.xml",
        "--project",
        "source",
        "--target-org",
        "qa",
    ]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert_output_contains!(result, "Cancelled after 1 validation(s)");
    assert!(!env.path("work/iteration-2").exists());
}
