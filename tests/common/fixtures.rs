//! Reusable artifact content and fake validator scripts.

pub const APEX_CLASS_V1: &str = "public class Billing {\n    public Integer total() { return 1; }\n}\n";

pub const APEX_CLASS_V2: &str = "public class Billing {\n    public Integer total() { return 2; }\n}\n";

pub const APEX_META: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ApexClass xmlns="http://soap.sforce.com/2006/04/metadata">
    <apiVersion>60.0</apiVersion>
    <status>Active</status>
</ApexClass>
"#;

pub const HELPER_CLASS: &str = "public class Helper {}\n";

pub const MANIFEST_BILLING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Package xmlns="http://soap.sforce.com/2006/04/metadata">
    <types>
        <members>Billing</members>
        <name>ApexClass</name>
    </types>
    <version>60.0</version>
</Package>
"#;

/// Fake `sf`: the catalog query fails; validation passes.
pub const SF_ALWAYS_PASSES: &str = r#"#!/bin/sh
if [ "$1" = "org" ]; then
  echo "not connected" >&2
  exit 1
fi
echo '{"status":0,"result":{"success":true,"numberComponentsDeployed":1,"numberComponentsTotal":1}}'
"#;

/// Fake `sf`: validation fails until Helper is in the manifest, and always
/// complains about the Console application.
pub const SF_NEEDS_HELPER_AND_CONSOLE: &str = r#"#!/bin/sh
if [ "$1" = "org" ]; then
  exit 1
fi
manifest=""
while [ $# -gt 0 ]; do
  if [ "$1" = "--manifest" ]; then manifest="$2"; shift; fi
  shift
done
if grep -q "<members>Helper</members>" "$manifest"; then
  echo '{"status":1,"result":{"success":false,"details":{"componentFailures":{"problem":"no CustomApplication named Console found"}}}}'
else
  echo '{"status":1,"result":{"success":false,"details":{"componentFailures":[{"problem":"Invalid type: Helper"},{"problem":"no CustomApplication named Console found"}]}}}'
fi
exit 1
"#;

/// Fake `sf`: validation fails until Helper is in the manifest.
pub const SF_NEEDS_HELPER: &str = r#"#!/bin/sh
if [ "$1" = "org" ]; then
  exit 1
fi
manifest=""
while [ $# -gt 0 ]; do
  if [ "$1" = "--manifest" ]; then manifest="$2"; shift; fi
  shift
done
if grep -q "<members>Helper</members>" "$manifest"; then
  echo '{"status":0,"result":{"success":true}}'
else
  echo '{"status":1,"result":{"success":false,"details":{"componentFailures":{"problem":"Invalid type: Helper"}}}}'
  exit 1
fi
"#;
