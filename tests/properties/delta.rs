//! Property tests for path resolution and tree comparison.

use proptest::prelude::*;

use metadelta::domain::services::{PathResolver, Resolution};
use metadelta::{ArtifactRef, ArtifactSet, ArtifactTypeCatalog, CompareOptions, CompareUseCase};

const DIRECTORIES: &[&str] = &["classes", "triggers", "lwc", "layouts", "reports", "unknownStuff"];

fn relative_file() -> impl Strategy<Value = String> {
    let name = proptest::string::string_regex("[A-Za-z][A-Za-z0-9_]{0,10}").unwrap();
    let ext = proptest::sample::select(&[".cls", ".cls-meta.xml", ".js", ".xml", ""][..]);
    (proptest::sample::select(DIRECTORIES), name, ext)
        .prop_map(|(dir, name, ext)| format!("{}/{}{}", dir, name, ext))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Path resolution never panics on arbitrary input.
    #[test]
    fn property_resolve_never_panics(s in "(?s).{0,256}") {
        let catalog = ArtifactTypeCatalog::builtin();
        let _ = PathResolver::new(&catalog).resolve(&s);
    }

    /// PROPERTY: The container prefix does not change what a path resolves to.
    #[test]
    fn property_container_prefix_is_transparent(rel in relative_file()) {
        let catalog = ArtifactTypeCatalog::builtin();
        let resolver = PathResolver::new(&catalog);

        prop_assert_eq!(
            resolver.resolve(&rel),
            resolver.resolve(&format!("unpackaged/{}", rel))
        );
    }

    /// PROPERTY: A tree compared with an identical copy has an empty delta.
    #[test]
    fn property_identical_trees_have_empty_delta(
        files in proptest::collection::btree_map(relative_file(), "[a-z ]{0,32}", 0..12)
    ) {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        for (rel, content) in &files {
            for root in [source.path(), target.path()] {
                let path = root.join(rel);
                std::fs::create_dir_all(path.parent().unwrap()).unwrap();
                std::fs::write(path, content).unwrap();
            }
        }

        let catalog = ArtifactTypeCatalog::builtin();
        let delta = CompareUseCase::new(&catalog)
            .execute(&CompareOptions::new(source.path(), target.path()))
            .unwrap();

        prop_assert!(delta.additive.is_empty());
        prop_assert!(delta.destructive.is_empty());
    }

    /// PROPERTY: Every resolved source-only file appears in the additive set.
    #[test]
    fn property_source_only_files_are_additive(
        files in proptest::collection::btree_set(relative_file(), 1..8)
    ) {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        for rel in &files {
            let path = source.path().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, "x").unwrap();
        }

        let catalog = ArtifactTypeCatalog::builtin();
        let resolver = PathResolver::new(&catalog);
        let delta = CompareUseCase::new(&catalog)
            .execute(&CompareOptions::new(source.path(), target.path()))
            .unwrap();

        for rel in &files {
            if let Resolution::Resolved(artifact) = resolver.resolve(rel) {
                prop_assert!(delta.additive.contains(&artifact), "{} missing", artifact);
            }
        }
        prop_assert!(delta.destructive.is_empty());
    }

    /// PROPERTY: A rename with unchanged content is an addition under the new
    /// name and a removal under the old one, never a no-op.
    #[test]
    fn property_rename_is_add_plus_remove(
        old in "[A-Z][A-Za-z0-9]{0,10}",
        new in "[A-Z][A-Za-z0-9]{0,10}",
        content in "[a-z ]{0,32}",
    ) {
        prop_assume!(old != new);
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(source.path().join("classes")).unwrap();
        std::fs::create_dir_all(target.path().join("classes")).unwrap();
        std::fs::write(target.path().join(format!("classes/{}.cls", old)), &content).unwrap();
        std::fs::write(source.path().join(format!("classes/{}.cls", new)), &content).unwrap();

        let catalog = ArtifactTypeCatalog::builtin();
        let delta = CompareUseCase::new(&catalog)
            .execute(&CompareOptions::new(source.path(), target.path()))
            .unwrap();

        let added: ArtifactSet = [ArtifactRef::new("ApexClass", new.as_str())].into_iter().collect();
        let removed: ArtifactSet = [ArtifactRef::new("ApexClass", old.as_str())].into_iter().collect();
        prop_assert_eq!(delta.additive, added);
        prop_assert_eq!(delta.destructive, removed);
    }
}
