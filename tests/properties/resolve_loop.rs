//! Property tests for the dependency-resolution loop.

use std::path::PathBuf;
use std::sync::Mutex;

use proptest::prelude::*;

use metadelta::domain::entities::{ValidationOutcome, ValidationSummary};
use metadelta::domain::ports::{
    ApproveAll, SourceLocator, SourceQuery, ValidationCallError, ValidationRequest, Validator,
};
use metadelta::domain::services::manifest::parse;
use metadelta::domain::services::DiagnosticRules;
use metadelta::{
    ArtifactRef, ArtifactSet, ArtifactTypeCatalog, CancelToken, ResolveOptions, ResolveOutcome,
    ResolveUseCase,
};

/// Every flat source exists
struct EverythingLocator;

impl SourceLocator for EverythingLocator {
    fn locate(&self, _query: &SourceQuery) -> Option<PathBuf> {
        Some(PathBuf::from("found"))
    }
}

/// Fails with a fixed list of class names per call, then passes
struct ScriptValidator {
    script: Vec<Vec<String>>,
    calls: Mutex<Vec<ArtifactSet>>,
}

impl Validator for ScriptValidator {
    fn validate(
        &self,
        request: &ValidationRequest,
        _cancel: &CancelToken,
    ) -> Result<ValidationOutcome, ValidationCallError> {
        let xml = std::fs::read_to_string(&request.manifest)?;
        let mut calls = self.calls.lock().unwrap();
        calls.push(parse(&xml).unwrap().artifacts);

        Ok(match self.script.get(calls.len() - 1) {
            Some(names) => ValidationOutcome::Failed {
                status_code: 1,
                diagnostics: names.iter().map(|n| format!("Invalid type: {}", n)).collect(),
                summary: ValidationSummary::default(),
            },
            None => ValidationOutcome::Succeeded {
                summary: ValidationSummary::default(),
            },
        })
    }
}

fn script() -> impl Strategy<Value = Vec<Vec<String>>> {
    let name = proptest::string::string_regex("C[a-z]{1,4}").unwrap();
    proptest::collection::vec(proptest::collection::vec(name, 0..4), 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The loop terminates within the bound and each iteration's set
    /// contains the previous one.
    #[test]
    fn property_loop_is_bounded_and_monotonic(script in script(), max in 1u32..6) {
        let work = tempfile::tempdir().unwrap();
        let catalog = ArtifactTypeCatalog::builtin();
        let rules = DiagnosticRules::builtin();
        let validator = ScriptValidator { script, calls: Mutex::new(Vec::new()) };
        let initial: ArtifactSet = [ArtifactRef::new("ApexClass", "Seed")].into_iter().collect();
        let options = ResolveOptions::new(work.path(), "qa", work.path()).with_max_iterations(max);

        let report = ResolveUseCase::new(&catalog, &rules, &EverythingLocator, &validator, &ApproveAll)
            .execute(&options, initial.clone(), &CancelToken::new())
            .unwrap();

        let calls = validator.calls.lock().unwrap();
        prop_assert!(calls.len() <= max as usize);
        prop_assert_eq!(calls.len(), report.iterations.len());
        prop_assert_eq!(&calls[0], &initial);
        for pair in calls.windows(2) {
            prop_assert!(pair[1].is_superset_of(&pair[0]));
            prop_assert!(pair[1].len() > pair[0].len());
        }
        if report.outcome == ResolveOutcome::Succeeded {
            prop_assert!(report.manual_instructions.is_none());
        } else {
            prop_assert!(report.manual_instructions.is_some());
        }
    }
}
