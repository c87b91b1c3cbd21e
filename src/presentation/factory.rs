//! Use Case Factory
//!
//! Creates collaborators with infrastructure dependencies wired up from the
//! loaded configuration. This is the dependency injection point for the binary.

use std::sync::Arc;

use is_terminal::IsTerminal;
use tracing::warn;

use crate::application::CatalogService;
use crate::config::Config;
use crate::domain::ports::{ApproveAll, DenyAll, IterationApprover, ResolveEventSink};
use crate::infrastructure::{
    DialoguerApprover, JsonEventSink, SfCliCatalogSource, SfCliValidator, TomlCatalogRepository,
};
use crate::presentation::output::ConsoleEventSink;

/// Type alias for the concrete catalog service
pub type ConcreteCatalogService = CatalogService<SfCliCatalogSource, TomlCatalogRepository>;

/// Catalog service querying the environment through the configured `sf` binary
pub fn create_catalog_service(config: &Config) -> ConcreteCatalogService {
    CatalogService::new(
        SfCliCatalogSource::new(config.validator.sf_bin.clone()),
        TomlCatalogRepository::new(config.catalog.effective_cache_dir()),
    )
}

pub fn create_validator(config: &Config) -> SfCliValidator {
    SfCliValidator::new(config.validator.sf_bin.clone())
}

/// `--yes` approves everything; otherwise prompt on a terminal, or refuse.
pub fn create_approver(yes: bool, json: bool) -> Box<dyn IterationApprover> {
    if yes {
        return Box::new(ApproveAll);
    }
    if !json && std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
        return Box::new(DialoguerApprover::new());
    }
    warn!("not attached to a terminal and --yes not given; the package will not be extended");
    Box::new(DenyAll)
}

pub fn create_event_sink(json: bool, command: &'static str, verbose: u8) -> Arc<dyn ResolveEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout(command))
    } else {
        Arc::new(ConsoleEventSink::stdout(verbose))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{Approval, IterationProposal};

    #[test]
    fn yes_approves_without_prompting() {
        let approver = create_approver(true, false);
        let proposal = IterationProposal {
            iteration: 1,
            next_iteration: 2,
            max_iterations: 10,
            additions: &[],
        };
        assert_eq!(approver.approve(&proposal), Approval::Continue);
    }

    #[test]
    fn json_mode_never_prompts() {
        let approver = create_approver(false, true);
        let proposal = IterationProposal {
            iteration: 1,
            next_iteration: 2,
            max_iterations: 10,
            additions: &[],
        };
        assert_eq!(approver.approve(&proposal), Approval::Stop);
    }
}
