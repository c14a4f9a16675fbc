//! The conformance suites, run one after another against the live API.
mod collection;
mod nested;
mod pages;
mod validation;

pub use nested::{run_components_suite, run_incidents_suite};
pub use pages::run_pages_suite;
pub use validation::run_validation_suite;

use crate::fixture::ConformanceContext;
use crate::report::RunReport;

#[tracing::instrument(name = "Running conformance suites", skip_all)]
pub async fn run_all(context: &ConformanceContext) -> RunReport {
    let suites = vec![
        run_validation_suite(context).await,
        run_pages_suite(context).await,
        run_components_suite(context).await,
        run_incidents_suite(context).await,
    ];
    RunReport { suites }
}
