use crate::domain::CollectionPath;
use crate::fixture::ConformanceContext;
use crate::report::SuiteReport;
use crate::suites::collection;

#[tracing::instrument(name = "Pages suite", skip_all)]
pub async fn run_pages_suite(context: &ConformanceContext) -> SuiteReport {
    let mut report = SuiteReport::new("pages");
    collection::run_collection_cases(context, &CollectionPath::pages(), &mut report).await;
    report
}
