use crate::domain::{NONEXISTENT_ID, PageQuery, ResourceKind};
use crate::fixture::{ConformanceContext, NestedFixture, Resolution};
use crate::harness::{CaseError, CaseResult, expect_json, expect_ok_json, expect_status, skip};
use crate::report::{SETUP_CASE, SuiteReport};
use crate::suites::collection;
use reqwest::StatusCode;

#[tracing::instrument(name = "Components suite", skip_all)]
pub async fn run_components_suite(context: &ConformanceContext) -> SuiteReport {
    run_nested_suite(context, ResourceKind::Components).await
}

#[tracing::instrument(name = "Incidents suite", skip_all)]
pub async fn run_incidents_suite(context: &ConformanceContext) -> SuiteReport {
    run_nested_suite(context, ResourceKind::Incidents).await
}

async fn run_nested_suite(context: &ConformanceContext, kind: ResourceKind) -> SuiteReport {
    let mut report = SuiteReport::new(kind.as_str());
    let fixture = match NestedFixture::setup(context, kind).await {
        Ok(Resolution::Resolved(fixture)) => fixture,
        Ok(Resolution::Unavailable(reason)) => {
            report.record(SETUP_CASE, Err(skip(reason)));
            return report;
        }
        Err(e) => {
            report.record(SETUP_CASE, Err(CaseError::from(e)));
            return report;
        }
    };
    tracing::info!(
        page_id = %fixture.page.id,
        collection = %fixture.collection,
        "Suite fixture ready"
    );

    collection::run_collection_cases(context, &fixture.collection, &mut report).await;
    report.record(
        "detail_by_valid_id_answers_ok",
        detail_by_valid_id_answers_ok(&fixture).await,
    );
    report.record(
        "detail_by_uppercased_id_answers_500",
        detail_by_uppercased_id_answers_500(&fixture).await,
    );
    report.record(
        "detail_by_nonexistent_id_answers_500",
        detail_by_nonexistent_id_answers_500(&fixture).await,
    );
    report
}

async fn detail_by_valid_id_answers_ok(fixture: &NestedFixture<'_>) -> CaseResult {
    let record = fixture.record().await?;
    let response = fixture
        .context
        .get(record.detail_path.as_str(), PageQuery::new())
        .await?;
    expect_ok_json(&response)
}

// The API answers 500 rather than 404 for ids it does not know.
async fn detail_by_uppercased_id_answers_500(fixture: &NestedFixture<'_>) -> CaseResult {
    let record = fixture.record().await?;
    let Some(uppercased) = record.id.uppercased() else {
        return Err(skip(format!(
            "{} id {} has no lowercase letters",
            fixture.collection.kind(),
            record.id
        )));
    };
    let response = fixture
        .context
        .get(fixture.collection.detail(&uppercased), PageQuery::new())
        .await?;
    expect_status(&response, StatusCode::INTERNAL_SERVER_ERROR)?;
    expect_json(&response)
}

async fn detail_by_nonexistent_id_answers_500(fixture: &NestedFixture<'_>) -> CaseResult {
    let response = fixture
        .context
        .get(fixture.collection.detail(NONEXISTENT_ID), PageQuery::new())
        .await?;
    expect_status(&response, StatusCode::INTERNAL_SERVER_ERROR)?;
    expect_json(&response)
}
