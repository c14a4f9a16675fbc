//! Pagination and status cases every collection endpoint must satisfy.
use crate::domain::{CollectionPath, INVALID_PARAMETER, MAX_PER_PAGE, PageQuery};
use crate::fixture::ConformanceContext;
use crate::harness::{
    CaseResult, expect_different_body, expect_disjoint_ids, expect_enumerated_statuses,
    expect_json, expect_ok_json, expect_record_count, expect_record_count_at_most,
    expect_same_body, expect_status, records, skip,
};
use crate::report::SuiteReport;
use reqwest::StatusCode;

pub async fn run_collection_cases(
    context: &ConformanceContext,
    collection: &CollectionPath,
    report: &mut SuiteReport,
) {
    report.record(
        "collection_answers_json",
        collection_answers_json(context, collection).await,
    );
    report.record(
        "omitted_page_matches_first_page",
        omitted_page_matches_first_page(context, collection).await,
    );
    report.record(
        "omitted_per_page_matches_default",
        omitted_per_page_matches_default(context, collection).await,
    );
    report.record(
        "omitted_page_with_per_page_matches_first_page",
        omitted_page_with_per_page_matches_first_page(context, collection).await,
    );
    report.record(
        "per_page_is_honoured",
        per_page_is_honoured(context, collection).await,
    );
    report.record(
        "per_page_above_maximum_is_capped",
        per_page_above_maximum_is_capped(context, collection).await,
    );
    report.record(
        "different_pages_differ",
        different_pages_differ(context, collection).await,
    );
    report.record(
        "paged_records_are_disjoint",
        paged_records_are_disjoint(context, collection).await,
    );
    report.record(
        "invalid_page_is_rejected",
        invalid_page_is_rejected(context, collection).await,
    );
    report.record(
        "invalid_per_page_is_rejected",
        invalid_per_page_is_rejected(context, collection).await,
    );
    report.record(
        "statuses_are_enumerated",
        statuses_are_enumerated(context, collection).await,
    );
}

async fn collection_answers_json(
    context: &ConformanceContext,
    collection: &CollectionPath,
) -> CaseResult {
    let response = context.get(collection.as_str(), PageQuery::new()).await?;
    expect_ok_json(&response)?;
    records(&response)?;
    Ok(())
}

async fn omitted_page_matches_first_page(
    context: &ConformanceContext,
    collection: &CollectionPath,
) -> CaseResult {
    let without_page = context.get(collection.as_str(), PageQuery::new()).await?;
    expect_ok_json(&without_page)?;
    let first_page = context
        .get(collection.as_str(), PageQuery::new().page(1))
        .await?;
    expect_ok_json(&first_page)?;
    expect_same_body(&without_page, &first_page)
}

async fn omitted_per_page_matches_default(
    context: &ConformanceContext,
    collection: &CollectionPath,
) -> CaseResult {
    let implicit = context
        .get(collection.as_str(), PageQuery::new().page(1))
        .await?;
    expect_ok_json(&implicit)?;
    let explicit = context
        .get(
            collection.as_str(),
            PageQuery::new().page(1).per_page(context.default_per_page),
        )
        .await?;
    expect_ok_json(&explicit)?;
    expect_same_body(&implicit, &explicit)
}

async fn omitted_page_with_per_page_matches_first_page(
    context: &ConformanceContext,
    collection: &CollectionPath,
) -> CaseResult {
    let with_page = context
        .get(collection.as_str(), PageQuery::new().page(1).per_page(1))
        .await?;
    expect_ok_json(&with_page)?;
    let without_page = context
        .get(collection.as_str(), PageQuery::new().per_page(1))
        .await?;
    expect_ok_json(&without_page)?;
    expect_same_body(&with_page, &without_page)
}

async fn per_page_is_honoured(
    context: &ConformanceContext,
    collection: &CollectionPath,
) -> CaseResult {
    let response = context.get(collection.as_str(), PageQuery::new()).await?;
    expect_ok_json(&response)?;
    let available = records(&response)?.len();
    if available < 1 {
        return Err(skip(format!(
            "{} is empty, no page size to verify",
            collection
        )));
    }

    let expected = available.saturating_sub(1).max(1);
    let per_page = u32::try_from(expected).unwrap_or(MAX_PER_PAGE);
    let response = context
        .get(
            collection.as_str(),
            PageQuery::new().page(1).per_page(per_page),
        )
        .await?;
    expect_ok_json(&response)?;
    expect_record_count(&response, expected)
}

async fn per_page_above_maximum_is_capped(
    context: &ConformanceContext,
    collection: &CollectionPath,
) -> CaseResult {
    let response = context
        .get(
            collection.as_str(),
            PageQuery::new().page(1).per_page(MAX_PER_PAGE + 1),
        )
        .await?;
    expect_ok_json(&response)?;
    expect_record_count_at_most(&response, MAX_PER_PAGE as usize)
}

async fn different_pages_differ(
    context: &ConformanceContext,
    collection: &CollectionPath,
) -> CaseResult {
    let first = context
        .get(collection.as_str(), PageQuery::new().page(1))
        .await?;
    expect_ok_json(&first)?;
    let second = context
        .get(collection.as_str(), PageQuery::new().page(2))
        .await?;
    expect_ok_json(&second)?;
    if records(&second)?.is_empty() {
        return Err(skip(format!("{} fits on a single page", collection)));
    }
    expect_different_body(&first, &second)
}

async fn paged_records_are_disjoint(
    context: &ConformanceContext,
    collection: &CollectionPath,
) -> CaseResult {
    let first = context
        .get(collection.as_str(), PageQuery::new().page(1).per_page(2))
        .await?;
    expect_ok_json(&first)?;
    let second = context
        .get(collection.as_str(), PageQuery::new().page(2).per_page(2))
        .await?;
    expect_ok_json(&second)?;
    if records(&second)?.is_empty() {
        return Err(skip(format!(
            "{} holds fewer than 3 records",
            collection
        )));
    }
    expect_record_count(&first, 2)?;
    expect_disjoint_ids(&first, &second)
}

async fn invalid_page_is_rejected(
    context: &ConformanceContext,
    collection: &CollectionPath,
) -> CaseResult {
    let response = context
        .get(
            collection.as_str(),
            PageQuery::new().raw_page(INVALID_PARAMETER),
        )
        .await?;
    expect_status(&response, StatusCode::UNPROCESSABLE_ENTITY)?;
    expect_json(&response)
}

async fn invalid_per_page_is_rejected(
    context: &ConformanceContext,
    collection: &CollectionPath,
) -> CaseResult {
    let response = context
        .get(
            collection.as_str(),
            PageQuery::new().page(1).raw_per_page(INVALID_PARAMETER),
        )
        .await?;
    expect_status(&response, StatusCode::UNPROCESSABLE_ENTITY)?;
    expect_json(&response)
}

async fn statuses_are_enumerated(
    context: &ConformanceContext,
    collection: &CollectionPath,
) -> CaseResult {
    let response = context.get(collection.as_str(), PageQuery::new()).await?;
    expect_ok_json(&response)?;
    expect_enumerated_statuses(&response, collection.kind())
}
