//! Authentication and response-format cases, independent of account data.
use crate::domain::{CollectionPath, Credential};
use crate::fixture::ConformanceContext;
use crate::harness::{CaseResult, expect_json, expect_ok_json, expect_status, skip};
use crate::report::SuiteReport;
use crate::status_page_client::ApiRequest;
use reqwest::StatusCode;

/// A content type the API does not serve; it must answer JSON regardless.
const FOREIGN_CONTENT_TYPE: &str = "application/ecmascript";

#[tracing::instrument(name = "Validation suite", skip_all)]
pub async fn run_validation_suite(context: &ConformanceContext) -> SuiteReport {
    let mut report = SuiteReport::new("validation");
    report.record(
        "missing_token_is_rejected",
        rejected_with(context, &Credential::Missing).await,
    );
    report.record(
        "wrong_token_is_rejected",
        rejected_with(context, &Credential::Invalid).await,
    );
    report.record(
        "uppercased_token_is_rejected",
        uppercased_token_is_rejected(context).await,
    );
    report.record(
        "valid_token_answers_json",
        valid_token_answers_json(context).await,
    );
    report.record(
        "content_type_override_still_answers_json",
        content_type_override_still_answers_json(context).await,
    );
    report
}

async fn rejected_with(context: &ConformanceContext, credential: &Credential) -> CaseResult {
    let response = context
        .client
        .send(ApiRequest::get(CollectionPath::pages().as_str(), credential))
        .await?;
    expect_status(&response, StatusCode::UNAUTHORIZED)
}

async fn uppercased_token_is_rejected(context: &ConformanceContext) -> CaseResult {
    let Some(uppercased) = context.credential.uppercased() else {
        return Err(skip("The token has no lowercase letters to mangle"));
    };
    rejected_with(context, &uppercased).await
}

async fn valid_token_answers_json(context: &ConformanceContext) -> CaseResult {
    let response = context
        .client
        .send(ApiRequest::get(
            CollectionPath::pages().as_str(),
            &context.credential,
        ))
        .await?;
    expect_ok_json(&response)
}

async fn content_type_override_still_answers_json(context: &ConformanceContext) -> CaseResult {
    let response = context
        .client
        .send(
            ApiRequest::get(CollectionPath::pages().as_str(), &context.credential)
                .content_type(FOREIGN_CONTENT_TYPE),
        )
        .await?;
    expect_status(&response, StatusCode::OK)?;
    expect_json(&response)
}
