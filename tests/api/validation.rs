use crate::helpers::{spawn_api, test_settings};
use claims::assert_err;
use serde_json::json;
use statuspage_conformance::fixture::ConformanceContext;
use statuspage_conformance::report::Outcome;
use statuspage_conformance::suites::run_validation_suite;
use wiremock::matchers::{any, header, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn a_conforming_api_passes_the_validation_suite() {
    let api = spawn_api().await;
    api.mount_collection("pages", vec![]).await;

    let report = run_validation_suite(&api.context).await;

    for case in &report.cases {
        assert_eq!(case.outcome, Outcome::Passed, "{} did not pass", case.name);
    }
    assert_eq!(report.cases.len(), 5);
}

#[tokio::test]
async fn an_api_accepting_any_token_fails_the_authentication_cases() {
    let api = spawn_api().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&api.server)
        .await;

    let report = run_validation_suite(&api.context).await;

    for case in [
        "missing_token_is_rejected",
        "wrong_token_is_rejected",
        "uppercased_token_is_rejected",
    ] {
        assert!(
            matches!(report.outcome_of(case), Some(Outcome::Failed(_))),
            "{} should have failed",
            case
        );
    }
    assert_eq!(
        report.outcome_of("valid_token_answers_json"),
        Some(&Outcome::Passed)
    );
}

#[tokio::test]
async fn honouring_the_request_content_type_fails_the_format_case() {
    let api = spawn_api().await;
    Mock::given(path("/pages"))
        .and(header("Content-Type", "application/ecmascript"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("[]", "application/ecmascript"),
        )
        .with_priority(1)
        .mount(&api.server)
        .await;
    api.mount_collection("pages", vec![]).await;

    let report = run_validation_suite(&api.context).await;

    match report.outcome_of("content_type_override_still_answers_json") {
        Some(Outcome::Failed(reason)) => assert!(reason.contains("application/ecmascript")),
        other => panic!("expected a failure, got {:?}", other),
    }
}

#[tokio::test]
async fn a_token_without_lowercase_letters_skips_the_case_sensitivity_case() {
    let api = spawn_api().await;
    let context = ConformanceContext::from_settings(&test_settings(
        api.server.uri(),
        Some("0123456789".into()),
    ))
    .unwrap();

    let report = run_validation_suite(&context).await;

    assert!(matches!(
        report.outcome_of("uppercased_token_is_rejected"),
        Some(Outcome::Skipped(_))
    ));
}

#[test]
fn a_context_needs_a_bearer_token() {
    assert_err!(ConformanceContext::from_settings(&test_settings(
        "https://api.instatus.com/v1".into(),
        None,
    )));
}
