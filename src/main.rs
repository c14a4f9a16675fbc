use anyhow::Context;
use statuspage_conformance::configuration::get_configuration;
use statuspage_conformance::fixture::ConformanceContext;
use statuspage_conformance::suites::run_all;
use statuspage_conformance::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the report on stdout stays readable
    let subscriber = get_subscriber(
        "statuspage-conformance".into(),
        "info".into(),
        std::io::stderr,
    );
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let context = ConformanceContext::from_settings(&configuration.api)?;
    tracing::info!(base_url = context.client.base_url(), "Starting conformance run");

    let report = run_all(&context).await;
    println!("{}", report);

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
