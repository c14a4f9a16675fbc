pub mod configuration;
pub mod domain;
pub mod fixture;
pub mod harness;
pub mod report;
pub mod status_page_client;
pub mod suites;
pub mod telemetry;
