use fake::faker::company::en::CompanyName;
use fake::{Fake, Faker};
use secrecy::Secret;
use serde_json::{Value, json};
use statuspage_conformance::configuration::ApiSettings;
use statuspage_conformance::fixture::ConformanceContext;
use statuspage_conformance::telemetry::{get_subscriber, init_subscriber};
use std::sync::LazyLock;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Page size the test double applies when `per_page` is omitted.
pub const DEFAULT_PER_PAGE: usize = 50;

// Ensure that the `tracing` stack is only initialised once using `LazyLock`
static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // The sink is part of the type returned by `get_subscriber`, hence the
    // two branches.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApi {
    pub server: MockServer,
    pub token: String,
    pub context: ConformanceContext,
}

pub fn random_token() -> String {
    format!("{:016x}{:016x}", Faker.fake::<u64>(), Faker.fake::<u64>())
}

pub fn test_settings(base_url: String, token: Option<String>) -> ApiSettings {
    ApiSettings {
        base_url,
        bearer_token: token.map(Secret::new),
        timeout_milliseconds: 200,
        max_try_count: 1,
        default_per_page: DEFAULT_PER_PAGE as u32,
        request_interval_milliseconds: 0,
    }
}

/// Starts an empty mock API and a context pointed at it.
pub async fn spawn_api() -> TestApi {
    LazyLock::force(&TRACING);

    let server = MockServer::start().await;
    let token = random_token();
    let context = ConformanceContext::from_settings(&test_settings(
        server.uri(),
        Some(token.clone()),
    ))
    .expect("Failed to build the conformance context.");
    TestApi {
        server,
        token,
        context,
    }
}

/// `count` records with lowercase ids cycling through `statuses`.
pub fn generate_records(prefix: &str, count: usize, statuses: &[&str]) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "id": format!("{}{:04}xkqz", prefix, i),
                "name": CompanyName().fake::<String>(),
                "status": statuses[i % statuses.len()],
            })
        })
        .collect()
}

pub fn record_id(record: &Value) -> String {
    record["id"].as_str().expect("Record without an id.").to_string()
}

fn is_authorized(request: &Request, token: &str) -> bool {
    request
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {}", token))
}

fn unauthorized() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({ "error": "Unauthorized" }))
}

/// Serves `records` the way the hosted API paginates them.
pub struct PaginatedCollection {
    pub token: String,
    pub records: Vec<Value>,
    pub max_per_page: usize,
}

impl Respond for PaginatedCollection {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        if !is_authorized(request, &self.token) {
            return unauthorized();
        }
        let mut page = 1;
        let mut per_page = DEFAULT_PER_PAGE;
        for (key, value) in request.url.query_pairs() {
            let parsed = value.parse::<usize>().ok().filter(|n| *n >= 1);
            match (key.as_ref(), parsed) {
                ("page", Some(n)) => page = n,
                ("per_page", Some(n)) => per_page = n.min(self.max_per_page),
                ("page" | "per_page", None) => {
                    return ResponseTemplate::new(422)
                        .set_body_json(json!({ "error": format!("Invalid {}", key) }));
                }
                _ => {}
            }
        }
        let slice: Vec<Value> = self
            .records
            .iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .cloned()
            .collect();
        ResponseTemplate::new(200).set_body_json(slice)
    }
}

/// Serves single records by id; unknown ids get the API's 500.
pub struct RecordDetails {
    pub token: String,
    pub records: Vec<Value>,
}

impl Respond for RecordDetails {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        if !is_authorized(request, &self.token) {
            return unauthorized();
        }
        let requested = request
            .url
            .path_segments()
            .and_then(|segments| segments.last())
            .unwrap_or_default();
        match self.records.iter().find(|record| record["id"] == requested) {
            Some(record) => ResponseTemplate::new(200).set_body_json(record),
            None => ResponseTemplate::new(500)
                .set_body_json(json!({ "error": "Internal Server Error" })),
        }
    }
}

impl TestApi {
    /// Mounts a paginated collection at `/{route}`.
    pub async fn mount_collection(&self, route: &str, records: Vec<Value>) {
        self.mount_collection_capped_at(route, records, 100).await;
    }

    pub async fn mount_collection_capped_at(
        &self,
        route: &str,
        records: Vec<Value>,
        max_per_page: usize,
    ) {
        Mock::given(method("GET"))
            .and(path(format!("/{}", route)))
            .respond_with(PaginatedCollection {
                token: self.token.clone(),
                records,
                max_per_page,
            })
            .mount(&self.server)
            .await;
    }

    /// Mounts single-record lookups at `/{route}/{id}`.
    pub async fn mount_details(&self, route: &str, records: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path_regex(format!(r"^/{}/[^/]+$", route)))
            .respond_with(RecordDetails {
                token: self.token.clone(),
                records,
            })
            .mount(&self.server)
            .await;
    }

    /// An account with `pages` pages; the first one owns `components`
    /// components and `incidents` incidents, all with valid statuses.
    /// Returns the first page's id.
    pub async fn mount_account(&self, pages: usize, components: usize, incidents: usize) -> String {
        let page_records = generate_records("clpage", pages, &["UP", "HASISSUES"]);
        let component_records = generate_records(
            "clcomp",
            components,
            &["OPERATIONAL", "PARTIALOUTAGE", "MAJOROUTAGE"],
        );
        let incident_records =
            generate_records("clinci", incidents, &["INVESTIGATING", "RESOLVED"]);
        self.mount_nested_account(page_records, component_records, incident_records)
            .await
    }

    pub async fn mount_nested_account(
        &self,
        page_records: Vec<Value>,
        component_records: Vec<Value>,
        incident_records: Vec<Value>,
    ) -> String {
        let page_id = page_records
            .first()
            .map(record_id)
            .unwrap_or_else(|| "clnopage".to_string());
        self.mount_collection("pages", page_records).await;

        let components = format!("pages/{}/components", page_id);
        self.mount_collection(&components, component_records.clone())
            .await;
        self.mount_details(&components, component_records).await;

        let incidents = format!("pages/{}/incidents", page_id);
        self.mount_collection(&incidents, incident_records.clone())
            .await;
        self.mount_details(&incidents, incident_records).await;

        page_id
    }
}
