use crate::configuration::ApiSettings;
use crate::domain::{CollectionPath, Credential, PageQuery, ResourceId, ResourceKind};
use crate::harness::{CaseError, skip};
use crate::status_page_client::{ApiRequest, ApiResponse, StatusPageClient};
use anyhow::Context;
use reqwest::StatusCode;
use tokio::sync::OnceCell;

/// Outcome of establishing a precondition against the live account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Resolved(T),
    /// The account lacks the data the dependent cases need.
    Unavailable(String),
}

/// An existing record and the path it can be fetched at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub id: ResourceId,
    pub detail_path: String,
}

/// Everything a suite needs to talk to the API, built once per run and
/// handed to suites by reference.
#[derive(Debug, Clone)]
pub struct ConformanceContext {
    pub client: StatusPageClient,
    pub credential: Credential,
    pub max_try_count: u32,
    pub default_per_page: u32,
}

impl ConformanceContext {
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, anyhow::Error> {
        let credential = settings
            .credential()
            .context("No bearer token configured. Set APP_API__BEARER_TOKEN.")?;
        let client = settings
            .client()
            .context("Failed to build the HTTP client.")?;
        Ok(Self {
            client,
            credential,
            max_try_count: settings.max_try_count,
            default_per_page: settings.default_per_page,
        })
    }

    /// GET with the run's valid credential.
    pub async fn get(
        &self,
        path: impl Into<String>,
        query: PageQuery,
    ) -> Result<ApiResponse, reqwest::Error> {
        self.client
            .send(ApiRequest::get(path, &self.credential).query(query))
            .await
    }
}

/// Walks `collection` page by page, up to `max_try_count` pages, and returns
/// the first id found.
///
/// A non-200 page ends the walk as `Unavailable`; transport faults are
/// returned as errors.
#[tracing::instrument(
    name = "Resolving a resource id",
    skip(context, collection),
    fields(collection = %collection)
)]
pub async fn resolve_first_id(
    context: &ConformanceContext,
    collection: &CollectionPath,
) -> Result<Resolution<ResolvedResource>, reqwest::Error> {
    for page in 1..=context.max_try_count {
        let response = context
            .get(collection.as_str(), PageQuery::new().page(page))
            .await?;
        if response.status != StatusCode::OK {
            tracing::warn!(page, status = %response.status, "Collection page not available");
            return Ok(Resolution::Unavailable(format!(
                "{} page {} answered {}",
                collection, page, response.status
            )));
        }
        if let Some(raw_id) = response.ids().first() {
            return Ok(match ResourceId::parse(raw_id.to_string()) {
                Ok(id) => {
                    tracing::info!(%id, page, "Resolved a resource id");
                    Resolution::Resolved(ResolvedResource {
                        detail_path: collection.detail(id.as_str()),
                        id,
                    })
                }
                Err(e) => Resolution::Unavailable(e),
            });
        }
    }
    Ok(Resolution::Unavailable(format!(
        "no {} found within {} page(s)",
        collection.kind(),
        context.max_try_count
    )))
}

/// Per-suite state for collections nested under a page: the resolved page,
/// the collection path built from it and, once a case asks for it, the id
/// of one record in that collection.
#[derive(Debug)]
pub struct NestedFixture<'a> {
    pub context: &'a ConformanceContext,
    pub page: ResolvedResource,
    pub collection: CollectionPath,
    record: OnceCell<Resolution<ResolvedResource>>,
}

impl<'a> NestedFixture<'a> {
    #[tracing::instrument(name = "Setting up nested suite", skip(context))]
    pub async fn setup(
        context: &'a ConformanceContext,
        kind: ResourceKind,
    ) -> Result<Resolution<Self>, reqwest::Error> {
        let page = match resolve_first_id(context, &CollectionPath::pages()).await? {
            Resolution::Resolved(page) => page,
            Resolution::Unavailable(reason) => {
                return Ok(Resolution::Unavailable(format!(
                    "Cannot resolve a page id ({}). Skipping the {} suite.",
                    reason, kind
                )));
            }
        };
        let collection = CollectionPath::nested(&page.id, kind);
        Ok(Resolution::Resolved(Self {
            context,
            page,
            collection,
            record: OnceCell::new(),
        }))
    }

    /// An existing record of the nested collection, resolved on first use
    /// and cached for the rest of the suite.
    pub async fn record(&self) -> Result<&ResolvedResource, CaseError> {
        let resolution = self
            .record
            .get_or_try_init(|| resolve_first_id(self.context, &self.collection))
            .await?;
        match resolution {
            Resolution::Resolved(record) => Ok(record),
            Resolution::Unavailable(reason) => Err(skip(format!(
                "Cannot obtain a {} id ({}).",
                self.collection.kind(),
                reason
            ))),
        }
    }
}
