use crate::domain::{ComponentStatus, IncidentStatus, PageStatus, ResourceId};
use std::str::FromStr;

/// The REST collections under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Pages,
    Components,
    Incidents,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Pages => "pages",
            ResourceKind::Components => "components",
            ResourceKind::Incidents => "incidents",
        }
    }

    pub fn accepts_status(&self, status: &str) -> bool {
        match self {
            ResourceKind::Pages => PageStatus::from_str(status).is_ok(),
            ResourceKind::Components => ComponentStatus::from_str(status).is_ok(),
            ResourceKind::Incidents => IncidentStatus::from_str(status).is_ok(),
        }
    }

    pub fn allowed_statuses(&self) -> Vec<&'static str> {
        match self {
            ResourceKind::Pages => PageStatus::ALL.iter().map(PageStatus::as_str).collect(),
            ResourceKind::Components => {
                ComponentStatus::ALL.iter().map(ComponentStatus::as_str).collect()
            }
            ResourceKind::Incidents => {
                IncidentStatus::ALL.iter().map(IncidentStatus::as_str).collect()
            }
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Path of a collection relative to the API base url, without leading slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPath {
    kind: ResourceKind,
    path: String,
}

impl CollectionPath {
    pub fn pages() -> Self {
        Self {
            kind: ResourceKind::Pages,
            path: ResourceKind::Pages.as_str().to_string(),
        }
    }

    /// `pages/{page_id}/{kind}`
    pub fn nested(page_id: &ResourceId, kind: ResourceKind) -> Self {
        Self {
            kind,
            path: format!("{}/{}/{}", ResourceKind::Pages.as_str(), page_id, kind.as_str()),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Path of a single record. `id` is taken raw so that malformed ids can
    /// be requested on purpose.
    pub fn detail(&self, id: &str) -> String {
        format!("{}/{}", self.path, id)
    }
}

impl std::fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.path.fmt(f)
    }
}
