mod credential;
mod pagination;
mod resource;
mod resource_id;
mod status;

pub use credential::{Credential, INVALID_TOKEN};
pub use pagination::{INVALID_PARAMETER, MAX_PER_PAGE, PageQuery, QueryValue};
pub use resource::{CollectionPath, ResourceKind};
pub use resource_id::{NONEXISTENT_ID, ResourceId};
pub use status::{
    ComponentStatus, IncidentStatus, PageStatus, StatusViolation, UnknownStatus, validate_statuses,
};
