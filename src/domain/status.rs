use crate::domain::ResourceKind;
use serde_json::Value;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{0:?} is not a known status.")]
pub struct UnknownStatus(pub String);

macro_rules! status_enumeration {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownStatus;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownStatus(other.to_string())),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

status_enumeration! {
    /// Aggregate state of a status page.
    PageStatus {
        Up => "UP",
        HasIssues => "HASISSUES",
        AllUnderMaintenance => "ALLUNDERMAINTENANCE",
        AllDegradedPerformance => "ALLDEGRADEDPERFORMANCE",
        AllPartialOutage => "ALLPARTIALOUTAGE",
        AllMinorOutage => "ALLMINOROUTAGE",
        AllMajorOutage => "ALLMAJOROUTAGE",
        SomeUnderMaintenance => "SOMEUNDERMAINTENANCE",
        SomeDegradedPerformance => "SOMEDEGRADEDPERFORMANCE",
        SomePartialOutage => "SOMEPARTIALOUTAGE",
        SomeMinorOutage => "SOMEMINOROUTAGE",
        SomeMajorOutage => "SOMEMAJOROUTAGE",
        OneUnderMaintenance => "ONEUNDERMAINTENANCE",
        OneDegradedPerformance => "ONEDEGRADEDPERFORMANCE",
        OnePartialOutage => "ONEPARTIALOUTAGE",
        OneMinorOutage => "ONEMINOROUTAGE",
        OneMajorOutage => "ONEMAJOROUTAGE",
    }
}

status_enumeration! {
    ComponentStatus {
        Operational => "OPERATIONAL",
        UnderMaintenance => "UNDERMAINTENANCE",
        DegradedPerformance => "DEGRADEDPERFORMANCE",
        PartialOutage => "PARTIALOUTAGE",
        MajorOutage => "MAJOROUTAGE",
    }
}

status_enumeration! {
    IncidentStatus {
        Investigating => "INVESTIGATING",
        Identified => "IDENTIFIED",
        Monitoring => "MONITORING",
        Resolved => "RESOLVED",
    }
}

/// Records whose `status` falls outside the set allowed for their resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusViolation {
    pub kind: ResourceKind,
    /// Offending values in record order; missing or non-string statuses are
    /// rendered as JSON.
    pub offending: Vec<String>,
}

impl std::fmt::Display for StatusViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} status outside the allowed set: {}",
            self.kind,
            self.offending.join(", ")
        )
    }
}

/// Checks every record's `status` against the set allowed for `kind`.
///
/// One bad value fails the whole collection. An empty collection passes.
pub fn validate_statuses(kind: ResourceKind, records: &[Value]) -> Result<(), StatusViolation> {
    let offending: Vec<String> = records
        .iter()
        .map(|record| record.get("status").unwrap_or(&Value::Null))
        .filter(|status| match status.as_str() {
            Some(status) => !kind.accepts_status(status),
            None => true,
        })
        .map(|status| match status.as_str() {
            Some(status) => status.to_string(),
            None => status.to_string(),
        })
        .collect();

    if offending.is_empty() {
        Ok(())
    } else {
        Err(StatusViolation { kind, offending })
    }
}
