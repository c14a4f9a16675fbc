/// Well-formed id that does not belong to any record.
pub const NONEXISTENT_ID: &str = "cl2pyu4b049026i4n45qfoowx0";

/// Opaque identifier handed out by the API.
///
/// Ids end up as path segments, so anything that would change the shape of
/// the request path is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn parse(s: String) -> Result<ResourceId, String> {
        let is_empty = s.trim().is_empty();
        let forbidden_characters = ['/', '?', '#', '%'];
        let contains_forbidden_characters = s
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || forbidden_characters.contains(&c));

        if is_empty || contains_forbidden_characters {
            Err(format!("{:?} is not a valid resource id.", s))
        } else {
            Ok(Self(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id with every letter uppercased, or `None` if that changes nothing.
    pub fn uppercased(&self) -> Option<String> {
        let upper = self.0.to_uppercase();
        (upper != self.0).then_some(upper)
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
