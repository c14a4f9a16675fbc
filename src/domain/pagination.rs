/// Largest `per_page` the API honours; larger requests are capped.
pub const MAX_PER_PAGE: u32 = 100;

/// Out-of-grammar value used to provoke a 422.
pub const INVALID_PARAMETER: &str = "INVALID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Number(u32),
    /// Sent verbatim, typically something the API must refuse.
    Raw(String),
}

impl std::fmt::Display for QueryValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryValue::Number(n) => write!(f, "{}", n),
            QueryValue::Raw(s) => write!(f, "{}", s),
        }
    }
}

/// `page` / `per_page` query parameters. Unset parameters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    page: Option<QueryValue>,
    per_page: Option<QueryValue>,
}

impl PageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(QueryValue::Number(page));
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(QueryValue::Number(per_page));
        self
    }

    pub fn raw_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(QueryValue::Raw(page.into()));
        self
    }

    pub fn raw_per_page(mut self, per_page: impl Into<String>) -> Self {
        self.per_page = Some(QueryValue::Raw(per_page.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.page.is_none() && self.per_page.is_none()
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(page) = &self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = &self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        pairs
    }
}

impl std::fmt::Display for PageQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self
            .to_pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        write!(f, "{}", rendered.join("&"))
    }
}
