use crate::error::Result;
use crate::models::page::PageQuery;

/// Ordered query parameters. List values become repeated keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds `key` only when `value` has content.
    pub fn push_non_empty(&mut self, key: &str, value: &str) -> &mut Self {
        if !value.trim().is_empty() {
            self.push(key, value);
        }
        self
    }

    pub fn push_all<I, S>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            self.push_non_empty(key, value.as_ref());
        }
        self
    }

    pub fn push_flag(&mut self, key: &str, enabled: bool) -> &mut Self {
        if enabled {
            self.push(key, true);
        }
        self
    }

    pub fn page(&mut self, page: PageQuery) -> &mut Self {
        self.push("page", page.index).push("size", page.size)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_urlencoded::to_string(&self.0)?)
    }

    /// `url` with the encoded parameters appended.
    pub fn apply(&self, url: &str) -> Result<String> {
        if self.is_empty() {
            return Ok(url.to_string());
        }
        let separator = if url.contains('?') { '&' } else { '?' };
        Ok(format!("{}{}{}", url, separator, self.encode()?))
    }
}

/// Implemented by the typed list queries of each endpoint area.
pub trait ToQuery {
    fn to_query(&self) -> QueryParams;
}

impl ToQuery for QueryParams {
    fn to_query(&self) -> QueryParams {
        self.clone()
    }
}
