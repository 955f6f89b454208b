//! Query parameters for the `/bots` search endpoint.

use std::collections::BTreeMap;

/// Search criteria for [`BotsQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Search {
    /// Sent verbatim
    Text(String),
    /// Sent as `"key: value"` pairs joined by single spaces, keys sorted
    Fields(BTreeMap<String, String>),
}

impl Search {
    fn to_param(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Fields(fields) => fields
                .iter()
                .map(|(key, value)| format!("{key}: {value}"))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Field selection for [`BotsQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fields {
    /// Joined with `", "`
    List(Vec<String>),
    /// Sent verbatim
    Raw(String),
}

impl Fields {
    fn to_param(&self) -> String {
        match self {
            Self::List(fields) => fields.join(", "),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

/// Parameters for [`Client::get_bots`](super::Client::get_bots).
///
/// # Example
///
/// ```
/// use topgg::api::BotsQuery;
///
/// let query = BotsQuery::new()
///     .with_limit(10)
///     .with_search_field("username", "shiro")
///     .with_fields(["id", "username"]);
///
/// assert_eq!(
///     query.to_params(),
///     vec![
///         ("fields", "id, username".to_string()),
///         ("limit", "10".to_string()),
///         ("search", "username: shiro".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotsQuery {
    /// Maximum number of bots returned
    pub limit: Option<u32>,
    /// Number of bots skipped
    pub offset: Option<u32>,
    /// Search criteria
    pub search: Option<Search>,
    /// Sort field
    pub sort: Option<String>,
    /// Fields included in each result
    pub fields: Option<Fields>,
}

impl BotsQuery {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `limit`.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets `offset`.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets a free-text search.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(Search::Text(search.into()));
        self
    }

    /// Adds a `key: value` search criterion.
    ///
    /// Replaces a previous free-text search.
    #[must_use]
    pub fn with_search_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut fields = match self.search.take() {
            Some(Search::Fields(fields)) => fields,
            Some(Search::Text(_)) | None => BTreeMap::new(),
        };
        fields.insert(key.into(), value.into());
        self.search = Some(Search::Fields(fields));
        self
    }

    /// Sets `sort`.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Selects the fields returned for each bot.
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(Fields::List(fields.into_iter().map(Into::into).collect()));
        self
    }

    /// Returns the query-string parameters, in key order.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(fields) = &self.fields {
            params.push(("fields", fields.to_param()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.to_param()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort", sort.clone()));
        }

        params
    }
}
