//! Shared query infrastructure: the [`Query`] trait and [`QueryCommon`] pagination fields.

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for pagination.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the number of results per page. Overrides the client default of 50.
    fn with_limit(mut self, limit: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().limit = Some(limit);
        self
    }

    /// Starts listing from a cursor returned by an earlier page.
    fn with_cursor(mut self, cursor: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().cursor = Some(cursor.to_string());
        self
    }
}

/// Pagination fields shared by all query types.
#[derive(Clone, Debug, Default)]
pub struct QueryCommon {
    /// Results per page. `None` uses the client default.
    pub limit: Option<u32>,
    /// Opaque continuation token.
    pub cursor: Option<String>,
}

impl QueryCommon {
    /// Appends the pagination parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(limit) = self.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        };
        if let Some(cursor) = &self.cursor {
            url.query_pairs_mut().append_pair("cursor", cursor);
        };
        url
    }
}
