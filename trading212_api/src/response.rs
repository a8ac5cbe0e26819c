//! Response decoding and lazy pagination.
//!
//! The API answers with one of three shapes: a bare JSON object, a bare JSON
//! array, or a page envelope `{"items": ..., "nextPagePath": ...}`. A
//! [`Response`] hides the difference and yields the elements one by one,
//! fetching the next page through the same request only once the current
//! page has been consumed.

use std::collections::VecDeque;
use std::sync::Arc;

use futures_util::stream::{self, Stream};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    request::{Executor, Request},
    Error,
};

/// Wire shape of a paginated result.
#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct Envelope {
    items: Value,
    #[serde(default)]
    next_page_path: Option<String>,
}

/// Outer shape of a payload: paginated envelope, or not paginated at all.
#[derive(Debug, PartialEq)]
enum Payload {
    Envelope {
        items: Value,
        next_page_path: Option<String>,
    },
    Bare(Value),
}

impl Payload {
    fn parse(raw: &[u8]) -> Result<Self, Error> {
        if let Ok(envelope) = serde_json::from_slice::<Envelope>(raw) {
            return Ok(Payload::Envelope {
                items: envelope.items,
                next_page_path: envelope.next_page_path,
            });
        }
        serde_json::from_slice::<Value>(raw)
            .map(Payload::Bare)
            .map_err(Error::Decode)
    }

    fn into_parts(self) -> (Value, Option<String>) {
        match self {
            Payload::Envelope {
                items,
                next_page_path,
            } => (items, next_page_path),
            Payload::Bare(items) => (items, None),
        }
    }
}

/// Shape of the `items` part of a payload.
#[derive(Debug, PartialEq)]
enum Items<T> {
    Array(Vec<T>),
    Single(T),
}

impl<T: DeserializeOwned> Items<T> {
    /// Tries an array of `T` first, then a single `T`.
    fn decode(items: &Value) -> Result<Self, Error> {
        if let Ok(array) = Vec::<T>::deserialize(items) {
            return Ok(Items::Array(array));
        }
        T::deserialize(items)
            .map(Items::Single)
            .map_err(Error::Decode)
    }

    fn into_vec(self) -> Vec<T> {
        match self {
            Items::Array(array) => array,
            Items::Single(value) => vec![value],
        }
    }
}

/// One decoded page: its elements plus the cursor of the following page.
struct Page<T> {
    items: VecDeque<T>,
    next_page_path: Option<String>,
}

impl<T: DeserializeOwned> Page<T> {
    fn decode(raw: &[u8]) -> Result<Self, Error> {
        let (items, next_page_path) = Payload::parse(raw)?.into_parts();
        let items = Items::<T>::decode(&items)?.into_vec();
        Ok(Self {
            items: items.into(),
            next_page_path: next_page_path.filter(|path| !path.is_empty()),
        })
    }
}

/// A lazy, single-pass sequence of results from one API call.
///
/// Elements of the current page are yielded in order. When the page runs
/// out and the server announced a next page, the same request is sent
/// again with `cursor` set to the announced token. Once exhausted the
/// sequence cannot be replayed; issue the call again instead.
///
/// If fetching a later page fails, that error is yielded once as the last
/// element and the sequence ends.
pub struct Response<T> {
    executor: Arc<Executor>,
    request: Request,
    page: VecDeque<T>,
    next_page_path: Option<String>,
}

impl<T: DeserializeOwned> Response<T> {
    pub(crate) fn decode(
        raw: &[u8],
        executor: Arc<Executor>,
        request: Request,
    ) -> Result<Self, Error> {
        let page = Page::decode(raw)?;
        Ok(Self {
            executor,
            request,
            page: page.items,
            next_page_path: page.next_page_path,
        })
    }

    /// Pulls the next element, fetching the next page if needed.
    pub async fn next(&mut self) -> Option<Result<T, Error>> {
        loop {
            if let Some(item) = self.page.pop_front() {
                return Some(Ok(item));
            }

            let cursor = self.next_page_path.take()?;
            self.request.set_query_param("cursor", &cursor);

            let page = match self.executor.send(&mut self.request).await {
                Ok(raw) => Page::decode(&raw),
                Err(e) => Err(e),
            };
            match page {
                Ok(page) => {
                    self.page = page.items;
                    self.next_page_path = page.next_page_path;
                }
                Err(e) => {
                    tracing::warn!(
                        "Pagination of {} stopped at cursor {}: {}",
                        self.request.rate_limit_path(),
                        cursor,
                        e
                    );
                    return Some(Err(e));
                }
            }
        }
    }

    /// Returns the first element without fetching any further page.
    pub async fn first(mut self) -> Result<T, Error> {
        self.next().await.unwrap_or(Err(Error::EmptyResult))
    }

    /// Drains every page into a vector, stopping at the first error.
    pub async fn collect_all(mut self) -> Result<Vec<T>, Error> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item?);
        }
        Ok(items)
    }

    /// Adapts the sequence into a [`Stream`].
    pub fn into_stream(self) -> impl Stream<Item = Result<T, Error>> {
        stream::unfold(self, |mut response| async move {
            let item = response.next().await?;
            Some((item, response))
        })
    }

    /// Elements already fetched and not yet yielded.
    pub fn buffered(&self) -> usize {
        self.page.len()
    }

    /// Whether another page will be requested once the buffer is drained.
    pub fn has_next_page(&self) -> bool {
        self.next_page_path.is_some()
    }

    /// The request behind this sequence, including the last cursor sent.
    pub fn request(&self) -> &Request {
        &self.request
    }
}
