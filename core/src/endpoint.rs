//! Common endpoint contract and pagination types.

use serde::Deserialize;

use crate::client::FlareApi;

/// Default page size used by the hosted API.
pub const DEFAULT_LIMIT: u32 = 50;

/// Common shape of a resource endpoint: a borrowed client plus the URL path
/// prefix its operations live under. Endpoints are cheap views handed out by
/// [`FlareApi::users`](crate::FlareApi::users) and
/// [`FlareApi::posts`](crate::FlareApi::posts); each implements its own
/// operations directly.
pub trait Endpoint<'a> {
    const PATH: &'static str;

    fn api(&self) -> &'a FlareApi;
}

/// One page of a forward-only listing.
///
/// `next_page` is an opaque server-issued continuation token; its absence
/// means the listing is exhausted. Pages are never rewound.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(rename = "nextPage", default)]
    pub next_page: Option<String>,
}

impl<T> Page<T> {
    /// Wrap every item, keeping the continuation token. Used to turn records
    /// into client-bound entities.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            next_page: self.next_page,
        }
    }
}

/// Server-reported outcome flag for relation mutations and membership checks.
#[derive(Debug, Deserialize)]
pub(crate) struct Success {
    pub success: bool,
}
