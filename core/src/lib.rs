//! Typed client for the Flare social API.
//!
//! # Overview
//! [`FlareApi`] owns the base URL, a per-call token supplier, and the HTTP
//! transport. Operations live on the `users` and `posts` endpoint views;
//! successful responses come back as records wrapped into client-bound
//! entities, so follow-on calls read naturally:
//!
//! ```no_run
//! use flare_core::{FlareApi, DEFAULT_BASE_URL};
//!
//! # fn main() -> Result<(), flare_core::ApiError> {
//! let token = FlareApi::login(DEFAULT_BASE_URL, "ada", "hunter2")?;
//! let api = FlareApi::new(move || token.clone(), DEFAULT_BASE_URL);
//!
//! let me = api.users().get_me()?;
//! let feed = api.posts().get_all(50, 0)?;
//! if let Some(post) = feed.data.first() {
//!     let author = post.get_author()?;
//!     post.reply(&format!("hi {}!", author.username))?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - Every response is a `{status, data, error}` envelope; unwrapping and
//!   failure mapping happen once, in `client::unwrap_envelope`.
//! - I/O goes through the [`Transport`] trait over plain-data requests and
//!   responses, so the whole client is testable without a network.
//! - Entities borrow the client that produced them; the client is read-only
//!   after construction and safe to share across threads.
//! - Writes that carry fields use multipart forms built by [`Form`], with
//!   sparse-update semantics for partial profile edits.

pub mod client;
pub mod endpoint;
pub mod entity;
pub mod error;
pub mod form;
pub mod http;
pub mod posts;
pub mod users;

pub use client::{FlareApi, Registration, DEFAULT_BASE_URL};
pub use endpoint::{Endpoint, Page, DEFAULT_LIMIT};
pub use entity::Entity;
pub use error::ApiError;
pub use form::{FileUpload, Form, FormValue};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use posts::{Post, PostCreate, PostEntity, PostsEndpoint};
pub use users::{User, UserEntity, UserRef, UserUpdate, UsersEndpoint};
