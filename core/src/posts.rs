//! The post domain: record, client-bound entity, and `/posts` endpoint.

use std::fmt;
use std::ops::Deref;

use serde::Deserialize;

use crate::client::FlareApi;
use crate::endpoint::{Endpoint, Page};
use crate::entity::Entity;
use crate::error::ApiError;
use crate::form::Form;
use crate::http::HttpMethod;
use crate::users::{User, UserEntity, UsersEndpoint};

/// A post as the server reports it.
///
/// `reply_to` and `repost_of` are self-referential foreign keys: replies form
/// a forest under their parents, and quotes point at the post they quote.
/// The server does not permit cycles; the client does not check.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub body: String,
    #[serde(default)]
    pub reply_to: Option<String>,
    #[serde(default)]
    pub repost_of: Option<String>,
    #[serde(default)]
    pub reply_count: Option<u64>,
    #[serde(default)]
    pub repost_count: Option<u64>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub bookmark_count: Option<u64>,
    pub created_at: String,
}

impl Entity for Post {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

/// Payload for creating a post. Setting `reply_to` makes the new post a
/// child of that post.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostCreate {
    pub body: String,
    pub reply_to: Option<String>,
}

impl PostCreate {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            reply_to: None,
        }
    }

    pub(crate) fn to_form(&self) -> Form {
        let mut form = Form::new();
        form.append("body", self.body.clone());
        form.append_opt("reply_to", self.reply_to.clone());
        form
    }
}

/// A [`Post`] bound to the client that produced it.
pub struct PostEntity<'a> {
    api: &'a FlareApi,
    pub post: Post,
}

impl<'a> PostEntity<'a> {
    pub(crate) fn new(api: &'a FlareApi, post: Post) -> Self {
        Self { api, post }
    }

    pub fn into_inner(self) -> Post {
        self.post
    }

    pub fn get_author(&self) -> Result<UserEntity<'a>, ApiError> {
        self.api.users().get_by_id(&self.post.author_id)
    }

    pub fn delete(&self) -> Result<bool, ApiError> {
        self.api.posts().delete(&self.post.id)
    }

    pub fn like(&self) -> Result<bool, ApiError> {
        self.relation_flag(HttpMethod::Put, "like")
    }

    pub fn unlike(&self) -> Result<bool, ApiError> {
        self.relation_flag(HttpMethod::Delete, "like")
    }

    /// Whether the authenticated account has liked this post.
    pub fn is_liked(&self) -> Result<bool, ApiError> {
        self.relation_flag(HttpMethod::Get, "like")
    }

    /// The users who liked this post.
    pub fn get_likes(&self, limit: u32, page: u32) -> Result<Page<UserEntity<'a>>, ApiError> {
        self.user_page("likes", limit, page)
    }

    pub fn bookmark(&self) -> Result<bool, ApiError> {
        self.relation_flag(HttpMethod::Put, "bookmark")
    }

    pub fn unbookmark(&self) -> Result<bool, ApiError> {
        self.relation_flag(HttpMethod::Delete, "bookmark")
    }

    pub fn is_bookmarked(&self) -> Result<bool, ApiError> {
        self.relation_flag(HttpMethod::Get, "bookmark")
    }

    /// Direct replies to this post.
    pub fn get_replies(&self, limit: u32, page: u32) -> Result<Page<PostEntity<'a>>, ApiError> {
        self.post_page("replies", limit, page)
    }

    /// Create a reply to this post.
    pub fn reply(&self, body: &str) -> Result<PostEntity<'a>, ApiError> {
        self.api.posts().create(&PostCreate {
            body: body.to_string(),
            reply_to: Some(self.post.id.clone()),
        })
    }

    pub fn get_reposters(&self, limit: u32, page: u32) -> Result<Page<UserEntity<'a>>, ApiError> {
        self.user_page("reposters", limit, page)
    }

    pub fn repost(&self) -> Result<bool, ApiError> {
        self.relation_flag(HttpMethod::Put, "repost")
    }

    pub fn unrepost(&self) -> Result<bool, ApiError> {
        self.relation_flag(HttpMethod::Delete, "repost")
    }

    pub fn is_reposted(&self) -> Result<bool, ApiError> {
        self.relation_flag(HttpMethod::Get, "repost")
    }

    /// Posts quoting this one.
    pub fn get_quotes(&self, limit: u32, page: u32) -> Result<Page<PostEntity<'a>>, ApiError> {
        self.post_page("quotes", limit, page)
    }

    /// Quote this post with a comment of its own.
    pub fn quote(&self, body: &str) -> Result<PostEntity<'a>, ApiError> {
        let mut form = Form::new();
        form.append("body", body);
        let post = self.api.multipart(
            HttpMethod::Post,
            &format!("{}/{}/quote", PostsEndpoint::PATH, self.post.id),
            &form,
        )?;
        Ok(PostEntity::new(self.api, post))
    }

    fn relation_flag(&self, method: HttpMethod, relation: &str) -> Result<bool, ApiError> {
        self.api.flag(
            method,
            &format!("{}/{}/{relation}", PostsEndpoint::PATH, self.post.id),
        )
    }

    fn user_page(
        &self,
        relation: &str,
        limit: u32,
        page: u32,
    ) -> Result<Page<UserEntity<'a>>, ApiError> {
        let api = self.api;
        let page = api.get_page::<User>(
            &format!("{}/{}/{relation}", PostsEndpoint::PATH, self.post.id),
            limit,
            page,
        )?;
        Ok(page.map(|user| UserEntity::new(api, user)))
    }

    fn post_page(
        &self,
        relation: &str,
        limit: u32,
        page: u32,
    ) -> Result<Page<PostEntity<'a>>, ApiError> {
        let api = self.api;
        let page = api.get_page::<Post>(
            &format!("{}/{}/{relation}", PostsEndpoint::PATH, self.post.id),
            limit,
            page,
        )?;
        Ok(page.map(|post| PostEntity::new(api, post)))
    }
}

impl Deref for PostEntity<'_> {
    type Target = Post;

    fn deref(&self) -> &Post {
        &self.post
    }
}

impl fmt::Debug for PostEntity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostEntity").field("post", &self.post).finish()
    }
}

/// Collection-level operations under `/posts`.
pub struct PostsEndpoint<'a> {
    api: &'a FlareApi,
}

impl<'a> Endpoint<'a> for PostsEndpoint<'a> {
    const PATH: &'static str = "posts";

    fn api(&self) -> &'a FlareApi {
        self.api
    }
}

impl<'a> PostsEndpoint<'a> {
    pub(crate) fn new(api: &'a FlareApi) -> Self {
        Self { api }
    }

    pub fn get_all(&self, limit: u32, page: u32) -> Result<Page<PostEntity<'a>>, ApiError> {
        let api = self.api;
        let page = api.get_page::<Post>(Self::PATH, limit, page)?;
        Ok(page.map(|post| PostEntity::new(api, post)))
    }

    pub fn get_by_id(&self, id: &str) -> Result<PostEntity<'a>, ApiError> {
        let post = self.api.get(&format!("{}/{id}", Self::PATH))?;
        Ok(PostEntity::new(self.api, post))
    }

    pub fn get_by_author(
        &self,
        author_id: &str,
        limit: u32,
        page: u32,
    ) -> Result<Page<PostEntity<'a>>, ApiError> {
        let api = self.api;
        let page = api.get_page::<Post>(
            &format!("{}/by_author/{author_id}", Self::PATH),
            limit,
            page,
        )?;
        Ok(page.map(|post| PostEntity::new(api, post)))
    }

    /// Publish a post via a multipart form.
    pub fn create(&self, data: &PostCreate) -> Result<PostEntity<'a>, ApiError> {
        let post = self.api.multipart(
            HttpMethod::Post,
            &format!("{}/create", Self::PATH),
            &data.to_form(),
        )?;
        Ok(PostEntity::new(self.api, post))
    }

    pub fn delete(&self, id: &str) -> Result<bool, ApiError> {
        self.api
            .flag(HttpMethod::Delete, &format!("{}/{id}", Self::PATH))
    }

    /// Bookmarked posts of the authenticated account. Served under
    /// `/users/me` rather than `/posts`.
    pub fn get_my_bookmarks(
        &self,
        limit: u32,
        page: u32,
    ) -> Result<Page<PostEntity<'a>>, ApiError> {
        let api = self.api;
        let page = api.get_page::<Post>(
            &format!("{}/me/bookmarks", UsersEndpoint::PATH),
            limit,
            page,
        )?;
        Ok(page.map(|post| PostEntity::new(api, post)))
    }
}
