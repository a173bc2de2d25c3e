//! The user domain: record, client-bound entity, and `/users` endpoint.

use std::fmt;
use std::ops::Deref;

use serde::Deserialize;

use crate::client::FlareApi;
use crate::endpoint::{Endpoint, Page};
use crate::entity::Entity;
use crate::error::ApiError;
use crate::form::{FileUpload, Form};
use crate::http::HttpMethod;
use crate::posts::PostEntity;

/// A Flare account as the server reports it.
///
/// `id` and `username` are immutable once assigned. The counts are derived
/// server-side and only present on endpoints that compute them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub pronouns: Option<String>,
    pub avatar: String,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub admin: Option<bool>,
    #[serde(default)]
    pub follower_count: Option<u64>,
    #[serde(default)]
    pub following_count: Option<u64>,
    #[serde(default)]
    pub post_count: Option<u64>,
    pub created_at: String,
}

impl Entity for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }
}

/// Sparse profile update. Unset fields are omitted from the PATCH body
/// entirely, so the server only touches what was set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub pronouns: Option<String>,
    pub avatar: Option<FileUpload>,
    pub banner: Option<FileUpload>,
}

impl UserUpdate {
    pub(crate) fn to_form(&self) -> Form {
        let mut form = Form::new();
        form.append_opt("display_name", self.display_name.clone());
        form.append_opt("bio", self.bio.clone());
        form.append_opt("location", self.location.clone());
        form.append_opt("link", self.link.clone());
        form.append_opt("pronouns", self.pronouns.clone());
        form.append_opt("avatar", self.avatar.clone());
        form.append_opt("banner", self.banner.clone());
        form
    }
}

/// Either a raw identifier or an already-fetched user. Lets call sites pass
/// whichever they have without the endpoint dispatching on shape.
#[derive(Debug, Clone, Copy)]
pub enum UserRef<'a> {
    Id(&'a str),
    User(&'a User),
}

impl UserRef<'_> {
    fn id(&self) -> &str {
        match self {
            UserRef::Id(id) => id,
            UserRef::User(user) => &user.id,
        }
    }
}

impl<'a> From<&'a str> for UserRef<'a> {
    fn from(id: &'a str) -> Self {
        UserRef::Id(id)
    }
}

impl<'a> From<&'a User> for UserRef<'a> {
    fn from(user: &'a User) -> Self {
        UserRef::User(user)
    }
}

impl<'a> From<&'a UserEntity<'_>> for UserRef<'a> {
    fn from(entity: &'a UserEntity<'_>) -> Self {
        UserRef::User(&entity.user)
    }
}

/// A [`User`] bound to the client that produced it, so relationship
/// traversal reads as method calls on the value itself.
pub struct UserEntity<'a> {
    api: &'a FlareApi,
    pub user: User,
}

impl<'a> UserEntity<'a> {
    pub(crate) fn new(api: &'a FlareApi, user: User) -> Self {
        Self { api, user }
    }

    pub fn into_inner(self) -> User {
        self.user
    }

    /// This user's posts, newest pages first as the server orders them.
    pub fn get_posts(&self, limit: u32, page: u32) -> Result<Page<PostEntity<'a>>, ApiError> {
        self.api.posts().get_by_author(&self.user.id, limit, page)
    }

    pub fn get_followers(&self, limit: u32, page: u32) -> Result<Page<UserEntity<'a>>, ApiError> {
        let api = self.api;
        let page = api.get_page::<User>(
            &format!("{}/{}/followers", UsersEndpoint::PATH, self.user.id),
            limit,
            page,
        )?;
        Ok(page.map(|user| UserEntity::new(api, user)))
    }

    pub fn get_following(&self, limit: u32, page: u32) -> Result<Page<UserEntity<'a>>, ApiError> {
        let api = self.api;
        let page = api.get_page::<User>(
            &format!("{}/{}/following", UsersEndpoint::PATH, self.user.id),
            limit,
            page,
        )?;
        Ok(page.map(|user| UserEntity::new(api, user)))
    }

    /// Follow this user; the server's success flag is passed through.
    pub fn follow(&self) -> Result<bool, ApiError> {
        self.api.flag(
            HttpMethod::Put,
            &format!("{}/{}/follow", UsersEndpoint::PATH, self.user.id),
        )
    }

    pub fn unfollow(&self) -> Result<bool, ApiError> {
        self.api.flag(
            HttpMethod::Delete,
            &format!("{}/{}/follow", UsersEndpoint::PATH, self.user.id),
        )
    }

    /// Whether the authenticated account follows this user.
    pub fn following(&self) -> Result<bool, ApiError> {
        self.api.users().is_following(&self.user)
    }
}

impl Deref for UserEntity<'_> {
    type Target = User;

    fn deref(&self) -> &User {
        &self.user
    }
}

impl fmt::Debug for UserEntity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEntity").field("user", &self.user).finish()
    }
}

/// Collection-level operations under `/users`.
pub struct UsersEndpoint<'a> {
    api: &'a FlareApi,
}

impl<'a> Endpoint<'a> for UsersEndpoint<'a> {
    const PATH: &'static str = "users";

    fn api(&self) -> &'a FlareApi {
        self.api
    }
}

impl<'a> UsersEndpoint<'a> {
    pub(crate) fn new(api: &'a FlareApi) -> Self {
        Self { api }
    }

    /// Full unpaginated listing.
    pub fn get_all(&self) -> Result<Vec<UserEntity<'a>>, ApiError> {
        let users: Vec<User> = self.api.get(Self::PATH)?;
        Ok(users
            .into_iter()
            .map(|user| UserEntity::new(self.api, user))
            .collect())
    }

    pub fn get_by_id(&self, id: &str) -> Result<UserEntity<'a>, ApiError> {
        let user = self.api.get(&format!("{}/{id}", Self::PATH))?;
        Ok(UserEntity::new(self.api, user))
    }

    pub fn get_by_handle(&self, handle: &str) -> Result<UserEntity<'a>, ApiError> {
        let user = self.api.get(&format!("{}/by_handle/{handle}", Self::PATH))?;
        Ok(UserEntity::new(self.api, user))
    }

    /// The account the bearer token belongs to.
    pub fn get_me(&self) -> Result<UserEntity<'a>, ApiError> {
        let user = self.api.get(&format!("{}/me", Self::PATH))?;
        Ok(UserEntity::new(self.api, user))
    }

    /// PATCH the authenticated profile with a sparse multipart body.
    pub fn update_me(&self, update: &UserUpdate) -> Result<(), ApiError> {
        let _: serde_json::Value = self.api.multipart(
            HttpMethod::Patch,
            &format!("{}/me", Self::PATH),
            &update.to_form(),
        )?;
        Ok(())
    }

    /// Force-remove one of the authenticated account's followers.
    pub fn remove_follower(&self, id: &str) -> Result<bool, ApiError> {
        self.api.flag(
            HttpMethod::Delete,
            &format!("{}/me/followers/{id}", Self::PATH),
        )
    }

    /// Whether the authenticated account follows `user`.
    pub fn is_following<'u>(&self, user: impl Into<UserRef<'u>>) -> Result<bool, ApiError> {
        let user = user.into();
        self.api.flag(
            HttpMethod::Get,
            &format!("{}/{}/follow", Self::PATH, user.id()),
        )
    }
}
