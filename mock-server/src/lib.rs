//! In-memory mock of the Flare social API.
//!
//! # Design
//! Every response uses the `{status, data, error}` envelope the client
//! expects, with envelope status 200 on every success (the client treats any
//! other envelope status as failure, including 201). State lives behind an
//! `Arc<RwLock<Db>>`: account list, token map, ordered post list, and the
//! follower/like/bookmark/repost relation lists. Counts are derived on read.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub pronouns: Option<String>,
    pub avatar: String,
    pub banner: Option<String>,
    pub admin: bool,
    pub created_at: String,
}

#[derive(Clone, Debug)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub body: String,
    pub reply_to: Option<String>,
    pub repost_of: Option<String>,
    pub created_at: String,
}

struct Account {
    user: User,
    email: String,
    password: String,
}

/// Relation lists hold `(subject, actor)` pairs: `(followee, follower)` for
/// follows would invert the original ordering, so follows store
/// `(follower, followee)` while post relations store `(post, user)`.
#[derive(Default)]
pub struct Db {
    accounts: Vec<Account>,
    tokens: HashMap<String, String>,
    posts: Vec<Post>,
    follows: Vec<(String, String)>,
    likes: Vec<(String, String)>,
    bookmarks: Vec<(String, String)>,
    reposts: Vec<(String, String)>,
}

pub type SharedDb = Arc<RwLock<Db>>;

type ErrorResponse = (StatusCode, Json<Value>);
type ApiResult = Result<Json<Value>, ErrorResponse>;

pub fn app() -> Router {
    let db: SharedDb = Arc::new(RwLock::new(Db::default()));
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/users", get(list_users))
        .route("/users/me", get(get_me).patch(update_me))
        .route("/users/me/bookmarks", get(my_bookmarks))
        .route("/users/me/followers/{id}", delete(remove_follower))
        .route("/users/by_handle/{handle}", get(get_user_by_handle))
        .route("/users/{id}", get(get_user))
        .route(
            "/users/{id}/follow",
            get(follow_state).put(follow).delete(unfollow),
        )
        .route("/users/{id}/followers", get(followers))
        .route("/users/{id}/following", get(following))
        .route("/posts", get(list_posts))
        .route("/posts/create", post(create_post))
        .route("/posts/by_author/{id}", get(posts_by_author))
        .route("/posts/{id}", get(get_post).delete(delete_post))
        .route(
            "/posts/{id}/like",
            get(like_state).put(like).delete(unlike),
        )
        .route("/posts/{id}/likes", get(likers))
        .route(
            "/posts/{id}/bookmark",
            get(bookmark_state).put(bookmark).delete(unbookmark),
        )
        .route("/posts/{id}/replies", get(replies))
        .route(
            "/posts/{id}/repost",
            get(repost_state).put(repost).delete(unrepost),
        )
        .route("/posts/{id}/reposters", get(reposters))
        .route("/posts/{id}/quotes", get(quotes))
        .route("/posts/{id}/quote", post(quote))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// --- envelope and lookup helpers ---

fn ok(data: Value) -> Json<Value> {
    Json(json!({"status": 200, "data": data}))
}

fn fail(status: StatusCode, error: &str) -> ErrorResponse {
    (
        status,
        Json(json!({"status": status.as_u16(), "error": error})),
    )
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolve the bearer token to a user id.
fn auth(db: &Db, headers: &HeaderMap) -> Result<String, ErrorResponse> {
    bearer(headers)
        .and_then(|token| db.tokens.get(token).cloned())
        .ok_or_else(|| fail(StatusCode::UNAUTHORIZED, "invalid token"))
}

fn find_user<'a>(db: &'a Db, id: &str) -> Result<&'a User, ErrorResponse> {
    db.accounts
        .iter()
        .map(|account| &account.user)
        .find(|user| user.id == id)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "user not found"))
}

fn find_post<'a>(db: &'a Db, id: &str) -> Result<&'a Post, ErrorResponse> {
    db.posts
        .iter()
        .find(|post| post.id == id)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "post not found"))
}

fn user_payload(db: &Db, user: &User) -> Value {
    json!({
        "id": user.id,
        "username": user.username,
        "display_name": user.display_name,
        "bio": user.bio,
        "location": user.location,
        "link": user.link,
        "pronouns": user.pronouns,
        "avatar": user.avatar,
        "banner": user.banner,
        "admin": user.admin,
        "follower_count": db.follows.iter().filter(|f| f.1 == user.id).count(),
        "following_count": db.follows.iter().filter(|f| f.0 == user.id).count(),
        "post_count": db.posts.iter().filter(|p| p.author_id == user.id).count(),
        "created_at": user.created_at,
    })
}

fn post_payload(db: &Db, post: &Post) -> Value {
    json!({
        "id": post.id,
        "author_id": post.author_id,
        "body": post.body,
        "reply_to": post.reply_to,
        "repost_of": post.repost_of,
        "reply_count": db.posts.iter().filter(|p| p.reply_to.as_deref() == Some(post.id.as_str())).count(),
        "repost_count": db.reposts.iter().filter(|r| r.0 == post.id).count(),
        "like_count": db.likes.iter().filter(|l| l.0 == post.id).count(),
        "bookmark_count": db.bookmarks.iter().filter(|b| b.0 == post.id).count(),
        "created_at": post.created_at,
    })
}

// --- relation list primitives ---

fn has(list: &[(String, String)], key: (&str, &str)) -> bool {
    list.iter().any(|entry| entry.0 == key.0 && entry.1 == key.1)
}

/// Returns whether the pair was newly added.
fn insert(list: &mut Vec<(String, String)>, key: (&str, &str)) -> bool {
    if has(list, key) {
        return false;
    }
    list.push((key.0.to_string(), key.1.to_string()));
    true
}

/// Returns whether the pair was present.
fn remove(list: &mut Vec<(String, String)>, key: (&str, &str)) -> bool {
    let before = list.len();
    list.retain(|entry| !(entry.0 == key.0 && entry.1 == key.1));
    list.len() != before
}

// --- pagination ---

#[derive(Debug, Deserialize)]
pub struct Paging {
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    page: usize,
}

fn default_limit() -> usize {
    50
}

/// Slice one page out of `items`; `nextPage` is present only when more
/// items remain past this page.
fn page_of(items: Vec<Value>, paging: &Paging) -> Value {
    let start = paging.limit.saturating_mul(paging.page);
    let total = items.len();
    let data: Vec<Value> = items.into_iter().skip(start).take(paging.limit).collect();
    if start.saturating_add(paging.limit) < total {
        json!({"data": data, "nextPage": (paging.page + 1).to_string()})
    } else {
        json!({"data": data})
    }
}

// --- auth ---

#[derive(Deserialize)]
struct RegisterInput {
    username: String,
    email: String,
    password: String,
    display_name: Option<String>,
}

async fn register(State(db): State<SharedDb>, Json(input): Json<RegisterInput>) -> ApiResult {
    let mut db = db.write().await;
    if db
        .accounts
        .iter()
        .any(|account| account.user.username == input.username)
    {
        return Err(fail(StatusCode::BAD_REQUEST, "username already taken"));
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        display_name: input.display_name.unwrap_or_else(|| input.username.clone()),
        username: input.username,
        bio: None,
        location: None,
        link: None,
        pronouns: None,
        avatar: "avatars/default.png".to_string(),
        banner: None,
        admin: false,
        created_at: Utc::now().to_rfc3339(),
    };
    let token = Uuid::new_v4().to_string();
    db.tokens.insert(token.clone(), user.id.clone());
    db.accounts.push(Account {
        user,
        email: input.email,
        password: input.password,
    });
    Ok(ok(json!({"token": token})))
}

#[derive(Deserialize)]
struct LoginInput {
    login: String,
    password: String,
}

async fn login(State(db): State<SharedDb>, Json(input): Json<LoginInput>) -> ApiResult {
    let mut db = db.write().await;
    let id = db
        .accounts
        .iter()
        .find(|account| {
            (account.user.username == input.login || account.email == input.login)
                && account.password == input.password
        })
        .map(|account| account.user.id.clone())
        .ok_or_else(|| fail(StatusCode::UNAUTHORIZED, "invalid credentials"))?;

    let token = Uuid::new_v4().to_string();
    db.tokens.insert(token.clone(), id);
    Ok(ok(json!({"token": token})))
}

// --- users ---

async fn list_users(State(db): State<SharedDb>, headers: HeaderMap) -> ApiResult {
    let db = db.read().await;
    auth(&db, &headers)?;
    let users: Vec<Value> = db
        .accounts
        .iter()
        .map(|account| user_payload(&db, &account.user))
        .collect();
    Ok(ok(Value::Array(users)))
}

async fn get_me(State(db): State<SharedDb>, headers: HeaderMap) -> ApiResult {
    let db = db.read().await;
    let me = auth(&db, &headers)?;
    let user = find_user(&db, &me)?;
    Ok(ok(user_payload(&db, user)))
}

async fn get_user(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let db = db.read().await;
    auth(&db, &headers)?;
    let user = find_user(&db, &id)?;
    Ok(ok(user_payload(&db, user)))
}

async fn get_user_by_handle(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(handle): Path<String>,
) -> ApiResult {
    let db = db.read().await;
    auth(&db, &headers)?;
    let user = db
        .accounts
        .iter()
        .map(|account| &account.user)
        .find(|user| user.username == handle)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "user not found"))?;
    Ok(ok(user_payload(&db, user)))
}

async fn update_me(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult {
    let me = {
        let db = db.read().await;
        auth(&db, &headers)?
    };

    let mut texts: HashMap<String, String> = HashMap::new();
    let mut files: HashMap<String, String> = HashMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| fail(StatusCode::BAD_REQUEST, "malformed form"))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "avatar" | "banner" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                field
                    .bytes()
                    .await
                    .map_err(|_| fail(StatusCode::BAD_REQUEST, "malformed form"))?;
                files.insert(name, format!("uploads/{filename}"));
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| fail(StatusCode::BAD_REQUEST, "malformed form"))?;
                texts.insert(name, value);
            }
        }
    }

    let mut db = db.write().await;
    let account = db
        .accounts
        .iter_mut()
        .find(|account| account.user.id == me)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "user not found"))?;
    if let Some(value) = texts.remove("display_name") {
        account.user.display_name = value;
    }
    if let Some(value) = texts.remove("bio") {
        account.user.bio = Some(value);
    }
    if let Some(value) = texts.remove("location") {
        account.user.location = Some(value);
    }
    if let Some(value) = texts.remove("link") {
        account.user.link = Some(value);
    }
    if let Some(value) = texts.remove("pronouns") {
        account.user.pronouns = Some(value);
    }
    if let Some(path) = files.remove("avatar") {
        account.user.avatar = path;
    }
    if let Some(path) = files.remove("banner") {
        account.user.banner = Some(path);
    }
    let user = account.user.clone();
    Ok(ok(user_payload(&db, &user)))
}

async fn remove_follower(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let mut db = db.write().await;
    let me = auth(&db, &headers)?;
    let removed = remove(&mut db.follows, (&id, &me));
    Ok(ok(json!({"success": removed})))
}

async fn follow(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let mut db = db.write().await;
    let me = auth(&db, &headers)?;
    find_user(&db, &id)?;
    let added = insert(&mut db.follows, (&me, &id));
    Ok(ok(json!({"success": added})))
}

async fn unfollow(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let mut db = db.write().await;
    let me = auth(&db, &headers)?;
    find_user(&db, &id)?;
    let removed = remove(&mut db.follows, (&me, &id));
    Ok(ok(json!({"success": removed})))
}

async fn follow_state(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let db = db.read().await;
    let me = auth(&db, &headers)?;
    find_user(&db, &id)?;
    Ok(ok(json!({"success": has(&db.follows, (&me, &id))})))
}

async fn followers(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(paging): Query<Paging>,
) -> ApiResult {
    let db = db.read().await;
    auth(&db, &headers)?;
    find_user(&db, &id)?;
    let items: Vec<Value> = db
        .follows
        .iter()
        .filter(|f| f.1 == id)
        .filter_map(|f| find_user(&db, &f.0).ok())
        .map(|user| user_payload(&db, user))
        .collect();
    Ok(ok(page_of(items, &paging)))
}

async fn following(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(paging): Query<Paging>,
) -> ApiResult {
    let db = db.read().await;
    auth(&db, &headers)?;
    find_user(&db, &id)?;
    let items: Vec<Value> = db
        .follows
        .iter()
        .filter(|f| f.0 == id)
        .filter_map(|f| find_user(&db, &f.1).ok())
        .map(|user| user_payload(&db, user))
        .collect();
    Ok(ok(page_of(items, &paging)))
}

// --- posts ---

async fn list_posts(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Query(paging): Query<Paging>,
) -> ApiResult {
    let db = db.read().await;
    auth(&db, &headers)?;
    let items: Vec<Value> = db.posts.iter().map(|post| post_payload(&db, post)).collect();
    Ok(ok(page_of(items, &paging)))
}

async fn get_post(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let db = db.read().await;
    auth(&db, &headers)?;
    let post = find_post(&db, &id)?;
    Ok(ok(post_payload(&db, post)))
}

async fn posts_by_author(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(paging): Query<Paging>,
) -> ApiResult {
    let db = db.read().await;
    auth(&db, &headers)?;
    find_user(&db, &id)?;
    let items: Vec<Value> = db
        .posts
        .iter()
        .filter(|post| post.author_id == id)
        .map(|post| post_payload(&db, post))
        .collect();
    Ok(ok(page_of(items, &paging)))
}

/// Pull `body` (required) and `reply_to` (optional) out of a multipart form.
async fn post_form(multipart: &mut Multipart) -> Result<(String, Option<String>), ErrorResponse> {
    let mut body = None;
    let mut reply_to = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| fail(StatusCode::BAD_REQUEST, "malformed form"))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|_| fail(StatusCode::BAD_REQUEST, "malformed form"))?;
        match name.as_str() {
            "body" => body = Some(value),
            "reply_to" => reply_to = Some(value),
            _ => {}
        }
    }
    let body = body.ok_or_else(|| fail(StatusCode::BAD_REQUEST, "body is required"))?;
    Ok((body, reply_to))
}

async fn create_post(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult {
    let me = {
        let db = db.read().await;
        auth(&db, &headers)?
    };
    let (body, reply_to) = post_form(&mut multipart).await?;

    let mut db = db.write().await;
    if let Some(parent) = &reply_to {
        find_post(&db, parent)?;
    }
    let post = Post {
        id: Uuid::new_v4().to_string(),
        author_id: me,
        body,
        reply_to,
        repost_of: None,
        created_at: Utc::now().to_rfc3339(),
    };
    db.posts.push(post.clone());
    Ok(ok(post_payload(&db, &post)))
}

async fn delete_post(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    let mut db = db.write().await;
    let me = auth(&db, &headers)?;
    let post = find_post(&db, &id)?;
    if post.author_id != me {
        return Err(fail(StatusCode::FORBIDDEN, "not the author"));
    }
    db.posts.retain(|post| post.id != id);
    db.likes.retain(|l| l.0 != id);
    db.bookmarks.retain(|b| b.0 != id);
    db.reposts.retain(|r| r.0 != id);
    Ok(ok(json!({"success": true})))
}

async fn replies(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(paging): Query<Paging>,
) -> ApiResult {
    let db = db.read().await;
    auth(&db, &headers)?;
    find_post(&db, &id)?;
    let items: Vec<Value> = db
        .posts
        .iter()
        .filter(|post| post.reply_to.as_deref() == Some(id.as_str()))
        .map(|post| post_payload(&db, post))
        .collect();
    Ok(ok(page_of(items, &paging)))
}

async fn quotes(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(paging): Query<Paging>,
) -> ApiResult {
    let db = db.read().await;
    auth(&db, &headers)?;
    find_post(&db, &id)?;
    let items: Vec<Value> = db
        .posts
        .iter()
        .filter(|post| post.repost_of.as_deref() == Some(id.as_str()))
        .map(|post| post_payload(&db, post))
        .collect();
    Ok(ok(page_of(items, &paging)))
}

async fn quote(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult {
    let me = {
        let db = db.read().await;
        auth(&db, &headers)?
    };
    let (body, _) = post_form(&mut multipart).await?;

    let mut db = db.write().await;
    find_post(&db, &id)?;
    let post = Post {
        id: Uuid::new_v4().to_string(),
        author_id: me,
        body,
        reply_to: None,
        repost_of: Some(id),
        created_at: Utc::now().to_rfc3339(),
    };
    db.posts.push(post.clone());
    Ok(ok(post_payload(&db, &post)))
}

async fn my_bookmarks(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Query(paging): Query<Paging>,
) -> ApiResult {
    let db = db.read().await;
    let me = auth(&db, &headers)?;
    let items: Vec<Value> = db
        .bookmarks
        .iter()
        .filter(|b| b.1 == me)
        .filter_map(|b| find_post(&db, &b.0).ok())
        .map(|post| post_payload(&db, post))
        .collect();
    Ok(ok(page_of(items, &paging)))
}

// --- post relations ---

#[derive(Clone, Copy)]
enum Relation {
    Like,
    Bookmark,
    Repost,
}

fn relation_list(db: &Db, relation: Relation) -> &Vec<(String, String)> {
    match relation {
        Relation::Like => &db.likes,
        Relation::Bookmark => &db.bookmarks,
        Relation::Repost => &db.reposts,
    }
}

fn relation_list_mut(db: &mut Db, relation: Relation) -> &mut Vec<(String, String)> {
    match relation {
        Relation::Like => &mut db.likes,
        Relation::Bookmark => &mut db.bookmarks,
        Relation::Repost => &mut db.reposts,
    }
}

async fn mutate_relation(
    db: SharedDb,
    headers: HeaderMap,
    post_id: String,
    relation: Relation,
    add: bool,
) -> ApiResult {
    let mut db = db.write().await;
    let me = auth(&db, &headers)?;
    find_post(&db, &post_id)?;
    let list = relation_list_mut(&mut db, relation);
    let changed = if add {
        insert(list, (&post_id, &me))
    } else {
        remove(list, (&post_id, &me))
    };
    Ok(ok(json!({"success": changed})))
}

async fn relation_state(
    db: SharedDb,
    headers: HeaderMap,
    post_id: String,
    relation: Relation,
) -> ApiResult {
    let db = db.read().await;
    let me = auth(&db, &headers)?;
    find_post(&db, &post_id)?;
    let present = has(relation_list(&db, relation), (&post_id, &me));
    Ok(ok(json!({"success": present})))
}

async fn relation_users(
    db: SharedDb,
    headers: HeaderMap,
    post_id: String,
    relation: Relation,
    paging: Paging,
) -> ApiResult {
    let db = db.read().await;
    auth(&db, &headers)?;
    find_post(&db, &post_id)?;
    let items: Vec<Value> = relation_list(&db, relation)
        .iter()
        .filter(|entry| entry.0 == post_id)
        .filter_map(|entry| find_user(&db, &entry.1).ok())
        .map(|user| user_payload(&db, user))
        .collect();
    Ok(ok(page_of(items, &paging)))
}

async fn like(State(db): State<SharedDb>, headers: HeaderMap, Path(id): Path<String>) -> ApiResult {
    mutate_relation(db, headers, id, Relation::Like, true).await
}

async fn unlike(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    mutate_relation(db, headers, id, Relation::Like, false).await
}

async fn like_state(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    relation_state(db, headers, id, Relation::Like).await
}

async fn likers(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(paging): Query<Paging>,
) -> ApiResult {
    relation_users(db, headers, id, Relation::Like, paging).await
}

async fn bookmark(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    mutate_relation(db, headers, id, Relation::Bookmark, true).await
}

async fn unbookmark(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    mutate_relation(db, headers, id, Relation::Bookmark, false).await
}

async fn bookmark_state(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    relation_state(db, headers, id, Relation::Bookmark).await
}

async fn repost(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    mutate_relation(db, headers, id, Relation::Repost, true).await
}

async fn unrepost(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    mutate_relation(db, headers, id, Relation::Repost, false).await
}

async fn repost_state(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult {
    relation_state(db, headers, id, Relation::Repost).await
}

async fn reposters(
    State(db): State<SharedDb>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(paging): Query<Paging>,
) -> ApiResult {
    relation_users(db, headers, id, Relation::Repost, paging).await
}
