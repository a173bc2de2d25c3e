use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::{Service, ServiceExt};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body.to_string()).unwrap()
}

fn bare_request(method: &str, uri: &str, token: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(String::new())
        .unwrap()
}

const BOUNDARY: &str = "XBOUNDARY";

/// Hand-built multipart body with a fixed boundary.
fn form_request(method: &str, uri: &str, token: &str, fields: &[(&str, &str)]) -> Request<String> {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .unwrap()
}

async fn call(app: &mut axum::routing::RouterIntoService<String>, req: Request<String>) -> axum::response::Response {
    ServiceExt::<Request<String>>::ready(app)
        .await
        .unwrap()
        .call(req)
        .await
        .unwrap()
}

async fn register(
    app: &mut axum::routing::RouterIntoService<String>,
    username: &str,
) -> String {
    let resp = call(
        app,
        json_request(
            "POST",
            "/auth/register",
            None,
            &format!(
                r#"{{"username":"{username}","email":"{username}@example.com","password":"pw"}}"#
            ),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 200);
    body["data"]["token"].as_str().unwrap().to_string()
}

// --- auth ---

#[tokio::test]
async fn register_returns_token_envelope() {
    let mut app = app().into_service();
    let token = register(&mut app, "ada").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn register_rejects_duplicate_username() {
    let mut app = app().into_service();
    register(&mut app, "ada").await;

    let resp = call(
        &mut app,
        json_request(
            "POST",
            "/auth/register",
            None,
            r#"{"username":"ada","email":"other@example.com","password":"pw"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "username already taken");
}

#[tokio::test]
async fn login_with_wrong_password_is_401() {
    let mut app = app().into_service();
    register(&mut app, "ada").await;

    let resp = call(
        &mut app,
        json_request(
            "POST",
            "/auth/login",
            None,
            r#"{"login":"ada","password":"wrong"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "invalid credentials");
}

#[tokio::test]
async fn login_accepts_email_as_login() {
    let mut app = app().into_service();
    register(&mut app, "ada").await;

    let resp = call(
        &mut app,
        json_request(
            "POST",
            "/auth/login",
            None,
            r#"{"login":"ada@example.com","password":"pw"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["data"]["token"].as_str().is_some());
}

#[tokio::test]
async fn unauthenticated_request_is_401() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/users/me")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "invalid token");
}

// --- users ---

#[tokio::test]
async fn get_me_returns_registered_profile() {
    let mut app = app().into_service();
    let token = register(&mut app, "ada").await;

    let resp = call(&mut app, bare_request("GET", "/users/me", &token)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["username"], "ada");
    assert_eq!(body["data"]["display_name"], "ada");
    assert_eq!(body["data"]["follower_count"], 0);
}

#[tokio::test]
async fn update_me_applies_sparse_fields() {
    let mut app = app().into_service();
    let token = register(&mut app, "ada").await;

    let resp = call(
        &mut app,
        form_request(
            "PATCH",
            "/users/me",
            &token,
            &[("bio", "analyst"), ("display_name", "Ada L")],
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["bio"], "analyst");
    assert_eq!(body["data"]["display_name"], "Ada L");
    assert_eq!(body["data"]["username"], "ada");
}

#[tokio::test]
async fn follow_flow_tracks_state_changes() {
    let mut app = app().into_service();
    let ada = register(&mut app, "ada").await;
    let bob = register(&mut app, "bob").await;

    let me = body_json(call(&mut app, bare_request("GET", "/users/me", &bob)).await).await;
    let bob_id = me["data"]["id"].as_str().unwrap().to_string();

    let resp = call(
        &mut app,
        bare_request("PUT", &format!("/users/{bob_id}/follow"), &ada),
    )
    .await;
    assert_eq!(body_json(resp).await["data"]["success"], true);

    // second follow is a no-op
    let resp = call(
        &mut app,
        bare_request("PUT", &format!("/users/{bob_id}/follow"), &ada),
    )
    .await;
    assert_eq!(body_json(resp).await["data"]["success"], false);

    let resp = call(
        &mut app,
        bare_request("GET", &format!("/users/{bob_id}/follow"), &ada),
    )
    .await;
    assert_eq!(body_json(resp).await["data"]["success"], true);

    let resp = call(
        &mut app,
        bare_request("GET", &format!("/users/{bob_id}/followers"), &ada),
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["data"]["data"][0]["username"], "ada");

    let resp = call(
        &mut app,
        bare_request("DELETE", &format!("/users/{bob_id}/follow"), &ada),
    )
    .await;
    assert_eq!(body_json(resp).await["data"]["success"], true);
}

// --- posts ---

#[tokio::test]
async fn create_post_requires_a_body_field() {
    let mut app = app().into_service();
    let token = register(&mut app, "ada").await;

    let resp = call(
        &mut app,
        form_request("POST", "/posts/create", &token, &[("reply_to", "x")]),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "body is required");
}

#[tokio::test]
async fn create_and_fetch_post() {
    let mut app = app().into_service();
    let token = register(&mut app, "ada").await;

    let resp = call(
        &mut app,
        form_request("POST", "/posts/create", &token, &[("body", "hello world")]),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json(resp).await;
    assert_eq!(created["status"], 200);
    assert_eq!(created["data"]["body"], "hello world");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let resp = call(&mut app, bare_request("GET", &format!("/posts/{id}"), &token)).await;
    let fetched = body_json(resp).await;
    assert_eq!(fetched["data"]["id"], id.as_str());
}

#[tokio::test]
async fn missing_post_is_404() {
    let mut app = app().into_service();
    let token = register(&mut app, "ada").await;

    let resp = call(&mut app, bare_request("GET", "/posts/nope", &token)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "post not found");
}

#[tokio::test]
async fn listing_paginates_with_next_page_token() {
    let mut app = app().into_service();
    let token = register(&mut app, "ada").await;

    for n in 0..3 {
        let body = format!("post {n}");
        let resp = call(
            &mut app,
            form_request("POST", "/posts/create", &token, &[("body", &body)]),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = call(&mut app, bare_request("GET", "/posts?limit=2&page=0", &token)).await;
    let first = body_json(resp).await;
    assert_eq!(first["data"]["data"].as_array().unwrap().len(), 2);
    assert_eq!(first["data"]["nextPage"], "1");

    let resp = call(&mut app, bare_request("GET", "/posts?limit=2&page=1", &token)).await;
    let second = body_json(resp).await;
    assert_eq!(second["data"]["data"].as_array().unwrap().len(), 1);
    assert!(second["data"].get("nextPage").is_none());
}

#[tokio::test]
async fn delete_post_is_author_only() {
    let mut app = app().into_service();
    let ada = register(&mut app, "ada").await;
    let bob = register(&mut app, "bob").await;

    let resp = call(
        &mut app,
        form_request("POST", "/posts/create", &ada, &[("body", "mine")]),
    )
    .await;
    let id = body_json(resp).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let resp = call(&mut app, bare_request("DELETE", &format!("/posts/{id}"), &bob)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = call(&mut app, bare_request("DELETE", &format!("/posts/{id}"), &ada)).await;
    assert_eq!(body_json(resp).await["data"]["success"], true);

    let resp = call(&mut app, bare_request("GET", &format!("/posts/{id}"), &ada)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn like_state_and_count_follow_mutations() {
    let mut app = app().into_service();
    let token = register(&mut app, "ada").await;

    let resp = call(
        &mut app,
        form_request("POST", "/posts/create", &token, &[("body", "likeable")]),
    )
    .await;
    let id = body_json(resp).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let resp = call(
        &mut app,
        bare_request("PUT", &format!("/posts/{id}/like"), &token),
    )
    .await;
    assert_eq!(body_json(resp).await["data"]["success"], true);

    let resp = call(
        &mut app,
        bare_request("GET", &format!("/posts/{id}/like"), &token),
    )
    .await;
    assert_eq!(body_json(resp).await["data"]["success"], true);

    let resp = call(&mut app, bare_request("GET", &format!("/posts/{id}"), &token)).await;
    assert_eq!(body_json(resp).await["data"]["like_count"], 1);

    let resp = call(
        &mut app,
        bare_request("GET", &format!("/posts/{id}/likes"), &token),
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["data"]["data"][0]["username"], "ada");

    let resp = call(
        &mut app,
        bare_request("DELETE", &format!("/posts/{id}/like"), &token),
    )
    .await;
    assert_eq!(body_json(resp).await["data"]["success"], true);
}

#[tokio::test]
async fn quote_lists_under_the_original() {
    let mut app = app().into_service();
    let token = register(&mut app, "ada").await;

    let resp = call(
        &mut app,
        form_request("POST", "/posts/create", &token, &[("body", "original")]),
    )
    .await;
    let id = body_json(resp).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let resp = call(
        &mut app,
        form_request(
            "POST",
            &format!("/posts/{id}/quote"),
            &token,
            &[("body", "look at this")],
        ),
    )
    .await;
    let quoted = body_json(resp).await;
    assert_eq!(quoted["data"]["repost_of"], id.as_str());

    let resp = call(
        &mut app,
        bare_request("GET", &format!("/posts/{id}/quotes"), &token),
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["data"]["data"][0]["body"], "look at this");
}
