//! Authenticated API client and the response-envelope layer.
//!
//! # Design
//! `FlareApi` owns the base URL, a token-supplier closure, and a boxed
//! [`Transport`]. Every endpoint operation funnels through [`FlareApi::request`],
//! which attaches the `Authorization` header, executes the call, and unwraps
//! the `{status, data, error}` envelope in one place. The token supplier is
//! invoked fresh on every call so rotated tokens take effect immediately, and
//! it is an instance field — independently configured clients can coexist.
//!
//! Registration and login bypass the authenticated path: they are associated
//! functions that take the base URL explicitly and return the issued token.

use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::endpoint::{Page, Success};
use crate::error::ApiError;
use crate::form::{self, Form};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::posts::PostsEndpoint;
use crate::users::UsersEndpoint;

/// Base URL of the hosted Flare instance.
pub const DEFAULT_BASE_URL: &str = "https://api.tryflare.social";

type TokenSupplier = Box<dyn Fn() -> String + Send + Sync>;

#[derive(Debug, Deserialize)]
struct ResponseEnvelope<T> {
    status: u16,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

/// Fields accepted by [`FlareApi::register`].
#[derive(Debug, Clone, Serialize)]
pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<&'a str>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    login: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenData {
    token: String,
}

/// Authenticated client for the Flare social API.
pub struct FlareApi {
    base_url: String,
    token: TokenSupplier,
    transport: Box<dyn Transport>,
}

impl FlareApi {
    /// Build a client over the default ureq transport. `token` is called on
    /// every request, so it may return a different token over time.
    pub fn new(token: impl Fn() -> String + Send + Sync + 'static, base_url: &str) -> Self {
        Self::with_transport(token, base_url, UreqTransport::new())
    }

    /// Build a client over a custom [`Transport`].
    pub fn with_transport(
        token: impl Fn() -> String + Send + Sync + 'static,
        base_url: &str,
        transport: impl Transport + 'static,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Box::new(token),
            transport: Box::new(transport),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The user collection.
    pub fn users(&self) -> UsersEndpoint<'_> {
        UsersEndpoint::new(self)
    }

    /// The post collection.
    pub fn posts(&self) -> PostsEndpoint<'_> {
        PostsEndpoint::new(self)
    }

    /// Issue an authenticated call to `{base_url}/{path}` and unwrap the
    /// response envelope into its `data` field.
    ///
    /// The `Authorization` header is always taken from the token supplier;
    /// a caller-provided header of the same name is discarded.
    pub fn request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        headers: Vec<(String, String)>,
        body: Option<Vec<u8>>,
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("[{method}] {url}");

        let mut merged = vec![(
            "Authorization".to_string(),
            format!("Bearer {}", (self.token)()),
        )];
        merged.extend(
            headers
                .into_iter()
                .filter(|(name, _)| !name.eq_ignore_ascii_case("authorization")),
        );

        let response = self.transport.execute(HttpRequest {
            method,
            url,
            headers: merged,
            body,
        })?;
        unwrap_envelope(&response)
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(HttpMethod::Get, path, Vec::new(), None)
    }

    pub(crate) fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        limit: u32,
        page: u32,
    ) -> Result<Page<T>, ApiError> {
        self.get(&format!("{path}?limit={limit}&page={page}"))
    }

    /// Issue a call whose payload is a bare `{success}` flag and pass the
    /// flag through unchanged.
    pub(crate) fn flag(&self, method: HttpMethod, path: &str) -> Result<bool, ApiError> {
        let outcome: Success = self.request(method, path, Vec::new(), None)?;
        Ok(outcome.success)
    }

    /// Issue a call carrying a multipart form body.
    pub(crate) fn multipart<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        form: &Form,
    ) -> Result<T, ApiError> {
        let boundary = form::random_boundary();
        let headers = vec![("Content-Type".to_string(), Form::content_type(&boundary))];
        self.request(method, path, headers, Some(form.encode(&boundary)))
    }

    /// Create an account and return the issued bearer token.
    pub fn register(base_url: &str, registration: &Registration<'_>) -> Result<String, ApiError> {
        auth_request(base_url, "auth/register", registration)
    }

    /// Exchange credentials for a bearer token. `login` is a username or an
    /// email address.
    pub fn login(base_url: &str, login: &str, password: &str) -> Result<String, ApiError> {
        auth_request(base_url, "auth/login", &LoginRequest { login, password })
    }
}

/// POST a JSON payload to an unauthenticated `/auth/*` endpoint and pull the
/// token out of the envelope.
fn auth_request<B: Serialize>(base_url: &str, path: &str, payload: &B) -> Result<String, ApiError> {
    let body = serde_json::to_vec(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
    let url = format!("{}/{}", base_url.trim_end_matches('/'), path);
    debug!("[POST] {url}");

    let response = UreqTransport::new().execute(HttpRequest {
        method: HttpMethod::Post,
        url,
        headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        body: Some(body),
    })?;

    let data: TokenData = unwrap_envelope(&response)?;
    Ok(data.token)
}

/// Unwrap the `{status, data, error}` envelope shared by every endpoint.
///
/// Fails when the transport status is outside 2xx or the envelope status is
/// not exactly 200 — the error carries the server's `error` text verbatim.
pub(crate) fn unwrap_envelope<T: DeserializeOwned>(
    response: &HttpResponse,
) -> Result<T, ApiError> {
    let envelope: ResponseEnvelope<serde_json::Value> = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::Deserialization(e.to_string()))?;

    let transport_ok = (200..300).contains(&response.status);
    if !transport_ok || envelope.status != 200 {
        let message = envelope.error.unwrap_or_default();
        error!("request failed: {message}");
        return Err(ApiError::RequestFailed {
            status: envelope.status,
            message,
        });
    }
    debug!("request status: {}", envelope.status);

    // A 200 envelope without `data` is a server contract violation; absent
    // payloads deserialize from null so unit-like targets still succeed.
    let data = envelope.data.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(data).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::http::testing::FakeTransport;

    fn fixture() -> (FlareApi, FakeTransport) {
        let transport = FakeTransport::new();
        let api = FlareApi::with_transport(|| "tok".to_string(), "http://flare.test", transport.clone());
        (api, transport)
    }

    #[test]
    fn request_returns_the_data_field_only() {
        let (api, transport) = fixture();
        transport.reply_json(json!({"status": 200, "data": {"value": 7}}));

        let data: serde_json::Value = api
            .request(HttpMethod::Get, "anything", Vec::new(), None)
            .unwrap();
        assert_eq!(data, json!({"value": 7}));
    }

    #[test]
    fn envelope_failure_carries_error_text_verbatim() {
        let (api, transport) = fixture();
        transport.reply(HttpResponse {
            status: 401,
            headers: Vec::new(),
            body: json!({"status": 401, "error": "invalid credentials"}).to_string(),
        });

        let err = api
            .request::<serde_json::Value>(HttpMethod::Get, "users/me", Vec::new(), None)
            .unwrap_err();
        match err {
            ApiError::RequestFailed { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid credentials");
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[test]
    fn envelope_status_must_be_exactly_200() {
        // 201 over a successful transport still counts as failure.
        let (api, transport) = fixture();
        transport.reply_json(json!({"status": 201, "data": {"value": 1}}));

        let err = api
            .request::<serde_json::Value>(HttpMethod::Post, "posts/create", Vec::new(), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::RequestFailed { status: 201, .. }));
    }

    #[test]
    fn transport_failure_overrides_envelope_success() {
        let (api, transport) = fixture();
        transport.reply(HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: json!({"status": 200, "data": {}}).to_string(),
        });

        let err = api
            .request::<serde_json::Value>(HttpMethod::Get, "users", Vec::new(), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::RequestFailed { .. }));
    }

    #[test]
    fn token_supplier_is_invoked_per_call() {
        let transport = FakeTransport::new();
        let counter = Arc::new(AtomicU32::new(0));
        let supplier_counter = Arc::clone(&counter);
        let api = FlareApi::with_transport(
            move || format!("tok-{}", supplier_counter.fetch_add(1, Ordering::SeqCst)),
            "http://flare.test",
            transport.clone(),
        );

        transport.reply_json(json!({"status": 200, "data": null}));
        transport.reply_json(json!({"status": 200, "data": null}));
        let _: serde_json::Value = api.request(HttpMethod::Get, "a", Vec::new(), None).unwrap();
        let first = transport.last_request();
        let _: serde_json::Value = api.request(HttpMethod::Get, "b", Vec::new(), None).unwrap();
        let second = transport.last_request();

        assert_eq!(first.headers[0], ("Authorization".to_string(), "Bearer tok-0".to_string()));
        assert_eq!(second.headers[0], ("Authorization".to_string(), "Bearer tok-1".to_string()));
    }

    #[test]
    fn caller_headers_cannot_override_authorization() {
        let (api, transport) = fixture();
        transport.reply_json(json!({"status": 200, "data": null}));

        let _: serde_json::Value = api
            .request(
                HttpMethod::Get,
                "users/me",
                vec![
                    ("authorization".to_string(), "Bearer forged".to_string()),
                    ("X-Extra".to_string(), "1".to_string()),
                ],
                None,
            )
            .unwrap();

        let request = transport.last_request();
        let auth_headers: Vec<_> = request
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .collect();
        assert_eq!(auth_headers.len(), 1);
        assert_eq!(auth_headers[0].1, "Bearer tok");
        assert!(request.headers.iter().any(|(name, _)| name == "X-Extra"));
    }

    #[test]
    fn missing_data_on_success_deserializes_from_null() {
        let (api, transport) = fixture();
        transport.reply_json(json!({"status": 200}));

        let data: Option<String> = api
            .request(HttpMethod::Get, "users/me", Vec::new(), None)
            .unwrap();
        assert!(data.is_none());
    }

    #[test]
    fn malformed_body_is_a_deserialization_error() {
        let (api, transport) = fixture();
        transport.reply(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "not json".to_string(),
        });

        let err = api
            .request::<serde_json::Value>(HttpMethod::Get, "users", Vec::new(), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let transport = FakeTransport::new();
        let api =
            FlareApi::with_transport(|| "tok".to_string(), "http://flare.test/", transport.clone());
        transport.reply_json(json!({"status": 200, "data": null}));

        let _: serde_json::Value = api.request(HttpMethod::Get, "users", Vec::new(), None).unwrap();
        assert_eq!(transport.last_request().url, "http://flare.test/users");
    }

    #[test]
    fn multipart_sets_content_type_with_boundary() {
        let (api, transport) = fixture();
        transport.reply_json(json!({"status": 200, "data": null}));

        let mut form = Form::new();
        form.append("body", "hi");
        let _: serde_json::Value = api.multipart(HttpMethod::Post, "posts/create", &form).unwrap();

        let request = transport.last_request();
        let content_type = request
            .headers
            .iter()
            .find(|(name, _)| name == "Content-Type")
            .map(|(_, value)| value.clone())
            .unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
        let boundary = content_type.split('=').next_back().unwrap();
        let body = String::from_utf8(request.body.unwrap()).unwrap();
        assert!(body.contains(boundary));
        assert!(body.contains("name=\"body\"\r\n\r\nhi\r\n"));
    }

    #[test]
    fn registration_serializes_sparse_fields() {
        let full = Registration {
            username: "ada",
            email: "ada@example.com",
            password: "pw",
            display_name: Some("Ada"),
            invite_code: Some("beta"),
        };
        let value = serde_json::to_value(&full).unwrap();
        assert_eq!(value["display_name"], "Ada");
        assert_eq!(value["invite_code"], "beta");

        let minimal = Registration {
            username: "ada",
            email: "ada@example.com",
            password: "pw",
            display_name: None,
            invite_code: None,
        };
        let value = serde_json::to_value(&minimal).unwrap();
        assert!(value.get("display_name").is_none());
        assert!(value.get("invite_code").is_none());
    }
}
