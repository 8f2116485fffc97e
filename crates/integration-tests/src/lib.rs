//! Integration tests for Cafe Nine.
//!
//! The tests drive the fully assembled storefront router in process with
//! `tower::ServiceExt::oneshot`; no server or network is involved.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cafe-nine-integration-tests
//! ```
//!
//! [`TestClient`] keeps the session cookie between requests the way a
//! browser would, so multi-step flows (cart, login, checkout) share one
//! session.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use secrecy::SecretString;
use tower::ServiceExt;

use cafe_nine_core::Email;
use cafe_nine_storefront::{
    app,
    config::{AdminSeed, StorefrontConfig},
    services::auth::hash_password,
    state::AppState,
};

/// Admin credentials seeded by [`TestClient::with_admin`].
pub const ADMIN_EMAIL: &str = "chef@cafenine.test";
pub const ADMIN_PASSWORD: &str = "mise-en-place";

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// The value of a response header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// In-process client holding one visitor's session cookie.
pub struct TestClient {
    app: Router,
    state: AppState,
    cookie: Option<String>,
}

impl TestClient {
    /// A storefront with the built-in catalog and no admin account.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(StorefrontConfig::local("http://localhost:3000"))
    }

    /// A storefront with a seeded admin account ([`ADMIN_EMAIL`]).
    ///
    /// # Panics
    ///
    /// Panics if the fixture email or password hash is invalid.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn with_admin() -> Self {
        let mut config = StorefrontConfig::local("http://localhost:3000");
        config.admin = Some(AdminSeed {
            email: Email::parse(ADMIN_EMAIL).unwrap(),
            password_hash: SecretString::from(hash_password(ADMIN_PASSWORD).unwrap()),
        });
        Self::from_config(config)
    }

    fn from_config(config: StorefrontConfig) -> Self {
        let state = AppState::new(config);
        Self {
            app: app(state.clone()),
            state,
            cookie: None,
        }
    }

    /// The shared application state, for assertions.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// A second visitor on the same server, with no cookie.
    #[must_use]
    pub fn fresh_visitor(&self) -> Self {
        Self {
            app: self.app.clone(),
            state: self.state.clone(),
            cookie: None,
        }
    }

    /// `GET path`.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self.request("GET", path);
        self.send(request.body(Body::empty())).await
    }

    /// `POST path` with a urlencoded form body.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(request.body(Body::from(encode(fields)))).await
    }

    /// `POST path` as HTMX would send it.
    pub async fn post_htmx(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("hx-request", "true");
        self.send(request.body(Body::from(encode(fields)))).await
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    #[allow(clippy::unwrap_used)]
    async fn send(
        &mut self,
        request: Result<Request<Body>, axum::http::Error>,
    ) -> TestResponse {
        let response = self.app.clone().oneshot(request.unwrap()).await.unwrap();

        if let Some(pair) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|set_cookie| set_cookie.split(';').next())
        {
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(fields: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}
