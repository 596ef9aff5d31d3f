//! Shared test harness driving the full router in-process
#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use cms::credentials::CredentialStore;
use cms::documents::DocumentStore;
use cms::http_server::{self, Config};
use cms::session_store::SessionRecords;
use cms::ServiceState;

pub const ADMIN: &str = "admin";
pub const ADMIN_PASSWORD: &str = "secret";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    pub fn assert_redirect_home(&self) {
        assert_eq!(self.status, StatusCode::FOUND);
        assert_eq!(self.location(), Some("/"));
    }
}

/// A browser-like client: one router, one cookie jar holding the session id.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
    pub documents: DocumentStore,
    pub credentials: CredentialStore,
    pub sessions: SessionRecords,
    temp_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_session_inactivity(Duration::from_secs(60 * 60))
    }

    pub fn with_session_inactivity(session_inactivity: Duration) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();

        let users_path = temp_dir.path().join("users.yml");
        let hash = bcrypt::hash(ADMIN_PASSWORD, 4).unwrap();
        std::fs::write(&users_path, format!("{}: \"{}\"\n", ADMIN, hash)).unwrap();

        let documents = DocumentStore::new(&data_dir);
        let credentials = CredentialStore::new(&users_path);
        let state = ServiceState::new(documents.clone(), credentials.clone());
        let sessions = state.sessions().clone();

        let config = Config::new(
            SocketAddr::from(([127, 0, 0, 1], 0)),
            false,
            session_inactivity,
        );

        Self {
            router: http_server::router(&config, state),
            cookie: None,
            documents,
            credentials,
            sessions,
            temp_dir,
        }
    }

    /// Drop the session cookie, as a fresh client would arrive.
    pub fn clear_cookies(&mut self) {
        self.cookie = None;
    }

    /// Write a document straight to disk, bypassing the HTTP surface.
    pub fn create_document(&self, name: &str, content: &str) {
        std::fs::write(self.documents.root().join(name), content).unwrap();
    }

    pub fn document_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.documents.root())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    pub fn read_document(&self, name: &str) -> String {
        std::fs::read_to_string(self.documents.root().join(name)).unwrap()
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = Request::post(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Follow a redirect the way a browser would.
    pub async fn follow(&mut self, response: &TestResponse) -> TestResponse {
        let location = response
            .location()
            .expect("response is not a redirect")
            .to_string();
        self.get(&location).await
    }

    pub async fn sign_in(&mut self) {
        let response = self
            .post_form(
                "/users/signin",
                &[("username", ADMIN), ("password", ADMIN_PASSWORD)],
            )
            .await;
        response.assert_redirect_home();
    }

    async fn send(&mut self, mut request: Request<Body>) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(COOKIE, cookie.parse().unwrap());
        }

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(SET_COOKIE) {
            let set_cookie = set_cookie.to_str().unwrap();
            let pair = set_cookie.split(';').next().unwrap_or_default().trim();
            let expired = set_cookie.contains("Max-Age=0") || pair.ends_with('=');
            self.cookie = if expired {
                None
            } else {
                Some(pair.to_string())
            };
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
