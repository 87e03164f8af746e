//! Common code for integration tests

use std::{path::PathBuf, sync::Arc};

use anyhow::Error;
use axum::{
    body::{self, Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tab_store::{
    config::Config,
    service::{self, AppState, TABS_PATH},
    store::TabStore,
};
use tempfile::TempDir;
use tower::ServiceExt;

/// The secret the test server is configured with, unless a test says otherwise.
pub const SECRET: &str = "correct horse battery staple";

/// The body size limit the test server is configured with.
pub const MAX_BODY_BYTES: usize = 1024;

/// A tab store server running in-process, backed by a temporary directory.
pub struct TestApp {
    /// The server's router.
    pub router: Router,

    /// The path of the server's tabs file.
    pub tabs_file: PathBuf,

    /// The directory containing the tabs file, deleted when dropped.
    _dir: TempDir,
}

/// A response from the test server, with its body fully read.
pub struct TestResponse {
    /// The response status.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// The whole response body.
    pub body: Bytes,
}

impl TestResponse {
    /// Parses the body as JSON.
    pub fn json(&self) -> Result<Value, Error> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Starts a server with a fresh tabs file location and the specified secret.
pub async fn create_app(secret: Option<&str>) -> Result<TestApp, Error> {
    let dir = tempfile::tempdir()?;
    let tabs_file = dir.path().join("tabs.json");

    Ok(create_app_at(dir, tabs_file, secret).await)
}

/// Starts a server which loads and saves its tabs at `tabs_file`, keeping `dir` alive with it.
pub async fn create_app_at(dir: TempDir, tabs_file: PathBuf, secret: Option<&str>) -> TestApp {
    let config = Config {
        address: Config::DEFAULT_ADDRESS.to_owned(),
        secret: secret.map(str::to_owned),
        tabs_file: tabs_file.clone(),
        max_body_bytes: MAX_BODY_BYTES,
    };

    let store = TabStore::load(config.tabs_file.clone()).await;
    let router = service::router(Arc::new(AppState::new(store, &config)));

    TestApp {
        router,
        tabs_file,
        _dir: dir,
    }
}

impl TestApp {
    /// Sends a request to the server and reads the whole response.
    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse, Error> {
        let response = self.router.clone().oneshot(request).await?;
        let (parts, body) = response.into_parts();

        Ok(TestResponse {
            status: parts.status,
            headers: parts.headers,
            body: body::to_bytes(body, usize::MAX).await?,
        })
    }

    /// Sends a `GET` request for the tabs and parses the JSON response.
    pub async fn get_tabs(&self) -> Result<Value, Error> {
        let response = self.send(request(Method::GET, Body::empty())?).await?;

        assert_eq!(response.status, StatusCode::OK, "tabs should be served");

        response.json()
    }

    /// Sends a `POST` request uploading tabs, with the specified `secret` header if any.
    pub async fn post_tabs<B: Into<Body>>(
        &self,
        secret: Option<&str>,
        body: B,
    ) -> Result<TestResponse, Error> {
        let mut builder = Request::builder().method(Method::POST).uri(TABS_PATH);

        if let Some(secret) = secret {
            builder = builder.header("secret", secret);
        }

        self.send(builder.body(body.into())?).await
    }
}

/// Builds a request to the tabs route.
pub fn request<B: Into<Body>>(method: Method, body: B) -> Result<Request<Body>, Error> {
    Ok(Request::builder()
        .method(method)
        .uri(TABS_PATH)
        .body(body.into())?)
}
