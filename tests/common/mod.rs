#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use portfolio_api::config::Config;
use portfolio_api::db::{DocumentStore, MemoryDocumentStore, SortOrder, StoreError};
use portfolio_api::models::{Document, Fields};

/// A running test server instance.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit the contact form, return (body, status).
    pub async fn submit_contact(&self, name: &str, email: &str, message: &str) -> (Value, StatusCode) {
        self.post(
            "/api/contact",
            &json!({ "name": name, "email": email, "message": message }),
        )
        .await
    }

    /// Create a project, assert 201, return the stored project.
    pub async fn create_project(&self, title: &str) -> Value {
        let (body, status) = self.post("/api/projects", &sample_project(title)).await;
        assert_eq!(status, StatusCode::CREATED, "create project failed: {body}");
        body["data"].clone()
    }

    /// `count` of a collection listing.
    pub async fn count(&self, path: &str) -> u64 {
        let (body, status) = self.get(path).await;
        assert_eq!(status, StatusCode::OK, "list failed: {body}");
        body["count"].as_u64().expect("count missing")
    }
}

pub fn sample_project(title: &str) -> Value {
    json!({
        "title": title,
        "description": "A responsive web application that helps reduce food waste.",
        "techStack": ["React", "Firebase", "Tailwind CSS"],
        "githubUrl": "https://github.com/example/food-share",
        "demoUrl": "https://food-share.example.com/",
        "featured": true
    })
}

pub fn test_config() -> Config {
    Config {
        database_url: None,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 64 * 1024,
        trusted_proxies: vec![],
        cors_origins: vec![],
        expose_store_errors: true,
        log_level: "warn".to_string(),
    }
}

/// Spawn a test app backed by a fresh in-memory store.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(Arc::new(MemoryDocumentStore::new()), test_config()).await
}

pub async fn spawn_app_with(store: Arc<dyn DocumentStore>, config: Config) -> TestApp {
    let app = portfolio_api::build_app(store, config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
    }
}

/// A store whose every operation fails, counting the calls it receives.
#[derive(Default)]
pub struct FailingStore {
    pub calls: AtomicUsize,
}

impl FailingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("quota exceeded".to_string()))
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    fn backend(&self) -> &'static str {
        "failing"
    }

    async fn insert(&self, _collection: &str, _fields: Fields) -> Result<Document, StoreError> {
        self.fail()
    }

    async fn get_by_id(&self, _collection: &str, _id: &str) -> Result<Option<Document>, StoreError> {
        self.fail()
    }

    async fn list_ordered(
        &self,
        _collection: &str,
        _order_by: &str,
        _order: SortOrder,
    ) -> Result<Vec<Document>, StoreError> {
        self.fail()
    }

    async fn update_merge(
        &self,
        _collection: &str,
        _id: &str,
        _patch: Fields,
    ) -> Result<Option<Document>, StoreError> {
        self.fail()
    }

    async fn delete_by_id(&self, _collection: &str, _id: &str) -> Result<bool, StoreError> {
        self.fail()
    }
}
