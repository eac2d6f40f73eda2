/// Common test utilities and fixtures
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tempfile::TempDir;
use userdb_core::JsonFileStore;
use userdb_server::{api, state::AppState};

/// Router backed by a real store file in a temp directory
pub struct TestApp {
    pub app: Router,
    pub store_path: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    /// App whose store file holds exactly `contents`; `None` leaves it absent
    pub fn new(contents: Option<&str>) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let store_path = temp_dir.path().join("users.json");
        if let Some(contents) = contents {
            std::fs::write(&store_path, contents).unwrap();
        }

        let store = JsonFileStore::new(&store_path);
        let app_state = AppState::new(Arc::new(store));
        let app = api::router(app_state, Duration::from_secs(5));

        Self {
            app,
            store_path,
            _temp_dir: temp_dir,
        }
    }

    /// App over an empty seeded store
    pub fn seeded() -> Self {
        Self::new(Some(fixtures::EMPTY_STORE))
    }

    /// Current store file contents as JSON
    pub fn store_json(&self) -> serde_json::Value {
        let bytes = std::fs::read(&self.store_path).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Store file fixtures
pub mod fixtures {
    pub const EMPTY_STORE: &str = r#"{"increment":0,"list":{}}"#;

    pub const TWO_USERS: &str = r#"{
        "increment": 2,
        "list": {
            "1": {"created_at": "2021-11-09T20:50:38.133429+03:00", "display_name": "Ann", "email": "a@x.com"},
            "2": {"created_at": "2021-11-10T08:00:00Z", "display_name": "Bob", "email": "b@x.com"}
        }
    }"#;
}
