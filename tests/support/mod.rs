// shared test helpers
#![allow(dead_code)] // helpers are shared across multiple integration test crates

use std::sync::{Arc, Mutex};

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use desa_upload::{
    config::AppConfig,
    upload::{CandidateFile, FileKind, UploadField, UploadService},
};
use tokio::net::TcpListener;

/// one request as seen by the mock backend
#[derive(Debug, Clone, Default)]
pub struct Captured {
    pub path: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub file_len: usize,
    pub folder: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<Captured>>>,
    status: StatusCode,
    body: Arc<String>,
    path: &'static str,
}

/// in-process upload backend answering every request with a fixed response
pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl MockBackend {
    pub fn requests(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }

    pub fn image_endpoint(&self) -> String {
        format!("{}/upload", self.base_url)
    }

    pub fn document_endpoint(&self) -> String {
        format!("{}/upload/pdf", self.base_url)
    }
}

pub async fn spawn_backend(status: StatusCode, body: impl Into<String>) -> MockBackend {
    let requests: Arc<Mutex<Vec<Captured>>> = Arc::default();
    let body = Arc::new(body.into());

    let state = |path| MockState {
        requests: requests.clone(),
        status,
        body: body.clone(),
        path,
    };

    let app = Router::new()
        .route("/api/upload", post(upload_handler).with_state(state("/api/upload")))
        .route(
            "/api/upload/pdf",
            post(upload_handler).with_state(state("/api/upload/pdf")),
        )
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{addr}/api"),
        requests,
    }
}

async fn upload_handler(
    State(state): State<MockState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut captured = Captured {
        path: state.path.to_string(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        ..Default::default()
    };

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                captured.file_name = field.file_name().map(str::to_string);
                captured.content_type = field.content_type().map(str::to_string);
                captured.file_len = field.bytes().await.unwrap().len();
            }
            "folder" => captured.folder = Some(field.text().await.unwrap()),
            _ => {}
        }
    }

    state.requests.lock().unwrap().push(captured);

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.to_string(),
    )
        .into_response()
}

/// configuration pointing at the mock backend
pub fn config_for(backend: &MockBackend) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = backend.base_url.clone();
    config
}

/// an upload field whose `on_change` calls are recorded
pub fn recording_field(
    service: &UploadService,
    kind: FileKind,
    folder: &str,
) -> (UploadField, Arc<Mutex<Vec<Option<String>>>>) {
    let changes: Arc<Mutex<Vec<Option<String>>>> = Arc::default();
    let sink = changes.clone();
    let field = service.field(kind, folder, move |value| {
        sink.lock().unwrap().push(value.map(str::to_string));
    });
    (field, changes)
}

pub fn jpeg(size: usize) -> CandidateFile {
    CandidateFile::new("photo1.jpg", "image/jpeg", vec![0xAB; size])
}

pub fn pdf(size: usize) -> CandidateFile {
    CandidateFile::new("apbdes-2024.pdf", "application/pdf", vec![0x25; size])
}
