//! In-process stub of the visual-data backend for integration tests.
//!
//! Emulates just enough of the management and inference surface:
//! `GET /{ver}/{collection}/{id}` (404 until created),
//! `POST /{ver}/{collection}` (create), `POST …/deploy`, and the
//! `:test` / `:trigger` verbs with per-resource canned responses.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};

#[derive(Default)]
pub struct StubState {
    /// `(collection, id)` pairs that exist.
    resources: HashSet<(String, String)>,
    /// Number of create POSTs received, deploys excluded.
    create_count: usize,
    deploy_count: usize,
    /// When set, create POSTs are rejected with this status.
    reject_creates: Option<u16>,
    /// Canned `(status, body)` per inference resource name,
    /// e.g. `pipelines/yolov7`.
    inference: HashMap<String, (u16, Value)>,
}

#[derive(Clone)]
pub struct StubBackend {
    state: Arc<Mutex<StubState>>,
    pub base_url: String,
}

impl StubBackend {
    /// Binds to an ephemeral port and serves until the test ends.
    pub async fn spawn() -> Self {
        let state = Arc::new(Mutex::new(StubState::default()));
        let app = Router::new()
            .route("/dog.jpg", get(serve_image))
            .route("/not-an-image", get(serve_text))
            .route("/:version/:collection", post(handle_create))
            .route("/:version/:collection/*rest", get(handle_get).post(handle_verb))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub backend addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub backend");
        });

        Self {
            state,
            base_url: format!("http://{addr}"),
        }
    }

    pub fn reject_creates_with(&self, status: u16) {
        self.state.lock().unwrap().reject_creates = Some(status);
    }

    pub fn set_inference(&self, resource_name: &str, status: u16, body: Value) {
        self.state
            .lock()
            .unwrap()
            .inference
            .insert(resource_name.to_string(), (status, body));
    }

    pub fn create_count(&self) -> usize {
        self.state.lock().unwrap().create_count
    }

    pub fn deploy_count(&self) -> usize {
        self.state.lock().unwrap().deploy_count
    }

    pub fn has_resource(&self, collection: &str, id: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .resources
            .contains(&(collection.to_string(), id.to_string()))
    }
}

async fn handle_create(
    State(state): State<Arc<Mutex<StubState>>>,
    Path((_version, collection)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let id = match body.get("id").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => return (StatusCode::BAD_REQUEST, "missing id").into_response(),
    };
    let mut state = state.lock().unwrap();
    if let Some(status) = state.reject_creates {
        let status = StatusCode::from_u16(status).expect("valid canned status");
        return (status, Json(json!({ "message": "create rejected" }))).into_response();
    }
    state.resources.insert((collection, id.clone()));
    state.create_count += 1;
    (StatusCode::CREATED, Json(json!({ "id": id }))).into_response()
}

/// A small valid JPEG, for exercising the image-fetch path end to end.
async fn serve_image() -> Response {
    let img = image::DynamicImage::ImageRgb8(image::ImageBuffer::from_fn(64, 48, |_, _| {
        image::Rgb([120u8, 120u8, 120u8])
    }));
    let mut bytes = std::io::Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Jpeg)
        .expect("encode stub jpeg");
    (
        StatusCode::OK,
        [("content-type", "image/jpeg")],
        bytes.into_inner(),
    )
        .into_response()
}

/// A 200 body that is not a decodable image.
async fn serve_text() -> Response {
    (StatusCode::OK, "definitely not pixels").into_response()
}

async fn handle_get(
    State(state): State<Arc<Mutex<StubState>>>,
    Path((_version, collection, rest)): Path<(String, String, String)>,
) -> Response {
    let state = state.lock().unwrap();
    // `rest` is the bare id for top-level resources; nested names
    // (models/{id}/instances/…) resolve by their leading id segment.
    let id = rest.split('/').next().unwrap_or(&rest).to_string();
    if state.resources.contains(&(collection.clone(), id.clone())) {
        (StatusCode::OK, Json(json!({ "id": id }))).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))).into_response()
    }
}

async fn handle_verb(
    State(state): State<Arc<Mutex<StubState>>>,
    Path((_version, collection, rest)): Path<(String, String, String)>,
) -> Response {
    let mut state = state.lock().unwrap();

    if rest.ends_with("/deploy") {
        state.deploy_count += 1;
        return (StatusCode::OK, Json(json!({ "state": "STATE_ONLINE" }))).into_response();
    }

    // `rest` looks like `yolov7:trigger` or `yolov7/instances/v1.0:test`.
    if let Some((name, _verb)) = rest.rsplit_once(':') {
        let resource_name = format!("{collection}/{name}");
        if let Some((status, body)) = state.inference.get(&resource_name) {
            let status = StatusCode::from_u16(*status).expect("valid canned status");
            return (status, Json(body.clone())).into_response();
        }
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "no canned response" })),
        )
            .into_response();
    }

    (StatusCode::BAD_REQUEST, "unrecognized verb").into_response()
}
