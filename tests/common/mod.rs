//! In-process stand-in for the search engine's REST API, plus helpers to serve
//! routers on ephemeral ports.

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockEngine {
    indices: Arc<Mutex<HashMap<String, HashMap<String, Value>>>>,
    /// Create indices implicitly on first document write.
    pub auto_create: bool,
    fail_searches: Arc<AtomicBool>,
    saw_wait_for: Arc<AtomicBool>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            auto_create: true,
            ..Default::default()
        }
    }

    pub fn without_auto_create() -> Self {
        Self::default()
    }

    pub fn fail_searches(&self) {
        self.fail_searches.store(true, Ordering::SeqCst);
    }

    pub fn saw_wait_for(&self) -> bool {
        self.saw_wait_for.load(Ordering::SeqCst)
    }

    /// Stores `source` verbatim under `id`, bypassing the shim.
    pub fn seed(&self, index: &str, id: &str, source: Value) {
        self.indices
            .lock()
            .unwrap()
            .entry(index.to_string())
            .or_default()
            .insert(id.to_string(), source);
    }

    pub fn has_index(&self, index: &str) -> bool {
        self.indices.lock().unwrap().contains_key(index)
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(root))
            .route("/:index", get(index_exists).put(create_index))
            .route("/:index/_search", post(search))
            .route("/:index/_doc/:id", put(put_document))
            .with_state(self.clone())
    }
}

fn index_not_found(index: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": {
                "type": "index_not_found_exception",
                "reason": format!("no such index [{}]", index)
            },
            "status": 404
        })),
    )
}

fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_string()
        })
        .filter(|word| word.len() > 2)
        .collect()
}

async fn root() -> Json<Value> {
    Json(json!({ "name": "mock", "tagline": "You Know, for Search" }))
}

async fn index_exists(State(engine): State<MockEngine>, Path(index): Path<String>) -> StatusCode {
    if engine.has_index(&index) {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn create_index(
    State(engine): State<MockEngine>,
    Path(index): Path<String>,
    Json(_mapping): Json<Value>,
) -> (StatusCode, Json<Value>) {
    engine.indices.lock().unwrap().entry(index.clone()).or_default();
    (
        StatusCode::OK,
        Json(json!({ "acknowledged": true, "index": index })),
    )
}

async fn search(
    State(engine): State<MockEngine>,
    Path(index): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if engine.fail_searches.load(Ordering::SeqCst) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": {
                    "type": "search_phase_execution_exception",
                    "reason": "all shards failed"
                },
                "status": 400
            })),
        );
    }

    let indices = engine.indices.lock().unwrap();
    let Some(docs) = indices.get(&index) else {
        return index_not_found(&index);
    };

    let query = tokenize(body["query"]["match"]["text"].as_str().unwrap_or_default());
    let size = body["size"].as_u64().unwrap_or(10) as usize;

    let mut scored: Vec<(f64, &String, &Value)> = docs
        .iter()
        .map(|(id, source)| {
            let text = tokenize(source["text"].as_str().unwrap_or_default());
            let score = query.iter().filter(|t| text.contains(*t)).count() as f64;
            (score, id, source)
        })
        .filter(|(score, _, _)| *score > 0.0)
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap());

    let hits: Vec<Value> = scored
        .iter()
        .take(size)
        .map(|(score, id, source)| {
            json!({ "_index": index, "_id": id, "_score": score, "_source": source })
        })
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "took": 1,
            "timed_out": false,
            "hits": {
                "total": { "value": scored.len(), "relation": "eq" },
                "max_score": scored.first().map(|s| s.0),
                "hits": hits
            }
        })),
    )
}

async fn put_document(
    State(engine): State<MockEngine>,
    Path((index, id)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
    Json(source): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if params.get("refresh").map(String::as_str) == Some("wait_for") {
        engine.saw_wait_for.store(true, Ordering::SeqCst);
    }

    let mut indices = engine.indices.lock().unwrap();
    if !indices.contains_key(&index) {
        if !engine.auto_create {
            return index_not_found(&index);
        }
        indices.insert(index.clone(), HashMap::new());
    }

    let docs = indices.get_mut(&index).expect("index just ensured");
    let (status, result) = match docs.insert(id.clone(), source) {
        Some(_) => (StatusCode::OK, "updated"),
        None => (StatusCode::CREATED, "created"),
    };

    (
        status,
        Json(json!({
            "_index": index,
            "_id": id,
            "_version": 1,
            "result": result,
            "forced_refresh": true
        })),
    )
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A local URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
