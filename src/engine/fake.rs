//! In-process stand-ins for the engine, used by unit tests.

use super::client::{Connector, EngineClient, EngineFailure};
use super::protocol::{Document, Hit, HitsEnvelope, SearchResponse};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scores a document by how many distinct query words its text contains.
pub(crate) fn overlap_score(query: &str, text: &str) -> f64 {
    let words: HashSet<String> = text
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .collect();

    query
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect::<HashSet<_>>()
        .iter()
        .filter(|w| words.contains(*w))
        .count() as f64
}

pub(crate) struct FakeEngine {
    alive: AtomicBool,
    pings: AtomicUsize,
    documents: Mutex<Vec<Document>>,
    failure: Mutex<Option<EngineFailure>>,
    write_result: Mutex<String>,
}

impl FakeEngine {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            alive: AtomicBool::new(true),
            pings: AtomicUsize::new(0),
            documents: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            write_result: Mutex::new("created".to_string()),
        })
    }

    pub(crate) fn set_alive(&self, alive: bool) {
        self.alive.store(alive, Ordering::SeqCst);
    }

    pub(crate) fn ping_count(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }

    /// Every following search/write fails with `failure`.
    pub(crate) fn fail_with(&self, failure: EngineFailure) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    pub(crate) fn set_write_result(&self, result: &str) {
        *self.write_result.lock().unwrap() = result.to_string();
    }

    pub(crate) fn add(&self, id: &str, text: &str) {
        self.documents.lock().unwrap().push(Document {
            id: id.to_string(),
            text: text.to_string(),
        });
    }

    pub(crate) fn documents(&self) -> Vec<Document> {
        self.documents.lock().unwrap().clone()
    }

    fn pending_failure(&self) -> Option<EngineFailure> {
        self.failure.lock().unwrap().clone()
    }
}

#[async_trait]
impl EngineClient for FakeEngine {
    async fn ping(&self) -> bool {
        self.pings.fetch_add(1, Ordering::SeqCst);
        self.alive.load(Ordering::SeqCst)
    }

    async fn search(&self, _index: &str, body: &Value) -> Result<SearchResponse, EngineFailure> {
        if let Some(failure) = self.pending_failure() {
            return Err(failure);
        }

        let query = body["query"]["match"]["text"].as_str().unwrap_or_default();
        let size = body["size"].as_u64().unwrap_or(10) as usize;

        let mut hits: Vec<Hit> = self
            .documents()
            .into_iter()
            .map(|doc| Hit {
                score: Some(overlap_score(query, &doc.text)),
                source: json!({ "id": doc.id, "text": doc.text }),
            })
            .filter(|hit| hit.score.unwrap_or(0.0) > 0.0)
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        hits.truncate(size);

        Ok(SearchResponse {
            hits: HitsEnvelope { hits },
        })
    }

    async fn index_document(
        &self,
        index: &str,
        document: &Document,
    ) -> Result<Value, EngineFailure> {
        if let Some(failure) = self.pending_failure() {
            return Err(failure);
        }

        let result = self.write_result.lock().unwrap().clone();
        if result == "created" || result == "updated" {
            self.documents.lock().unwrap().push(document.clone());
        }

        Ok(json!({
            "_index": index,
            "_id": document.id,
            "result": result,
        }))
    }

    async fn index_exists(&self, _index: &str) -> Result<bool, EngineFailure> {
        Ok(true)
    }

    async fn create_index(&self, _index: &str, _body: &Value) -> Result<(), EngineFailure> {
        Ok(())
    }
}

/// Hands out the same `FakeEngine` on every connect, optionally failing the
/// first few builds or following a script of build outcomes.
pub(crate) struct FakeConnector {
    engine: Arc<FakeEngine>,
    connects: AtomicUsize,
    failing_builds: AtomicUsize,
    script: Mutex<VecDeque<bool>>,
}

impl FakeConnector {
    pub(crate) fn new(engine: Arc<FakeEngine>) -> Arc<Self> {
        Arc::new(Self {
            engine,
            connects: AtomicUsize::new(0),
            failing_builds: AtomicUsize::new(0),
            script: Mutex::new(VecDeque::new()),
        })
    }

    pub(crate) fn fail_next_builds(&self, count: usize) {
        self.failing_builds.store(count, Ordering::SeqCst);
    }

    /// Outcomes for the next builds in call order, `false` meaning the build
    /// fails. Takes precedence over `fail_next_builds`.
    pub(crate) fn script_builds(&self, outcomes: &[bool]) {
        *self.script.lock().unwrap() = outcomes.iter().copied().collect();
    }

    pub(crate) fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl Connector for FakeConnector {
    fn address(&self) -> &str {
        "fake://engine"
    }

    fn connect(&self) -> Result<Arc<dyn EngineClient>, EngineFailure> {
        self.connects.fetch_add(1, Ordering::SeqCst);

        let scripted = self.script.lock().unwrap().pop_front();
        let fail = match scripted {
            Some(succeed) => !succeed,
            None => {
                let remaining = self.failing_builds.load(Ordering::SeqCst);
                if remaining > 0 {
                    self.failing_builds.store(remaining - 1, Ordering::SeqCst);
                }
                remaining > 0
            }
        };

        if fail {
            return Err(EngineFailure::Transport {
                status: None,
                error: "connection refused".to_string(),
            });
        }

        let client: Arc<dyn EngineClient> = self.engine.clone();
        Ok(client)
    }
}
