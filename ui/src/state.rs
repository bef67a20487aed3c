use crate::backend::BackendClient;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const WELCOME_MESSAGE: &str = "Welcome! Use the forms above to interact with Elasticsearch.";

/// Shared by all handlers. `last_message` is one value for the whole process:
/// every submit overwrites it and every page load shows it.
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub last_message: Arc<RwLock<String>>,
}

impl AppState {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            last_message: Arc::new(RwLock::new(WELCOME_MESSAGE.to_string())),
        }
    }

    pub async fn message(&self) -> String {
        self.last_message.read().await.clone()
    }

    pub async fn set_message(&self, message: String) {
        *self.last_message.write().await = message;
    }
}
