//! Canned provider and a local HTTP stub for tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use super::{CompletionProvider, ProviderError};

/// Returns a canned reply and records every prompt it receives.
#[derive(Clone)]
pub struct FakeProvider {
    reply: Option<String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Arc::default(),
        }
    }

    /// Every call fails with [`ProviderError::EmptyReply`].
    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Arc::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or(ProviderError::EmptyReply)
    }
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_stub(router: axum::Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
