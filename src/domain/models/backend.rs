use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::Author;
use super::Event;

pub type BackendBox = Box<dyn Backend + Send + Sync>;

pub struct BackendPrompt {
    pub text: String,
}

impl BackendPrompt {
    pub fn new(text: String) -> BackendPrompt {
        return BackendPrompt { text };
    }
}

pub struct BackendResponse {
    pub author: Author,
    pub text: String,
    pub done: bool,
}

#[async_trait]
pub trait Backend {
    /// Used at startup to verify the query service is reachable before the
    /// first question is sent.
    async fn health_check(&self) -> Result<()>;

    /// Requests an answer from the query service. Answers may arrive in
    /// fragments, each passed through the channel as it lands. A final
    /// response with `done` set is always sent last.
    async fn get_completion<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<()>;
}
