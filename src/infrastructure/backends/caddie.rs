#[cfg(test)]
#[path = "caddie_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use serde::Deserialize;
use serde::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Author;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::Event;

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct QueryRequest {
    query: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct QueryResponse {
    response: Option<String>,
    final_response: Option<String>,
}

impl QueryResponse {
    fn text(self) -> Option<String> {
        return self.response.or(self.final_response);
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

pub struct Caddie {
    url: String,
    timeout: String,
}

impl Default for Caddie {
    fn default() -> Caddie {
        return Caddie {
            url: Config::get(ConfigKey::CaddieURL),
            timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

#[async_trait]
impl Backend for Caddie {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Caddie URL is not defined");
        }

        // The service exposes no dedicated health route. Any response at all,
        // including a 404 from the root, proves it is up.
        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Caddie service is not reachable");
            bail!("Caddie service is not reachable");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<()> {
        let req = QueryRequest { query: prompt.text };

        let res = reqwest::Client::new()
            .post(format!("{url}/api/query", url = self.url))
            .json(&req)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                "Failed to make a query request to the caddie service"
            );

            let body = res.text().await.unwrap_or_default();
            if let Ok(error_res) = serde_json::from_str::<ErrorResponse>(&body) {
                bail!(error_res.error);
            }
            bail!(format!("HTTP error! status: {}", status.as_u16()));
        }

        let stream = res.bytes_stream().map_err(convert_err);
        let mut lines_reader = StreamReader::new(stream).lines();

        let mut received_any = false;
        while let Some(line) = lines_reader.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            // Answers are expected to arrive as JSON fragments, but chunk
            // framing is the transport's business. A line that fails to parse
            // is rendered as raw text rather than dropped.
            let text = match serde_json::from_str::<QueryResponse>(&line) {
                Ok(fragment) => match fragment.text() {
                    Some(text) => text,
                    None => continue,
                },
                Err(_) => line,
            };

            if text.is_empty() {
                continue;
            }

            tracing::debug!(text = text, "Query response fragment");
            received_any = true;
            tx.send(Event::BackendPromptResponse(BackendResponse {
                author: Author::Caddie,
                text,
                done: false,
            }))?;
        }

        let mut final_text = "".to_string();
        if !received_any {
            final_text = "No response received".to_string();
        }

        tx.send(Event::BackendPromptResponse(BackendResponse {
            author: Author::Caddie,
            text: final_text,
            done: true,
        }))?;

        return Ok(());
    }
}
