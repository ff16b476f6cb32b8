use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use anyhow::{Context, Result, bail};
use reqwest::{Client, Url};

use super::ClientEvent;
use crate::schemas::http::error_message;
use crate::schemas::{Health, SearchResponse};

/// One-shot `GET /search?query=...` call, used by the CLI and as the
/// fallback path when the persistent connection is unavailable.
pub async fn fetch_search(client: &Client, base: &Url, query: &str) -> Result<SearchResponse> {
    let url = base.join("/search").context("invalid server URL")?;
    let response = client
        .get(url)
        .query(&[("query", query)])
        .send()
        .await
        .with_context(|| format!("request to {base} failed"))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .context("failed to read search response")?;
    if !status.is_success() {
        bail!("{}", error_message(status, &body));
    }
    serde_json::from_str(&body).context("failed to decode search response")
}

/// `GET /health`, surfaced through the `--ping` flag.
pub async fn fetch_health(client: &Client, base: &Url) -> Result<Health> {
    let url = base.join("/health").context("invalid server URL")?;
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("request to {base} failed"))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .context("failed to read health response")?;
    if !status.is_success() {
        bail!("{}", error_message(status, &body));
    }
    serde_json::from_str(&body).context("failed to decode health response")
}

struct HttpRequest {
    id: u64,
    query: String,
}

/// Worker that serves HTTP fallback searches for the interactive views.
///
/// Requests are answered on the shared [`ClientEvent`] channel so the UI
/// loop drains a single event source regardless of transport.
pub struct HttpWorker {
    sender: Sender<HttpRequest>,
}

impl HttpWorker {
    pub fn spawn(base: Url, events: Sender<ClientEvent>) -> Result<Self> {
        let (sender, requests) = channel();
        thread::Builder::new()
            .name("psearch-http".to_string())
            .spawn(move || run_worker(base, requests, events))
            .context("failed to spawn http fallback worker")?;
        Ok(Self { sender })
    }

    /// Queue a fallback search keyed by the session's request id.
    pub fn submit(&self, id: u64, query: String) {
        let _ = self.sender.send(HttpRequest { id, query });
    }
}

fn run_worker(base: Url, requests: Receiver<HttpRequest>, events: Sender<ClientEvent>) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("failed to start http fallback runtime: {e}");
            return;
        }
    };
    let client = Client::new();

    while let Ok(request) = requests.recv() {
        let result = runtime
            .block_on(fetch_search(&client, &base, &request.query))
            .map_err(|e| format!("{e:#}"));
        if events
            .send(ClientEvent::HttpCompleted {
                request_id: request.id,
                result,
            })
            .is_err()
        {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_search_decodes_success_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("query", "cats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "llm_summary": "Explanation: cats are mammals (Confidence: 0.90)",
                "reranked_chunks": [{
                    "id": 1,
                    "text": "A cat is...",
                    "source": "wiki",
                    "embedding_similarity_score": 0.91,
                    "reranking_score": 0.77,
                    "trigram_similarity_score": null
                }],
                "original_query": "cats"
            })))
            .mount(&server)
            .await;

        let client = Client::new();
        let base = Url::parse(&server.uri()).unwrap();
        let response = fetch_search(&client, &base, "cats").await.unwrap();

        assert_eq!(response.reranked_chunks.len(), 1);
        assert_eq!(response.reranked_chunks[0].text, "A cat is...");
        assert_eq!(response.reranked_chunks[0].trigram_similarity_score, None);
        assert_eq!(response.original_query.as_deref(), Some("cats"));
    }

    #[tokio::test]
    async fn fetch_search_surfaces_error_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "detail": "No chunks found by personal search."
            })))
            .mount(&server)
            .await;

        let client = Client::new();
        let base = Url::parse(&server.uri()).unwrap();
        let error = fetch_search(&client, &base, "xyzzy").await.unwrap_err();

        assert_eq!(error.to_string(), "No chunks found by personal search.");
    }

    #[tokio::test]
    async fn fetch_search_reports_status_for_opaque_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = Client::new();
        let base = Url::parse(&server.uri()).unwrap();
        let error = fetch_search(&client, &base, "cats").await.unwrap_err();

        assert_eq!(error.to_string(), "HTTP 502 Bad Gateway");
    }

    #[tokio::test]
    async fn fetch_health_reads_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&server)
            .await;

        let client = Client::new();
        let base = Url::parse(&server.uri()).unwrap();
        let health = fetch_health(&client, &base).await.unwrap();

        assert_eq!(health.status, "ok");
    }
}
