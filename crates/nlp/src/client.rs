use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use crate::doc::Doc;
use crate::schema::{DocAnnotation, ParseRequest};
use crate::Annotator;

/// Parsed once at startup to confirm the model is loaded.
const READY_TEXT: &str = "The engine parsed this sentence.";

/// Client for a spaCy-style annotation server.
///
/// The server takes `{"text", "model"}` on `POST /parse` and answers with the
/// document JSON (`text` plus `tokens` carrying character offsets, tags,
/// lemma, dependency label and head index).
#[derive(Clone)]
pub struct SpacyClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl SpacyClient {
    pub fn new(base_url: String, model: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build annotation HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Fetch the raw annotation for `text`.
    pub async fn parse(&self, text: &str) -> Result<DocAnnotation> {
        let url = format!("{}/parse", self.base_url);

        let request = ParseRequest {
            text: text.to_string(),
            model: self.model.clone(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to annotation server")?;

        if !response.status().is_success() {
            anyhow::bail!("Annotation request failed: {}", response.status());
        }

        let annotation: DocAnnotation = response
            .json()
            .await
            .context("Failed to parse annotation response")?;

        debug!(
            model = %self.model,
            tokens = annotation.tokens.len(),
            "Received annotation"
        );

        Ok(annotation)
    }
}

#[async_trait]
impl Annotator for SpacyClient {
    async fn annotate(&self, text: &str) -> Result<Doc> {
        let annotation = self.parse(text).await?;
        Doc::from_annotation(annotation).context("Annotation server returned an invalid parse")
    }

    async fn ensure_ready(&self) -> Result<()> {
        let doc = self.annotate(READY_TEXT).await.with_context(|| {
            format!("Model {} is not available at {}", self.model, self.base_url)
        })?;

        if doc.is_empty() {
            anyhow::bail!("Model {} returned no tokens for the readiness sentence", self.model);
        }

        info!(
            model = %self.model,
            url = %self.base_url,
            "Annotation engine ready"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TokenAnnotation;
    use axum::{Json, Router, http::StatusCode, routing::post};

    const MODEL: &str = "en_core_web_sm";

    /// Tags every word as a noun hanging off the first one.
    async fn fake_parse(
        Json(req): Json<ParseRequest>,
    ) -> Result<Json<DocAnnotation>, StatusCode> {
        if req.model != MODEL {
            return Err(StatusCode::BAD_REQUEST);
        }

        let mut tokens = Vec::new();
        let mut cursor = 0;
        for (id, word) in req.text.split_whitespace().enumerate() {
            let start = req.text[cursor..].find(word).unwrap_or(0) + cursor;
            cursor = start + word.len();
            tokens.push(TokenAnnotation {
                id,
                start,
                end: cursor,
                pos: "NOUN".to_string(),
                tag: "NN".to_string(),
                lemma: word.to_lowercase(),
                dep: if id == 0 { "ROOT" } else { "dep" }.to_string(),
                head: 0,
            });
        }

        Ok(Json(DocAnnotation {
            text: req.text,
            tokens,
        }))
    }

    async fn broken_parse(Json(req): Json<ParseRequest>) -> Json<DocAnnotation> {
        Json(DocAnnotation {
            text: req.text,
            tokens: vec![TokenAnnotation {
                id: 0,
                start: 0,
                end: 1000,
                pos: "NOUN".to_string(),
                tag: String::new(),
                lemma: String::new(),
                dep: "ROOT".to_string(),
                head: 0,
            }],
        })
    }

    async fn failing_parse() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn client(base_url: String) -> SpacyClient {
        SpacyClient::new(base_url, MODEL.to_string(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_annotate_builds_doc() {
        let url = spawn_server(Router::new().route("/parse", post(fake_parse))).await;
        let client = client(url);

        let doc = client.annotate("Graphs connect Ideas").await.unwrap();

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.token_text(2), "Ideas");
        assert_eq!(doc.token(2).lemma, "ideas");
        assert!(doc.token(0).is_root());
    }

    #[tokio::test]
    async fn test_trailing_slash_is_trimmed() {
        let client = client("http://localhost:8000///".to_string());
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.model(), MODEL);
    }

    #[tokio::test]
    async fn test_ensure_ready_with_live_server() {
        let url = spawn_server(Router::new().route("/parse", post(fake_parse))).await;
        assert!(client(url).ensure_ready().await.is_ok());
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let url = spawn_server(Router::new().route("/parse", post(failing_parse))).await;

        let err = client(url).annotate("anything").await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_invalid_parse_is_rejected() {
        let url = spawn_server(Router::new().route("/parse", post(broken_parse))).await;

        let err = client(url).annotate("short").await.unwrap_err();
        assert!(err.to_string().contains("invalid parse"));
    }

    #[tokio::test]
    async fn test_ensure_ready_fails_without_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = client(format!("http://{}", addr)).ensure_ready().await;
        assert!(result.is_err());
    }
}
