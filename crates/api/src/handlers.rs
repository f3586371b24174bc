use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::Html,
};
use extract::MindMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::metrics::{MetricsSnapshot, TimedOperation};
use crate::state::AppState;

pub const BANNER: &str = "<h2>MindMapr API is running. POST text to /mindmap</h2>";

pub async fn home() -> Html<&'static str> {
    Html(BANNER)
}

#[tracing::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn mindmap(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<MindMap>, ApiError> {
    let text = match text_field(&body) {
        Ok(text) => text,
        Err(e) => {
            state.metrics.record_request(false);
            warn!(body_len = body.len(), error = %e, "Rejected mind map request");
            return Err(e);
        }
    };

    let timer = TimedOperation::start();
    let mindmap = match state.extractor.extract(&text).await {
        Ok(mindmap) => mindmap,
        Err(e) => {
            state.metrics.record_request(false);
            error!(text_len = text.len(), error = ?e, "Mind map extraction failed");
            return Err(ApiError::Engine(e));
        }
    };
    let elapsed = timer.elapsed();

    state.metrics.record_request(true);
    state
        .metrics
        .record_extract(elapsed, mindmap.nodes.len(), mindmap.edges.len());

    info!(
        text_len = text.len(),
        nodes = mindmap.nodes.len(),
        edges = mindmap.edges.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Built mind map"
    );

    Ok(Json(mindmap))
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

/// Pull `text` out of a JSON object body. Content-Type is not checked.
fn text_field(body: &[u8]) -> Result<String, ApiError> {
    let Ok(Value::Object(mut fields)) = serde_json::from_slice::<Value>(body) else {
        return Err(ApiError::MissingText);
    };

    match fields.remove("text") {
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(ApiError::InvalidText),
        None => Err(ApiError::MissingText),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field() {
        assert_eq!(text_field(br#"{"text": "hi"}"#).unwrap(), "hi");
        assert_eq!(text_field(br#"{"text": "", "extra": 1}"#).unwrap(), "");
    }

    #[test]
    fn test_missing_text() {
        let bodies: [&[u8]; 6] = [b"", b"not json", b"{}", br#"{"txt": "a"}"#, br#"["text"]"#, b"null"];
        for body in bodies {
            assert!(matches!(text_field(body), Err(ApiError::MissingText)));
        }
    }

    #[test]
    fn test_non_string_text() {
        let bodies: [&[u8]; 3] = [br#"{"text": 3}"#, br#"{"text": null}"#, br#"{"text": ["a"]}"#];
        for body in bodies {
            assert!(matches!(text_field(body), Err(ApiError::InvalidText)));
        }
    }
}
