use serde::{Deserialize, Serialize};

/// Body sent to the annotation server's `/parse` route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRequest {
    pub text: String,
    pub model: String,
}

/// Document JSON as produced by the annotation server.
///
/// Offsets are character (not byte) positions into `text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocAnnotation {
    pub text: String,
    #[serde(default)]
    pub tokens: Vec<TokenAnnotation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenAnnotation {
    pub id: usize,
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub pos: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub lemma: String,
    #[serde(default)]
    pub dep: String,
    pub head: usize,
}
