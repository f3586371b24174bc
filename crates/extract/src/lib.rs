pub mod rules;
pub mod schema;

pub use schema::{Edge, MindMap, Node};

use anyhow::{Context, Result};
use nlp::{Annotator, Doc};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Turns text into a mind map using an injected annotation engine.
#[derive(Clone)]
pub struct Extractor {
    annotator: Arc<dyn Annotator>,
}

impl Extractor {
    pub fn new(annotator: Arc<dyn Annotator>) -> Self {
        Self { annotator }
    }

    /// Annotate `text` and extract its nodes and edges.
    pub async fn extract(&self, text: &str) -> Result<MindMap> {
        let doc = self
            .annotator
            .annotate(text)
            .await
            .context("Failed to annotate text")?;

        let mindmap = build_mindmap(&doc);

        debug!(
            tokens = doc.len(),
            nodes = mindmap.nodes.len(),
            edges = mindmap.edges.len(),
            "Extracted mind map"
        );

        Ok(mindmap)
    }
}

/// Noun chunks become nodes; subject–verb–object patterns become edges.
///
/// Node ids are exact trimmed strings, so "The cat" and "the cat" stay
/// distinct. Edge endpoints are always added as nodes.
pub fn build_mindmap(doc: &Doc) -> MindMap {
    let mut nodes: BTreeSet<String> = doc
        .noun_chunks()
        .iter()
        .map(|chunk| chunk.text().trim().to_string())
        .collect();

    let mut edges = Vec::new();
    for token in doc.tokens() {
        if let Some(edge) = rules::relation_at(doc, token.index) {
            nodes.insert(edge.source.clone());
            nodes.insert(edge.target.clone());
            edges.push(edge);
        }
    }

    MindMap {
        nodes: nodes.into_iter().map(|id| Node { id }).collect(),
        edges,
    }
}
