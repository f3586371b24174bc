pub mod chunks;
pub mod client;
pub mod doc;
pub mod schema;
pub mod token;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use client::SpacyClient;
pub use doc::{Doc, Span};
pub use schema::{DocAnnotation, TokenAnnotation};
pub use token::{Pos, Token, dep};

use anyhow::Result;
use async_trait::async_trait;

/// A linguistic annotation engine: tokenization, tagging, lemmas and a
/// dependency parse for a piece of text.
///
/// Implementations are built once at startup and shared read-only between
/// requests.
#[async_trait]
pub trait Annotator: Send + Sync {
    async fn annotate(&self, text: &str) -> Result<Doc>;

    /// Fail if the engine cannot serve requests yet.
    async fn ensure_ready(&self) -> Result<()> {
        Ok(())
    }
}
