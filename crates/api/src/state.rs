use extract::Extractor;
use nlp::Annotator;
use std::sync::Arc;

use crate::metrics::Metrics;

/// Shared by every request. The annotator is loaded before the state is
/// built and never replaced.
pub struct AppState {
    pub extractor: Extractor,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(annotator: Arc<dyn Annotator>) -> Self {
        Self {
            extractor: Extractor::new(annotator),
            metrics: Metrics::new(),
        }
    }
}
