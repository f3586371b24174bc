//! Base noun-phrase segmentation over an English dependency parse.

use crate::doc::{Doc, Span};
use crate::token::dep;

/// Labels whose nominal dependents start a chunk.
const NP_DEPS: &[&str] = &[
    "oprd",
    "nsubj",
    "dobj",
    "nsubjpass",
    "pcomp",
    "pobj",
    "dative",
    "appos",
    "attr",
    "ROOT",
];

impl Doc {
    /// Non-nested noun chunks in document order.
    ///
    /// Each chunk runs from the left edge of a nominal token's subtree up to
    /// and including the token itself. A conjunct counts when its chain of
    /// `conj` heads reaches a token with one of the chunk labels.
    pub fn noun_chunks(&self) -> Vec<Span<'_>> {
        let mut chunks = Vec::new();
        let mut prev_end: Option<usize> = None;

        for word in self.tokens() {
            if !word.pos.is_nominal() {
                continue;
            }

            let left = self.left_edge(word.index);
            if prev_end.is_some_and(|end| left <= end) {
                continue;
            }

            let starts_chunk = if word.has_dep(NP_DEPS) {
                true
            } else if word.dep == dep::CONJ {
                let mut head = self.token(word.head);
                while head.dep == dep::CONJ && head.head < head.index {
                    head = self.token(head.head);
                }
                head.has_dep(NP_DEPS)
            } else {
                false
            };

            if starts_chunk {
                prev_end = Some(word.index);
                chunks.push(self.span(left, word.index + 1));
            }
        }

        chunks
    }
}
