//! Hand-written parses for tests.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;

use crate::doc::Doc;
use crate::schema::{DocAnnotation, TokenAnnotation};
use crate::Annotator;

/// `(text, pos, dep, head, lemma)`
pub type Word<'a> = (&'a str, &'a str, &'a str, usize, &'a str);

/// Build a doc by locating each word in `text`, left to right.
pub fn parse(text: &str, words: &[Word<'_>]) -> Result<Doc> {
    let mut cursor = 0;
    let mut tokens = Vec::with_capacity(words.len());

    for (id, &(word, pos, dep, head, lemma)) in words.iter().enumerate() {
        let found = text[cursor..]
            .find(word)
            .with_context(|| format!("word {:?} not found after byte {}", word, cursor))?
            + cursor;
        let start = text[..found].chars().count();
        cursor = found + word.len();

        tokens.push(TokenAnnotation {
            id,
            start,
            end: start + word.chars().count(),
            pos: pos.to_string(),
            tag: String::new(),
            lemma: lemma.to_string(),
            dep: dep.to_string(),
            head,
        });
    }

    Doc::from_annotation(DocAnnotation {
        text: text.to_string(),
        tokens,
    })
}

pub fn cat_chased_mouse() -> Result<Doc> {
    parse(
        "The cat chased the mouse.",
        &[
            ("The", "DET", "det", 1, "the"),
            ("cat", "NOUN", "nsubj", 2, "cat"),
            ("chased", "VERB", "ROOT", 2, "chase"),
            ("the", "DET", "det", 4, "the"),
            ("mouse", "NOUN", "dobj", 2, "mouse"),
            (".", "PUNCT", "punct", 2, "."),
        ],
    )
}

pub fn red_car() -> Result<Doc> {
    parse(
        "Red car.",
        &[
            ("Red", "ADJ", "amod", 1, "red"),
            ("car", "NOUN", "ROOT", 1, "car"),
            (".", "PUNCT", "punct", 1, "."),
        ],
    )
}

pub fn empty() -> Result<Doc> {
    parse("", &[])
}

/// Leading whitespace the engine keeps as a `SPACE` token under the subject,
/// so the subject's chunk starts with blanks.
pub fn padded_sentence() -> Result<Doc> {
    parse(
        "  The cat chased the mouse",
        &[
            ("  ", "SPACE", "dep", 2, "  "),
            ("The", "DET", "det", 2, "the"),
            ("cat", "NOUN", "nsubj", 3, "cat"),
            ("chased", "VERB", "ROOT", 3, "chase"),
            ("the", "DET", "det", 5, "the"),
            ("mouse", "NOUN", "dobj", 3, "mouse"),
        ],
    )
}

/// Two sentences. The passive one keeps its agent under the preposition, so
/// only the second sentence governs an edge.
pub fn two_sentences() -> Result<Doc> {
    parse(
        "Rust was designed by Graydon. Teams love Rust.",
        &[
            ("Rust", "PROPN", "nsubjpass", 2, "Rust"),
            ("was", "AUX", "auxpass", 2, "be"),
            ("designed", "VERB", "ROOT", 2, "design"),
            ("by", "ADP", "agent", 2, "by"),
            ("Graydon", "PROPN", "pobj", 3, "Graydon"),
            (".", "PUNCT", "punct", 2, "."),
            ("Teams", "NOUN", "nsubj", 7, "team"),
            ("love", "VERB", "ROOT", 7, "love"),
            ("Rust", "PROPN", "dobj", 7, "Rust"),
            (".", "PUNCT", "punct", 7, "."),
        ],
    )
}

/// Answers only for texts it was given up front.
#[derive(Default)]
pub struct FixtureAnnotator {
    docs: HashMap<String, Doc>,
}

impl FixtureAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotator preloaded with every canned parse in this module.
    pub fn standard() -> Result<Self> {
        Ok(Self::new()
            .with(cat_chased_mouse()?)
            .with(red_car()?)
            .with(empty()?)
            .with(two_sentences()?)
            .with(padded_sentence()?))
    }

    pub fn with(mut self, doc: Doc) -> Self {
        self.docs.insert(doc.text().to_string(), doc);
        self
    }
}

#[async_trait]
impl Annotator for FixtureAnnotator {
    async fn annotate(&self, text: &str) -> Result<Doc> {
        self.docs
            .get(text)
            .cloned()
            .with_context(|| format!("no parse for {:?}", text))
    }
}
