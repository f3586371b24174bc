//! Subject–verb–object patterns over a dependency parse.

use nlp::{Doc, Pos, Token, dep};

use crate::schema::Edge;

const SUBJECT_DEPS: &[&str] = &[dep::NSUBJ, dep::NSUBJPASS];
const OBJECT_DEPS: &[&str] = &[dep::DOBJ, dep::POBJ];

/// Sentence roots and verbs can govern a relation.
pub fn is_predicate(token: &Token) -> bool {
    token.is_root() || token.pos == Pos::Verb
}

/// First subject among the left dependents of `i`.
pub fn subject_of(doc: &Doc, i: usize) -> Option<&Token> {
    doc.lefts(i).find(|t| t.has_dep(SUBJECT_DEPS))
}

/// First object among the right dependents of `i`.
pub fn object_of(doc: &Doc, i: usize) -> Option<&Token> {
    doc.rights(i).find(|t| t.has_dep(OBJECT_DEPS))
}

/// The edge governed by token `i`, if it has both a subject and an object.
///
/// Only the first subject and first object are used; further conjuncts on
/// the same verb do not produce edges.
pub fn relation_at(doc: &Doc, i: usize) -> Option<Edge> {
    let verb = doc.token(i);
    if !is_predicate(verb) {
        return None;
    }

    let subject = subject_of(doc, i)?;
    let object = object_of(doc, i)?;

    Some(Edge {
        source: doc.token_text(subject.index).trim().to_string(),
        target: doc.token_text(object.index).trim().to_string(),
        label: verb.lemma.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nlp::fixtures;

    #[test]
    fn test_root_verb_relation() {
        let doc = fixtures::cat_chased_mouse().unwrap();

        let edge = relation_at(&doc, 2).unwrap();
        assert_eq!(edge.source, "cat");
        assert_eq!(edge.target, "mouse");
        assert_eq!(edge.label, "chase");
    }

    #[test]
    fn test_non_predicates_yield_nothing() {
        let doc = fixtures::cat_chased_mouse().unwrap();

        assert!(relation_at(&doc, 1).is_none());
        assert!(relation_at(&doc, 4).is_none());
    }

    #[test]
    fn test_root_without_verb_needs_both_arguments() {
        let doc = fixtures::red_car().unwrap();

        assert!(is_predicate(doc.token(1)));
        assert!(relation_at(&doc, 1).is_none());
    }

    #[test]
    fn test_object_must_be_on_the_right() {
        // "Mice the cat chased": object precedes the verb
        let doc = fixtures::parse(
            "Mice the cat chased",
            &[
                ("Mice", "NOUN", "dobj", 3, "mouse"),
                ("the", "DET", "det", 2, "the"),
                ("cat", "NOUN", "nsubj", 3, "cat"),
                ("chased", "VERB", "ROOT", 3, "chase"),
            ],
        )
        .unwrap();

        assert!(subject_of(&doc, 3).is_some());
        assert!(object_of(&doc, 3).is_none());
        assert!(relation_at(&doc, 3).is_none());
    }

    #[test]
    fn test_first_subject_and_object_win() {
        let doc = fixtures::parse(
            "Ann and Bo ate rice and beans",
            &[
                ("Ann", "PROPN", "nsubj", 3, "Ann"),
                ("and", "CCONJ", "cc", 0, "and"),
                ("Bo", "PROPN", "nsubj", 3, "Bo"),
                ("ate", "VERB", "ROOT", 3, "eat"),
                ("rice", "NOUN", "dobj", 3, "rice"),
                ("and", "CCONJ", "cc", 4, "and"),
                ("beans", "NOUN", "dobj", 3, "bean"),
            ],
        )
        .unwrap();

        let edge = relation_at(&doc, 3).unwrap();
        assert_eq!(edge.source, "Ann");
        assert_eq!(edge.target, "rice");
        assert_eq!(edge.label, "eat");
    }

    #[test]
    fn test_passive_subject_with_prepositional_object_on_verb() {
        let doc = fixtures::parse(
            "Bread is baked in ovens",
            &[
                ("Bread", "NOUN", "nsubjpass", 2, "bread"),
                ("is", "AUX", "auxpass", 2, "be"),
                ("baked", "VERB", "ROOT", 2, "bake"),
                ("in", "ADP", "prep", 2, "in"),
                ("ovens", "NOUN", "pobj", 2, "oven"),
            ],
        )
        .unwrap();

        let edge = relation_at(&doc, 2).unwrap();
        assert_eq!(edge.source, "Bread");
        assert_eq!(edge.target, "ovens");
        assert_eq!(edge.label, "bake");
    }

    #[test]
    fn test_endpoint_text_is_trimmed() {
        // The engine reports the subject with its trailing blanks
        let doc = fixtures::parse(
            "Dogs  chase cats",
            &[
                ("Dogs  ", "NOUN", "nsubj", 1, "dog"),
                ("chase", "VERB", "ROOT", 1, "chase"),
                ("cats", "NOUN", "dobj", 1, "cat"),
            ],
        )
        .unwrap();

        assert_eq!(doc.token_text(0), "Dogs  ");
        let edge = relation_at(&doc, 1).unwrap();
        assert_eq!(edge.source, "Dogs");
        assert_eq!(edge.target, "cats");
    }
}
