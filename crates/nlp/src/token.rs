use std::fmt;
use std::ops::Range;

/// Dependency labels the extraction rules and chunker look at.
pub mod dep {
    pub const ROOT: &str = "ROOT";
    pub const NSUBJ: &str = "nsubj";
    pub const NSUBJPASS: &str = "nsubjpass";
    pub const DOBJ: &str = "dobj";
    pub const POBJ: &str = "pobj";
    pub const CONJ: &str = "conj";
}

/// Universal part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Space,
    Sym,
    Verb,
    X,
    /// Any tag outside the universal set, kept verbatim
    Other(String),
}

impl Pos {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ADJ" => Pos::Adj,
            "ADP" => Pos::Adp,
            "ADV" => Pos::Adv,
            "AUX" => Pos::Aux,
            "CCONJ" | "CONJ" => Pos::Cconj,
            "DET" => Pos::Det,
            "INTJ" => Pos::Intj,
            "NOUN" => Pos::Noun,
            "NUM" => Pos::Num,
            "PART" => Pos::Part,
            "PRON" => Pos::Pron,
            "PROPN" => Pos::Propn,
            "PUNCT" => Pos::Punct,
            "SCONJ" => Pos::Sconj,
            "SPACE" => Pos::Space,
            "SYM" => Pos::Sym,
            "VERB" => Pos::Verb,
            "X" => Pos::X,
            other => Pos::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Pos::Adj => "ADJ",
            Pos::Adp => "ADP",
            Pos::Adv => "ADV",
            Pos::Aux => "AUX",
            Pos::Cconj => "CCONJ",
            Pos::Det => "DET",
            Pos::Intj => "INTJ",
            Pos::Noun => "NOUN",
            Pos::Num => "NUM",
            Pos::Part => "PART",
            Pos::Pron => "PRON",
            Pos::Propn => "PROPN",
            Pos::Punct => "PUNCT",
            Pos::Sconj => "SCONJ",
            Pos::Space => "SPACE",
            Pos::Sym => "SYM",
            Pos::Verb => "VERB",
            Pos::X => "X",
            Pos::Other(tag) => tag,
        }
    }

    /// Nouns, proper nouns and pronouns can head a noun chunk.
    pub fn is_nominal(&self) -> bool {
        matches!(self, Pos::Noun | Pos::Propn | Pos::Pron)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One token of a parsed document.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub index: usize,
    /// Byte range of the token in the document text
    pub span: Range<usize>,
    pub pos: Pos,
    pub tag: String,
    pub dep: String,
    pub lemma: String,
    /// Index of the governing token; a root is its own head
    pub head: usize,
}

impl Token {
    pub fn is_root(&self) -> bool {
        self.dep == dep::ROOT
    }

    pub fn has_dep(&self, labels: &[&str]) -> bool {
        labels.contains(&self.dep.as_str())
    }
}
