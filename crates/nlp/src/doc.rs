use anyhow::{Context, Result};

use crate::schema::DocAnnotation;
use crate::token::{Pos, Token};

/// A dependency-parsed document.
///
/// Built once from an annotation and read-only afterwards. Child lists are
/// precomputed so `lefts`/`rights` are slices in document order.
#[derive(Debug, Clone)]
pub struct Doc {
    text: String,
    tokens: Vec<Token>,
    children: Vec<Vec<usize>>,
}

/// A contiguous run of tokens `[start, end)`.
#[derive(Debug, Clone, Copy)]
pub struct Span<'a> {
    doc: &'a Doc,
    pub start: usize,
    pub end: usize,
}

impl<'a> Span<'a> {
    pub fn text(&self) -> &'a str {
        self.doc.span_text(self.start, self.end)
    }

    pub fn root(&self) -> &'a Token {
        &self.doc.tokens[self.end - 1]
    }
}

impl Doc {
    /// Validate an engine annotation and convert its character offsets to
    /// byte offsets.
    pub fn from_annotation(annotation: DocAnnotation) -> Result<Self> {
        let DocAnnotation { text, tokens } = annotation;

        // Byte offset of every char boundary, including the end of the text
        let mut boundaries: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        boundaries.push(text.len());

        let count = tokens.len();
        let mut parsed = Vec::with_capacity(count);
        let mut prev_end = 0;

        for (index, token) in tokens.into_iter().enumerate() {
            if token.id != index {
                anyhow::bail!("token {} reported id {}", index, token.id);
            }
            if token.start > token.end || token.start < prev_end {
                anyhow::bail!(
                    "token {} has out-of-order offsets {}..{}",
                    index,
                    token.start,
                    token.end
                );
            }
            if token.head >= count {
                anyhow::bail!("token {} has head {} out of range", index, token.head);
            }

            let start = *boundaries
                .get(token.start)
                .with_context(|| format!("token {} starts past end of text", index))?;
            let end = *boundaries
                .get(token.end)
                .with_context(|| format!("token {} ends past end of text", index))?;
            prev_end = token.end;

            parsed.push(Token {
                index,
                span: start..end,
                pos: Pos::from_tag(&token.pos),
                tag: token.tag,
                dep: token.dep,
                lemma: token.lemma,
                head: token.head,
            });
        }

        check_acyclic(&parsed)?;

        let mut children = vec![Vec::new(); count];
        for token in &parsed {
            if token.head != token.index {
                children[token.head].push(token.index);
            }
        }

        Ok(Self {
            text,
            tokens: parsed,
            children,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, i: usize) -> &Token {
        &self.tokens[i]
    }

    pub fn token_text(&self, i: usize) -> &str {
        &self.text[self.tokens[i].span.clone()]
    }

    /// Text covered by tokens `[start, end)`, without the trailing whitespace
    /// of the last token.
    pub fn span_text(&self, start: usize, end: usize) -> &str {
        if start >= end {
            return "";
        }
        let from = self.tokens[start].span.start;
        let to = self.tokens[end - 1].span.end;
        &self.text[from..to]
    }

    pub fn span(&self, start: usize, end: usize) -> Span<'_> {
        Span {
            doc: self,
            start,
            end,
        }
    }

    /// Immediate dependents of token `i` in document order.
    pub fn children(&self, i: usize) -> &[usize] {
        &self.children[i]
    }

    /// Dependents that precede token `i`.
    pub fn lefts(&self, i: usize) -> impl Iterator<Item = &Token> + '_ {
        self.children[i]
            .iter()
            .take_while(move |&&c| c < i)
            .map(|&c| &self.tokens[c])
    }

    /// Dependents that follow token `i`.
    pub fn rights(&self, i: usize) -> impl Iterator<Item = &Token> + '_ {
        self.children[i]
            .iter()
            .skip_while(move |&&c| c < i)
            .map(|&c| &self.tokens[c])
    }

    /// Leftmost token index in the subtree of `i`.
    pub fn left_edge(&self, i: usize) -> usize {
        self.subtree_bounds(i).0
    }

    /// Rightmost token index in the subtree of `i`.
    pub fn right_edge(&self, i: usize) -> usize {
        self.subtree_bounds(i).1
    }

    fn subtree_bounds(&self, i: usize) -> (usize, usize) {
        let mut lo = i;
        let mut hi = i;
        let mut stack = vec![i];
        while let Some(node) = stack.pop() {
            lo = lo.min(node);
            hi = hi.max(node);
            stack.extend_from_slice(&self.children[node]);
        }
        (lo, hi)
    }
}

/// Every head chain must end at a token that heads itself.
fn check_acyclic(tokens: &[Token]) -> Result<()> {
    let mut resolved = vec![false; tokens.len()];
    let mut on_path = vec![false; tokens.len()];

    for start in 0..tokens.len() {
        let mut path = Vec::new();
        let mut current = start;
        loop {
            if resolved[current] {
                break;
            }
            if on_path[current] {
                anyhow::bail!("dependency cycle through token {}", current);
            }
            on_path[current] = true;
            path.push(current);

            let head = tokens[current].head;
            if head == current {
                break;
            }
            current = head;
        }
        for i in path {
            on_path[i] = false;
            resolved[i] = true;
        }
    }

    Ok(())
}
