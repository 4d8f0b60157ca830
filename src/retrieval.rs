use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::Arc;

use serde::Serialize;

use crate::corpus::Corpus;
use crate::keywords::extract_keywords;

/// Lines of context pulled in on each side of a matching line.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Keywords and passages retrieved for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Retrieval {
    pub keywords: Vec<String>,
    pub passages: Vec<String>,
}

impl Retrieval {
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

#[derive(Clone)]
pub struct Retriever {
    corpus: Arc<Corpus>,
    context_lines: usize,
}

impl Retriever {
    pub fn new(corpus: Arc<Corpus>, context_lines: usize) -> Self {
        Self {
            corpus,
            context_lines,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn retrieve(&self, question: &str) -> Retrieval {
        let keywords = extract_keywords(question);
        let included = retrieve_included_indices(&keywords, &self.corpus, self.context_lines);
        let passages = assemble_passages(&included, &self.corpus);

        tracing::debug!(
            ?keywords,
            included_lines = included.len(),
            passages = passages.len(),
            "retrieved textbook passages"
        );

        Retrieval { keywords, passages }
    }
}

/// Indices of every line within `window_size` lines of a line containing any
/// keyword as a raw, case-insensitive substring.
///
/// Windows are clamped to `[0, line_count)`.
// TODO: swap the linear scan for a token -> line index map built in
// `Corpus::from_text` once textbooks outgrow a few thousand lines.
pub fn retrieve_included_indices(
    keywords: &[String],
    corpus: &Corpus,
    window_size: usize,
) -> BTreeSet<usize> {
    let mut included = BTreeSet::new();
    if keywords.is_empty() {
        return included;
    }

    let line_count = corpus.line_count();
    for (idx, line) in corpus.lowered_lines() {
        if !keywords.iter().any(|keyword| line.contains(keyword.as_str())) {
            continue;
        }

        let start = idx.saturating_sub(window_size);
        let end = idx
            .saturating_add(window_size)
            .saturating_add(1)
            .min(line_count);
        included.extend(start..end);
    }

    included
}

/// Joins each maximal run of consecutive indices into one passage.
///
/// Passages come out in ascending line order, lines within a passage joined
/// by a single space. Indices past the end of the corpus are ignored.
pub fn assemble_passages(indices: &BTreeSet<usize>, corpus: &Corpus) -> Vec<String> {
    passage_spans(indices.range(..corpus.line_count()).copied())
        .into_iter()
        .map(|span| {
            span.filter_map(|idx| corpus.line_at(idx))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Runs of consecutive indices. Input must be ascending and below `usize::MAX`.
fn passage_spans(mut iter: impl Iterator<Item = usize>) -> Vec<Range<usize>> {
    let mut spans = Vec::new();

    let Some(first) = iter.next() else {
        return spans;
    };

    let mut current = first..first + 1;
    for idx in iter {
        if idx == current.end {
            current.end += 1;
        } else {
            spans.push(current);
            current = idx..idx + 1;
        }
    }
    spans.push(current);

    spans
}
