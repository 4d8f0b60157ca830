use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::RetrievalError;

/// The textbook as an ordered, read-only list of non-empty trimmed lines.
///
/// Line indices are stable for the lifetime of the value. A lowercase copy of
/// every line is kept alongside so matching does not re-lowercase per request.
#[derive(Debug, Clone)]
pub struct Corpus {
    lines: Vec<String>,
    lowered: Vec<String>,
    source_hash: String,
}

impl Corpus {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RetrievalError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|source| RetrievalError::ResourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::from_text(&text))
    }

    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        let lowered = lines.iter().map(|line| line.to_lowercase()).collect();

        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());

        Self {
            lines,
            lowered,
            source_hash: format!("{:x}", hasher.finalize()),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_at(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Lowercased lines paired with their index, in corpus order.
    pub fn lowered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lowered
            .iter()
            .enumerate()
            .map(|(idx, line)| (idx, line.as_str()))
    }

    /// SHA-256 of the raw source text, hex encoded.
    pub fn source_hash(&self) -> &str {
        &self.source_hash
    }
}
