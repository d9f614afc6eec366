use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, instrument};

/// Per-token vector lookup backing an [`super::Embedder`].
///
/// Any pretrained word or sentence vector table can be plugged in. Lookups are
/// read-only, so a single table can be shared between concurrent embed calls.
pub trait WordVectors: Send + Sync {
    /// Vector for `token`, or `None` if it's out of vocabulary.
    fn lookup(&self, token: &str) -> Option<&[f64]>;

    /// Dimension shared by every vector in the table.
    fn dimension(&self) -> usize;
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read word vectors: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed entry on line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("Vector on line {line} has dimension {found}, expected {expected}")]
    InconsistentDimension {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Word vector table contains no entries")]
    Empty,
}

/// In-memory word vector table.
///
/// Reads the plain text format used by GloVe and word2vec: one entry per line,
/// a token followed by its whitespace separated components. A leading word2vec
/// header (`<count> <dimension>`) is accepted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordVectorTable {
    vectors: HashMap<String, Vec<f64>>,
    dimension: usize,
}

impl WordVectorTable {
    /// Builds a table from `(token, vector)` pairs.
    ///
    /// The first pair fixes the dimension. Later duplicates of a token are ignored.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (i, (token, vector)) in entries.into_iter().enumerate() {
            table.insert(i + 1, token.into(), vector)?;
        }
        if table.vectors.is_empty() {
            return Err(TableError::Empty);
        }
        Ok(table)
    }

    #[instrument(skip(reader))]
    pub fn from_reader(reader: impl BufRead) -> Result<Self, TableError> {
        let mut table = Self::default();
        let mut declared: Option<usize> = None;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if line_no == 1 {
                if let Some(dim) = parse_header(trimmed) {
                    debug!(dimension = dim, "Found word2vec header");
                    declared = Some(dim);
                    table.dimension = dim;
                    continue;
                }
            }

            let mut fields = trimmed.split_whitespace();
            let token = fields.next().ok_or_else(|| TableError::Parse {
                line: line_no,
                reason: "missing token".to_string(),
            })?;
            let vector = fields
                .map(str::parse::<f64>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| TableError::Parse {
                    line: line_no,
                    reason: e.to_string(),
                })?;
            if vector.is_empty() {
                return Err(TableError::Parse {
                    line: line_no,
                    reason: format!("token `{token}` has no vector components"),
                });
            }
            table.insert(line_no, token.to_string(), vector)?;
        }

        if table.vectors.is_empty() {
            return Err(TableError::Empty);
        }
        info!(
            tokens = table.vectors.len(),
            dimension = table.dimension,
            header = declared.is_some(),
            "Loaded word vector table"
        );
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    fn insert(&mut self, line: usize, token: String, vector: Vec<f64>) -> Result<(), TableError> {
        if self.dimension == 0 {
            self.dimension = vector.len();
        }
        if vector.len() != self.dimension {
            return Err(TableError::InconsistentDimension {
                line,
                expected: self.dimension,
                found: vector.len(),
            });
        }
        if let Some(bad) = vector.iter().find(|v| !v.is_finite()) {
            return Err(TableError::Parse {
                line,
                reason: format!("token `{token}` has non-finite component {bad}"),
            });
        }
        self.vectors.entry(token).or_insert(vector);
        Ok(())
    }
}

impl WordVectors for WordVectorTable {
    fn lookup(&self, token: &str) -> Option<&[f64]> {
        self.vectors.get(token).map(Vec::as_slice)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn parse_header(line: &str) -> Option<usize> {
    let mut fields = line.split_whitespace();
    let (count, dim) = (fields.next()?, fields.next()?);
    if fields.next().is_some() {
        return None;
    }
    count.parse::<usize>().ok()?;
    dim.parse::<usize>().ok()
}
