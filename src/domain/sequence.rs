// ============================================================
// Layer 3 — Sequence Domain Types
// ============================================================
// A SeqRecord is one row of a preprocessed sequence table:
//   - seq:          the normalised nucleotide string (A/C/G/T/N)
//   - bin:          measured expression, a float in roughly [0, 17]
//   - is_singleton: the expression was measured from a single cell
//                   (integer-valued bins)
//   - rev:          the row holds the reverse complement strand
//
// A SeqTable is the ordered collection of rows for one partition
// (train, validation or test). Partitions are read-only once built
// and are shared between datasets through an Arc.
//
// Reference: Rust Book §5 (Structs), §8 (Vectors)

use serde::{Deserialize, Serialize};

/// One row of a preprocessed sequence table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeqRecord {
    pub seq: String,
    pub bin: f32,
    pub is_singleton: bool,
    pub rev: bool,
}

impl SeqRecord {
    /// Build a forward-strand record, deriving the singleton flag from `bin`.
    pub fn new(seq: impl Into<String>, bin: f32) -> Self {
        Self {
            seq: seq.into(),
            bin,
            is_singleton: bin.fract() == 0.0,
            rev: false,
        }
    }

    /// The same measurement read from the opposite strand.
    pub fn reverse_complement(&self) -> Self {
        Self {
            seq: reverse_complement(&self.seq),
            bin: self.bin,
            is_singleton: self.is_singleton,
            rev: !self.rev,
        }
    }
}

/// An ordered table of sequence rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeqTable {
    rows: Vec<SeqRecord>,
}

impl SeqTable {
    pub fn new(rows: Vec<SeqRecord>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SeqRecord> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[SeqRecord] {
        &self.rows
    }

    /// Copy the rows at `indices` (in that order) into a new table.
    ///
    /// Indices past the end are skipped with a warning; the fold
    /// splitter only ever hands out in-range indices.
    pub fn select(&self, indices: &[usize]) -> SeqTable {
        let mut rows = Vec::with_capacity(indices.len());
        for &i in indices {
            match self.rows.get(i) {
                Some(row) => rows.push(row.clone()),
                None => tracing::warn!("select: index {} out of range (len {})", i, self.len()),
            }
        }
        SeqTable { rows }
    }

    /// Number of rows flagged as reverse complements.
    pub fn reverse_count(&self) -> usize {
        self.rows.iter().filter(|r| r.rev).count()
    }
}

impl FromIterator<SeqRecord> for SeqTable {
    fn from_iter<T: IntoIterator<Item = SeqRecord>>(iter: T) -> Self {
        Self { rows: iter.into_iter().collect() }
    }
}

/// Complement a single nucleotide. Anything unknown maps to `N`.
pub fn complement(base: char) -> char {
    match base {
        'A' => 'T',
        'T' => 'A',
        'C' => 'G',
        'G' => 'C',
        'a' => 't',
        't' => 'a',
        'c' => 'g',
        'g' => 'c',
        'n' => 'n',
        _ => 'N',
    }
}

/// Reverse complement of a nucleotide string.
pub fn reverse_complement(seq: &str) -> String {
    seq.chars().rev().map(complement).collect()
}
