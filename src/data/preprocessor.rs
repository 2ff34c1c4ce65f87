// ============================================================
// Layer 4 — Sequence Preprocessor
// ============================================================
// Turns a raw sequence table into a SeqTable whose rows all have
// exactly `seqsize` nucleotides.
//
// Measured sequences are the variable insert plus cloning adapters.
// The model sees the insert in its genomic context, so each sequence
// is re-embedded into the plasmid it was measured in:
//
//   plasmid:   ...upstream context...[NNNN…80…NNNN]...downstream...
//   raw row:   TGCATTTTTTTCACATC + insert + GGTTACGGCTGTT
//
//   Steps (applied in order):
//     1. Uppercase; anything outside A/C/G/T/N becomes N
//     2. Strip the 17-nt left adapter if present
//     3. Prepend the plasmid sequence upstream of the insert
//     4. Keep the last `seqsize` nucleotides
//     5. Left-pad with N if the context was too short
//
// Every row then gets its singleton flag (integer-valued bin), and
// with reverse augmentation on the table is followed by the reverse
// complement of every row.
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::data::loader::{read_plasmid, read_sequence_table, RawRow};
use crate::domain::sequence::{SeqRecord, SeqTable};
use crate::domain::traits::TablePreprocessor;

/// Adapter preceding the insert in every measured sequence
pub const LEFT_ADAPTER: &str = "TGCATTTTTTTCACATC";

/// Length of the N placeholder marking the insert in the plasmid
pub const INSERT_LEN: usize = 80;

pub struct SeqPreprocessor {
    reverse_augment: bool,
}

impl SeqPreprocessor {
    /// Preprocessor with reverse-complement augmentation enabled.
    pub fn new() -> Self {
        Self { reverse_augment: true }
    }

    pub fn with_reverse_augmentation(mut self, enabled: bool) -> Self {
        self.reverse_augment = enabled;
        self
    }

    /// Plasmid sequence preceding the insert placeholder.
    pub fn upstream_context(plasmid: &str) -> Result<&str> {
        let placeholder = "N".repeat(INSERT_LEN);
        let start = plasmid
            .find(&placeholder)
            .with_context(|| format!("Plasmid has no insert placeholder ({} N's)", INSERT_LEN))?;
        Ok(&plasmid[..start])
    }

    /// Normalise one sequence to exactly `seqsize` nucleotides.
    pub fn normalise(&self, seq: &str, seqsize: usize, upstream: &str) -> String {
        let cleaned: String = seq
            .trim()
            .chars()
            .map(|c| match c.to_ascii_uppercase() {
                c @ ('A' | 'C' | 'G' | 'T') => c,
                _ => 'N',
            })
            .collect();

        let insert = cleaned.strip_prefix(LEFT_ADAPTER).unwrap_or(&cleaned);

        let mut full = String::with_capacity(upstream.len() + insert.len());
        full.push_str(upstream);
        full.push_str(insert);

        // Everything is ASCII at this point, so byte offsets are char offsets
        if full.len() >= seqsize {
            full[full.len() - seqsize..].to_string()
        } else {
            let mut padded = "N".repeat(seqsize - full.len());
            padded.push_str(&full);
            padded
        }
    }

    /// Build a table from already-read rows.
    pub fn process_rows(&self, rows: Vec<RawRow>, seqsize: usize, plasmid: &str) -> Result<SeqTable> {
        if seqsize == 0 {
            bail!("seqsize must be positive");
        }

        let upstream = Self::upstream_context(plasmid)?;
        if upstream.len() + INSERT_LEN < seqsize {
            tracing::warn!(
                "Plasmid context ({} nt) shorter than seqsize {}; sequences will be N-padded",
                upstream.len(),
                seqsize
            );
        }

        let forward: Vec<SeqRecord> = rows
            .into_iter()
            .map(|r| SeqRecord::new(self.normalise(&r.seq, seqsize, upstream), r.bin))
            .collect();

        let mut records = Vec::with_capacity(forward.len() * 2);
        if self.reverse_augment {
            let reversed: Vec<SeqRecord> = forward.iter().map(SeqRecord::reverse_complement).collect();
            records.extend(forward);
            records.extend(reversed);
        } else {
            records.extend(forward);
        }

        Ok(SeqTable::new(records))
    }
}

impl Default for SeqPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TablePreprocessor for SeqPreprocessor {
    fn preprocess(&self, path: &Path, seqsize: usize, plasmid_path: &Path) -> Result<SeqTable> {
        let rows = read_sequence_table(path)?;
        let plasmid = read_plasmid(plasmid_path)?;
        let n_raw = rows.len();

        let table = self
            .process_rows(rows, seqsize, &plasmid)
            .with_context(|| format!("Cannot preprocess '{}'", path.display()))?;

        tracing::info!(
            "Preprocessed '{}': {} sequences → {} rows (seqsize={})",
            path.display(),
            n_raw,
            table.len(),
            seqsize
        );
        Ok(table)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn plasmid() -> String {
        format!("GGGGCCCC{}{}AAAA", LEFT_ADAPTER, "N".repeat(INSERT_LEN))
    }

    #[test]
    fn test_upstream_context_ends_before_insert() {
        let p = plasmid();
        let up = SeqPreprocessor::upstream_context(&p).unwrap();
        assert_eq!(up, format!("GGGGCCCC{}", LEFT_ADAPTER));
    }

    #[test]
    fn test_missing_placeholder_is_error() {
        assert!(SeqPreprocessor::upstream_context("ACGTACGT").is_err());
    }

    #[test]
    fn test_adapter_stripped_and_context_prepended() {
        let p = SeqPreprocessor::new();
        let seq = format!("{}ACGT", LEFT_ADAPTER);
        assert_eq!(p.normalise(&seq, 6, "GGGGCC"), "CCACGT");
    }

    #[test]
    fn test_long_sequence_keeps_tail() {
        let p = SeqPreprocessor::new();
        assert_eq!(p.normalise("AAAACCCCGGGG", 4, ""), "GGGG");
    }

    #[test]
    fn test_short_context_is_n_padded() {
        let p = SeqPreprocessor::new();
        assert_eq!(p.normalise("acg", 6, "T"), "NNTACG");
    }

    #[test]
    fn test_unknown_characters_become_n() {
        let p = SeqPreprocessor::new();
        assert_eq!(p.normalise("AXGR", 4, ""), "ANGN");
    }

    #[test]
    fn test_reverse_augmentation_doubles_rows() {
        let rows = vec![
            RawRow { seq: "ACGT".into(), bin: 1.0 },
            RawRow { seq: "AAAA".into(), bin: 2.5 },
        ];
        let table = SeqPreprocessor::new().process_rows(rows, 8, &plasmid()).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.reverse_count(), 2);
        assert!(table.rows().iter().all(|r| r.seq.len() == 8));
        // Reverse rows follow all forward rows
        assert!(!table.get(1).unwrap().rev);
        assert!(table.get(2).unwrap().rev);
        assert!(table.get(0).unwrap().is_singleton);
        assert!(!table.get(1).unwrap().is_singleton);
    }

    #[test]
    fn test_without_augmentation_keeps_row_count() {
        let rows = vec![RawRow { seq: "ACGT".into(), bin: 1.0 }];
        let table = SeqPreprocessor::new()
            .with_reverse_augmentation(false)
            .process_rows(rows, 8, &plasmid())
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.reverse_count(), 0);
    }

    #[test]
    fn test_zero_seqsize_is_error() {
        let rows = vec![RawRow { seq: "ACGT".into(), bin: 1.0 }];
        assert!(SeqPreprocessor::new().process_rows(rows, 0, &plasmid()).is_err());
    }
}
