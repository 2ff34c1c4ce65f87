// ============================================================
// Layer 4 — Sequence File Loader
// ============================================================
// Reads the two inputs the preprocessor needs:
//
//   1. A sequence table: header-less, tab-separated, one row per
//      measured sequence
//
//        TGCATTTTTTTCACATCAGGTC...GGTTACGGCTGTT\t11.0
//        TGCATTTTTTTCACATCCTTAA...GGTTACGGCTGTT\t6.52
//
//      Column 0 is the sequence, column 1 the expression bin.
//      Extra columns are ignored.
//
//   2. The plasmid: the vector sequence the library was cloned into,
//      with the variable insert written as a run of N's. Stored either
//      as a JSON string or as plain / FASTA text.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;

/// One unprocessed row of a sequence table.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub seq: String,
    pub bin: f32,
}

/// Read every row of a tab-separated sequence table.
pub fn read_sequence_table(path: &Path) -> Result<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Cannot open sequence table '{}'", path.display()))?;

    let mut rows = Vec::new();

    for (line, record) in rdr.records().enumerate() {
        let record = record
            .with_context(|| format!("Malformed row {} in '{}'", line + 1, path.display()))?;

        if record.len() < 2 {
            bail!(
                "Row {} in '{}' has {} column(s); expected sequence and bin",
                line + 1,
                path.display(),
                record.len()
            );
        }

        let seq = record[0].trim().to_string();
        let bin: f32 = record[1].trim().parse().with_context(|| {
            format!(
                "Row {} in '{}': bin '{}' is not a number",
                line + 1,
                path.display(),
                &record[1]
            )
        })?;

        rows.push(RawRow { seq, bin });
    }

    tracing::debug!("Read {} rows from '{}'", rows.len(), path.display());
    Ok(rows)
}

/// Read the plasmid sequence, uppercased, with whitespace removed.
pub fn read_plasmid(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read plasmid '{}'", path.display()))?;
    let text = text.trim();

    let raw = if text.starts_with('"') {
        serde_json::from_str::<String>(text)
            .with_context(|| format!("Plasmid '{}' is not a JSON string", path.display()))?
    } else {
        // Plain text or FASTA: drop header lines, join the rest
        text.lines()
            .filter(|l| !l.starts_with('>'))
            .collect::<Vec<_>>()
            .join("")
    };

    let plasmid: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if plasmid.is_empty() {
        bail!("Plasmid '{}' is empty", path.display());
    }

    Ok(plasmid)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_reads_two_column_table() {
        let f = write_tmp("ACGT\t1.5\nTTTT\t3\n");
        let rows = read_sequence_table(f.path()).unwrap();
        assert_eq!(
            rows,
            vec![
                RawRow { seq: "ACGT".into(), bin: 1.5 },
                RawRow { seq: "TTTT".into(), bin: 3.0 },
            ]
        );
    }

    #[test]
    fn test_extra_columns_ignored() {
        let f = write_tmp("ACGT\t2.0\tbatch7\n");
        let rows = read_sequence_table(f.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bin, 2.0);
    }

    #[test]
    fn test_missing_bin_column_is_error() {
        let f = write_tmp("ACGT\n");
        assert!(read_sequence_table(f.path()).is_err());
    }

    #[test]
    fn test_non_numeric_bin_is_error() {
        let f = write_tmp("ACGT\thigh\n");
        let err = read_sequence_table(f.path()).unwrap_err();
        assert!(format!("{err:#}").contains("not a number"));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(read_sequence_table(Path::new("/definitely/not/here.txt")).is_err());
    }

    #[test]
    fn test_plasmid_json_string() {
        let f = write_tmp("\"acgtNNNNacgt\"\n");
        assert_eq!(read_plasmid(f.path()).unwrap(), "ACGTNNNNACGT");
    }

    #[test]
    fn test_plasmid_fasta() {
        let f = write_tmp(">pTpef1\nACGT\nNNNN\nTTGG\n");
        assert_eq!(read_plasmid(f.path()).unwrap(), "ACGTNNNNTTGG");
    }

    #[test]
    fn test_empty_plasmid_is_error() {
        let f = write_tmp("\n");
        assert!(read_plasmid(f.path()).is_err());
    }
}
