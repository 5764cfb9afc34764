use std::fs::{self, File};
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::input::{InputError, open_text};

pub const PAWSX_LANGUAGES: &[&str] = &["en", "de", "es", "fr", "ja", "ko", "zh"];

/// Output split name and the raw file it is built from.
pub const PAWSX_SPLITS: &[(&str, &str)] = &[
    ("train", "train"),
    ("test", "test_2k"),
    ("dev", "dev_2k"),
];

/// One normalized PAWS-X pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PawsxRow {
    pub sentence1: String,
    pub sentence2: String,
    pub label: String,
}

/// Rewrites every raw `<data_dir>/<lang>/<file>.tsv` into
/// `<output_dir>/<split>-<lang>.tsv`. Returns the files written, in order.
pub fn preprocess_pawsx(data_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, InputError> {
    fs::create_dir_all(output_dir).map_err(|e| InputError::io(output_dir, e))?;

    let mut written = Vec::with_capacity(PAWSX_LANGUAGES.len() * PAWSX_SPLITS.len());
    for &lang in PAWSX_LANGUAGES {
        for &(split, raw) in PAWSX_SPLITS {
            let infile = data_dir.join(lang).join(format!("{raw}.tsv"));
            let outfile = output_dir.join(format!("{split}-{lang}.tsv"));
            normalize_file(&infile, &outfile)?;
            tracing::info!(file = %outfile.display(), "finished preprocessing");
            written.push(outfile);
        }
    }
    Ok(written)
}

pub fn normalize_file(infile: &Path, outfile: &Path) -> Result<usize, InputError> {
    let rows = read_raw_pawsx(infile)?;
    write_rows(&rows, outfile).map_err(|e| InputError::io(outfile, e))?;
    Ok(rows.len())
}

/// Parses a raw PAWS-X file: header dropped, columns `id, s1, s2, label`.
pub fn read_raw_pawsx(path: &Path) -> Result<Vec<PawsxRow>, InputError> {
    let reader = open_text(path)?;
    let mut rows = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| InputError::io(path, e))?;
        if idx == 0 {
            continue;
        }
        let cols: Vec<&str> = line.trim().split('\t').collect();
        if cols.len() < 4 {
            return Err(InputError::Parse {
                path: path.to_path_buf(),
                msg: format!("line {}: expected 4 columns, found {}", idx + 1, cols.len()),
            });
        }
        rows.push(PawsxRow {
            sentence1: collapse_spaces(cols[1]),
            sentence2: collapse_spaces(cols[2]),
            label: cols[3].to_string(),
        });
    }

    Ok(rows)
}

pub fn collapse_spaces(text: &str) -> String {
    text.split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_rows(rows: &[PawsxRow], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for row in rows {
        writeln!(w, "{}\t{}\t{}", row.sentence1, row.sentence2, row.label)?;
    }
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/preprocess/tests.rs"]
mod tests;
