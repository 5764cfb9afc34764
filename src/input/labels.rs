use std::io::BufRead;
use std::path::Path;

use crate::input::{InputError, LabeledExample, open_text};

/// Reads one label per line. Only the first tab-separated column is kept.
pub fn read_labels(path: &Path) -> Result<Vec<LabeledExample>, InputError> {
    let mut reader = open_text(path)?;
    let mut buf = String::new();
    let mut labels = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_line(&mut buf)
            .map_err(|e| InputError::io(path, e))?;
        if read == 0 {
            break;
        }
        let line = buf.trim();
        let label = line.split('\t').next().unwrap_or_default().trim();
        labels.push(LabeledExample::Scalar(label.to_string()));
    }

    Ok(labels)
}
