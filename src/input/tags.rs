use std::io::BufRead;
use std::path::Path;

use crate::input::{InputError, LabeledExample, open_text};

/// Reads one tag per line, with a blank line closing each example.
///
/// An example left open at end-of-file is flushed rather than dropped, so a
/// file without a trailing blank line keeps its last sentence.
pub fn read_tags(path: &Path) -> Result<Vec<LabeledExample>, InputError> {
    let mut reader = open_text(path)?;
    let mut buf = String::new();
    let mut examples = Vec::new();
    let mut current: Vec<String> = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_line(&mut buf)
            .map_err(|e| InputError::io(path, e))?;
        if read == 0 {
            break;
        }
        let line = buf.trim();
        if line.is_empty() {
            examples.push(LabeledExample::Tagged(std::mem::take(&mut current)));
        } else {
            current.push(line.to_string());
        }
    }

    if !current.is_empty() {
        examples.push(LabeledExample::Tagged(current));
    }

    Ok(examples)
}
