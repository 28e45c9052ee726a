use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    AlreadyPresent,
}

/// Append `line` to the file at `path` unless an identical line is already there.
///
/// A missing file is treated as empty and created on insert. Existing content
/// is never rewritten; if it lacks a trailing newline one is added before the
/// new line.
pub fn upsert_line(path: &Path, line: &str) -> io::Result<UpsertOutcome> {
    let existing = read_or_empty(path)?;
    if contains_line(&existing, line) {
        tracing::debug!(path = %path.display(), line, "line already present");
        return Ok(UpsertOutcome::AlreadyPresent);
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if existing.last().is_some_and(|byte| *byte != b'\n') {
        file.write_all(b"\n")?;
    }
    writeln!(file, "{line}")?;
    file.flush()?;

    tracing::debug!(path = %path.display(), line, "appended line");
    Ok(UpsertOutcome::Inserted)
}

/// Whether the file at `path` holds `line` verbatim; a missing file holds nothing
pub fn file_contains_line(path: &Path, line: &str) -> io::Result<bool> {
    Ok(contains_line(&read_or_empty(path)?, line))
}

/// Shell startup files are not guaranteed to be UTF-8, so lines compare as bytes.
fn contains_line(content: &[u8], line: &str) -> bool {
    let line = line.as_bytes();
    content.split(|byte| *byte == b'\n').any(|existing| {
        let existing = existing.strip_suffix(b"\r").unwrap_or(existing);
        existing == line
    })
}

fn read_or_empty(path: &Path) -> io::Result<Vec<u8>> {
    match fs::read(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(err) => Err(err),
    }
}
