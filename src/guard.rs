//! Per-file content gating: full embed, truncation, or placeholder.
//!
//! Reads are bounded by the configured threshold so memory use per file is
//! capped; the file handle is released as soon as the read finishes or
//! fails. Failures here never abort the run — every problem degrades to a
//! placeholder variant for that one file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// How many leading bytes are sniffed for binary content.
const BINARY_SNIFF_BYTES: usize = 8192;

/// Content-handling decision for one included file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Entire file embedded verbatim.
    Full(String),
    /// Prefix of exactly the threshold embedded, rest omitted.
    Truncated { text: String, omitted_bytes: u64 },
    /// Binary content, never embedded regardless of size.
    Binary,
    /// The file could not be read; the message replaces the content.
    Unreadable(String),
}

impl FileContent {
    /// Embedded text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FileContent::Full(text) | FileContent::Truncated { text, .. } => Some(text),
            FileContent::Binary | FileContent::Unreadable(_) => None,
        }
    }

    /// Number of content bytes actually embedded.
    pub fn bytes_embedded(&self) -> u64 {
        self.as_text().map_or(0, |t| t.len() as u64)
    }
}

/// Read a file's content subject to the size threshold.
///
/// `max_bytes` of `None` means unlimited. A NUL byte within the first 8 KiB
/// marks the file as binary. Undecodable sequences in otherwise textual
/// files are replaced rather than rejected, matching the tool's "opaque
/// text" stance.
pub fn read_content(path: &Path, max_bytes: Option<u64>) -> FileContent {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => return FileContent::Unreadable(err.to_string()),
    };

    let total_size = match file.metadata() {
        Ok(metadata) => metadata.len(),
        Err(err) => return FileContent::Unreadable(err.to_string()),
    };

    let mut buf = Vec::new();
    let read_result = match max_bytes {
        Some(limit) => file.take(limit).read_to_end(&mut buf),
        None => {
            let mut file = file;
            file.read_to_end(&mut buf)
        }
    };
    if let Err(err) = read_result {
        return FileContent::Unreadable(err.to_string());
    }

    let sniff = &buf[..buf.len().min(BINARY_SNIFF_BYTES)];
    if sniff.contains(&0) {
        return FileContent::Binary;
    }

    let omitted = total_size.saturating_sub(buf.len() as u64);
    let text = String::from_utf8_lossy(&buf).into_owned();

    if omitted > 0 {
        FileContent::Truncated {
            text,
            omitted_bytes: omitted,
        }
    } else {
        FileContent::Full(text)
    }
}
