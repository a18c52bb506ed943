//! Content normalisation and fingerprinting for statute text.
//!
//! The registry re-serialises law text on every request, so raw byte
//! comparison reports spurious changes (indentation, CRLF vs LF, trailing
//! blanks). Comparison is done on a normalised form instead.
//!
//! # Normal form
//!
//! 1. Split on any line ending (`\r\n`, `\n`, `\r`)
//! 2. Collapse every run of whitespace inside a line to one ASCII space
//! 3. Trim each line and drop lines that end up empty
//! 4. Join with `\n`

use sha2::{Digest, Sha256};

/// Bring law text into the normal form described in the module docs.
pub fn normalize_content(s: &str) -> String {
    s.split(['\n', '\r'])
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lowercase hex SHA-256 of the normalised content.
pub fn fingerprint(s: &str) -> String {
    hex::encode(Sha256::digest(normalize_content(s).as_bytes()))
}

/// Line-level difference between two versions of a law.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentDiff {
    /// Lines present in the new version only, in new-version order.
    pub added: Vec<String>,
    /// Lines present in the old version only, in old-version order.
    pub removed: Vec<String>,
}

impl ContentDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// One-paragraph description: counts, then up to `max_lines` added lines.
    ///
    /// "2 line(s) added, 1 line(s) removed\n+ 제3조의2(정의) ...\n+ ..."
    pub fn summary(&self, max_lines: usize) -> String {
        let mut out = format!(
            "{} line(s) added, {} line(s) removed",
            self.added.len(),
            self.removed.len()
        );
        for line in self.added.iter().take(max_lines) {
            out.push_str("\n+ ");
            out.push_str(line);
        }
        if self.added.len() > max_lines {
            out.push_str(&format!("\n… {} more", self.added.len() - max_lines));
        }
        out
    }
}

/// Compare two versions line by line after normalisation.
///
/// Set-based: a line counts as unchanged if it appears anywhere in the other
/// version, so moved provisions are not reported.
pub fn diff_lines(old: &str, new: &str) -> ContentDiff {
    let old = normalize_content(old);
    let new = normalize_content(new);
    let old_lines: std::collections::HashSet<&str> = old.lines().collect();
    let new_lines: std::collections::HashSet<&str> = new.lines().collect();

    ContentDiff {
        added: new
            .lines()
            .filter(|l| !old_lines.contains(l))
            .map(str::to_string)
            .collect(),
        removed: old
            .lines()
            .filter(|l| !new_lines.contains(l))
            .map(str::to_string)
            .collect(),
    }
}
