//! Access-list gate
//!
//! Permissions live in a flat, section-delimited file:
//!
//! ```text
//! [whitelist]
//! ./index.html
//! [deletelist]
//! ./scratch.txt
//! [post_put_list]
//! ./notes.txt
//! ```
//!
//! The file is re-read on every check so edits take effect immediately.
//! If it cannot be read, every check is denied.

use std::collections::HashSet;
use std::path::PathBuf;

/// Operation a path is checked against. Each maps to one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
    Delete,
}

impl Operation {
    /// Section name in the list file.
    pub fn section(&self) -> &'static str {
        match self {
            Operation::Read => "whitelist",
            Operation::Write => "post_put_list",
            Operation::Delete => "deletelist",
        }
    }
}

/// Answers "is this path allowed for this operation".
#[derive(Debug, Clone)]
pub struct AccessGate {
    list_file: PathBuf,
}

impl AccessGate {
    pub fn new(list_file: impl Into<PathBuf>) -> Self {
        Self {
            list_file: list_file.into(),
        }
    }

    /// Checks `path` (e.g. "./index.html") against the section for `op`.
    ///
    /// Membership is an exact string match, not a prefix or glob.
    pub async fn is_permitted(&self, path: &str, op: Operation) -> bool {
        let contents = match tokio::fs::read_to_string(&self.list_file).await {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(
                    list_file = %self.list_file.display(),
                    error = %e,
                    "Failed to open list file, denying"
                );
                return false;
            }
        };

        load_section(&contents, op.section()).contains(path)
    }
}

/// Collects the entries of one `[section]` from list-file text.
///
/// Blank lines and lines starting with `#` are skipped. A section may appear
/// more than once; all its occurrences contribute.
pub fn load_section(contents: &str, section: &str) -> HashSet<String> {
    let mut list = HashSet::new();
    let mut in_section = false;

    for line in contents.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = name == section;
        } else if in_section {
            list.insert(line.to_string());
        }
    }

    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_disjoint() {
        let text = "[whitelist]\n./a.txt\n[deletelist]\n./b.txt\n";

        assert!(load_section(text, "whitelist").contains("./a.txt"));
        assert!(!load_section(text, "whitelist").contains("./b.txt"));
        assert!(load_section(text, "deletelist").contains("./b.txt"));
        assert!(load_section(text, "post_put_list").is_empty());
    }

    #[test]
    fn crlf_lines_match() {
        let text = "[whitelist]\r\n./a.txt\r\n";

        assert!(load_section(text, "whitelist").contains("./a.txt"));
    }
}
