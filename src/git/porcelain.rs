//! Parser for `git blame --line-porcelain` output.
//!
//! Each line of the blamed file is introduced by a header
//! `<40-hex sha> <orig-line> <final-line> [<group-size>]`, followed by
//! key/value attribution lines, and terminated by the line content itself
//! prefixed with a tab.

/// Attribution for one physical line of a blamed file.
#[derive(Debug, Clone, PartialEq)]
pub struct BlameLine {
    /// Full 40-character commit id
    pub commit: String,
    pub author: String,
    /// Line content without the leading tab
    pub content: String,
}

fn is_header(line: &str) -> Option<&str> {
    let (sha, rest) = line.split_at_checked(40)?;
    if sha.chars().all(|c| c.is_ascii_hexdigit()) && rest.starts_with(' ') {
        Some(sha)
    } else {
        None
    }
}

/// Parse porcelain output into one `BlameLine` per line of the file.
///
/// Headers without a terminating content line are dropped; a missing
/// `author` field falls back to `"Unknown"`.
pub fn parse(output: &str) -> Vec<BlameLine> {
    let lines: Vec<&str> = output.split('\n').collect();
    let mut results = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(sha) = is_header(lines[i]) else {
            i += 1;
            continue;
        };
        let commit = sha.to_string();
        let mut author: Option<String> = None;
        i += 1;
        while i < lines.len() && !lines[i].starts_with('\t') {
            if let Some(name) = lines[i].strip_prefix("author ") {
                author = Some(name.to_string());
            }
            i += 1;
        }
        if i < lines.len() {
            results.push(BlameLine {
                commit,
                author: author.unwrap_or_else(|| "Unknown".to_string()),
                content: lines[i][1..].to_string(),
            });
        }
        i += 1;
    }

    results
}
