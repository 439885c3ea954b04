//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Following CLI recommendations,
//! errors should tell users what went wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Configuration file not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::config_not_found(path));
//! ```

use crate::validator::Vcs;
use std::path::Path;

/// Generate an error for when the configuration file is not found.
///
/// Includes hints about:
/// - Creating a new config file
/// - Using the -c/--config flag
/// - Using the VCSPULL_CONFIG environment variable
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Create a ~/.vcspull.yaml file\n\
         hint: Use -c/--config to specify a different path\n\
         hint: Set VCSPULL_CONFIG environment variable",
        path = path.display()
    )
}

/// Generate an error for when no configuration file could be discovered.
///
/// Includes hints about the discovery locations.
pub fn no_config_found() -> anyhow::Error {
    anyhow::anyhow!(
        "No configuration file found\n\n\
         hint: Create a ~/.vcspull.yaml file\n\
         hint: Config files are also discovered in $XDG_CONFIG_HOME/vcspull/\n\
         hint: Use -c/--config to specify a path explicitly"
    )
}

/// Suggest a valid VCS type for a typo like `gti` or `mercurial`.
///
/// Returns Some(name) if a close match is found among git/hg/svn.
pub fn similar_vcs(input: &str) -> Option<&'static str> {
    find_similar(&input.to_lowercase(), &Vcs::NAMES)
}

/// Suggest the prefixed form of a URL whose VCS type cannot be inferred.
pub fn protocol_prefix_suggestion(url: &str) -> String {
    if url.is_empty() {
        return "add a vcs field or prefix the url with git+, hg+, or svn+".to_string();
    }
    format!(
        "prefix the url, e.g. git+{url}, or add an explicit vcs field",
        url = url
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
pub fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
