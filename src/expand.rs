//! # Shorthand Expansion
//!
//! Normalizes shorthand repository definitions into the full record shape.
//! A bare URL string becomes a `RawRepositoryRecord` with the VCS type
//! inferred from the URL prefix (`git+`, `hg+`, `svn+`) and the checkout
//! path defaulted to base-path/name. Expansion is idempotent: re-running it
//! on an already-expanded record is a no-op.
//!
//! URLs with no recognized prefix keep `vcs` unset; the validator reports
//! those as `MissingProtocolPrefix` so the whole document can still be
//! checked in one pass.

use crate::config::{ConfigSection, RawConfigDocument, RawRepository, RawRepositoryRecord};

/// Known VCS prefixes paired with the type they imply, checked
/// case-sensitively. Ordered so the longest match wins.
pub const VCS_PREFIXES: [(&str, &str); 3] = [("git+", "git"), ("svn+", "svn"), ("hg+", "hg")];

/// Infer the VCS type from a URL's prefix, longest match first.
pub fn infer_vcs(url: &str) -> Option<&'static str> {
    VCS_PREFIXES
        .iter()
        .filter(|(prefix, _)| url.starts_with(prefix))
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(_, vcs)| *vcs)
}

/// Default checkout path for a repository: base-path joined with name.
///
/// Plain string join; `~`/`$VAR` expansion and `..` resolution happen in
/// the normalizer during validation.
pub fn default_path(base_path: &str, name: &str) -> String {
    if base_path.ends_with('/') {
        format!("{}{}", base_path, name)
    } else {
        format!("{}/{}", base_path, name)
    }
}

/// Expand one repository definition into the full record shape.
pub fn expand(repo: &RawRepository, base_path: &str, name: &str) -> RawRepositoryRecord {
    let mut record = match repo {
        RawRepository::Shorthand(url) => RawRepositoryRecord {
            name: name.to_string(),
            url: Some(url.clone()),
            ..Default::default()
        },
        RawRepository::Record(record) => record.clone(),
    };

    if record.name.is_empty() {
        record.name = name.to_string();
    }
    if record.vcs.is_none() {
        record.vcs = record.url.as_deref().and_then(infer_vcs).map(String::from);
    }
    if record.path.is_none() {
        record.path = Some(default_path(base_path, name));
    }

    record
}

/// Expand every repository definition in a document.
pub fn expand_document(doc: &RawConfigDocument) -> RawConfigDocument {
    let sections = doc
        .sections
        .iter()
        .map(|section| ConfigSection {
            base_path: section.base_path.clone(),
            repos: section
                .repos
                .iter()
                .map(|(name, repo)| {
                    let record = expand(repo, &section.base_path, name);
                    (name.clone(), RawRepository::Record(record))
                })
                .collect(),
        })
        .collect();

    RawConfigDocument {
        source: doc.source.clone(),
        sections,
        includes: doc.includes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_vcs() {
        assert_eq!(infer_vcs("git+https://example.com/r.git"), Some("git"));
        assert_eq!(infer_vcs("hg+https://example.com/r"), Some("hg"));
        assert_eq!(infer_vcs("svn+https://example.com/r"), Some("svn"));
        assert_eq!(infer_vcs("https://example.com/r.git"), None);
        // Case-sensitive: uppercase prefixes do not match.
        assert_eq!(infer_vcs("GIT+https://example.com/r.git"), None);
    }

    #[test]
    fn test_default_path() {
        assert_eq!(default_path("/repos", "flask"), "/repos/flask");
        assert_eq!(default_path("/repos/", "flask"), "/repos/flask");
        assert_eq!(default_path("~/projects", "flask"), "~/projects/flask");
    }

    #[test]
    fn test_expand_shorthand() {
        let repo = RawRepository::Shorthand("git+https://host/x.git".to_string());
        let record = expand(&repo, "/repos", "x");

        assert_eq!(record.name, "x");
        assert_eq!(record.vcs.as_deref(), Some("git"));
        assert_eq!(record.path.as_deref(), Some("/repos/x"));
        assert_eq!(record.url.as_deref(), Some("git+https://host/x.git"));
    }

    #[test]
    fn test_expand_keeps_explicit_fields() {
        let repo = RawRepository::Record(RawRepositoryRecord {
            vcs: Some("hg".to_string()),
            name: "x".to_string(),
            path: Some("/elsewhere/x".to_string()),
            url: Some("git+https://host/x.git".to_string()),
            ..Default::default()
        });
        let record = expand(&repo, "/repos", "x");

        // Explicit vcs and path win over inference and defaulting.
        assert_eq!(record.vcs.as_deref(), Some("hg"));
        assert_eq!(record.path.as_deref(), Some("/elsewhere/x"));
    }

    #[test]
    fn test_expand_no_prefix_leaves_vcs_unset() {
        let repo = RawRepository::Shorthand("https://host/x.git".to_string());
        let record = expand(&repo, "/repos", "x");
        assert_eq!(record.vcs, None);
    }

    #[test]
    fn test_expand_is_idempotent() {
        let repo = RawRepository::Shorthand("git+https://host/x.git".to_string());
        let once = expand(&repo, "/repos", "x");
        let twice = expand(&RawRepository::Record(once.clone()), "/repos", "x");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_expand_document() {
        let value: serde_yaml::Value = serde_yaml::from_str(
            r#"
/repos:
  a: git+https://host/a.git
  b:
    url: hg+https://host/b
"#,
        )
        .unwrap();
        let doc = crate::config::to_raw(value, None).unwrap();
        let expanded = expand_document(&doc);

        for (name, repo) in &expanded.sections[0].repos {
            match repo {
                RawRepository::Record(record) => {
                    assert_eq!(&record.name, name);
                    assert!(record.vcs.is_some());
                    assert!(record.path.is_some());
                }
                RawRepository::Shorthand(_) => panic!("Expected expanded record"),
            }
        }
    }
}
