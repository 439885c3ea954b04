//! Property-based tests for shorthand expansion and normalization.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::config::{RawRepository, RawRepositoryRecord};
    use crate::environment::FakeEnvironment;
    use crate::expand::{default_path, expand, infer_vcs};
    use crate::normalize::{lexical_normalize, percent_decode, split_vcs_prefix};
    use proptest::prelude::*;
    use std::path::{Component, Path};

    // ============================================================================
    // expansion property tests
    // ============================================================================

    proptest! {
        /// Property: expansion is idempotent
        #[test]
        fn expand_is_idempotent(
            url in "[a-z+:/.]{1,40}",
            base in "/[a-z/]{1,20}",
            name in "[a-z0-9-]{1,20}",
        ) {
            let once = expand(&RawRepository::Shorthand(url), &base, &name);
            let twice = expand(&RawRepository::Record(once.clone()), &base, &name);
            prop_assert_eq!(once, twice);
        }

        /// Property: expansion always fills name and path
        #[test]
        fn expand_fills_name_and_path(
            url in "[a-z+:/.]{1,40}",
            base in "/[a-z/]{1,20}",
            name in "[a-z0-9-]{1,20}",
        ) {
            let record = expand(&RawRepository::Shorthand(url), &base, &name);
            prop_assert_eq!(record.name, name);
            prop_assert!(record.path.is_some());
        }

        /// Property: explicit fields survive expansion unchanged
        #[test]
        fn expand_never_overwrites_explicit_fields(
            vcs in "[a-z]{1,10}",
            path in "/[a-z/]{1,20}",
            name in "[a-z0-9-]{1,20}",
        ) {
            let record = RawRepositoryRecord {
                vcs: Some(vcs.clone()),
                name: name.clone(),
                path: Some(path.clone()),
                url: Some("git+https://host/x.git".to_string()),
                ..Default::default()
            };
            let expanded = expand(&RawRepository::Record(record), "/base", &name);
            prop_assert_eq!(expanded.vcs.as_deref(), Some(vcs.as_str()));
            prop_assert_eq!(expanded.path.as_deref(), Some(path.as_str()));
        }

        /// Property: inferred vcs matches the prefix split
        #[test]
        fn infer_vcs_agrees_with_prefix_split(url in "[a-z+:/.]{0,40}") {
            let inferred = infer_vcs(&url);
            let (split, _) = split_vcs_prefix(&url);
            prop_assert_eq!(inferred, split);
        }

        /// Property: default_path ends with the repository name
        #[test]
        fn default_path_ends_with_name(
            base in "/[a-z/]{1,20}",
            name in "[a-z0-9-]{1,20}",
        ) {
            let path = default_path(&base, &name);
            let suffix = format!("/{}", name);
            prop_assert!(path.ends_with(&suffix));
        }
    }

    // ============================================================================
    // normalization property tests
    // ============================================================================

    proptest! {
        /// Property: a normalized absolute path contains no dot segments
        #[test]
        fn lexical_normalize_removes_dot_segments(path in "/[a-z./]{1,40}") {
            let normalized = lexical_normalize(Path::new(&path));
            for component in normalized.components() {
                prop_assert!(!matches!(component, Component::CurDir));
                prop_assert!(!matches!(component, Component::ParentDir));
            }
        }

        /// Property: normalization is idempotent
        #[test]
        fn lexical_normalize_is_idempotent(path in "[a-z./]{1,40}") {
            let once = lexical_normalize(Path::new(&path));
            let twice = lexical_normalize(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: percent_decode never grows the string
        #[test]
        fn percent_decode_never_grows(input in "[a-zA-Z0-9%/._-]{0,60}") {
            prop_assert!(percent_decode(&input).len() <= input.len());
        }

        /// Property: strings without % decode to themselves
        #[test]
        fn percent_decode_without_escapes_is_identity(input in "[a-zA-Z0-9/._-]{0,60}") {
            prop_assert_eq!(percent_decode(&input), input);
        }
    }

    // ============================================================================
    // environment expansion property tests
    // ============================================================================

    proptest! {
        /// Property: text without $ or ~ passes through env expansion
        #[test]
        fn expand_env_vars_without_refs_is_identity(input in "[a-zA-Z0-9/._-]{0,40}") {
            let env = FakeEnvironment::new();
            prop_assert_eq!(crate::normalize::expand_env_vars(&input, &env), input);
        }

        /// Property: unset variables are preserved verbatim
        #[test]
        fn expand_env_vars_preserves_unset(name in "[A-Z_][A-Z0-9_]{0,10}") {
            let env = FakeEnvironment::new();
            let input = format!("/prefix/${{{}}}/suffix", name);
            prop_assert_eq!(crate::normalize::expand_env_vars(&input, &env), input);
        }
    }
}
