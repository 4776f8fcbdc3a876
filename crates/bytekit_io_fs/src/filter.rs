//! Directory-entry name predicates.

use globset::{Glob, GlobMatcher};
use regex::Regex;

use crate::spec::{EnumPatternMode, FilterBuildError, SpecEntryFilter};

/// Decide whether a directory entry name belongs in a listing.
///
/// Implementations are pure: no side effects, safe to call repeatedly and
/// from several threads.
pub trait EntryFilter: Send + Sync {
    /// `true` to keep `name_entry`.
    fn accept(&self, name_entry: &str) -> bool;
}

impl<F> EntryFilter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn accept(&self, name_entry: &str) -> bool {
        self(name_entry)
    }
}

////////////////////////////////////////////////////////////////////////////////
// #region SuffixFilter

/// Accept names ending with one of a fixed set of suffixes.
#[derive(Debug, Clone)]
pub struct SuffixEntryFilter {
    l_suffixes: Vec<String>,
    if_case_sensitive: bool,
}

impl SuffixEntryFilter {
    /// Build from a [`SpecEntryFilter`].
    ///
    /// Empty suffixes are dropped: `""` would otherwise match every name.
    pub fn new(spec_filter: SpecEntryFilter) -> Self {
        let if_case_sensitive = spec_filter.if_case_sensitive;
        let l_suffixes = spec_filter
            .suffixes
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(|s| if if_case_sensitive { s } else { s.to_lowercase() })
            .collect();
        Self {
            l_suffixes,
            if_case_sensitive,
        }
    }

    /// Normalized suffixes in use.
    pub fn suffixes(&self) -> &[String] {
        &self.l_suffixes
    }
}

impl EntryFilter for SuffixEntryFilter {
    fn accept(&self, name_entry: &str) -> bool {
        if self.l_suffixes.is_empty() {
            return false;
        }
        if self.if_case_sensitive {
            return self.l_suffixes.iter().any(|s| name_entry.ends_with(s.as_str()));
        }
        let name_lower = name_entry.to_lowercase();
        self.l_suffixes.iter().any(|s| name_lower.ends_with(s.as_str()))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region PatternFilter

#[derive(Debug, Clone)]
enum TypePatternSeq {
    Literal(Vec<String>),
    Glob(Vec<GlobMatcher>),
    Regex(Vec<Regex>),
}

/// Accept names matching any glob, regex or literal-substring pattern.
#[derive(Debug, Clone)]
pub struct PatternEntryFilter {
    patterns: TypePatternSeq,
}

impl PatternEntryFilter {
    /// Compile `patterns` under `rule_pattern`. An empty list accepts nothing.
    pub fn from_patterns(
        patterns: &[String],
        rule_pattern: EnumPatternMode,
    ) -> Result<Self, FilterBuildError> {
        let patterns = match rule_pattern {
            EnumPatternMode::Literal => TypePatternSeq::Literal(patterns.to_vec()),
            EnumPatternMode::Glob => {
                let mut l_glob = Vec::with_capacity(patterns.len());
                for pattern in patterns {
                    let matcher = Glob::new(pattern)
                        .map_err(|e| {
                            FilterBuildError::InvalidPattern(format!("Invalid glob pattern: {e}"))
                        })?
                        .compile_matcher();
                    l_glob.push(matcher);
                }
                TypePatternSeq::Glob(l_glob)
            }
            EnumPatternMode::Regex => {
                let mut l_regex = Vec::with_capacity(patterns.len());
                for pattern in patterns {
                    let regex = Regex::new(pattern).map_err(|e| {
                        FilterBuildError::InvalidPattern(format!("Invalid regex pattern: {e}"))
                    })?;
                    l_regex.push(regex);
                }
                TypePatternSeq::Regex(l_regex)
            }
        };
        Ok(Self { patterns })
    }
}

impl EntryFilter for PatternEntryFilter {
    fn accept(&self, name_entry: &str) -> bool {
        match &self.patterns {
            TypePatternSeq::Literal(v) => v.iter().any(|p| name_entry.contains(p.as_str())),
            TypePatternSeq::Glob(v) => v.iter().any(|p| p.is_match(name_entry)),
            TypePatternSeq::Regex(v) => v.iter().any(|p| p.is_match(name_entry)),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{EntryFilter, PatternEntryFilter, SuffixEntryFilter};
    use crate::spec::{EnumPatternMode, FilterBuildError, SpecEntryFilter};

    fn build_suffix(suffixes: &[&str], if_case_sensitive: bool) -> SuffixEntryFilter {
        SuffixEntryFilter::new(SpecEntryFilter::from_suffixes(
            suffixes.iter().copied(),
            if_case_sensitive,
        ))
    }

    #[test]
    fn suffix_filter_matches_suffix() {
        let filter = build_suffix(&[".txt"], true);
        assert!(filter.accept("a.txt"));
        assert!(!filter.accept("a.txt.bak"));
    }

    #[test]
    fn suffix_filter_honors_case_flag() {
        assert!(!build_suffix(&[".txt"], true).accept("a.TXT"));
        assert!(build_suffix(&[".txt"], false).accept("a.TXT"));
        assert!(build_suffix(&[".JPG"], false).accept("photo.jpg"));
    }

    #[test]
    fn suffix_filter_rejects_name_shorter_than_suffix() {
        assert!(!build_suffix(&[".txt"], true).accept("a"));
        assert!(!build_suffix(&[".txt"], false).accept(""));
    }

    #[test]
    fn suffix_filter_empty_set_accepts_nothing() {
        let filter = build_suffix(&[], true);
        assert!(!filter.accept("a.txt"));
        assert!(!filter.accept(""));

        let filter = build_suffix(&[""], false);
        assert!(filter.suffixes().is_empty());
        assert!(!filter.accept("anything"));
    }

    #[test]
    fn suffix_filter_any_of_several() {
        let filter = build_suffix(&[".txt", ".JPG"], true);
        assert!(filter.accept("notes.txt"));
        assert!(filter.accept("walden.JPG"));
        assert!(!filter.accept("walden.jpg"));
    }

    #[test]
    fn closures_are_entry_filters() {
        let filter = |name: &str| name.starts_with('.');
        assert!(filter.accept(".git"));
        assert!(!EntryFilter::accept(&filter, "src"));
    }

    #[test]
    fn pattern_filter_glob_regex_literal() {
        let filter = PatternEntryFilter::from_patterns(&["*.rs".to_string()], EnumPatternMode::Glob)
            .expect("glob");
        assert!(filter.accept("lib.rs"));
        assert!(!filter.accept("lib.rs.orig"));

        let filter =
            PatternEntryFilter::from_patterns(&[r"^a\d+\.txt$".to_string()], EnumPatternMode::Regex)
                .expect("regex");
        assert!(filter.accept("a12.txt"));
        assert!(!filter.accept("ab.txt"));

        let filter =
            PatternEntryFilter::from_patterns(&["walden".to_string()], EnumPatternMode::Literal)
                .expect("literal");
        assert!(filter.accept("walden-out.jpg"));
        assert!(!filter.accept("thoreau.jpg"));
    }

    #[test]
    fn pattern_filter_empty_accepts_nothing() {
        let filter = PatternEntryFilter::from_patterns(&[], EnumPatternMode::Glob).expect("empty");
        assert!(!filter.accept("a.txt"));
    }

    #[test]
    fn pattern_filter_invalid_patterns_rejected() {
        let res = PatternEntryFilter::from_patterns(&["[".to_string()], EnumPatternMode::Regex);
        assert!(matches!(res, Err(FilterBuildError::InvalidPattern(_))));
        let res = PatternEntryFilter::from_patterns(&["a[".to_string()], EnumPatternMode::Glob);
        assert!(matches!(res, Err(FilterBuildError::InvalidPattern(_))));
    }
}
