//! Wildcard-capable exclusion matching: a dependency's exclusion list can
//! name an exact `group:artifact`, a bare `group` (any artifact), or either
//! half with a `*` glob, e.g. `org.*:*` to drop an entire organization's
//! artifacts from a subtree.

use std::collections::HashSet;

/// A set of exclusion patterns accumulated along a BFS path.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    patterns: HashSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern: `"group"`, `"group:artifact"`, or either half
    /// carrying `*` globs.
    pub fn insert(&mut self, pattern: String) {
        self.patterns.insert(pattern);
    }

    /// Whether a concrete `group:artifact` is excluded by any registered pattern.
    pub fn matches(&self, group: &str, artifact: &str) -> bool {
        self.patterns.iter().any(|p| pattern_matches(p, group, artifact))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn pattern_matches(pattern: &str, group: &str, artifact: &str) -> bool {
    match pattern.split_once(':') {
        Some((g, a)) => glob_match(g, group) && glob_match(a, artifact),
        None => glob_match(pattern, group),
    }
}

/// Match `text` against a glob `pattern` where `*` stands for any run of
/// characters (including empty). No other glob metacharacters are supported.
fn glob_match(pattern: &str, text: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == text;
    }

    let anchored_start = !pattern.starts_with('*');
    let anchored_end = !pattern.ends_with('*');
    let segments: Vec<&str> = pattern.split('*').filter(|s| !s.is_empty()).collect();

    if segments.is_empty() {
        return true; // pattern is just "*" (or repeats of it)
    }

    let mut rest = text;
    for (i, seg) in segments.iter().enumerate() {
        let is_first = i == 0;
        let is_last = i == segments.len() - 1;

        if is_first && anchored_start {
            if !rest.starts_with(seg) {
                return false;
            }
            rest = &rest[seg.len()..];
        } else if is_last && anchored_end {
            if !rest.ends_with(seg) {
                return false;
            }
            rest = &rest[..rest.len() - seg.len()];
        } else {
            match rest.find(seg) {
                Some(idx) => rest = &rest[idx + seg.len()..],
                None => return false,
            }
        }
    }

    true
}
