//! Maven version parsing, comparison, and range matching.
//!
//! Maven versions use a custom ordering that differs from semver:
//! - Segments are split on `.` and `-`
//! - Numeric segments compare as numbers
//! - String qualifiers have a special ordering:
//!   `alpha` < `beta` < `milestone` < `rc` < `snapshot` < `""` (release) < `sp`
//! - SNAPSHOT versions sort before their release equivalent

use std::cmp::Ordering;
use std::fmt;

/// A parsed Maven version with comparable segments.
///
/// `unknown` distinguishes the sentinel value used where no version is
/// known at all (as opposed to a version that failed structured parsing,
/// which is still a comparable generic version). It sorts below every
/// other value, including generic ones.
#[derive(Debug, Clone)]
pub struct MavenVersion {
    pub original: String,
    segments: Vec<Segment>,
    unknown: bool,
}

impl PartialEq for MavenVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MavenVersion {}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Segment {
    Numeric(u64),
    /// A known qualifier, with any trailing digits (`"sp1"` -> `(Sp, 1)`) as
    /// a secondary ordering key.
    Qualifier(QualifierKind, u64),
    Text(String),
}

/// Well-known Maven qualifiers with defined ordering.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
enum QualifierKind {
    Alpha,
    Beta,
    Milestone,
    Rc,
    Snapshot,
    Release,
    Sp,
}

impl MavenVersion {
    pub fn parse(version: &str) -> Self {
        let segments = parse_segments(version);
        Self {
            original: version.to_string(),
            segments,
            unknown: false,
        }
    }

    /// A distinguished sentinel that compares below every real version,
    /// including other generic (unparseable) ones.
    pub fn unknown() -> Self {
        Self {
            original: String::new(),
            segments: Vec::new(),
            unknown: true,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.unknown
    }

    pub fn is_snapshot(&self) -> bool {
        self.original.ends_with("-SNAPSHOT") || is_timestamped_snapshot(&self.original)
    }

    /// The base version without the `-SNAPSHOT` suffix.
    pub fn base_version(&self) -> &str {
        self.original
            .strip_suffix("-SNAPSHOT")
            .unwrap_or(&self.original)
    }

    /// Replace (or append) this version's qualifier, returning a new version.
    ///
    /// `1.0.withQualifier("SNAPSHOT") == 1.0-SNAPSHOT`; `1.0-rc1.withQualifier("beta")
    /// == 1.0-beta`.
    pub fn with_qualifier(&self, qualifier: &str) -> Self {
        if self.unknown {
            return Self::parse(qualifier);
        }
        let mut numeric_part = String::new();
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                Segment::Numeric(n) => {
                    if i > 0 {
                        numeric_part.push('.');
                    }
                    numeric_part.push_str(&n.to_string());
                }
                _ => break,
            }
        }
        let base = if numeric_part.is_empty() {
            self.base_version().to_string()
        } else {
            numeric_part
        };
        Self::parse(&format!("{base}-{qualifier}"))
    }
}

/// Matches Maven's timestamped SNAPSHOT filename qualifier: `-yyyyMMdd.HHmmss-N`.
fn is_timestamped_snapshot(version: &str) -> bool {
    let Some((rest, build)) = version.rsplit_once('-') else {
        return false;
    };
    let Some((_, timestamp)) = rest.rsplit_once('-') else {
        return false;
    };
    !build.is_empty()
        && build.chars().all(|c| c.is_ascii_digit())
        && timestamp.len() == 15
        && timestamp.as_bytes().get(8) == Some(&b'.')
        && timestamp[..8].chars().all(|c| c.is_ascii_digit())
        && timestamp[9..].chars().all(|c| c.is_ascii_digit())
}

impl fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Ord for MavenVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.unknown, other.unknown) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        let max_len = self.segments.len().max(other.segments.len());
        for i in 0..max_len {
            let a = self.segments.get(i);
            let b = other.segments.get(i);
            let ord = compare_segments(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for MavenVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn compare_segments(a: Option<&Segment>, b: Option<&Segment>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(s), None) => compare_segment_to_empty(s),
        (None, Some(s)) => compare_segment_to_empty(s).reverse(),
        (Some(a), Some(b)) => compare_two_segments(a, b),
    }
}

fn compare_segment_to_empty(seg: &Segment) -> Ordering {
    match seg {
        Segment::Numeric(0) => Ordering::Equal,
        Segment::Numeric(n) => {
            if *n > 0 {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        Segment::Qualifier(q, n) => (*q, *n).cmp(&(QualifierKind::Release, 0)),
        Segment::Text(s) if s.is_empty() => Ordering::Equal,
        Segment::Text(_) => Ordering::Less,
    }
}

fn compare_two_segments(a: &Segment, b: &Segment) -> Ordering {
    match (a, b) {
        (Segment::Numeric(a), Segment::Numeric(b)) => a.cmp(b),
        (Segment::Qualifier(qa, na), Segment::Qualifier(qb, nb)) => (*qa, *na).cmp(&(*qb, *nb)),
        (Segment::Numeric(_), Segment::Qualifier(..)) => Ordering::Greater,
        (Segment::Qualifier(..), Segment::Numeric(_)) => Ordering::Less,
        (Segment::Numeric(_), Segment::Text(_)) => Ordering::Greater,
        (Segment::Text(_), Segment::Numeric(_)) => Ordering::Less,
        (Segment::Text(a), Segment::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Segment::Qualifier(q, _), Segment::Text(_)) => {
            if *q >= QualifierKind::Release {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (Segment::Text(_), Segment::Qualifier(q, _)) => {
            if *q >= QualifierKind::Release {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
    }
}

fn parse_segments(version: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for ch in version.chars() {
        if ch == '.' || ch == '-' {
            if !current.is_empty() {
                segments.push(classify(&current));
                current.clear();
            }
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        segments.push(classify(&current));
    }

    segments
}

fn classify(token: &str) -> Segment {
    if let Ok(n) = token.parse::<u64>() {
        return Segment::Numeric(n);
    }
    let lower = token.to_lowercase();
    let (alpha, digits) = split_qualifier(&lower);
    match alpha {
        "alpha" | "a" => Segment::Qualifier(QualifierKind::Alpha, digits),
        "beta" | "b" => Segment::Qualifier(QualifierKind::Beta, digits),
        "milestone" | "m" => Segment::Qualifier(QualifierKind::Milestone, digits),
        "rc" | "cr" => Segment::Qualifier(QualifierKind::Rc, digits),
        "snapshot" => Segment::Qualifier(QualifierKind::Snapshot, digits),
        "" | "ga" | "final" | "release" => Segment::Qualifier(QualifierKind::Release, digits),
        "sp" => Segment::Qualifier(QualifierKind::Sp, digits),
        _ => Segment::Text(token.to_string()),
    }
}

/// Split a lowercased token into its leading alphabetic qualifier name and
/// trailing numeric key, e.g. `"sp1"` -> `("sp", 1)`, `"rc"` -> `("rc", 0)`.
/// Tokens with no trailing digit run, or no leading alphabetic run, are
/// returned unsplit with a zero secondary key.
fn split_qualifier(token: &str) -> (&str, u64) {
    let digit_start = token.find(|c: char| c.is_ascii_digit());
    match digit_start {
        Some(idx) if idx > 0 && token[idx..].chars().all(|c| c.is_ascii_digit()) => {
            let digits = token[idx..].parse().unwrap_or(0);
            (&token[..idx], digits)
        }
        _ => (token, 0),
    }
}

/// A Maven version range expression.
///
/// Supports: `[1.0,2.0)`, `[1.0,]`, `(,2.0)`, `[1.0]` (exact).
#[derive(Debug, Clone)]
pub struct VersionRange {
    pub lower: Option<Bound>,
    pub upper: Option<Bound>,
}

#[derive(Debug, Clone)]
pub struct Bound {
    pub version: MavenVersion,
    pub inclusive: bool,
}

impl VersionRange {
    /// Parse a Maven version range string.
    ///
    /// Returns `None` for bare versions (not a range).
    pub fn parse(spec: &str) -> Option<Self> {
        let s = spec.trim();
        if !s.starts_with('[') && !s.starts_with('(') {
            return None;
        }

        let open_inclusive = s.starts_with('[');
        let close_inclusive = s.ends_with(']');
        let inner = &s[1..s.len() - 1];

        if let Some((lower, upper)) = inner.split_once(',') {
            let lower = lower.trim();
            let upper = upper.trim();
            Some(VersionRange {
                lower: if lower.is_empty() {
                    None
                } else {
                    Some(Bound {
                        version: MavenVersion::parse(lower),
                        inclusive: open_inclusive,
                    })
                },
                upper: if upper.is_empty() {
                    None
                } else {
                    Some(Bound {
                        version: MavenVersion::parse(upper),
                        inclusive: close_inclusive,
                    })
                },
            })
        } else {
            // Exact version: [1.0] means exactly 1.0
            let v = MavenVersion::parse(inner.trim());
            Some(VersionRange {
                lower: Some(Bound {
                    version: v.clone(),
                    inclusive: true,
                }),
                upper: Some(Bound {
                    version: v,
                    inclusive: true,
                }),
            })
        }
    }

    /// Check if a version satisfies this range.
    pub fn contains(&self, version: &MavenVersion) -> bool {
        if let Some(ref lower) = self.lower {
            let cmp = version.cmp(&lower.version);
            if lower.inclusive {
                if cmp == Ordering::Less {
                    return false;
                }
            } else if cmp != Ordering::Greater {
                return false;
            }
        }
        if let Some(ref upper) = self.upper {
            let cmp = version.cmp(&upper.version);
            if upper.inclusive {
                if cmp == Ordering::Greater {
                    return false;
                }
            } else if cmp != Ordering::Less {
                return false;
            }
        }
        true
    }
}
