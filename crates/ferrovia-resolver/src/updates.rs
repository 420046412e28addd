//! Pure version-comparison logic for the "is a newer version available"
//! question, independent of how a caller edits a manifest in response.

use crate::version::MavenVersion;

/// Select the best version to move a direct dependency to.
///
/// Without `allow_major`, stays within the current major version. Prefers
/// the repository's release/latest marker when it passes the filters,
/// otherwise falls back to the highest matching entry in `versions`.
pub fn find_best_update(
    current: &str,
    release: &Option<String>,
    versions: &[String],
    allow_major: bool,
) -> Option<String> {
    let current_v = MavenVersion::parse(current);
    let current_major = major_segment(current);

    let mut candidates: Vec<(&str, MavenVersion)> = versions
        .iter()
        .filter_map(|v| {
            if is_prerelease(v) {
                return None;
            }
            let mv = MavenVersion::parse(v);
            if mv > current_v {
                Some((v.as_str(), mv))
            } else {
                None
            }
        })
        .collect();

    if !allow_major {
        if let Some(cm) = current_major {
            candidates.retain(|(v, _)| major_segment(v) == Some(cm));
        }
    }

    if let Some(ref r) = release {
        let rv = MavenVersion::parse(r);
        if rv > current_v {
            let passes_major =
                allow_major || current_major.map_or(true, |cm| major_segment(r) == Some(cm));
            if passes_major && !is_prerelease(r) {
                candidates.push((r.as_str(), rv));
            }
        }
    }

    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates.first().map(|(v, _)| v.to_string())
}

/// Whether the first numeric segment differs between two version strings.
pub fn is_major_bump(current: &str, latest: &str) -> bool {
    match (major_segment(current), major_segment(latest)) {
        (Some(c), Some(l)) => c != l,
        _ => false,
    }
}

/// Heuristic prerelease detection for version strings that won't parse into
/// a structured Maven qualifier but still clearly mark a prerelease.
pub fn is_prerelease(version: &str) -> bool {
    let lower = version.to_lowercase();
    lower.contains("-snapshot")
        || lower.contains("-alpha")
        || lower.contains("-beta")
        || lower.contains("-rc")
        || lower.contains("-dev")
        || lower.contains("-eap")
        || lower.contains("-m")
}

fn major_segment(version: &str) -> Option<u64> {
    version.split('.').next().and_then(|s| s.parse().ok())
}
