//! Operation: check for outdated direct dependencies.

use std::path::Path;

use ferrovia_core::manifest::Manifest;
use ferrovia_maven::download;
use ferrovia_maven::metadata;
use ferrovia_resolver::resolver;
use ferrovia_resolver::updates::is_major_bump;
use ferrovia_resolver::version::MavenVersion;

/// Options for `ferrovia outdated`.
#[derive(Default)]
pub struct OutdatedOptions {
    /// Include major version bumps.
    pub major: bool,
}

/// A single outdated dependency entry.
struct OutdatedEntry {
    group: String,
    artifact: String,
    current: String,
    latest: String,
    is_major: bool,
    section: &'static str,
}

/// Check direct dependencies for available updates and print a report.
pub async fn outdated(project_root: &Path, opts: &OutdatedOptions) -> miette::Result<()> {
    let manifest_path = project_root.join("Ferrovia.toml");
    let manifest = Manifest::from_path(&manifest_path)?;
    let repos = resolver::build_repos(&manifest);
    let sp = ferrovia_util::progress::spinner("Checking for outdated dependencies...");
    let client = download::build_client()?;

    let declared = collect_declared_deps_with_section(&manifest);

    let mut entries: Vec<OutdatedEntry> = Vec::new();

    for (group, artifact, version, section) in &declared {
        for repo in &repos {
            let url = repo.metadata_url(group, artifact);
            let xml = download::download_text(&client, repo, &url).await?;
            if let Some(xml) = xml {
                if let Ok(meta) = metadata::parse_metadata(&xml) {
                    if let Some(latest) = meta.stable_latest() {
                        let current = MavenVersion::parse(version);
                        let latest_v = MavenVersion::parse(latest);
                        if latest_v > current {
                            let is_major = is_major_bump(version, latest);
                            entries.push(OutdatedEntry {
                                group: group.clone(),
                                artifact: artifact.clone(),
                                current: version.clone(),
                                latest: latest.to_string(),
                                is_major,
                                section,
                            });
                        }
                    }
                }
                break;
            }
        }
    }

    sp.finish_and_clear();

    if entries.is_empty() {
        ferrovia_util::progress::status("Outdated", "all dependencies are up to date");
        return Ok(());
    }

    println!(
        "{:<50} {:<15} {:<15} Section",
        "Dependency", "Current", "Latest"
    );
    println!("{}", "-".repeat(90));

    for entry in &entries {
        if !opts.major && entry.is_major {
            continue;
        }
        let name = format!("{}:{}", entry.group, entry.artifact);
        let marker = if entry.is_major { " (major)" } else { "" };
        println!(
            "{:<50} {:<15} {:<15} {}{}",
            name, entry.current, entry.latest, entry.section, marker
        );
    }

    Ok(())
}

/// Collect direct dependencies with their section label for display.
fn collect_declared_deps_with_section(
    manifest: &Manifest,
) -> Vec<(String, String, String, &'static str)> {
    use ferrovia_core::dependency::{Dependency, MavenCoordinate};

    let mut declared = Vec::new();

    let extract = |dep: &Dependency| -> Option<(String, String, String)> {
        match dep {
            Dependency::Short(s) => {
                let coord = MavenCoordinate::parse(s)?;
                Some((coord.group_id, coord.artifact_id, coord.version))
            }
            Dependency::Detailed(d) => {
                Some((d.group.clone(), d.artifact.clone(), d.version.clone()))
            }
            Dependency::Catalog(_) => None,
        }
    };

    for dep in manifest.dependencies.values() {
        if let Some((g, a, v)) = extract(dep) {
            declared.push((g, a, v, "dependencies"));
        }
    }
    for dep in manifest.dev_dependencies.values() {
        if let Some((g, a, v)) = extract(dep) {
            declared.push((g, a, v, "dev-dependencies"));
        }
    }
    declared
}
