//! Operation: update direct dependencies to their latest compatible versions.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use ferrovia_core::manifest::Manifest;
use ferrovia_maven::download;
use ferrovia_maven::metadata;
use ferrovia_resolver::resolver;
use ferrovia_resolver::updates::find_best_update;
use toml_edit::{DocumentMut, Item, Value};

/// Options for `ferrovia update`.
#[derive(Default)]
pub struct UpdateOptions {
    /// Allow major version bumps.
    pub major: bool,
    /// Only update a specific dependency (artifact name or group:artifact).
    pub dep: Option<String>,
    /// Dry-run: show what would be updated without changing files.
    pub dry_run: bool,
}

struct UpdateEntry {
    key: String,
    group: String,
    artifact: String,
    old_version: String,
    new_version: String,
    section: String,
}

/// Update dependencies in `Ferrovia.toml` to their latest versions, then re-resolve.
pub async fn update(project_root: &Path, opts: &UpdateOptions) -> miette::Result<()> {
    let manifest_path = project_root.join("Ferrovia.toml");
    let manifest = Manifest::from_path(&manifest_path)?;
    let repos = resolver::build_repos(&manifest);
    let sp = ferrovia_util::progress::spinner("Checking for updates...");
    let client = download::build_client()?;

    let declared = collect_updatable_deps(&manifest);

    let semaphore = Arc::new(Semaphore::new(8));
    let mut join_set = JoinSet::new();

    for (toml_key, group, artifact, current_version, section) in declared {
        if let Some(ref filter) = opts.dep {
            let matches = filter == &artifact
                || filter == &toml_key
                || *filter == format!("{group}:{artifact}");
            if !matches {
                continue;
            }
        }

        let repos = repos.clone();
        let client = client.clone();
        let sem = semaphore.clone();
        let allow_major = opts.major;

        join_set.spawn(async move {
            let _permit = sem.acquire().await.unwrap();
            for repo in &repos {
                let url = repo.metadata_url(&group, &artifact);
                match download::download_text(&client, repo, &url).await {
                    Ok(Some(xml)) => {
                        if let Ok(meta) = metadata::parse_metadata(&xml) {
                            let best = find_best_update(
                                &current_version,
                                &meta.release.or(meta.latest),
                                &meta.versions,
                                allow_major,
                            );
                            if let Some(new_version) = best {
                                return Ok(Some(UpdateEntry {
                                    key: toml_key,
                                    group,
                                    artifact,
                                    old_version: current_version,
                                    new_version,
                                    section,
                                }));
                            }
                        }
                        break;
                    }
                    Ok(None) => continue,
                    Err(e) => return Err(e),
                }
            }
            Ok(None)
        });
    }

    let mut updates: Vec<UpdateEntry> = Vec::new();
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok(Ok(Some(entry))) => updates.push(entry),
            Ok(Err(e)) => return Err(e),
            Ok(Ok(None)) => {}
            Err(e) => return Err(miette::miette!("Background task failed: {}", e)),
        }
    }

    sp.finish_and_clear();

    if updates.is_empty() {
        ferrovia_util::progress::status("Updated", "all dependencies at latest compatible version");
        return Ok(());
    }

    for u in &updates {
        let arrow = if opts.dry_run {
            "would update"
        } else {
            "updated"
        };
        let label = format!("{}:{}", u.group, u.artifact);
        eprintln!(
            "  {} {} {} -> {} [{}]",
            arrow, label, u.old_version, u.new_version, u.section
        );
    }

    if opts.dry_run {
        return Ok(());
    }

    let content = std::fs::read_to_string(&manifest_path).map_err(|e| {
        ferrovia_util::errors::FerroviaError::Manifest {
            message: format!("Failed to read Ferrovia.toml: {e}"),
        }
    })?;

    let mut doc: DocumentMut =
        content
            .parse()
            .map_err(|e| ferrovia_util::errors::FerroviaError::Manifest {
                message: format!("Failed to parse Ferrovia.toml: {e}"),
            })?;

    for u in &updates {
        match u.section.as_str() {
            "dependencies" => {
                let new_coord = format!("{}:{}:{}", u.group, u.artifact, u.new_version);
                doc["dependencies"][&u.key] = Item::Value(Value::from(new_coord));
            }
            "dev-dependencies" => {
                let new_coord = format!("{}:{}:{}", u.group, u.artifact, u.new_version);
                doc["dev-dependencies"][&u.key] = Item::Value(Value::from(new_coord));
            }
            _ => {}
        }
    }

    std::fs::write(&manifest_path, doc.to_string()).map_err(ferrovia_util::errors::FerroviaError::Io)?;

    eprintln!("Re-resolving dependencies...");
    crate::ops_fetch::fetch(project_root, false).await?;

    eprintln!("Updated {} dependencies.", updates.len());
    Ok(())
}

/// Collect updatable direct dependencies: `(toml_key, group, artifact, version, section)`.
fn collect_updatable_deps(manifest: &Manifest) -> Vec<(String, String, String, String, String)> {
    use ferrovia_core::dependency::{Dependency, MavenCoordinate};

    let mut deps = Vec::new();

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

    for (key, dep) in &manifest.dependencies {
        if let Some((g, a, v)) = extract(dep) {
            deps.push((key.clone(), g, a, v, "dependencies".to_string()));
        }
    }
    for (key, dep) in &manifest.dev_dependencies {
        if let Some((g, a, v)) = extract(dep) {
            deps.push((key.clone(), g, a, v, "dev-dependencies".to_string()));
        }
    }

    deps
}
