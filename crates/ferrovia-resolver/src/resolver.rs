//! Core dependency resolution algorithm: nearest-wins BFS, scope composition,
//! exclusions, optional dependency handling, parent POM inheritance, BOM
//! imports, and version range selection.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use ferrovia_core::dependency::{Dependency, DependencyScope, MavenCoordinate};
use ferrovia_core::lockfile::Lockfile;
use ferrovia_core::manifest::Manifest;
use ferrovia_maven::cache::LocalCache;
use ferrovia_maven::pom::Pom;
use ferrovia_maven::repository::MavenRepository;
use ferrovia_maven::{download, metadata};
use reqwest::Client;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::conflict::{ConflictReport, VersionConflict};
use crate::exclusions::ExclusionSet;
use crate::graph::{DepEdge, DependencyGraph, ResolvedNode};
use crate::scopes;
use crate::version::{MavenVersion, VersionRange};

const MAX_CONCURRENT_FETCHES: usize = 8;

/// The output of dependency resolution.
pub struct ResolutionResult {
    pub graph: DependencyGraph,
    pub conflicts: ConflictReport,
    /// All resolved artifacts as flat coordinates for lockfile generation.
    pub artifacts: Vec<ResolvedArtifact>,
    /// All versions requested for each `group:artifact` during resolution.
    /// Artifacts with more than one entry were requested at multiple versions.
    pub version_requests: HashMap<String, HashSet<String>>,
}

/// A single resolved artifact with its source repository.
#[derive(Debug, Clone)]
pub struct ResolvedArtifact {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub classifier: Option<String>,
    pub scope: DependencyScope,
    pub source: String,
    pub checksum: Option<String>,
    pub dependencies: Vec<ArtifactRef>,
}

/// A reference to a dependency within a resolved artifact.
#[derive(Debug, Clone)]
pub struct ArtifactRef {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

/// Entry in the BFS queue.
struct QueueEntry {
    group: String,
    artifact: String,
    version: String,
    classifier: Option<String>,
    scope: DependencyScope,
    depth: usize,
    parent_key: Option<String>,
    exclusions: ExclusionSet,
}

/// Resolve all dependencies declared in a manifest.
///
/// Uses BFS with Maven's "nearest wins" strategy, Table T1 scope composition,
/// wildcard-capable exclusion propagation, a root-level `dependency-management`
/// override that pins a transitive version regardless of the depth at which
/// it's otherwise reached, parent POM inheritance, and version range
/// selection against each artifact's published metadata.
pub async fn resolve(
    manifest: &Manifest,
    repos: &[MavenRepository],
    cache: &LocalCache,
    lockfile: Option<&Lockfile>,
    client: &Client,
) -> miette::Result<ResolutionResult> {
    let mut graph = DependencyGraph::new();
    let mut conflicts = ConflictReport::new();

    let root = graph.add_node(ResolvedNode {
        group: manifest.package.group.clone().unwrap_or_default(),
        artifact: manifest.package.name.clone(),
        version: manifest.package.version.clone(),
        scope: DependencyScope::Compile,
        classifier: None,
    });
    graph.set_root(root);

    // Collect direct deps. `dependencies` activates at compile scope,
    // `dev-dependencies` at test scope; there is no separate build-processor
    // or per-target section at this layer.
    let mut direct_deps: Vec<(MavenCoordinate, DependencyScope, ExclusionSet)> = Vec::new();
    for (name, dep) in &manifest.dependencies {
        if let Some(mut coord) = resolve_dep_coordinate(dep, name, manifest) {
            if looks_like_range(&coord.version) {
                coord.version =
                    resolve_version_selector(client, repos, &coord.group_id, &coord.artifact_id, &coord.version)
                        .await?;
            }
            let scope = detailed_scope(dep).unwrap_or(DependencyScope::Compile);
            direct_deps.push((coord, scope, direct_exclusions(dep)));
        }
    }
    for (name, dep) in &manifest.dev_dependencies {
        if let Some(mut coord) = resolve_dep_coordinate(dep, name, manifest) {
            if looks_like_range(&coord.version) {
                coord.version =
                    resolve_version_selector(client, repos, &coord.group_id, &coord.artifact_id, &coord.version)
                        .await?;
            }
            direct_deps.push((coord, DependencyScope::Test, direct_exclusions(dep)));
        }
    }

    // Root-level dependency-management: pins a version for a given
    // `group:artifact` regardless of where in the tree it's reached.
    let root_management: HashMap<String, String> = manifest
        .dependency_management
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    // Build lock index and determine which subtrees are stale.
    // Direct deps always use the manifest version. If a direct dep's version
    // differs from the lockfile, its entire transitive subtree is re-resolved.
    let direct_coords: Vec<(MavenCoordinate, DependencyScope)> = direct_deps
        .iter()
        .map(|(c, s, _)| (c.clone(), *s))
        .collect();
    let full_lock_index = build_lock_index(lockfile);
    let stale_keys = compute_stale_keys(&direct_coords, lockfile);
    let locked_versions: HashMap<String, String> = full_lock_index
        .into_iter()
        .filter(|(k, _)| !stale_keys.contains(k))
        .collect();

    let mut queue: VecDeque<QueueEntry> = VecDeque::new();
    let mut resolved: HashMap<String, (String, usize)> = HashMap::new();
    let mut version_requests: HashMap<String, HashSet<String>> = HashMap::new();
    let mut pom_cache: HashMap<String, Pom> = HashMap::new();

    let direct_keys: HashSet<String> = direct_deps
        .iter()
        .map(|(c, _, _)| format!("{}:{}", c.group_id, c.artifact_id))
        .collect();

    for (coord, scope, exclusions) in direct_deps {
        queue.push_back(QueueEntry {
            group: coord.group_id,
            artifact: coord.artifact_id,
            version: coord.version,
            classifier: coord.classifier,
            scope,
            depth: 1,
            parent_key: None,
            exclusions,
        });
    }

    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_FETCHES));

    while !queue.is_empty() {
        // Drain the current depth level from the front of the queue
        let current_depth = queue.front().map(|e| e.depth).unwrap_or(0);
        let mut level: Vec<QueueEntry> = Vec::new();
        while queue.front().is_some_and(|e| e.depth == current_depth) {
            level.push(queue.pop_front().unwrap());
        }

        // Prefetch POMs (and their parent chains) for this level in parallel
        let coords_to_fetch: Vec<(String, String, String)> = level
            .iter()
            .map(|e| (e.group.clone(), e.artifact.clone(), e.version.clone()))
            .filter(|(g, a, v)| {
                let k = format!("{g}:{a}:{v}");
                !pom_cache.contains_key(&k)
            })
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        if !coords_to_fetch.is_empty() {
            let mut join_set = JoinSet::new();
            for (group, artifact, version) in coords_to_fetch {
                let client = client.clone();
                let repos = repos.to_vec();
                let cache_root = cache.root().to_path_buf();
                let sem = semaphore.clone();
                join_set.spawn(async move {
                    let _permit = sem.acquire().await;
                    let local_cache = LocalCache::from_root(cache_root);
                    let result = fetch_pom_with_parents(
                        &client,
                        &repos,
                        &local_cache,
                        &group,
                        &artifact,
                        &version,
                    )
                    .await;
                    (format!("{group}:{artifact}:{version}"), result)
                });
            }
            while let Some(result) = join_set.join_next().await {
                match result {
                    Ok((coord_key, Ok(Some(pom)))) => {
                        pom_cache.insert(coord_key, pom);
                    }
                    Ok((_, Err(e))) => return Err(e),
                    _ => {}
                }
            }
        }

        // Process entries at this depth level
        for entry in level {
            let dep_key = format!("{}:{}", entry.group, entry.artifact);
            let key = identity_key(&entry.group, &entry.artifact, entry.classifier.as_deref());

            version_requests
                .entry(dep_key.clone())
                .or_default()
                .insert(entry.version.clone());

            if let Some((existing_ver, existing_depth)) = resolved.get(&key) {
                if *existing_depth <= entry.depth {
                    if *existing_ver != entry.version {
                        conflicts.add(VersionConflict {
                            group: entry.group.clone(),
                            artifact: entry.artifact.clone(),
                            requested: entry.version.clone(),
                            resolved: existing_ver.clone(),
                            reason: format!(
                                "nearest wins (depth {} vs {})",
                                existing_depth, entry.depth
                            ),
                        });
                    }
                    continue;
                }
            }

            resolved.insert(key.clone(), (entry.version.clone(), entry.depth));

            let node = graph.add_node(ResolvedNode {
                group: entry.group.clone(),
                artifact: entry.artifact.clone(),
                version: entry.version.clone(),
                scope: entry.scope,
                classifier: entry.classifier.clone(),
            });

            if let Some(ref parent_key) = entry.parent_key {
                if let Some(parent_idx) = graph.find(parent_key) {
                    graph.add_edge(
                        parent_idx,
                        node,
                        DepEdge {
                            scope: entry.scope,
                            optional: false,
                        },
                    );
                }
            } else {
                graph.add_edge(
                    root,
                    node,
                    DepEdge {
                        scope: entry.scope,
                        optional: false,
                    },
                );
            }

            let coord_key = format!("{}:{}:{}", entry.group, entry.artifact, entry.version);
            let pom = pom_cache.get(&coord_key).cloned();

            if let Some(mut pom) = pom {
                pom.resolve_properties()?;

                // Expand BOM imports (scope=import, type=pom entries in
                // dependencyManagement) before consulting managed versions.
                for bom_ref in pom.bom_imports().into_iter().cloned().collect::<Vec<_>>() {
                    let bom_version = bom_ref
                        .version
                        .clone()
                        .unwrap_or_else(|| entry.version.clone());
                    if let Ok(Some(mut bom)) = fetch_pom_with_parents(
                        client,
                        repos,
                        cache,
                        &bom_ref.group_id,
                        &bom_ref.artifact_id,
                        &bom_version,
                    )
                    .await
                    {
                        bom.resolve_properties()?;
                        pom.apply_bom_import(&bom);
                    }
                }

                for dep in pom.effective_dependencies(entry.scope.active_scopes()) {
                    if entry.exclusions.matches(&dep.group_id, &dep.artifact_id) {
                        continue;
                    }

                    let child_dep_key = format!("{}:{}", dep.group_id, dep.artifact_id);

                    let version = dep.version.clone().unwrap_or_default();
                    if version.is_empty() {
                        continue;
                    }

                    let version = if let Some(pinned) = root_management.get(&child_dep_key) {
                        pinned.clone()
                    } else if !direct_keys.contains(&child_dep_key) {
                        locked_versions.get(&child_dep_key).cloned().unwrap_or(version)
                    } else {
                        version
                    };

                    let version = if looks_like_range(&version) {
                        resolve_version_selector(client, repos, &dep.group_id, &dep.artifact_id, &version)
                            .await?
                    } else {
                        version
                    };

                    let dep_scope = DependencyScope::parse(dep.scope.as_deref().unwrap_or("compile"))
                        .unwrap_or(DependencyScope::Compile);
                    let Some(propagated_scope) = scopes::compose(entry.scope, dep_scope) else {
                        continue;
                    };

                    let mut child_exclusions = entry.exclusions.clone();
                    for excl in &dep.exclusions {
                        if let Some(ref art) = excl.artifact_id {
                            child_exclusions.insert(format!("{}:{}", excl.group_id, art));
                        } else {
                            child_exclusions.insert(excl.group_id.clone());
                        }
                    }

                    queue.push_back(QueueEntry {
                        group: dep.group_id.clone(),
                        artifact: dep.artifact_id.clone(),
                        version,
                        classifier: dep.classifier.clone(),
                        scope: propagated_scope,
                        depth: entry.depth + 1,
                        parent_key: Some(key.clone()),
                        exclusions: child_exclusions,
                    });
                }
            }
        }
    }

    // Build flat artifact list for lockfile
    let artifacts = build_artifact_list(&graph, repos);

    Ok(ResolutionResult {
        graph,
        conflicts,
        artifacts,
        version_requests,
    })
}

/// `group:artifact[:classifier]` identity key, matching [`ResolvedNode::key`].
fn identity_key(group: &str, artifact: &str, classifier: Option<&str>) -> String {
    match classifier {
        Some(c) => format!("{group}:{artifact}:{c}"),
        None => format!("{group}:{artifact}"),
    }
}

/// Whether a version string is a Maven range selector rather than a bare version.
fn looks_like_range(version: &str) -> bool {
    let v = version.trim();
    v.starts_with('[') || v.starts_with('(')
}

/// Resolve a Maven version range selector (e.g. `[1.0,2.0)`) to a concrete
/// version by picking the highest published version satisfying the range.
///
/// Tries each repository's artifact-level metadata in order and returns the
/// selector unchanged if none yields a match, so a range that can't be
/// resolved surfaces downstream as a literal (and invalid) version rather
/// than silently failing resolution here.
async fn resolve_version_selector(
    client: &Client,
    repos: &[MavenRepository],
    group: &str,
    artifact: &str,
    selector: &str,
) -> miette::Result<String> {
    let Some(range) = VersionRange::parse(selector) else {
        return Ok(selector.to_string());
    };

    for repo in repos {
        let url = repo.metadata_url(group, artifact);
        let Some(xml) = download::download_text(client, repo, &url).await? else {
            continue;
        };
        let Ok(meta) = metadata::parse_metadata(&xml) else {
            continue;
        };
        let best = meta
            .versions
            .iter()
            .map(|v| MavenVersion::parse(v))
            .filter(|v| range.contains(v))
            .max();
        if let Some(best) = best {
            return Ok(best.to_string());
        }
    }

    Ok(selector.to_string())
}

/// Fetch a POM and walk its parent chain, merging ancestor properties and
/// `dependencyManagement` down into the child with nearest-parent-wins
/// precedence. Guards against a cyclic parent chain with `CyclicParent`.
async fn fetch_pom_with_parents(
    client: &Client,
    repos: &[MavenRepository],
    cache: &LocalCache,
    group: &str,
    artifact: &str,
    version: &str,
) -> miette::Result<Option<Pom>> {
    let Some(mut pom) =
        fetch_pom_from_repos(client, repos, cache, group, artifact, version).await?
    else {
        return Ok(None);
    };

    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(format!("{group}:{artifact}:{version}"));

    let mut chain: Vec<Pom> = Vec::new();
    let mut next_parent = pom.parent.clone();
    while let Some(parent_ref) = next_parent.take() {
        let parent_key = format!(
            "{}:{}:{}",
            parent_ref.group_id, parent_ref.artifact_id, parent_ref.version
        );
        if !visited.insert(parent_key.clone()) {
            return Err(ferrovia_util::errors::FerroviaError::CyclicParent {
                coordinate: parent_key,
            }
            .into());
        }
        let Some(parent_pom) = fetch_pom_from_repos(
            client,
            repos,
            cache,
            &parent_ref.group_id,
            &parent_ref.artifact_id,
            &parent_ref.version,
        )
        .await?
        else {
            break;
        };
        next_parent = parent_pom.parent.clone();
        chain.push(parent_pom);
    }

    // Fold from the furthest ancestor down so a nearer parent's own
    // inheritance from its ancestors is resolved before it's merged into the
    // child, matching Maven's nearest-parent-wins semantics.
    let mut effective_ancestor: Option<Pom> = None;
    for ancestor in chain.into_iter().rev() {
        let mut ancestor = ancestor;
        if let Some(ref eff) = effective_ancestor {
            ancestor.apply_parent(eff);
        }
        effective_ancestor = Some(ancestor);
    }
    if let Some(eff) = effective_ancestor {
        pom.apply_parent(&eff);
    }

    Ok(Some(pom))
}

/// The scope declared directly on a `DetailedDependency`, if any.
fn detailed_scope(dep: &Dependency) -> Option<DependencyScope> {
    match dep {
        Dependency::Detailed(d) => d.scope,
        _ => None,
    }
}

/// The exclusion set declared directly on a manifest dependency.
fn direct_exclusions(dep: &Dependency) -> ExclusionSet {
    let mut set = ExclusionSet::new();
    if let Dependency::Detailed(d) = dep {
        for excl in &d.exclusions {
            match &excl.artifact {
                Some(artifact) => set.insert(format!("{}:{}", excl.group, artifact)),
                None => set.insert(excl.group.clone()),
            }
        }
    }
    set
}

/// Resolve a `Dependency` enum to `MavenCoordinate`.
fn resolve_dep_coordinate(
    dep: &Dependency,
    _name: &str,
    manifest: &Manifest,
) -> Option<MavenCoordinate> {
    match dep {
        Dependency::Short(s) => MavenCoordinate::parse(s),
        Dependency::Detailed(d) => Some(MavenCoordinate {
            group_id: d.group.clone(),
            artifact_id: d.artifact.clone(),
            version: d.version.clone(),
            classifier: d.classifier.clone(),
        }),
        Dependency::Catalog(c) => {
            let catalog = manifest.catalog.as_ref()?;
            let lib = catalog.libraries.get(&c.catalog)?;
            let version = if let Some(ref vref) = lib.version_ref {
                catalog.versions.get(vref).cloned().unwrap_or_default()
            } else {
                lib.version.clone().unwrap_or_default()
            };
            Some(MavenCoordinate {
                group_id: lib.group.clone(),
                artifact_id: lib.artifact.clone(),
                version,
                classifier: None,
            })
        }
    }
}

/// Build a lookup from `group:artifact` to locked version.
fn build_lock_index(lockfile: Option<&Lockfile>) -> HashMap<String, String> {
    let mut index = HashMap::new();
    if let Some(lf) = lockfile {
        for pkg in &lf.package {
            index.insert(format!("{}:{}", pkg.group, pkg.name), pkg.version.clone());
        }
    }
    index
}

/// Identify all lockfile entries that are stale because a direct dependency changed.
///
/// Walks the lockfile's dependency graph starting from changed direct deps
/// to find their entire transitive subtree. These entries must be re-resolved
/// from POMs rather than pinned from the lockfile.
fn compute_stale_keys(
    direct_deps: &[(MavenCoordinate, DependencyScope)],
    lockfile: Option<&Lockfile>,
) -> HashSet<String> {
    let mut stale = HashSet::new();
    let lf = match lockfile {
        Some(lf) => lf,
        None => return stale,
    };

    // Build adjacency list from lockfile
    let mut children: HashMap<String, Vec<String>> = HashMap::new();
    for pkg in &lf.package {
        let key = format!("{}:{}", pkg.group, pkg.name);
        let deps: Vec<String> = pkg
            .dependencies
            .iter()
            .map(|d| format!("{}:{}", d.group, d.name))
            .collect();
        children.insert(key, deps);
    }

    // Find direct deps whose version changed vs lockfile
    let mut roots: Vec<String> = Vec::new();
    for (coord, _) in direct_deps {
        let key = format!("{}:{}", coord.group_id, coord.artifact_id);
        let locked_ver = lf.locked_version(&coord.group_id, &coord.artifact_id);
        match locked_ver {
            Some(v) if v == coord.version => {} // unchanged
            _ => roots.push(key),               // changed or new
        }
    }

    // BFS from changed roots to mark their subtrees stale
    let mut visit_queue: VecDeque<String> = roots.into_iter().collect();
    while let Some(key) = visit_queue.pop_front() {
        if !stale.insert(key.clone()) {
            continue;
        }
        if let Some(deps) = children.get(&key) {
            for dep in deps {
                if !stale.contains(dep) {
                    visit_queue.push_back(dep.clone());
                }
            }
        }
    }

    stale
}

/// Fetch a POM from the first repository that has it, without following its
/// parent chain. See [`fetch_pom_with_parents`] for the parent-aware variant
/// used on the live resolution path.
async fn fetch_pom_from_repos(
    client: &Client,
    repos: &[MavenRepository],
    cache: &LocalCache,
    group: &str,
    artifact: &str,
    version: &str,
) -> miette::Result<Option<Pom>> {
    // Check cache first
    if let Some(pom) = cache.get_pom(group, artifact, version) {
        return Ok(Some(pom));
    }

    for repo in repos {
        match cache
            .fetch_pom(client, repo, group, artifact, version)
            .await?
        {
            Some(pom) => return Ok(Some(pom)),
            None => continue,
        }
    }

    Ok(None)
}

/// Build a flat list of resolved artifacts from the graph.
fn build_artifact_list(graph: &DependencyGraph, repos: &[MavenRepository]) -> Vec<ResolvedArtifact> {
    let mut artifacts = Vec::new();
    for node in graph.all_nodes() {
        let source = repos.first().map(|r| r.url.clone()).unwrap_or_default();

        let node_idx = match graph.find(&node.key()) {
            Some(idx) => idx,
            None => continue,
        };
        let deps: Vec<ArtifactRef> = graph
            .dependencies_of(node_idx)
            .iter()
            .map(|(idx, _)| {
                let child = graph.node(*idx);
                ArtifactRef {
                    group: child.group.clone(),
                    artifact: child.artifact.clone(),
                    version: child.version.clone(),
                }
            })
            .collect();

        artifacts.push(ResolvedArtifact {
            group: node.group.clone(),
            artifact: node.artifact.clone(),
            version: node.version.clone(),
            classifier: node.classifier.clone(),
            scope: node.scope,
            source,
            checksum: None,
            dependencies: deps,
        });
    }

    artifacts.sort_by(|a, b| (&a.group, &a.artifact).cmp(&(&b.group, &b.artifact)));
    artifacts
}

/// Build the list of repositories from a manifest, always including Maven Central.
pub fn build_repos(manifest: &Manifest) -> Vec<MavenRepository> {
    let mut repos = Vec::new();
    for (name, entry) in &manifest.repositories {
        repos.push(MavenRepository::from_entry(name, entry));
    }
    if repos.is_empty()
        || !repos
            .iter()
            .any(|r| r.url.contains("repo.maven.apache.org"))
    {
        repos.push(MavenRepository::maven_central());
    }
    repos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_short_dep() {
        let dep =
            Dependency::Short("org.jetbrains.kotlinx:kotlinx-coroutines-core:1.8.0".to_string());
        let manifest = Manifest::parse_toml(
            r#"
[package]
name = "test"
version = "0.1.0"
"#,
        )
        .unwrap();
        let coord = resolve_dep_coordinate(&dep, "coroutines", &manifest).unwrap();
        assert_eq!(coord.group_id, "org.jetbrains.kotlinx");
        assert_eq!(coord.artifact_id, "kotlinx-coroutines-core");
        assert_eq!(coord.version, "1.8.0");
        assert_eq!(coord.classifier, None);
    }

    #[test]
    fn lock_index_lookup() {
        let lockfile = Lockfile {
            package: vec![ferrovia_core::lockfile::LockedPackage {
                name: "kotlinx-coroutines-core".to_string(),
                group: "org.jetbrains.kotlinx".to_string(),
                version: "1.8.0".to_string(),
                checksum: None,
                source: None,
                scope: None,
                dependencies: vec![],
            }],
        };
        let idx = build_lock_index(Some(&lockfile));
        assert_eq!(
            idx.get("org.jetbrains.kotlinx:kotlinx-coroutines-core"),
            Some(&"1.8.0".to_string())
        );
    }

    #[test]
    fn build_repos_includes_central() {
        let manifest = Manifest::parse_toml(
            r#"
[package]
name = "test"
version = "0.1.0"
"#,
        )
        .unwrap();
        let repos = build_repos(&manifest);
        assert!(!repos.is_empty());
        assert!(repos.iter().any(|r| r.url.contains("maven.apache.org")));
    }

    #[test]
    fn compute_stale_keys_marks_changed_direct_dep_subtree() {
        let lockfile = Lockfile {
            package: vec![
                ferrovia_core::lockfile::LockedPackage {
                    name: "lib".to_string(),
                    group: "org.example".to_string(),
                    version: "1.0".to_string(),
                    checksum: None,
                    source: None,
                    scope: None,
                    dependencies: vec![ferrovia_core::lockfile::LockedDependencyRef {
                        name: "child".to_string(),
                        group: "org.example".to_string(),
                        version: "1.0".to_string(),
                    }],
                },
                ferrovia_core::lockfile::LockedPackage {
                    name: "child".to_string(),
                    group: "org.example".to_string(),
                    version: "1.0".to_string(),
                    checksum: None,
                    source: None,
                    scope: None,
                    dependencies: vec![],
                },
            ],
        };
        let direct = vec![(
            MavenCoordinate {
                group_id: "org.example".to_string(),
                artifact_id: "lib".to_string(),
                version: "2.0".to_string(),
                classifier: None,
            },
            DependencyScope::Compile,
        )];
        let stale = compute_stale_keys(&direct, Some(&lockfile));
        assert!(stale.contains("org.example:lib"));
        assert!(stale.contains("org.example:child"));
    }

    fn seed_pom(cache: &LocalCache, group: &str, artifact: &str, version: &str, xml: &str) {
        cache.put_pom(group, artifact, version, xml).unwrap();
    }

    fn manifest_with_dep(dep_toml: &str) -> Manifest {
        Manifest::parse_toml(&format!(
            r#"
[package]
name = "app"
version = "0.1.0"

[dependencies]
{dep_toml}
"#
        ))
        .unwrap()
    }

    /// S4: a transitive dependency reached at two different depths resolves
    /// to the version declared nearer the root.
    #[tokio::test]
    async fn s4_nearest_wins_across_depths() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(tmp.path());
        let repo = MavenRepository::maven_central();
        let client = download::build_client().unwrap();

        seed_pom(
            &cache,
            "com.example",
            "near",
            "1.0",
            r#"<?xml version="1.0"?>
<project>
  <groupId>com.example</groupId>
  <artifactId>near</artifactId>
  <version>1.0</version>
  <dependencies>
    <dependency>
      <groupId>com.example</groupId>
      <artifactId>shared</artifactId>
      <version>2.0</version>
    </dependency>
  </dependencies>
</project>"#,
        );
        seed_pom(
            &cache,
            "com.example",
            "far",
            "1.0",
            r#"<?xml version="1.0"?>
<project>
  <groupId>com.example</groupId>
  <artifactId>far</artifactId>
  <version>1.0</version>
  <dependencies>
    <dependency>
      <groupId>com.example</groupId>
      <artifactId>middle</artifactId>
      <version>1.0</version>
    </dependency>
  </dependencies>
</project>"#,
        );
        seed_pom(
            &cache,
            "com.example",
            "middle",
            "1.0",
            r#"<?xml version="1.0"?>
<project>
  <groupId>com.example</groupId>
  <artifactId>middle</artifactId>
  <version>1.0</version>
  <dependencies>
    <dependency>
      <groupId>com.example</groupId>
      <artifactId>shared</artifactId>
      <version>1.0</version>
    </dependency>
  </dependencies>
</project>"#,
        );
        seed_pom(
            &cache,
            "com.example",
            "shared",
            "1.0",
            r#"<?xml version="1.0"?>
<project>
  <groupId>com.example</groupId>
  <artifactId>shared</artifactId>
  <version>1.0</version>
</project>"#,
        );
        seed_pom(
            &cache,
            "com.example",
            "shared",
            "2.0",
            r#"<?xml version="1.0"?>
<project>
  <groupId>com.example</groupId>
  <artifactId>shared</artifactId>
  <version>2.0</version>
</project>"#,
        );

        let manifest = manifest_with_dep(
            r#"near = "com.example:near:1.0"
far = "com.example:far:1.0""#,
        );
        let repos = vec![repo];
        let result = resolve(&manifest, &repos, &cache, None, &client).await.unwrap();

        let shared = result
            .artifacts
            .iter()
            .find(|a| a.artifact == "shared")
            .unwrap();
        assert_eq!(shared.version, "2.0", "the depth-1 declaration should win");
    }

    /// S5: a `test`-scoped direct dependency composes with its own compile-scoped
    /// transitive dependency to stay test-scoped (Table T1), not silently
    /// widen to compile.
    #[tokio::test]
    async fn s5_scope_composes_through_bfs() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(tmp.path());
        let repo = MavenRepository::maven_central();
        let client = download::build_client().unwrap();

        seed_pom(
            &cache,
            "com.example",
            "test-fixture",
            "1.0",
            r#"<?xml version="1.0"?>
<project>
  <groupId>com.example</groupId>
  <artifactId>test-fixture</artifactId>
  <version>1.0</version>
  <dependencies>
    <dependency>
      <groupId>com.example</groupId>
      <artifactId>fixture-support</artifactId>
      <version>1.0</version>
    </dependency>
  </dependencies>
</project>"#,
        );
        seed_pom(
            &cache,
            "com.example",
            "fixture-support",
            "1.0",
            r#"<?xml version="1.0"?>
<project>
  <groupId>com.example</groupId>
  <artifactId>fixture-support</artifactId>
  <version>1.0</version>
</project>"#,
        );

        let manifest = Manifest::parse_toml(
            r#"
[package]
name = "app"
version = "0.1.0"

[dev-dependencies]
fixture = "com.example:test-fixture:1.0"
"#,
        )
        .unwrap();
        let repos = vec![repo];
        let result = resolve(&manifest, &repos, &cache, None, &client).await.unwrap();

        let support = result
            .artifacts
            .iter()
            .find(|a| a.artifact == "fixture-support")
            .unwrap();
        assert_eq!(support.scope, DependencyScope::Test);
    }

    /// S6: a wildcard exclusion pattern (`org.*:*`) drops an entire
    /// organization's transitive artifacts from the subtree it's declared on.
    #[tokio::test]
    async fn s6_wildcard_exclusion_drops_matching_subtree() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(tmp.path());
        let repo = MavenRepository::maven_central();
        let client = download::build_client().unwrap();

        seed_pom(
            &cache,
            "com.example",
            "uses-legacy-logging",
            "1.0",
            r#"<?xml version="1.0"?>
<project>
  <groupId>com.example</groupId>
  <artifactId>uses-legacy-logging</artifactId>
  <version>1.0</version>
  <dependencies>
    <dependency>
      <groupId>org.legacy</groupId>
      <artifactId>logging-core</artifactId>
      <version>1.0</version>
    </dependency>
    <dependency>
      <groupId>org.legacy</groupId>
      <artifactId>logging-adapter</artifactId>
      <version>1.0</version>
    </dependency>
  </dependencies>
</project>"#,
        );
        seed_pom(
            &cache,
            "org.legacy",
            "logging-core",
            "1.0",
            r#"<?xml version="1.0"?>
<project>
  <groupId>org.legacy</groupId>
  <artifactId>logging-core</artifactId>
  <version>1.0</version>
</project>"#,
        );
        seed_pom(
            &cache,
            "org.legacy",
            "logging-adapter",
            "1.0",
            r#"<?xml version="1.0"?>
<project>
  <groupId>org.legacy</groupId>
  <artifactId>logging-adapter</artifactId>
  <version>1.0</version>
</project>"#,
        );

        let manifest = Manifest::parse_toml(
            r#"
[package]
name = "app"
version = "0.1.0"

[dependencies.lib]
group = "com.example"
artifact = "uses-legacy-logging"
version = "1.0"

[[dependencies.lib.exclusions]]
group = "org.*"
artifact = "*"
"#,
        )
        .unwrap();
        let repos = vec![repo];
        let result = resolve(&manifest, &repos, &cache, None, &client).await.unwrap();

        assert!(!result.artifacts.iter().any(|a| a.group == "org.legacy"));
    }

    /// S7: a BOM import's managed version is picked up for a dependency that
    /// declares no version of its own.
    #[tokio::test]
    async fn s7_bom_import_supplies_managed_version() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(tmp.path());
        let repo = MavenRepository::maven_central();
        let client = download::build_client().unwrap();

        seed_pom(
            &cache,
            "com.example",
            "platform-bom",
            "1.0",
            r#"<?xml version="1.0"?>
<project>
  <groupId>com.example</groupId>
  <artifactId>platform-bom</artifactId>
  <version>1.0</version>
  <packaging>pom</packaging>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>com.example</groupId>
        <artifactId>web</artifactId>
        <version>3.0</version>
      </dependency>
    </dependencies>
  </dependencyManagement>
</project>"#,
        );
        seed_pom(
            &cache,
            "com.example",
            "app-core",
            "1.0",
            r#"<?xml version="1.0"?>
<project>
  <groupId>com.example</groupId>
  <artifactId>app-core</artifactId>
  <version>1.0</version>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>com.example</groupId>
        <artifactId>platform-bom</artifactId>
        <version>1.0</version>
        <type>pom</type>
        <scope>import</scope>
      </dependency>
    </dependencies>
  </dependencyManagement>
  <dependencies>
    <dependency>
      <groupId>com.example</groupId>
      <artifactId>web</artifactId>
    </dependency>
  </dependencies>
</project>"#,
        );

        let manifest = manifest_with_dep(r#"core = "com.example:app-core:1.0""#);
        let repos = vec![repo];
        let result = resolve(&manifest, &repos, &cache, None, &client).await.unwrap();

        let web = result.artifacts.iter().find(|a| a.artifact == "web").unwrap();
        assert_eq!(web.version, "3.0");
    }
}
