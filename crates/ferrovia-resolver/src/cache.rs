//! Artifact retrieval abstraction and resolution-session caching.
//!
//! The BFS resolver needs a single thing to ask "give me the POM for this
//! coordinate": try the local cache, then each configured repository in
//! turn. [`ArtifactRetriever`] is that abstraction; [`HttpRetriever`] is the
//! default implementation wrapping `ferrovia_maven`'s download/cache
//! functions. On top of it, negative-lookup caching remembers coordinates
//! that no repository had, so a single resolution session never re-asks the
//! same repos about the same miss twice.

use std::collections::HashSet;
use std::sync::Mutex;

use ferrovia_maven::cache::LocalCache;
use ferrovia_maven::pom::Pom;
use ferrovia_maven::repository::MavenRepository;
use reqwest::Client;

use ferrovia_util::errors::FerroviaError;

/// Fetches a POM for a coordinate from wherever it lives: local cache,
/// then each repository in priority order.
pub trait ArtifactRetriever {
    async fn fetch_pom(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
    ) -> miette::Result<Pom>;
}

/// Default retriever: local on-disk cache backed by HTTP repositories,
/// with negative-lookup caching for coordinates no repository has.
pub struct HttpRetriever<'a> {
    client: Client,
    repos: &'a [MavenRepository],
    local_cache: LocalCache,
    misses: Mutex<HashSet<String>>,
}

impl<'a> HttpRetriever<'a> {
    pub fn new(client: Client, repos: &'a [MavenRepository], local_cache: LocalCache) -> Self {
        Self {
            client,
            repos,
            local_cache,
            misses: Mutex::new(HashSet::new()),
        }
    }

    fn miss_key(group: &str, artifact: &str, version: &str) -> String {
        format!("{group}:{artifact}:{version}")
    }
}

impl ArtifactRetriever for HttpRetriever<'_> {
    async fn fetch_pom(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
    ) -> miette::Result<Pom> {
        let key = Self::miss_key(group, artifact, version);
        if self.misses.lock().unwrap().contains(&key) {
            return Err(FerroviaError::ArtifactNotFound {
                coordinate: format!("{group}:{artifact}:{version}"),
                tried_repos: self.repos.len(),
            }
            .into());
        }

        if let Some(pom) = self.local_cache.get_pom(group, artifact, version) {
            return Ok(pom);
        }

        for repo in self.repos {
            if let Some(pom) = self
                .local_cache
                .fetch_pom(&self.client, repo, group, artifact, version)
                .await?
            {
                return Ok(pom);
            }
        }

        self.misses.lock().unwrap().insert(key);
        Err(FerroviaError::ArtifactNotFound {
            coordinate: format!("{group}:{artifact}:{version}"),
            tried_repos: self.repos.len(),
        }
        .into())
    }
}
