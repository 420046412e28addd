use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::dependency::Dependency;

/// The parsed representation of a `Ferrovia.toml` file.
///
/// Trimmed to the sections a dependency resolver actually consults: package
/// identity, direct dependency declarations, repositories, and the version
/// catalog. Build-lifecycle sections (targets, flavors, compose, docker,
/// signing, lint/format, annotation-processor wiring) belong to the build
/// tool around this resolver, not to the resolver itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub package: PackageMetadata,

    #[serde(default)]
    pub dependencies: BTreeMap<String, Dependency>,

    #[serde(default, rename = "dev-dependencies")]
    pub dev_dependencies: BTreeMap<String, Dependency>,

    /// Direct `scope = "provided"` / `scope = "system"` declarations live
    /// inside `dependencies` via `DetailedDependency::scope` rather than a
    /// separate section.
    #[serde(default)]
    pub repositories: BTreeMap<String, RepositoryEntry>,

    #[serde(default)]
    pub workspace: Option<WorkspaceConfig>,

    #[serde(default)]
    pub catalog: Option<CatalogConfig>,

    /// Root-level `dependencyManagement` overrides: pins a transitive
    /// dependency's version regardless of nearest-wins outcome (§I2).
    #[serde(default, rename = "dependency-management")]
    pub dependency_management: BTreeMap<String, String>,
}

/// Package identity and metadata from the `[package]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    #[serde(default)]
    pub group: Option<String>,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
}

/// A Maven repository reference, either a URL string or a detailed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepositoryEntry {
    Url(String),
    Detailed {
        url: String,
        #[serde(default)]
        auth: Option<String>,
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        password: Option<String>,
    },
}

/// Workspace configuration from the `[workspace]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Version catalog configuration from `[catalog]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub versions: BTreeMap<String, String>,
    #[serde(default)]
    pub libraries: BTreeMap<String, CatalogLibrary>,
    #[serde(default)]
    pub bundles: BTreeMap<String, Vec<String>>,
}

/// A library entry in the version catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogLibrary {
    pub group: String,
    pub artifact: String,
    #[serde(default, rename = "version.ref")]
    pub version_ref: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl Manifest {
    /// Load and parse a `Ferrovia.toml` file from the given path.
    ///
    /// Before parsing, `${env:VAR}` references in the manifest content are
    /// resolved using `.ferrovia.env` (if present alongside `Ferrovia.toml`) and
    /// process environment variables.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ferrovia_util::errors::FerroviaError::Manifest {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;

        let dir = path.parent().unwrap_or(Path::new("."));
        let env_vars =
            crate::properties::load_env_file(&dir.join(".ferrovia.env")).unwrap_or_default();
        let resolved = crate::properties::interpolate(&content, &env_vars);

        let manifest = Self::parse_toml(&resolved)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse a `Ferrovia.toml` from a string (no interpolation).
    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            ferrovia_util::errors::FerroviaError::Manifest {
                message: format!("Failed to parse Ferrovia.toml: {e}"),
            }
            .into()
        })
    }

    /// Validate semantic constraints that TOML deserialization cannot enforce.
    pub fn validate(&self) -> miette::Result<()> {
        use ferrovia_util::errors::FerroviaError;
        let err = |msg: String| -> miette::Report { FerroviaError::Manifest { message: msg }.into() };

        if self.package.name.is_empty() {
            return Err(err("package.name must not be empty".into()));
        }
        if !self
            .package
            .name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(err(format!(
                "package.name '{}' contains invalid characters (allowed: alphanumeric, '-', '_')",
                self.package.name
            )));
        }

        if semver::Version::parse(&self.package.version).is_err() {
            return Err(err(format!(
                "package.version '{}' is not valid semver (expected e.g. 1.0.0)",
                self.package.version
            )));
        }

        if let Some(ref group) = self.package.group {
            if group.is_empty()
                || !group
                    .split('.')
                    .all(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-'))
            {
                return Err(err(format!(
                    "package.group '{}' is not a valid Maven group ID (expected dot-separated identifiers)",
                    group
                )));
            }
        }

        if let Some(ref repo) = self.package.repository {
            if !repo.starts_with("http://") && !repo.starts_with("https://") {
                return Err(err(format!(
                    "package.repository '{}' must start with http:// or https://",
                    repo
                )));
            }
        }

        // A direct dependency declared with scope = "import" makes no sense
        // outside dependencyManagement; reject it early rather than let the
        // resolver silently treat it as untraversable.
        for (key, dep) in self.dependencies.iter().chain(self.dev_dependencies.iter()) {
            if let Dependency::Detailed(d) = dep {
                if d.scope == Some(crate::dependency::DependencyScope::Import) {
                    return Err(err(format!(
                        "dependency '{}' declares scope = \"import\", which is only valid inside dependency-management",
                        key
                    )));
                }
            }
        }

        let mut seen = std::collections::HashSet::new();
        let sections: &[(&str, &BTreeMap<String, Dependency>)] = &[
            ("dependencies", &self.dependencies),
            ("dev-dependencies", &self.dev_dependencies),
        ];
        for (section, deps) in sections {
            for key in deps.keys() {
                if !seen.insert(key.clone()) {
                    return Err(err(format!(
                        "duplicate dependency '{}' found in [{}] (already declared in another section)",
                        key, section
                    )));
                }
            }
        }

        Ok(())
    }
}
