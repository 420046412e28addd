use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A dependency specification in Ferrovia.toml.
///
/// Supports both shorthand (`"group:artifact:version"`) and detailed forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    Short(String),
    Detailed(DetailedDependency),
    Catalog(CatalogDependency),
}

/// A dependency with explicit group, artifact, version, and optional metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedDependency {
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(default)]
    pub scope: Option<DependencyScope>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub exclusions: Vec<Exclusion>,
    #[serde(default)]
    pub classifier: Option<String>,
}

/// A reference to a version catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDependency {
    pub catalog: String,
    #[serde(default)]
    pub bundle: bool,
}

/// A transitive dependency to exclude.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exclusion {
    pub group: String,
    #[serde(default)]
    pub artifact: Option<String>,
}

/// Maven-compatible dependency scope.
///
/// `System` and `Import` exist only to round out the full Maven scope
/// vocabulary (`system` dependencies carry an explicit filesystem path and
/// are never resolved transitively beyond their own node; `import` only
/// makes sense inside `dependencyManagement` as a BOM reference and is
/// never itself traversed). Declaring a direct dependency in the manifest
/// with `scope = "import"` is rejected by [`Manifest::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    Compile,
    Provided,
    Runtime,
    Test,
    System,
    Import,
}

impl Default for DependencyScope {
    fn default() -> Self {
        Self::Compile
    }
}

impl std::fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Compile => "compile",
            Self::Provided => "provided",
            Self::Runtime => "runtime",
            Self::Test => "test",
            Self::System => "system",
            Self::Import => "import",
        };
        f.write_str(s)
    }
}

impl DependencyScope {
    /// Parse the lowercase Maven scope name used in POM `<scope>` elements.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "compile" => Some(Self::Compile),
            "provided" => Some(Self::Provided),
            "runtime" => Some(Self::Runtime),
            "test" => Some(Self::Test),
            "system" => Some(Self::System),
            "import" => Some(Self::Import),
            _ => None,
        }
    }

    /// The activation set for a root request in this scope: which scopes of
    /// transitive dependency should be pulled into the closure when resolving
    /// from a request declared at `self`.
    pub fn active_scopes(self) -> &'static [DependencyScope] {
        match self {
            Self::Compile => &[Self::Compile, Self::Provided],
            Self::Runtime => &[Self::Compile, Self::Runtime],
            Self::Provided => &[Self::Compile, Self::Provided],
            Self::Test => &[Self::Compile, Self::Runtime, Self::Test],
            Self::System => &[Self::System],
            Self::Import => &[],
        }
    }
}

/// Dependencies grouped by scope, preserving declaration order within each
/// scope and the order scopes were first seen in.
///
/// Declaration order matters for nearest-wins tie-breaking (first-declared
/// wins among equally-near candidates), so this wraps an [`IndexMap`] rather
/// than a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct DependencyScopes {
    scopes: IndexMap<DependencyScope, Vec<Dependency>>,
}

impl DependencyScopes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dependency under the given scope, creating the scope bucket
    /// if this is its first entry.
    pub fn push(&mut self, scope: DependencyScope, dep: Dependency) {
        self.scopes.entry(scope).or_default().push(dep);
    }

    /// Dependencies declared under `scope`, in declaration order.
    pub fn get(&self, scope: DependencyScope) -> &[Dependency] {
        self.scopes.get(&scope).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate all (scope, dependencies) pairs in first-seen scope order.
    pub fn iter(&self) -> impl Iterator<Item = (DependencyScope, &[Dependency])> {
        self.scopes.iter().map(|(s, d)| (*s, d.as_slice()))
    }

    /// Iterate every dependency across all scopes, preserving scope-then-
    /// declaration order.
    pub fn iter_all(&self) -> impl Iterator<Item = (DependencyScope, &Dependency)> {
        self.scopes
            .iter()
            .flat_map(|(s, deps)| deps.iter().map(move |d| (*s, d)))
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.values().all(Vec::is_empty)
    }

    pub fn len(&self) -> usize {
        self.scopes.values().map(Vec::len).sum()
    }
}

/// Maven coordinates parsed from a shorthand string.
///
/// `classifier` is `None` for the ordinary `group:artifact:version` shorthand
/// and `group:artifact:version:classifier` forms; resolved-dependency
/// identity is `(group_id, artifact_id, classifier)`, not just
/// `(group_id, artifact_id)`, so two classified variants of the same
/// artifact (e.g. a `sources` jar and the main jar) don't collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MavenCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub classifier: Option<String>,
}

impl MavenCoordinate {
    /// Parse `"group:artifact:version"` or `"group:artifact:version:classifier"`
    /// into coordinates.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, artifact, version] => Some(Self {
                group_id: group.to_string(),
                artifact_id: artifact.to_string(),
                version: version.to_string(),
                classifier: None,
            }),
            [group, artifact, version, classifier] => Some(Self {
                group_id: group.to_string(),
                artifact_id: artifact.to_string(),
                version: version.to_string(),
                classifier: Some(classifier.to_string()),
            }),
            _ => None,
        }
    }
}

impl std::fmt::Display for MavenCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.classifier {
            Some(c) => write!(
                f,
                "{}:{}:{}:{}",
                self.group_id, self.artifact_id, self.version, c
            ),
            None => write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version),
        }
    }
}
