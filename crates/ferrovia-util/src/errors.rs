use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Ferrovia operations.
#[derive(Debug, Error, Diagnostic)]
pub enum FerroviaError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. Ferrovia.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Ferrovia.toml for syntax errors"))]
    Manifest { message: String },

    /// Dependency resolution failed (version conflicts, missing deps, etc.).
    #[error("Dependency resolution failed: {message}")]
    Resolution { message: String },

    /// No repository yielded the requested artifact or metadata.
    #[error("Artifact not found: {coordinate} (tried {tried_repos} repositories)")]
    #[diagnostic(help("Check the coordinate and that a repository serving it is configured"))]
    ArtifactNotFound {
        coordinate: String,
        tried_repos: usize,
    },

    /// A repository rejected the configured credentials.
    #[error("Unauthorized fetching {coordinate} from {repository}")]
    ArtifactUnauthorized {
        coordinate: String,
        repository: String,
    },

    /// Transport-level failure after retries were exhausted.
    #[error("Network error: {message}")]
    Network { message: String },

    /// A version string is not parseable as a structured or generic version.
    #[error("Malformed version '{value}': {reason}")]
    MalformedVersion { value: String, reason: String },

    /// `maven-metadata.xml` is non-well-formed or violates schema assumptions.
    #[error("Malformed metadata for {coordinate}: {reason}")]
    MalformedMetadata { coordinate: String, reason: String },

    /// A POM document is non-well-formed or violates schema assumptions.
    #[error("Malformed POM for {coordinate}: {reason}")]
    MalformedPom { coordinate: String, reason: String },

    /// A required field remains as `${...}` after fixed-point interpolation.
    #[error("Unresolved property '${{{property}}}' in {coordinate}")]
    UnresolvedProperty {
        coordinate: String,
        property: String,
    },

    /// A POM's parent chain revisits a coordinate already on the path.
    #[error("Cyclic parent chain detected at {coordinate}")]
    CyclicParent { coordinate: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type FerroviaResult<T> = miette::Result<T>;
