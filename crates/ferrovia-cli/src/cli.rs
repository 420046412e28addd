//! CLI argument definitions for Ferrovia.
//!
//! Uses `clap` derive macros. The command surface is limited to dependency
//! resolution: initializing a manifest and driving the resolver against it.
//! Build/run/test/publish and the rest of the build-tool lifecycle live
//! outside this crate.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "ferrovia",
    version,
    about = "Maven-compatible dependency resolution for host-language build scripts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a starter Ferrovia.toml in the current directory
    Init,

    /// Add a dependency
    Add {
        /// Dependency coordinate (group:artifact:version)
        dep: String,
        /// Add as a dev dependency
        #[arg(long)]
        dev: bool,
    },

    /// Remove a dependency
    #[command(alias = "rm")]
    Remove {
        /// Dependency name (group:artifact, or bare artifact id)
        dep: String,
        /// Remove from dev dependencies
        #[arg(long)]
        dev: bool,
    },

    /// Update dependencies to the latest version compatible with their range
    Update {
        /// Allow major version bumps
        #[arg(long)]
        major: bool,
        /// Update a specific dependency only
        #[arg(long)]
        dep: Option<String>,
        /// Show what would change without writing the lockfile
        #[arg(long)]
        dry_run: bool,
    },

    /// Resolve and download all dependencies into the local cache
    Fetch {
        /// Re-verify checksums of already-cached artifacts
        #[arg(long)]
        verify: bool,
    },

    /// Resolve dependencies and (re)write the lockfile without downloading jars
    Lock,

    /// Print the resolved dependency tree
    Tree {
        /// Maximum depth to print
        #[arg(long)]
        depth: Option<u32>,
        /// Show only artifacts resolved at more than one version
        #[arg(long)]
        duplicates: bool,
        /// Show the inverted tree (who depends on X)
        #[arg(long)]
        inverted: bool,
        /// Explain why a dependency is present
        #[arg(long)]
        why: Option<String>,
        /// Show only artifacts where conflicting versions were resolved
        #[arg(long)]
        conflicts: bool,
        /// Print each artifact's declared license alongside its coordinate
        #[arg(long)]
        licenses: bool,
    },

    /// List dependencies with a newer version available upstream
    Outdated {
        /// Include updates that would require a major version bump
        #[arg(long)]
        major: bool,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
