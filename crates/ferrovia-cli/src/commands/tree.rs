//! Handler for `ferrovia tree`.

use miette::Result;

use ferrovia_ops::ops_tree::{self, TreeOptions};

pub async fn exec(
    depth: Option<u32>,
    duplicates: bool,
    inverted: bool,
    why: Option<String>,
    conflicts: bool,
    licenses: bool,
) -> Result<()> {
    let project_root = std::env::current_dir().map_err(ferrovia_util::errors::FerroviaError::Io)?;

    if !project_root.join("Ferrovia.toml").is_file() {
        return Err(ferrovia_util::errors::FerroviaError::Manifest {
            message: "No Ferrovia.toml found in current directory".to_string(),
        }
        .into());
    }

    let opts = TreeOptions {
        depth: depth.map(|d| d as usize),
        why,
        duplicates,
        conflicts,
        licenses,
        inverted,
    };

    ops_tree::tree(&project_root, &opts).await
}
