//! Handler for `ferrovia update`.

use miette::Result;

use ferrovia_ops::ops_update::{self, UpdateOptions};

pub async fn exec(major: bool, dep: Option<String>, dry_run: bool) -> Result<()> {
    let project_root = std::env::current_dir().map_err(ferrovia_util::errors::FerroviaError::Io)?;

    if !project_root.join("Ferrovia.toml").is_file() {
        return Err(ferrovia_util::errors::FerroviaError::Manifest {
            message: "No Ferrovia.toml found in current directory".to_string(),
        }
        .into());
    }

    let opts = UpdateOptions {
        major,
        dep,
        dry_run,
    };

    ops_update::update(&project_root, &opts).await
}
