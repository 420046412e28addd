//! Handler for `ferrovia remove`.

use miette::Result;

use ferrovia_ops::ops_remove::{self, RemoveOptions};

pub async fn exec(dep: &str, dev: bool) -> Result<()> {
    let project_root = std::env::current_dir().map_err(ferrovia_util::errors::FerroviaError::Io)?;
    let manifest_path = project_root.join("Ferrovia.toml");

    if !manifest_path.is_file() {
        return Err(ferrovia_util::errors::FerroviaError::Manifest {
            message: "No Ferrovia.toml found in current directory".to_string(),
        }
        .into());
    }

    ops_remove::remove_dependency(
        &manifest_path,
        &RemoveOptions {
            name: dep.to_string(),
            dev,
        },
    )?;

    eprintln!("Removed {dep}");

    ferrovia_ops::ops_fetch::fetch(&project_root, false).await?;

    Ok(())
}
