//! Handler for `ferrovia fetch`.

use miette::Result;

pub async fn exec(verbose: bool, verify: bool) -> Result<()> {
    let project_root = std::env::current_dir().map_err(ferrovia_util::errors::FerroviaError::Io)?;

    if !project_root.join("Ferrovia.toml").is_file() {
        return Err(ferrovia_util::errors::FerroviaError::Manifest {
            message: "No Ferrovia.toml found in current directory".to_string(),
        }
        .into());
    }

    ferrovia_ops::ops_fetch::fetch(&project_root, verbose).await?;

    if verify {
        ferrovia_ops::ops_fetch::verify_checksums(&project_root)?;
    }

    Ok(())
}
