//! Handler for `ferrovia outdated`.

use miette::Result;

use ferrovia_ops::ops_outdated::{self, OutdatedOptions};

pub async fn exec(major: bool) -> Result<()> {
    let project_root = std::env::current_dir().map_err(ferrovia_util::errors::FerroviaError::Io)?;

    if !project_root.join("Ferrovia.toml").is_file() {
        return Err(ferrovia_util::errors::FerroviaError::Manifest {
            message: "No Ferrovia.toml found in current directory".to_string(),
        }
        .into());
    }

    let opts = OutdatedOptions { major };

    ops_outdated::outdated(&project_root, &opts).await
}
