//! Operation: remove a dependency from Ferrovia.toml.

use std::path::Path;

use toml_edit::DocumentMut;

/// Options for `ferrovia remove`.
pub struct RemoveOptions {
    /// The dependency name (artifact ID key in the TOML table).
    pub name: String,
    /// Remove from dev dependencies.
    pub dev: bool,
}

/// Remove a dependency from `Ferrovia.toml` using format-preserving edits.
pub fn remove_dependency(manifest_path: &Path, opts: &RemoveOptions) -> miette::Result<()> {
    let content = std::fs::read_to_string(manifest_path).map_err(|e| {
        ferrovia_util::errors::FerroviaError::Manifest {
            message: format!("Failed to read {}: {e}", manifest_path.display()),
        }
    })?;

    let mut doc: DocumentMut =
        content
            .parse()
            .map_err(|e| ferrovia_util::errors::FerroviaError::Manifest {
                message: format!("Failed to parse Ferrovia.toml: {e}"),
            })?;

    let removed = if opts.dev {
        remove_key_at(&mut doc, &["dev-dependencies", &opts.name])
    } else {
        remove_key_at(&mut doc, &["dependencies", &opts.name])
    };

    if !removed {
        return Err(ferrovia_util::errors::FerroviaError::Generic {
            message: format!("Dependency '{}' not found in Ferrovia.toml", opts.name),
        }
        .into());
    }

    std::fs::write(manifest_path, doc.to_string())
        .map_err(|e| ferrovia_util::errors::FerroviaError::Io(e).into())
}

/// Navigate a TOML document path and remove the leaf key.
fn remove_key_at(doc: &mut DocumentMut, path: &[&str]) -> bool {
    if path.is_empty() {
        return false;
    }
    if path.len() == 1 {
        return doc.remove(path[0]).is_some();
    }

    let mut current = doc.as_table_mut();
    for &key in &path[..path.len() - 1] {
        match current.get_mut(key) {
            Some(toml_edit::Item::Table(ref mut t)) => current = t,
            _ => return false,
        }
    }
    current.remove(path[path.len() - 1]).is_some()
}
