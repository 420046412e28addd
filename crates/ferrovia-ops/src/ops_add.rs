//! Operation: add a dependency to Ferrovia.toml.

use std::path::Path;

use ferrovia_core::dependency::MavenCoordinate;
use toml_edit::{DocumentMut, Item, Table, Value};

/// Options for `ferrovia add`.
pub struct AddOptions {
    /// The dependency spec: `group:artifact:version`.
    pub spec: String,
    /// Add as a dev dependency.
    pub dev: bool,
}

/// Add a dependency to `Ferrovia.toml` using format-preserving edits.
pub fn add_dependency(manifest_path: &Path, opts: &AddOptions) -> miette::Result<()> {
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

    let coord = MavenCoordinate::parse(&opts.spec).ok_or_else(|| {
        ferrovia_util::errors::FerroviaError::Generic {
            message: format!(
                "Invalid dependency format: '{}'. Expected group:artifact:version",
                opts.spec
            ),
        }
    })?;

    let dep_key = coord.artifact_id.clone();
    let dep_value = coord.to_string();

    if opts.dev {
        ensure_table(&mut doc, &["dev-dependencies"]);
        doc["dev-dependencies"][&dep_key] = Item::Value(Value::from(dep_value.clone()));
    } else {
        ensure_table(&mut doc, &["dependencies"]);
        doc["dependencies"][&dep_key] = Item::Value(Value::from(dep_value.clone()));
    }

    std::fs::write(manifest_path, doc.to_string())
        .map_err(|e| ferrovia_util::errors::FerroviaError::Io(e).into())
}

/// Ensure a nested table path exists in the document.
fn ensure_table(doc: &mut DocumentMut, keys: &[&str]) {
    let mut current = doc.as_table_mut() as &mut Table;
    for &key in keys {
        if !current.contains_key(key) {
            current.insert(key, Item::Table(Table::new()));
        }
        current = match current.get_mut(key) {
            Some(Item::Table(t)) => t,
            _ => return,
        };
    }
}
