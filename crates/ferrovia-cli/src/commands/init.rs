use miette::Result;

use ferrovia_util::errors::FerroviaError;

/// Write a starter `Ferrovia.toml` in the current directory.
pub fn exec() -> Result<()> {
    let cwd = std::env::current_dir().map_err(FerroviaError::Io)?;
    let manifest_path = cwd.join("Ferrovia.toml");
    if manifest_path.exists() {
        return Err(FerroviaError::Generic {
            message: "Ferrovia.toml already exists in this directory".to_string(),
        }
        .into());
    }

    let name = cwd
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("my-project");

    let contents = format!(
        r#"[package]
name = "{name}"
group = "com.example"
version = "0.1.0"

[repositories]
central = "https://repo1.maven.org/maven2"

[dependencies]

[dev-dependencies]
"#,
    );

    std::fs::write(&manifest_path, contents).map_err(FerroviaError::Io)?;

    println!("Initialized Ferrovia project in {}", cwd.display());
    Ok(())
}
