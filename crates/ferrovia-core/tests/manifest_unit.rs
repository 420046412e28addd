use ferrovia_core::manifest::Manifest;

const MINIMAL_TOML: &str = r#"
[package]
name = "test-app"
version = "0.1.0"
"#;

const FULL_TOML: &str = r#"
[package]
name = "my-app"
group = "com.example"
version = "1.0.0"
description = "An example app"
authors = ["Jane Doe <jane@example.com>"]
license = "MIT"

[repositories]
central = "https://repo.maven.apache.org/maven2"

[dependencies]
coroutines = "org.jetbrains.kotlinx:kotlinx-coroutines-core:1.8.0"

[dev-dependencies]
junit = "junit:junit:4.13.2"

[dependency-management]
"com.fasterxml.jackson.core:jackson-databind" = "2.16.0"
"#;

#[test]
fn test_parse_minimal_manifest() {
    let manifest = Manifest::parse_toml(MINIMAL_TOML).unwrap();
    assert_eq!(manifest.package.name, "test-app");
    assert_eq!(manifest.package.version, "0.1.0");
    assert!(manifest.dependencies.is_empty());
    assert!(manifest.dev_dependencies.is_empty());
}

#[test]
fn test_parse_full_manifest() {
    let manifest = Manifest::parse_toml(FULL_TOML).unwrap();
    assert_eq!(manifest.package.name, "my-app");
    assert_eq!(manifest.package.group.as_deref(), Some("com.example"));
    assert_eq!(manifest.package.description.as_deref(), Some("An example app"));
    assert_eq!(manifest.package.authors.len(), 1);
    assert_eq!(manifest.package.license.as_deref(), Some("MIT"));
    assert_eq!(manifest.dependencies.len(), 1);
    assert_eq!(manifest.dev_dependencies.len(), 1);
    assert_eq!(manifest.repositories.len(), 1);
    assert_eq!(
        manifest
            .dependency_management
            .get("com.fasterxml.jackson.core:jackson-databind")
            .map(String::as_str),
        Some("2.16.0")
    );
}

#[test]
fn test_parse_manifest_with_repositories() {
    let toml = r#"
[package]
name = "test"
version = "0.1.0"

[repositories]
central = "https://repo.maven.apache.org/maven2"
"#;
    let manifest = Manifest::parse_toml(toml).unwrap();
    assert_eq!(manifest.repositories.len(), 1);
}

#[test]
fn test_parse_manifest_missing_package_fails() {
    let toml = r#"
[dependencies]
foo = "bar"
"#;
    let result = Manifest::parse_toml(toml);
    assert!(result.is_err());
}

#[test]
fn test_parse_manifest_missing_name_fails() {
    let toml = r#"
[package]
version = "0.1.0"
"#;
    let result = Manifest::parse_toml(toml);
    assert!(result.is_err());
}

#[test]
fn test_parse_manifest_empty_string_fails() {
    let result = Manifest::parse_toml("");
    assert!(result.is_err());
}

#[test]
fn test_parse_manifest_with_workspace() {
    let toml = r#"
[package]
name = "root"
version = "0.1.0"

[workspace]
members = ["app", "shared", "libs/*"]
"#;
    let manifest = Manifest::parse_toml(toml).unwrap();
    let ws = manifest.workspace.unwrap();
    assert_eq!(ws.members.len(), 3);
}

#[test]
fn test_parse_manifest_from_nonexistent_path() {
    let result = Manifest::from_path(std::path::Path::new("/nonexistent/Ferrovia.toml"));
    assert!(result.is_err());
}

#[test]
fn test_parse_manifest_rejects_invalid_group() {
    let toml = r#"
[package]
name = "test"
group = "com..example"
version = "0.1.0"
"#;
    let result = Manifest::parse_toml(toml).and_then(|m| m.validate());
    assert!(result.is_err());
}

#[test]
fn test_parse_manifest_rejects_invalid_version() {
    let toml = r#"
[package]
name = "test"
version = "not-semver"
"#;
    let result = Manifest::parse_toml(toml).and_then(|m| m.validate());
    assert!(result.is_err());
}

#[test]
fn test_parse_manifest_rejects_duplicate_dependency_key() {
    let toml = r#"
[package]
name = "test"
version = "0.1.0"

[dependencies]
shared = "org.example:a:1.0"

[dev-dependencies]
shared = "org.example:b:1.0"
"#;
    let result = Manifest::parse_toml(toml).and_then(|m| m.validate());
    assert!(result.is_err());
}
