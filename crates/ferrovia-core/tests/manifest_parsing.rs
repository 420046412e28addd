use ferrovia_core::manifest::Manifest;

#[test]
fn test_parse_simple_jvm_manifest() {
    let toml = r#"
[package]
name = "my-jvm-app"
version = "0.1.0"
description = "A simple JVM application"
license = "MIT"

[dependencies]
coroutines = "org.jetbrains.kotlinx:kotlinx-coroutines-core:1.8.0"

[dev-dependencies]
junit = "junit:junit:4.13.2"
"#;
    let manifest = Manifest::parse_toml(toml).unwrap();
    assert_eq!(manifest.package.name, "my-jvm-app");
    assert_eq!(manifest.package.version, "0.1.0");
    assert_eq!(
        manifest.package.description.as_deref(),
        Some("A simple JVM application")
    );
    assert_eq!(manifest.package.license.as_deref(), Some("MIT"));
    assert_eq!(manifest.dependencies.len(), 1);
    assert_eq!(manifest.dev_dependencies.len(), 1);
}

#[test]
fn test_parse_manifest_with_catalog() {
    let toml = r#"
[package]
name = "catalog-project"
version = "0.1.0"

[catalog.versions]
ktor = "2.3.0"
coroutines = "1.8.0"
serialization = "1.6.0"

[catalog.libraries.ktor-server-core]
group = "io.ktor"
artifact = "ktor-server-core"
version.ref = "ktor"

[catalog.libraries.ktor-client-core]
group = "io.ktor"
artifact = "ktor-client-core"
version.ref = "ktor"

[catalog.bundles]
ktor-server = ["ktor-server-core"]
"#;
    let manifest = Manifest::parse_toml(toml).unwrap();
    assert_eq!(manifest.package.name, "catalog-project");
    let catalog = manifest.catalog.as_ref().unwrap();
    assert_eq!(catalog.versions.len(), 3);
    assert_eq!(catalog.libraries.len(), 2);
    assert_eq!(catalog.bundles.len(), 1);
    assert_eq!(
        catalog.bundles.get("ktor-server").unwrap(),
        &vec!["ktor-server-core".to_string()]
    );
}

#[test]
fn test_parse_manifest_with_dependency_management() {
    let toml = r#"
[package]
name = "bom-consumer"
version = "0.1.0"

[dependency-management]
"com.fasterxml.jackson.core:jackson-databind" = "2.16.0"
"org.slf4j:slf4j-api" = "2.0.9"
"#;
    let manifest = Manifest::parse_toml(toml).unwrap();
    assert_eq!(manifest.dependency_management.len(), 2);
}

#[test]
fn test_parse_invalid_missing_name_fails() {
    let toml = r#"
[package]
version = "0.1.0"
"#;
    let result = Manifest::parse_toml(toml).and_then(|m| m.validate());
    assert!(result.is_err(), "manifest without name should fail to validate");
}

#[test]
fn test_parse_nonexistent_path_fails() {
    let result = Manifest::from_path(std::path::Path::new("/does/not/exist/Ferrovia.toml"));
    assert!(result.is_err());
}

#[test]
fn test_parse_detailed_dependency_with_scope() {
    let toml = r#"
[package]
name = "provided-scope"
version = "0.1.0"

[dependencies]
servlet-api = { group = "javax.servlet", artifact = "javax.servlet-api", version = "4.0.1", scope = "provided" }
"#;
    let manifest = Manifest::parse_toml(toml).unwrap();
    assert_eq!(manifest.dependencies.len(), 1);
}

#[test]
fn test_parse_rejects_direct_import_scope() {
    let toml = r#"
[package]
name = "bad-import"
version = "0.1.0"

[dependencies]
bom = { group = "org.example", artifact = "bom", version = "1.0", scope = "import" }
"#;
    let result = Manifest::parse_toml(toml).and_then(|m| m.validate());
    assert!(result.is_err());
}
