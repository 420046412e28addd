use ferrovia_util::errors::FerroviaError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = FerroviaError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_manifest_error_display() {
    let err = FerroviaError::Manifest {
        message: "bad syntax".to_string(),
    };
    assert_eq!(err.to_string(), "Manifest error: bad syntax");
}

#[test]
fn test_resolution_error_display() {
    let err = FerroviaError::Resolution {
        message: "conflict".to_string(),
    };
    assert_eq!(err.to_string(), "Dependency resolution failed: conflict");
}

#[test]
fn test_artifact_not_found_display() {
    let err = FerroviaError::ArtifactNotFound {
        coordinate: "com.example:lib:1.0".to_string(),
        tried_repos: 2,
    };
    assert!(err.to_string().contains("com.example:lib:1.0"));
    assert!(err.to_string().contains('2'));
}

#[test]
fn test_artifact_unauthorized_display() {
    let err = FerroviaError::ArtifactUnauthorized {
        coordinate: "com.example:lib:1.0".to_string(),
        repository: "nexus".to_string(),
    };
    assert!(err.to_string().contains("nexus"));
}

#[test]
fn test_network_error_display() {
    let err = FerroviaError::Network {
        message: "timeout".to_string(),
    };
    assert_eq!(err.to_string(), "Network error: timeout");
}

#[test]
fn test_malformed_version_display() {
    let err = FerroviaError::MalformedVersion {
        value: "??".to_string(),
        reason: "no digits".to_string(),
    };
    assert!(err.to_string().contains("??"));
}

#[test]
fn test_malformed_metadata_display() {
    let err = FerroviaError::MalformedMetadata {
        coordinate: "g:a".to_string(),
        reason: "unclosed tag".to_string(),
    };
    assert!(err.to_string().contains("g:a"));
}

#[test]
fn test_malformed_pom_display() {
    let err = FerroviaError::MalformedPom {
        coordinate: "g:a:1.0".to_string(),
        reason: "missing groupId".to_string(),
    };
    assert!(err.to_string().contains("missing groupId"));
}

#[test]
fn test_unresolved_property_display() {
    let err = FerroviaError::UnresolvedProperty {
        coordinate: "g:a:1.0".to_string(),
        property: "db.version".to_string(),
    };
    assert!(err.to_string().contains("${db.version}"));
}

#[test]
fn test_cyclic_parent_display() {
    let err = FerroviaError::CyclicParent {
        coordinate: "g:a:1.0".to_string(),
    };
    assert!(err.to_string().contains("g:a:1.0"));
}

#[test]
fn test_generic_error_display() {
    let err = FerroviaError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let ferrovia_err: FerroviaError = io_err.into();
    assert!(matches!(ferrovia_err, FerroviaError::Io(_)));
}
