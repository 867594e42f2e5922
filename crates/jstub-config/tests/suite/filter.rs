use jstub_config::{ConfigError, StubsConfig};

#[test]
fn exclude_globs_match_internal_names() {
    let stubs = StubsConfig {
        exclude: vec!["com/example/internal/**".to_owned(), "**/*Test".to_owned()],
        ..Default::default()
    };
    let filter = stubs.filter().expect("valid globs");

    assert!(filter.allows("com/example/Api"));
    assert!(!filter.allows("com/example/internal/Impl"));
    assert!(!filter.allows("com/example/internal/deep/Impl"));
    assert!(!filter.allows("com/example/ApiTest"));
}

#[test]
fn nested_classes_can_be_dropped() {
    let stubs = StubsConfig {
        include_nested: false,
        ..Default::default()
    };
    let filter = stubs.filter().expect("valid globs");

    assert!(filter.allows("com/example/Outer"));
    assert!(!filter.allows("com/example/Outer$Inner"));
    assert!(!filter.allows("com/example/Outer$1"));
    assert!(filter.allows("com/ex$ample/Outer"));
}

#[test]
fn invalid_glob_is_reported() {
    let stubs = StubsConfig {
        exclude: vec!["com/[oops".to_owned()],
        ..Default::default()
    };
    let err = stubs.filter().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidGlob { .. }), "{err}");
    assert!(err.to_string().contains("com/[oops"), "{err}");
}
