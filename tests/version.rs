#[test]
fn version_matches_package_manifest() {
    assert_eq!(simcore::version(), env!("CARGO_PKG_VERSION"));
    assert!(!simcore::version().is_empty());
}
