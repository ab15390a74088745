mod common;

use assetpub_publish::{AssetSource, FsAssetStore, PublishError, SegmentPolicy};
use common::{write_asset, EXAMPLE_PRETTY};

#[test]
fn reads_asset_bytes_unmodified() {
    let dir = tempfile::tempdir().unwrap();
    write_asset(dir.path(), "core", "1.0.0", EXAMPLE_PRETTY);

    let store = FsAssetStore::new(dir.path());
    assert_eq!(store.read("core", "1.0.0").unwrap(), EXAMPLE_PRETTY.as_bytes());
}

#[test]
fn missing_asset_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    write_asset(dir.path(), "core", "1.0.0", "{}");

    let store = FsAssetStore::new(dir.path());
    let err = store.read("core", "2.0.0").unwrap_err();
    assert!(matches!(err, PublishError::AssetNotFound(_)));

    let err = store.read("items", "1.0.0").unwrap_err();
    assert!(matches!(err, PublishError::AssetNotFound(_)));
}

#[test]
fn missing_root_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsAssetStore::new(dir.path().join("does-not-exist"));
    let err = store.read("core", "1.0.0").unwrap_err();
    assert!(matches!(err, PublishError::AssetNotFound(_)));
}

#[test]
fn directory_in_place_of_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("core").join("1.0.0.json")).unwrap();

    let store = FsAssetStore::new(dir.path());
    let err = store.read("core", "1.0.0").unwrap_err();
    assert!(matches!(err, PublishError::AssetNotFound(_)));
}

#[test]
fn strict_policy_rejects_traversal_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("assets");
    std::fs::create_dir_all(root.join("core")).unwrap();
    // A file outside the root that a traversal could reach.
    write_asset(dir.path(), "secret", "1.0.0", r#"{"leak":true}"#);

    let store = FsAssetStore::new(&root);
    assert_eq!(store.policy(), SegmentPolicy::Strict);

    for (asset_type, version) in [
        ("../secret", "1.0.0"),
        ("..", "secret/1.0.0"),
        ("core/../../secret", "1.0.0"),
        ("core", "../../secret/1.0.0"),
        ("core\\..", "1.0.0"),
        (".", "1.0.0"),
    ] {
        let err = store.read(asset_type, version).unwrap_err();
        assert!(
            matches!(err, PublishError::InvalidInput(_)),
            "{asset_type}/{version}: {err}"
        );
    }
}

#[test]
fn permissive_policy_follows_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("assets");
    std::fs::create_dir_all(root.join("core")).unwrap();
    write_asset(dir.path(), "secret", "1.0.0", r#"{"leak":true}"#);

    let store = FsAssetStore::new(&root).with_policy(SegmentPolicy::Permissive);
    let bytes = store.read("../secret", "1.0.0").unwrap();
    assert_eq!(bytes, br#"{"leak":true}"#);
}

#[test]
fn root_is_exposed() {
    let store = FsAssetStore::new("/srv/assets");
    assert_eq!(store.root(), std::path::Path::new("/srv/assets"));
}
