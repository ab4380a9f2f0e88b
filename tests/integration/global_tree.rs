//! Process-wide default tree
//!
//! Kept to a single test: the default tree is shared by every test in this
//! binary.

use super::test_utils::Limits;
use cfgtree::{global, shared, Binding, ConfigError};
use tempfile::TempDir;

#[test]
fn test_default_tree_lifecycle() {
    global::reset();

    let server = shared(Limits::default());
    let db = shared(Limits::default());
    global::set_root(Binding::defaulted(server.clone())).unwrap();
    global::add_child("db", Binding::defaulted(db.clone())).unwrap();

    let err = global::add_child("db", Binding::defaulted(shared(Limits::default())))
        .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateName { .. }));

    global::load_from_bytes(br#"{"Root": 1, "db": {"RootExtra": 2}}"#).unwrap();
    assert_eq!(*server.read(), Limits::new(1, 1024));
    assert_eq!(*db.read(), Limits::new(9999, 2));

    // registered after the load: hydrated from the cached document
    let cache = shared(Limits::default());
    global::load_from_bytes(br#"{"cache": {"Root": 3}}"#).unwrap();
    global::add_child("cache", Binding::defaulted(cache.clone())).unwrap();
    assert_eq!(*cache.read(), Limits::new(3, 1024));

    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("config.json");
    global::save_file(&config_file).unwrap();
    global::reset();

    let reloaded = shared(Limits::default());
    global::add_child("cache", Binding::defaulted(reloaded.clone())).unwrap();
    global::load_file(&config_file).unwrap();
    assert_eq!(*reloaded.read(), Limits::new(3, 1024));

    assert_eq!(global::with_tree(|tree| tree.node_count()), 2);
    assert_eq!(global::save_to_bytes().unwrap(), br#"{"cache":{"Root":3}}"#);

    global::reset();
}
