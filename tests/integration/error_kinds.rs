//! Load and registration failures

use super::test_utils::Limits;
use cfgtree::{shared, Binding, ConfigError, Node};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Welcome {
    welcome: i64,
}

const MISPLACED_QUOTE: &[u8] = br#"{"welcome": 5"}"#;
const UNCLOSED_STRING: &[u8] = br#"{"welcome": "5}"#;
const WRONG_TYPE: &[u8] = br#"{"welcome": "5"}"#;

#[test]
fn test_misplaced_quote_is_syntax_error() {
    let mut root = Node::structural();
    let err = root.load_from_bytes(MISPLACED_QUOTE).unwrap_err();

    match &err {
        ConfigError::Syntax { offset, .. } => assert!(offset.is_some()),
        other => panic!("expected syntax error, got {:?}", other),
    }
    assert!(err.pretty().starts_with("syntax error at offset"));
}

#[test]
fn test_unclosed_string_is_syntax_error() {
    let mut root = Node::new(Binding::plain(shared(Welcome::default())));
    let err = root.load_from_bytes(UNCLOSED_STRING).unwrap_err();
    assert!(err.is_syntax());
    assert!(!err.is_type_mismatch());
}

#[test]
fn test_wrong_value_type_is_type_mismatch() {
    let mut root = Node::new(Binding::plain(shared(Welcome::default())));
    let err = root.load_from_bytes(WRONG_TYPE).unwrap_err();

    assert!(err.is_type_mismatch());
    assert!(!err.is_syntax());
    assert!(err.pretty().starts_with("cfgtree: type mismatch at /"));
}

#[test]
fn test_type_mismatch_reports_child_path() {
    let mut root = Node::structural();
    root.add_child("outer", Node::structural())
        .unwrap()
        .add_child("limits", Binding::defaulted(shared(Limits::default())))
        .unwrap();

    let err = root
        .load_from_bytes(br#"{"outer": {"limits": {"Root": 1.5}}}"#)
        .unwrap_err();

    match err {
        ConfigError::TypeMismatch { path, .. } => assert_eq!(path, "/outer/limits"),
        other => panic!("expected type mismatch, got {:?}", other),
    }
}

#[test]
fn test_failed_load_keeps_earlier_siblings() {
    let first = shared(Limits::default());
    let second = shared(Limits::default());
    let mut root = Node::structural();
    root.add_child("a", Binding::defaulted(first.clone())).unwrap();
    root.add_child("b", Binding::defaulted(second.clone())).unwrap();

    // children are visited in name order, so "a" is overlaid before "b" fails
    let err = root
        .load_from_bytes(br#"{"a": {"Root": 1}, "b": {"Root": "x"}}"#)
        .unwrap_err();

    assert!(err.is_type_mismatch());
    assert_eq!(*first.read(), Limits::new(1, 1024));
    assert_eq!(*second.read(), Limits::new(9999, 1024));
}

#[test]
fn test_non_object_roots_are_rejected() {
    for (input, kind) in [
        (&b"[1, 2]"[..], "array"),
        (&b"\"text\""[..], "string"),
        (&b"42"[..], "number"),
        (&b"true"[..], "boolean"),
        (&b"null"[..], "null"),
    ] {
        let mut root = Node::structural();
        match root.load_from_bytes(input) {
            Err(ConfigError::RootKind { path, found }) => {
                assert_eq!(path, "/");
                assert_eq!(found, kind);
            }
            other => panic!("expected RootKind for {:?}, got {:?}", kind, other),
        }
    }
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let mut root = Node::structural();
    root.add_child("db", Binding::defaulted(shared(Limits::default())))
        .unwrap();

    let err = root
        .add_child("db", Binding::defaulted(shared(Limits::default())))
        .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateName { ref name, .. } if name == "db"));
}

#[test]
fn test_garbage_input_never_panics() {
    let inputs: [&[u8]; 6] = [b"{", b"}", b"{\"a\":", b"\xff\xfe", b"{\"a\" 1}", b"{}}"];
    for input in inputs {
        let mut root = Node::structural();
        root.add_child("a", Binding::defaulted(shared(Limits::default())))
            .unwrap();
        assert!(root.load_from_bytes(input).is_err());
    }
}
