//! Integration tests for configuration tree loading and saving

mod error_kinds;
mod global_tree;
mod test_utils;
