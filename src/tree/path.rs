//! Node path formatting for error messages and logs
//!
//! A path is the chain of child names from the node a call started on,
//! joined with `/`. The starting node itself is `/`.

/// Path of the node a load or save started on.
pub const ROOT: &str = "/";

/// Path of the child `name` under `parent`.
pub fn child(parent: &str, name: &str) -> String {
    if parent == ROOT {
        format!("{}{}", ROOT, name)
    } else {
        format!("{}/{}", parent, name)
    }
}
