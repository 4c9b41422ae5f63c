//! Canonical module ids.
//!
//! A canonical id is the bundle-root-relative path of a module, extension
//! normalized, with `/` separators and a leading `./` marker
//! (`./src/utils.js`). Ids that climb out of the root keep their `../`
//! segments instead (`../shared/log.js`).

use path_clean::PathClean;
use std::path::{Component, Path, PathBuf};

/// Marker prefixed to every bundle-relative id.
pub const BUNDLE_RELATIVE_MARKER: &str = "./";

/// Extension appended to requests that carry none.
pub const DEFAULT_EXTENSION: &str = "js";

/// Canonicalize a requested path relative to the requesting module's directory.
///
/// `parent_dir` is the directory part of the requesting module's id
/// (`./src` for `./src/index.js`).
///
/// ```
/// use sling_gen::specifier::canonicalize_request;
///
/// assert_eq!(canonicalize_request("./a", "./src", "js"), "./src/a.js");
/// assert_eq!(canonicalize_request("../lib/b.json", "./src", "js"), "./lib/b.json");
/// assert_eq!(canonicalize_request("/abs/c", "./src", "js"), "./src/abs/c.js");
/// ```
///
/// A leading `/` does not make a request absolute; it is joined under
/// `parent_dir` like any other segment.
pub fn canonicalize_request(request: &str, parent_dir: &str, default_extension: &str) -> String {
    let mut request = request.trim_start_matches('/').to_string();
    if Path::new(&request).extension().is_none() {
        request.push('.');
        request.push_str(default_extension);
    }

    let joined = Path::new(parent_dir).join(&request).clean();
    with_marker(&joined)
}

/// Compute the canonical id of a file from its path and the build root.
///
/// `root` and `path` must both be absolute or both be relative to the same
/// directory. A root of `.` is the empty prefix.
pub fn module_id_for_path(root: &Path, path: &Path) -> String {
    let root = match root.to_path_buf().clean() {
        cleaned if cleaned == Path::new(".") => PathBuf::new(),
        cleaned => cleaned,
    };
    let path = path.to_path_buf().clean();

    let relative = match path.strip_prefix(&root) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => relative_from(&root, &path),
    };

    with_marker(&relative)
}

/// Directory part of a canonical id (`./src` for `./src/a.js`, `.` for `./a.js`).
pub fn parent_dir(id: &str) -> &str {
    match id.rfind('/') {
        Some(0) => "/",
        Some(idx) => &id[..idx],
        None => ".",
    }
}

/// Resolve a canonical id back to an absolute path under `root`.
pub fn resolve_id(root: &Path, id: &str) -> PathBuf {
    root.join(id).clean()
}

fn with_marker(path: &Path) -> String {
    let slashed = to_slash(path);
    if matches!(path.components().next(), Some(Component::ParentDir)) {
        slashed
    } else {
        format!("{BUNDLE_RELATIVE_MARKER}{slashed}")
    }
}

fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

// Both inputs are cleaned and share the same base.
fn relative_from(root: &Path, path: &Path) -> PathBuf {
    let root_parts: Vec<Component<'_>> = root.components().collect();
    let path_parts: Vec<Component<'_>> = path.components().collect();

    let shared = root_parts
        .iter()
        .zip(path_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in shared..root_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[shared..] {
        relative.push(part.as_os_str());
    }
    relative
}
