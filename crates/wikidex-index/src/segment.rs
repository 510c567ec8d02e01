//! URL path segmentation.
//!
//! Both the index tree and breadcrumbs work on the *directory* of a URL,
//! never on the full URL:
//!
//! ```text
//! /guide/setup/install.html  ->  /guide/setup  ->  ["guide", "setup"]
//! /guide/setup/              ->  /guide        ->  ["guide"]
//! /about.html                ->  /             ->  []
//! ```

/// Split a path into its non-empty `/`-separated segments.
///
/// Leading, trailing, and repeated slashes produce no segments, so `""` and
/// `"///"` both yield an empty list.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Directory portion of a URL, with the final component removed.
///
/// Trailing slashes are ignored before the last component is dropped, so a
/// directory URL like `/a/b/` resolves to `/a`. A bare name without any slash
/// has no directory and resolves to `""`.
pub fn parent_dir(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    if trimmed.is_empty() {
        return if url.starts_with('/') { "/" } else { "" };
    }

    match trimmed.rfind('/') {
        Some(idx) => {
            let head = trimmed[..idx].trim_end_matches('/');
            if head.is_empty() { "/" } else { head }
        }
        None => "",
    }
}

/// Segments of the directory containing `url`.
pub fn dir_segments(url: &str) -> Vec<&str> {
    segments(parent_dir(url))
}

/// Join a parent directory path and a child name.
///
/// The root directory is the empty path, so joining onto it yields the bare
/// name (`"" + "guide"` is `"guide"`, `"guide" + "setup"` is `"guide/setup"`).
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_owned()
    } else {
        format!("{parent}/{name}")
    }
}
