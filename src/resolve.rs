//! Path resolution
//!
//! Pure path algebra for turning caller-supplied link targets into absolute,
//! normalized URIs. Resolution is anchored by two URIs from the enclosing
//! routing scope:
//!
//! - the **base** URI of the nearest router, which anchors absolute targets
//!   (those starting with `/`), and
//! - the **current** URI of the nearest matched route, which anchors
//!   relative targets.
//!
//! Both [`resolve`] and [`normalize`] are total: malformed input degrades to
//! a deterministic best-effort result instead of an error. They sit on the
//! interactive path of every link and navigation call and must never panic.

/// Normalize a path into an absolute, slash-delimited URI.
///
/// Repeated slashes collapse, `.` segments drop, and `..` segments remove
/// the preceding segment. A `..` with nothing left to remove clamps at the
/// root rather than failing. A trailing slash survives only when the input
/// carries one explicitly.
///
/// The output always starts with `/`, regardless of the input shape.
///
/// # Example
///
/// ```
/// use route_hooks::normalize;
///
/// assert_eq!(normalize("/a//b/../c"), "/a/c");
/// assert_eq!(normalize("/../a"), "/a");
/// assert_eq!(normalize("/docs/"), "/docs/");
/// ```
pub fn normalize(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                // Popping an empty stack clamps at the root.
                stack.pop();
            }
            other => stack.push(other),
        }
    }

    let mut out = String::with_capacity(path.len() + 1);
    out.push('/');
    out.push_str(&stack.join("/"));
    if !stack.is_empty() && path.ends_with('/') {
        out.push('/');
    }
    out
}

/// Resolve a link target against a routing scope.
///
/// - An absolute `path` (leading `/`) is anchored at `basepath`: it is
///   prefixed by it and normalized, unless it already lies under `basepath`,
///   in which case it is returned normalized as-is. `current_uri` plays no
///   part. The containment check is what makes feeding a resolved URI back
///   in a no-op.
/// - A relative `path` is appended to `current_uri`'s segments and
///   normalized.
/// - An empty or `"."` path resolves to `current_uri` itself.
///
/// A `?query` or `#hash` suffix on `path` is carried to the output verbatim;
/// only the pathname part takes part in segment processing.
///
/// # Example
///
/// ```
/// use route_hooks::resolve;
///
/// assert_eq!(resolve("123", "/app", "/app/blog"), "/app/blog/123");
/// assert_eq!(resolve("/settings", "/app", "/app/blog/123"), "/app/settings");
/// assert_eq!(resolve("../drafts", "/app", "/app/blog"), "/app/drafts");
/// ```
pub fn resolve(path: &str, basepath: &str, current_uri: &str) -> String {
    let (pathname, suffix) = split_suffix(path);

    if pathname.is_empty() || pathname == "." {
        return with_suffix(normalize(current_uri), suffix);
    }

    let resolved = if pathname.starts_with('/') {
        let base = normalize(basepath);
        let target = normalize(pathname);
        if base == "/" || is_within(&target, &base) {
            target
        } else {
            normalize(&format!("{}/{}", base, pathname))
        }
    } else {
        normalize(&format!("{}/{}", current_uri, pathname))
    };

    with_suffix(resolved, suffix)
}

/// Split a link target into its pathname and a `?query`/`#hash` remainder.
fn split_suffix(path: &str) -> (&str, &str) {
    match path.find(['?', '#']) {
        Some(idx) => path.split_at(idx),
        None => (path, ""),
    }
}

fn with_suffix(pathname: String, suffix: &str) -> String {
    if suffix.is_empty() {
        pathname
    } else {
        pathname + suffix
    }
}

/// Segment-wise containment: `uri` starts with all of `base`'s segments.
fn is_within(uri: &str, base: &str) -> bool {
    let mut base_segments = base.split('/').filter(|s| !s.is_empty());
    let mut uri_segments = uri.split('/').filter(|s| !s.is_empty());

    loop {
        match (base_segments.next(), uri_segments.next()) {
            (None, _) => return true,
            (Some(b), Some(u)) if b == u => {}
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Normalization

    #[test]
    fn test_normalize_collapses_slashes() {
        assert_eq!(normalize("/a//b///c"), "/a/b/c");
        assert_eq!(normalize("//"), "/");
    }

    #[test]
    fn test_normalize_resolves_dotdot() {
        assert_eq!(normalize("/a//b/../c"), "/a/c");
        assert_eq!(normalize("/a/b/.."), "/a");
        assert_eq!(normalize("/a/.."), "/");
    }

    #[test]
    fn test_normalize_clamps_at_root() {
        assert_eq!(normalize("/../a"), "/a");
        assert_eq!(normalize("/.."), "/");
        assert_eq!(normalize("/../../a/b"), "/a/b");
    }

    #[test]
    fn test_normalize_drops_single_dots() {
        assert_eq!(normalize("/a/./b"), "/a/b");
        assert_eq!(normalize("/."), "/");
    }

    #[test]
    fn test_normalize_trailing_slash_is_explicit() {
        assert_eq!(normalize("/a/b/"), "/a/b/");
        assert_eq!(normalize("/a/b"), "/a/b");
        assert_eq!(normalize("/"), "/");
        // Everything cancelled out: no segment left to hang a slash on.
        assert_eq!(normalize("/a/../"), "/");
    }

    #[test]
    fn test_normalize_output_is_absolute() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("a/b"), "/a/b");
    }

    // Absolute targets

    #[test]
    fn test_absolute_is_anchored_at_base() {
        assert_eq!(resolve("/settings", "/app", "/app/blog/123"), "/app/settings");
    }

    #[test]
    fn test_absolute_ignores_current_uri() {
        let a = resolve("/settings", "/app", "/app/blog");
        let b = resolve("/settings", "/app", "/app/profile/42/edit");
        let c = resolve("/settings", "/app", "/");
        assert_eq!(a, "/app/settings");
        assert_eq!(b, "/app/settings");
        assert_eq!(c, "/app/settings");
    }

    #[test]
    fn test_absolute_under_root_base_passes_through() {
        assert_eq!(resolve("/users/7", "/", "/anything"), "/users/7");
    }

    #[test]
    fn test_absolute_already_under_base_is_not_reprefixed() {
        assert_eq!(resolve("/app/settings", "/app", "/app/blog"), "/app/settings");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let once = resolve("123", "/app", "/app/blog");
        let twice = resolve(&once, "/app", "/app/blog");
        assert_eq!(once, "/app/blog/123");
        assert_eq!(twice, once);

        let once = resolve("/settings", "/app", "/app/blog");
        let twice = resolve(&once, "/app", "/app/blog");
        assert_eq!(twice, once);
    }

    // Relative targets

    #[test]
    fn test_relative_appends_to_current_uri() {
        assert_eq!(resolve("123", "/app", "/app/blog"), "/app/blog/123");
        assert_eq!(resolve("a/b/c", "/", "/docs"), "/docs/a/b/c");
    }

    #[test]
    fn test_single_segment_matches_plain_concatenation() {
        for (current, path) in [("/app/blog", "123"), ("/", "about"), ("/x/y", "z")] {
            assert_eq!(
                resolve(path, "/ignored", current),
                normalize(&format!("{}/{}", current, path))
            );
        }
    }

    #[test]
    fn test_relative_dotdot_climbs() {
        assert_eq!(resolve("..", "/app", "/app/blog"), "/app");
        assert_eq!(resolve("../drafts", "/app", "/app/blog"), "/app/drafts");
        assert_eq!(resolve("../../x", "/app", "/app/blog"), "/x");
        // Climbing past the root clamps instead of failing.
        assert_eq!(resolve("../../../../x", "/app", "/app/blog"), "/x");
    }

    #[test]
    fn test_dot_and_empty_resolve_to_current() {
        assert_eq!(resolve(".", "/app", "/app/blog"), "/app/blog");
        assert_eq!(resolve("", "/app", "/app/blog"), "/app/blog");
        assert_eq!(resolve(".", "/app", "/app//blog"), "/app/blog");
    }

    #[test]
    fn test_trailing_slash_preserved_only_when_present() {
        assert_eq!(resolve("docs/", "/app", "/app/blog"), "/app/blog/docs/");
        assert_eq!(resolve("docs", "/app", "/app/blog"), "/app/blog/docs");
        assert_eq!(resolve("/settings/", "/app", "/app/blog"), "/app/settings/");
    }

    // Query and hash pass-through

    #[test]
    fn test_query_suffix_is_carried() {
        assert_eq!(resolve("123?page=2", "/app", "/app/blog"), "/app/blog/123?page=2");
        assert_eq!(resolve("/settings?tab=a", "/app", "/x"), "/app/settings?tab=a");
    }

    #[test]
    fn test_hash_suffix_is_carried() {
        assert_eq!(resolve("123#top", "/app", "/app/blog"), "/app/blog/123#top");
        assert_eq!(resolve("?page=2#top", "/app", "/app/blog"), "/app/blog?page=2#top");
    }

    #[test]
    fn test_bare_query_targets_current_uri() {
        assert_eq!(resolve("?sort=name", "/app", "/app/blog"), "/app/blog?sort=name");
    }

    // Degenerate input never panics, output stays absolute

    #[test]
    fn test_malformed_input_degrades() {
        assert_eq!(resolve("//a//", "/", "/x"), "/a/");
        assert_eq!(resolve("..//..", "/app", "/a/b"), "/");
        assert!(resolve("...", "/app", "/a").starts_with('/'));
        assert!(resolve("a/?/b", "/app", "/x").starts_with('/'));
    }
}
