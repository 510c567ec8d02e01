//! Breadcrumb navigation trails.
//!
//! A trail runs from the site root to the directory containing a path; the
//! file itself is not part of it:
//!
//! ```text
//! /a/b/c/page.html  ->  Home (/) > a (/a/) > b (/a/b/) > c (/a/b/c/)
//! ```

use std::fmt;

use serde::Serialize;

use crate::segment::dir_segments;

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display label.
    pub label: String,
    /// Link target, always ending with `/`.
    pub href: String,
}

/// Ordered trail from the root to a directory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Breadcrumb {
    /// Items, root first.
    pub items: Vec<BreadcrumbItem>,
}

impl Breadcrumb {
    /// Render as HTML links separated by `&gt;`.
    ///
    /// Labels and hrefs are HTML-escaped.
    #[must_use]
    pub fn render_html(&self) -> String {
        self.items
            .iter()
            .map(|item| {
                format!(
                    "<a href=\"{}\">{}</a>",
                    escape_html(&item.href),
                    escape_html(&item.label)
                )
            })
            .collect::<Vec<_>>()
            .join(" &gt; ")
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the trail has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Breadcrumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{} ({})", item.label, item.href)?;
        }
        Ok(())
    }
}

/// Builds breadcrumb trails with a configurable root entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreadcrumbBuilder {
    home_label: String,
    site_root: String,
}

impl Default for BreadcrumbBuilder {
    fn default() -> Self {
        Self {
            home_label: "Home".to_owned(),
            site_root: "/".to_owned(),
        }
    }
}

impl BreadcrumbBuilder {
    /// Create a builder with the `Home` label rooted at `/`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label of the root entry.
    #[must_use]
    pub fn with_home_label(mut self, label: impl Into<String>) -> Self {
        self.home_label = label.into();
        self
    }

    /// Set the URL prefix all hrefs start from (e.g. `/docs/`).
    ///
    /// A missing trailing slash is added.
    #[must_use]
    pub fn with_site_root(mut self, root: impl Into<String>) -> Self {
        let mut root = root.into();
        if !root.ends_with('/') {
            root.push('/');
        }
        self.site_root = root;
        self
    }

    /// Build the trail for `path`.
    ///
    /// The final component of `path` is dropped before segmenting, so
    /// `/a/page.html` and `/a/` both end at the parent directory of their
    /// last component.
    #[must_use]
    pub fn build(&self, path: &str) -> Breadcrumb {
        let segments = dir_segments(path);
        let mut items = Vec::with_capacity(segments.len() + 1);
        items.push(BreadcrumbItem {
            label: self.home_label.clone(),
            href: self.site_root.clone(),
        });

        let mut href = self.site_root.clone();
        for segment in segments {
            href.push_str(segment);
            href.push('/');
            items.push(BreadcrumbItem {
                label: segment.to_owned(),
                href: href.clone(),
            });
        }

        Breadcrumb { items }
    }
}

/// Build the trail for `path` with the default `Home` root at `/`.
pub fn breadcrumb(path: &str) -> Breadcrumb {
    BreadcrumbBuilder::default().build(path)
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn hrefs(trail: &Breadcrumb) -> Vec<&str> {
        trail.items.iter().map(|i| i.href.as_str()).collect()
    }

    #[test]
    fn test_breadcrumb_nested_page() {
        let trail = breadcrumb("/a/b/c/page.html");

        assert_eq!(trail.len(), 4);
        assert_eq!(hrefs(&trail), vec!["/", "/a/", "/a/b/", "/a/b/c/"]);
        assert_eq!(
            trail.to_string(),
            "Home (/) > a (/a/) > b (/a/b/) > c (/a/b/c/)"
        );
    }

    #[test]
    fn test_breadcrumb_top_level_page_is_home_only() {
        let trail = breadcrumb("/page.html");

        assert_eq!(
            trail.items,
            vec![BreadcrumbItem {
                label: "Home".to_owned(),
                href: "/".to_owned(),
            }]
        );
    }

    #[test]
    fn test_breadcrumb_root_is_home_only() {
        assert_eq!(breadcrumb("/").to_string(), "Home (/)");
        assert_eq!(breadcrumb("").to_string(), "Home (/)");
    }

    #[test]
    fn test_breadcrumb_directory_url_drops_last_segment() {
        let trail = breadcrumb("/a/b/");

        assert_eq!(hrefs(&trail), vec!["/", "/a/"]);
    }

    #[test]
    fn test_breadcrumb_collapses_repeated_slashes() {
        let trail = breadcrumb("//a///b//page.html");

        assert_eq!(hrefs(&trail), vec!["/", "/a/", "/a/b/"]);
    }

    #[test]
    fn test_render_html() {
        let html = breadcrumb("/guide/setup/install.html").render_html();

        assert_eq!(
            html,
            "<a href=\"/\">Home</a> &gt; <a href=\"/guide/\">guide</a> &gt; \
             <a href=\"/guide/setup/\">setup</a>"
        );
    }

    #[test]
    fn test_render_html_escapes() {
        let html = breadcrumb("/a&b/<x>/page.html").render_html();

        assert!(html.contains("<a href=\"/a&amp;b/\">a&amp;b</a>"));
        assert!(html.contains("&lt;x&gt;"));
    }

    #[test]
    fn test_builder_custom_home_and_root() {
        let builder = BreadcrumbBuilder::new()
            .with_home_label("Docs")
            .with_site_root("/docs");

        let trail = builder.build("/guide/page.html");

        assert_eq!(trail.to_string(), "Docs (/docs/) > guide (/docs/guide/)");
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html("\"hello\""), "&quot;hello&quot;");
    }
}
