//! Template loading and rendering.

use std::path::{Path, PathBuf};

use minijinja::{Environment, Value};
use serde::Serialize;
use wikidex_index::{BreadcrumbBuilder, TemplateCatalog};

/// Error returned when rendering or writing an index page fails.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Template missing, malformed, or failed to render.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
    /// Output could not be written.
    #[error("I/O error writing {}: {source}", path.display())]
    Io {
        /// File or directory that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Templates loaded from a directory.
///
/// A template named `index` is the file `index.html` in the directory. HTML
/// auto-escaping is on. Every template can call `breadcrumb(path)` to get the
/// trail for a path as safe HTML.
pub struct TemplateSet {
    dir: PathBuf,
    env: Environment<'static>,
}

impl std::fmt::Debug for TemplateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateSet")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

impl TemplateSet {
    /// Create a template set for `dir`.
    ///
    /// The directory does not have to exist; a missing directory simply has
    /// no templates.
    #[must_use]
    pub fn new(dir: PathBuf, breadcrumbs: BreadcrumbBuilder) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(&dir));
        env.add_function("breadcrumb", move |path: String| {
            Value::from_safe_string(breadcrumbs.build(&path).render_html())
        });
        Self { dir, env }
    }

    /// Template directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Render the template `name` with `context`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if the template is missing, has a
    /// syntax error, or fails while rendering.
    pub fn render(&self, name: &str, context: impl Serialize) -> Result<String, RenderError> {
        let template = self.env.get_template(&template_file(name))?;
        Ok(template.render(context)?)
    }
}

impl TemplateCatalog for TemplateSet {
    fn has_template(&self, name: &str) -> bool {
        self.dir.join(template_file(name)).is_file()
    }
}

fn template_file(name: &str) -> String {
    format!("{name}.html")
}
