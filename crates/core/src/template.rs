//! Named query definitions with a single argument placeholder
//!
//! A named query `byId` lives at `<queries dir>/byId.rq`. The first `{{.}}` in
//! the file is replaced verbatim with the runtime argument; the argument is not
//! escaped, so callers must make sure it cannot break the query syntax.

use crate::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Placeholder replaced by the query argument.
pub const PLACEHOLDER: &str = "{{.}}";

/// File extension of query definitions.
pub const QUERY_EXTENSION: &str = "rq";

/// Replace the first placeholder in `template` with `argument`
#[must_use]
pub fn substitute(template: &str, argument: &str) -> String {
    template.replacen(PLACEHOLDER, argument, 1)
}

/// Directory of named query definitions
#[derive(Debug, Clone)]
pub struct QueryTemplates {
    root: PathBuf,
}

impl QueryTemplates {
    /// Templates stored under `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the definitions directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the definition file for `name`
    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{QUERY_EXTENSION}"))
    }

    /// Load the definition of `name` and substitute `argument`
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueryNotFound`] if there is no definition file and
    /// [`Error::TemplateRead`] if it exists but cannot be read
    pub fn render(&self, name: &str, argument: &str) -> Result<String> {
        let path = self.path(name);

        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(Error::QueryNotFound {
                    name: name.to_string(),
                    path,
                });
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::QueryNotFound {
                    name: name.to_string(),
                    path,
                });
            }
            Err(source) => return Err(Error::TemplateRead { path, source }),
        }

        let template =
            fs::read_to_string(&path).map_err(|source| Error::TemplateRead { path, source })?;
        Ok(substitute(&template, argument))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_substitute_first_only() {
        assert_eq!(
            substitute(r#"SELECT * WHERE { ?s ?p "{{.}}" }"#, "42"),
            r#"SELECT * WHERE { ?s ?p "42" }"#
        );
        assert_eq!(substitute("{{.}} {{.}}", "a"), "a {{.}}");
        assert_eq!(substitute("ASK {}", "ignored"), "ASK {}");
    }

    #[test]
    fn test_substitute_is_verbatim() {
        assert_eq!(
            substitute("<{{.}}>", "http://x/> } DROP ALL {"),
            "<http://x/> } DROP ALL {>"
        );
        // An argument that itself contains the placeholder is not re-expanded
        assert_eq!(substitute("{{.}}-{{.}}", "{{.}}"), "{{.}}-{{.}}");
    }

    #[test]
    fn test_path() {
        let templates = QueryTemplates::new("queries");
        assert_eq!(templates.path("byId"), PathBuf::from("queries/byId.rq"));
    }

    #[test]
    fn test_render() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("byId.rq"),
            r#"SELECT * WHERE { ?s ?p "{{.}}" }"#,
        )
        .unwrap();

        let templates = QueryTemplates::new(tmp.path());
        assert_eq!(
            templates.render("byId", "42").unwrap(),
            r#"SELECT * WHERE { ?s ?p "42" }"#
        );
    }

    #[test]
    fn test_render_missing() {
        let tmp = TempDir::new().unwrap();
        let templates = QueryTemplates::new(tmp.path());

        let err = templates.render("missing", "x").unwrap_err();
        assert!(matches!(err, Error::QueryNotFound { ref name, .. } if name == "missing"));
    }

    #[test]
    fn test_render_directory_is_not_a_query() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("nested.rq")).unwrap();
        let templates = QueryTemplates::new(tmp.path());

        assert!(matches!(
            templates.render("nested", "x").unwrap_err(),
            Error::QueryNotFound { .. }
        ));
    }
}
