//! Raw URL template - turns a generated path into an addressable location
//!
//! The template is configuration, e.g.
//! `https://raw.githubusercontent.com/{repo}/main/{path}`. `{repo}` is
//! substituted from the configured repository; `{path}` from the artifact.
//! A template without `{path}` is treated as a base the path is appended to.

/// Opaque formatter for `code_raw_url` / `test_raw_url`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUrlTemplate {
    template: String,
}

impl RawUrlTemplate {
    const PATH: &'static str = "{path}";
    const REPO: &'static str = "{repo}";

    /// Build a template, filling `{repo}` right away when a repository is known
    pub fn new(template: impl Into<String>, repo: Option<&str>) -> Self {
        let template: String = template.into();
        let template = match repo {
            Some(repo) => template.replace(Self::REPO, repo),
            None => template,
        };
        Self { template }
    }

    /// Format the location of a relative artifact path
    pub fn format(&self, path: &str) -> String {
        if self.template.contains(Self::PATH) {
            self.template.replace(Self::PATH, path)
        } else {
            format!("{}{}", self.template, path)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}
