//! Location of the source project on its forge.

use url::Url;

/// A Pagure project, addressed by instance, optional namespace and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceProject {
    instance_url: String,
    namespace: Option<String>,
    repo: String,
}

impl SourceProject {
    /// Creates a project reference, validating the instance URL.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if `instance_url` is not an absolute URL.
    pub fn new(
        instance_url: &str,
        namespace: Option<&str>,
        repo: &str,
    ) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(instance_url)?;
        Ok(Self {
            instance_url: parsed.as_str().trim_end_matches('/').to_string(),
            namespace: namespace
                .map(str::trim)
                .filter(|ns| !ns.is_empty())
                .map(str::to_string),
            repo: repo.trim().to_string(),
        })
    }

    /// Instance root without a trailing slash (e.g. `https://pagure.io`).
    #[must_use]
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// `namespace/repo`, or just `repo` for top-level projects.
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}/{}", self.repo),
            None => self.repo.clone(),
        }
    }

    /// Web URL of the project.
    #[must_use]
    pub fn web_url(&self) -> String {
        format!("{}/{}", self.instance_url, self.full_name())
    }

    /// Web URL of an issue.
    #[must_use]
    pub fn issue_url(&self, id: u64) -> String {
        format!("{}/issue/{id}", self.web_url())
    }

    /// Web URL of a pull request.
    #[must_use]
    pub fn pull_request_url(&self, id: u64) -> String {
        format!("{}/pull-request/{id}", self.web_url())
    }

    /// Project-scoped API v0 endpoint for `path`.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/api/0/{}/{}",
            self.instance_url,
            self.full_name(),
            path.trim_start_matches('/')
        )
    }
}
