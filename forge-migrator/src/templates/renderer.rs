//! Template renderer.

use crate::records::{display_timestamp, SourceComment, SourceProject, SourceRecord};
use handlebars::{no_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::{json, Value};

/// Creates a configured Handlebars registry with custom helpers.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
/// - `eq` helper for equality comparisons
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    // Bodies are markdown, not HTML
    hbs.register_escape_fn(no_escape);

    hbs.set_strict_mode(true);

    hbs.register_helper("eq", Box::new(eq_helper));

    hbs
}

/// Usage: `{{#if (eq kind "PR")}}...{{/if}}`
fn eq_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param1 = h.param(0).and_then(|v| v.value().as_str());
    let param2 = h.param(1).and_then(|v| v.value().as_str());

    let result = match (param1, param2) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    out.write(if result { "true" } else { "" })?;
    Ok(())
}

/// Renders the configured formats with record data.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders the body of a freshly transferred record.
    ///
    /// Variables: `kind`, `id`, `title`, `url`, `created`, `author`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_transfer_body(
        &self,
        template: &str,
        record: &SourceRecord<'_>,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "kind": record.kind().as_str(),
            "id": record.id(),
            "title": record.title(),
            "url": record.url(),
            "created": display_timestamp(&record.created()),
            "author": record.author(),
        });

        self.render_template(template, &data)
    }

    /// Renders a source user's profile URL.
    ///
    /// Variables: `instance_url`, `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_profile_url(
        &self,
        template: &str,
        project: &SourceProject,
        user: &str,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "instance_url": project.instance_url(),
            "user": user,
        });

        self.render_template(template, &data)
    }

    /// Renders the description block of a merge payload.
    ///
    /// Variables: `description`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_description(
        &self,
        template: &str,
        description: &str,
    ) -> Result<String, super::TemplateError> {
        self.render_template(template, &json!({ "description": description }))
    }

    /// Renders one comment block of a merge payload.
    ///
    /// Variables: `author`, `profile_url`, `created`, `body`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_comment(
        &self,
        template: &str,
        comment: &SourceComment,
        profile_url: &str,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "author": comment.author,
            "profile_url": profile_url,
            "created": display_timestamp(&comment.created),
            "body": comment.body,
        });

        self.render_template(template, &data)
    }

    /// Renders the linked `Opened by` line.
    ///
    /// Variables: `author`, `profile_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_opened_by(
        &self,
        template: &str,
        author: &str,
        profile_url: &str,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "author": author,
            "profile_url": profile_url,
        });

        self.render_template(template, &data)
    }

    /// Renders the public URL of a destination issue.
    ///
    /// Variables: `owner`, `repo`, `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_destination_url(
        &self,
        template: &str,
        owner: &str,
        repo: &str,
        id: u64,
    ) -> Result<String, super::TemplateError> {
        let data = json!({
            "owner": owner,
            "repo": repo,
            "id": id,
        });

        self.render_template(template, &data)
    }

    /// Renders the close-out notice.
    ///
    /// Variables: `url`, `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_close_out_notice(
        &self,
        template: &str,
        url: &str,
        id: u64,
    ) -> Result<String, super::TemplateError> {
        self.render_template(template, &json!({ "url": url, "id": id }))
    }

    fn render_template(
        &self,
        template: &str,
        data: &Value,
    ) -> Result<String, super::TemplateError> {
        Ok(self.handlebars.render_template(template, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_comment_format, default_transfer_body_format};
    use crate::records::{SourceIssue, SourceStatus};
    use chrono::DateTime;

    fn sample_issue() -> SourceIssue {
        SourceIssue {
            id: 7,
            title: "Builds hang".to_string(),
            author: "alice".to_string(),
            created: DateTime::from_timestamp(1_600_000_000, 0).unwrap(),
            status: SourceStatus::Open,
            close_status: None,
            description: "They hang <forever>.".to_string(),
            labels: Vec::new(),
            comments: Vec::new(),
            url: "https://pagure.io/copr/copr/issue/7".to_string(),
        }
    }

    #[test]
    fn renders_default_transfer_body() {
        let renderer = TemplateRenderer::new();
        let issue = sample_issue();

        let body = renderer
            .render_transfer_body(&default_transfer_body_format(), &SourceRecord::Issue(&issue))
            .unwrap();

        assert_eq!(
            body,
            "Original issue: https://pagure.io/copr/copr/issue/7\n\
             Opened: 2020-09-13 12:26:40 UTC\n\
             Opened by: alice"
        );
    }

    #[test]
    fn renders_conditional_on_kind() {
        let renderer = TemplateRenderer::new();
        let issue = sample_issue();

        let template = r#"{{#if (eq kind "PR")}}pull request{{else}}plain issue{{/if}}"#;
        let body = renderer
            .render_transfer_body(template, &SourceRecord::Issue(&issue))
            .unwrap();

        assert_eq!(body, "plain issue");
    }

    #[test]
    fn renders_comment_block() {
        let renderer = TemplateRenderer::new();
        let comment = SourceComment {
            author: "bob".to_string(),
            created: DateTime::from_timestamp(1_600_003_600, 0).unwrap(),
            body: "Seen it too".to_string(),
        };

        let block = renderer
            .render_comment(&default_comment_format(), &comment, "https://pagure.io/user/bob")
            .unwrap();

        assert_eq!(
            block,
            "\n\n---\n\n**[bob](https://pagure.io/user/bob)** commented at 2020-09-13 13:26:40 UTC:\n\nSeen it too"
        );
    }

    #[test]
    fn renders_profile_and_destination_urls() {
        let renderer = TemplateRenderer::new();
        let project = SourceProject::new("https://pagure.io", Some("copr"), "copr").unwrap();

        let profile = renderer
            .render_profile_url("{{instance_url}}/user/{{user}}", &project, "alice")
            .unwrap();
        let url = renderer
            .render_destination_url(
                "https://github.com/{{owner}}/{{repo}}/issues/{{id}}",
                "fedora-copr",
                "copr",
                42,
            )
            .unwrap();

        assert_eq!(profile, "https://pagure.io/user/alice");
        assert_eq!(url, "https://github.com/fedora-copr/copr/issues/42");
    }

    #[test]
    fn no_html_escaping() {
        let renderer = TemplateRenderer::new();

        let result = renderer
            .render_description("{{description}}", "<script>alert('xss')</script>")
            .unwrap();

        assert_eq!(result, "<script>alert('xss')</script>");
    }

    #[test]
    fn strict_mode_rejects_unknown_variables() {
        let renderer = TemplateRenderer::new();

        let result = renderer.render_description("{{summary}}", "text");
        assert!(result.is_err());
    }
}
