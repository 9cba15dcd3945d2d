//! Handlebars formats for every text the migration writes.

use serde::Deserialize;

/// Text formats used when writing to either forge.
///
/// Every `*_format` field is a Handlebars template; see
/// [`TemplateRenderer`](crate::templates::TemplateRenderer) for the variables
/// each one receives.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TemplateFormats {
    /// Body of a transferred issue or pull request.
    pub transfer_body_format: String,

    /// Prefix prepended to the titles of transferred pull requests.
    pub pull_request_title_prefix: String,

    /// Title of issues that only reserve an unused number.
    pub placeholder_title: String,

    /// Body of issues that only reserve an unused number.
    pub placeholder_body: String,

    /// Block wrapping the source description during content merge.
    pub description_format: String,

    /// Block rendered for each kept comment during content merge.
    pub comment_format: String,

    /// Replacement for the plain `Opened by: <user>` line.
    pub opened_by_format: String,

    /// Link to a source user's profile.
    pub profile_url_format: String,

    /// Comment posted on the source issue during close-out.
    pub close_out_notice_format: String,

    /// Public URL of a destination issue, used in the close-out notice.
    pub destination_issue_url_format: String,
}

impl Default for TemplateFormats {
    fn default() -> Self {
        Self {
            transfer_body_format: default_transfer_body_format(),
            pull_request_title_prefix: "[PR] ".to_string(),
            placeholder_title: "Dummy issue to fill space between IDs".to_string(),
            placeholder_body: "Dummy issue to fill space between IDs.".to_string(),
            description_format: default_description_format(),
            comment_format: default_comment_format(),
            opened_by_format: "Opened by: [{{author}}]({{profile_url}})".to_string(),
            profile_url_format: "{{instance_url}}/user/{{user}}".to_string(),
            close_out_notice_format: "This issue has been migrated to GitHub: {{url}}".to_string(),
            destination_issue_url_format: "https://github.com/{{owner}}/{{repo}}/issues/{{id}}"
                .to_string(),
        }
    }
}

/// Three-line header linking back to the original record.
#[must_use]
pub fn default_transfer_body_format() -> String {
    "Original {{kind}}: {{url}}\nOpened: {{created}}\nOpened by: {{author}}".to_string()
}

/// Description block, separated from the header by two blank lines.
#[must_use]
pub fn default_description_format() -> String {
    "\n\n\n{{description}}".to_string()
}

#[must_use]
pub fn default_comment_format() -> String {
    "\n\n---\n\n**[{{author}}]({{profile_url}})** commented at {{created}}:\n\n{{body}}".to_string()
}
