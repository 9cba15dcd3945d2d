//! GitHub destination backed by octocrab.

use super::{DestinationError, DestinationIssue, DestinationState, DestinationTracker};
use crate::rate_limit::ensure_core_rate_limit;
use async_trait::async_trait;
use octocrab::models::issues::Issue;
use octocrab::models::IssueState;
use octocrab::Octocrab;
use tracing::debug;

/// A GitHub repository receiving migrated issues.
pub struct GithubDestination {
    octocrab: Octocrab,
    owner: String,
    repo: String,
}

impl GithubDestination {
    /// Builds an authenticated client for `owner/repo`.
    ///
    /// # Errors
    ///
    /// Returns [`DestinationError`] if the client cannot be constructed.
    pub fn new(token: &str, owner: &str, repo: &str) -> Result<Self, DestinationError> {
        let octocrab = Octocrab::builder()
            .personal_token(token.to_string())
            .build()?;
        Ok(Self {
            octocrab,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

fn to_destination_issue(issue: Issue) -> DestinationIssue {
    let state = match issue.state {
        IssueState::Closed => DestinationState::Closed,
        _ => DestinationState::Open,
    };
    DestinationIssue {
        id: issue.number,
        title: issue.title,
        body: issue.body.unwrap_or_default(),
        state,
        labels: issue.labels.into_iter().map(|label| label.name).collect(),
    }
}

fn is_not_found(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404
    )
}

#[async_trait]
impl DestinationTracker for GithubDestination {
    async fn create_issue(
        &self,
        title: &str,
        body: &str,
    ) -> Result<DestinationIssue, DestinationError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let issue = self
            .octocrab
            .issues(&self.owner, &self.repo)
            .create(title)
            .body(body)
            .send()
            .await?;

        debug!(issue_number = issue.number, "Created GitHub issue");
        Ok(to_destination_issue(issue))
    }

    async fn get_issue(&self, id: u64) -> Result<DestinationIssue, DestinationError> {
        let issue = self
            .octocrab
            .issues(&self.owner, &self.repo)
            .get(id)
            .await
            .map_err(|e| {
                if is_not_found(&e) {
                    DestinationError::NotFound { id }
                } else {
                    DestinationError::GitHubError(e)
                }
            })?;

        Ok(to_destination_issue(issue))
    }

    async fn close_issue(&self, id: u64) -> Result<(), DestinationError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        self.octocrab
            .issues(&self.owner, &self.repo)
            .update(id)
            .state(IssueState::Closed)
            .send()
            .await?;
        Ok(())
    }

    async fn add_labels(&self, id: u64, labels: &[String]) -> Result<(), DestinationError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        self.octocrab
            .issues(&self.owner, &self.repo)
            .add_labels(id, labels)
            .await?;
        Ok(())
    }

    async fn set_body(&self, id: u64, body: &str) -> Result<(), DestinationError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        self.octocrab
            .issues(&self.owner, &self.repo)
            .update(id)
            .body(body)
            .send()
            .await?;
        Ok(())
    }
}
