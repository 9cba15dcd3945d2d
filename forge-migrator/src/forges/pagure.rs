//! Pagure source backed by the REST API v0.

use super::{SourceError, SourceTracker, StatusFilter, StatusTransition};
use crate::records::raw::{RawIssue, RawPullRequest};
use crate::records::{SourceIssue, SourceProject, SourcePullRequest};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, info_span, Instrument};

/// Records requested per page when listing.
const PER_PAGE: &str = "100";

/// A Pagure project that records are migrated away from.
pub struct PagureSource {
    http: Client,
    project: SourceProject,
}

impl PagureSource {
    /// Builds a client for `project`, authenticated when a token is given.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the token is not a valid header value or
    /// the HTTP client cannot be built.
    pub fn new(token: Option<&str>, project: SourceProject) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("forge-migrator"));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("token {}", token.trim()))
                .map_err(|_| SourceError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder().default_headers(headers).build()?;
        Ok(Self { http, project })
    }

    /// Issues exactly as the API returns them, across all pages.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on transport or API failures.
    pub async fn raw_issues(&self, filter: StatusFilter) -> Result<Vec<Value>, SourceError> {
        self.fetch_all("issues", "issues", &[("status", filter.as_query())])
            .await
    }

    /// Pull requests of every status exactly as the API returns them.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on transport or API failures.
    pub async fn raw_pull_requests(&self) -> Result<Vec<Value>, SourceError> {
        self.fetch_all("pull-requests", "requests", &[("status", "All")])
            .await
    }

    async fn fetch_all(
        &self,
        path: &str,
        key: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<Value>, SourceError> {
        let endpoint = self.project.api_url(path);
        let span = info_span!("pagure_list", endpoint = %endpoint);

        async {
            let mut records = Vec::new();
            let mut page: u32 = 1;
            loop {
                let page_param = page.to_string();
                let response = self
                    .http
                    .get(&endpoint)
                    .query(query)
                    .query(&[("per_page", PER_PAGE), ("page", page_param.as_str())])
                    .send()
                    .await?;
                let body: Value = check_response(response, &endpoint).await?.json().await?;
                let (mut items, has_next) = parse_page(body, key, &endpoint)?;
                debug!(page, count = items.len(), "Fetched page");
                records.append(&mut items);

                if !has_next {
                    break;
                }
                page += 1;
            }
            Ok(records)
        }
        .instrument(span)
        .await
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<(), SourceError> {
        let endpoint = self.project.api_url(path);
        let response = self.http.post(&endpoint).form(form).send().await?;
        check_response(response, &endpoint).await?;
        Ok(())
    }
}

async fn check_response(response: Response, endpoint: &str) -> Result<Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(SourceError::Api {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        message,
    })
}

/// Splits one listing page into its records and whether another page follows.
fn parse_page(body: Value, key: &str, endpoint: &str) -> Result<(Vec<Value>, bool), SourceError> {
    let Value::Object(mut object) = body else {
        return Err(SourceError::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            message: "expected a JSON object".to_string(),
        });
    };

    let items = match object.remove(key) {
        Some(Value::Array(items)) => items,
        _ => {
            return Err(SourceError::UnexpectedResponse {
                endpoint: endpoint.to_string(),
                message: format!("missing '{key}' array"),
            })
        }
    };

    let has_next = object
        .get("pagination")
        .and_then(|pagination| pagination.get("next"))
        .is_some_and(|next| !next.is_null())
        && !items.is_empty();

    Ok((items, has_next))
}

/// Converts raw issues into typed ones, ordered by id.
///
/// # Errors
///
/// Returns [`SourceError`] if any record is malformed.
pub(crate) fn decode_issues(
    values: Vec<Value>,
    project: &SourceProject,
) -> Result<Vec<SourceIssue>, SourceError> {
    let mut issues = values
        .into_iter()
        .map(|value| -> Result<SourceIssue, SourceError> {
            let raw: RawIssue =
                serde_json::from_value(value).map_err(|e| SourceError::UnexpectedResponse {
                    endpoint: project.api_url("issues"),
                    message: e.to_string(),
                })?;
            Ok(SourceIssue::from_raw(raw, project)?)
        })
        .collect::<Result<Vec<_>, SourceError>>()?;
    issues.sort_by_key(|issue| issue.id);
    Ok(issues)
}

/// Converts raw pull requests into typed ones, ordered by id.
///
/// # Errors
///
/// Returns [`SourceError`] if any record is malformed.
pub(crate) fn decode_pull_requests(
    values: Vec<Value>,
    project: &SourceProject,
) -> Result<Vec<SourcePullRequest>, SourceError> {
    let mut requests = values
        .into_iter()
        .map(|value| -> Result<SourcePullRequest, SourceError> {
            let raw: RawPullRequest =
                serde_json::from_value(value).map_err(|e| SourceError::UnexpectedResponse {
                    endpoint: project.api_url("pull-requests"),
                    message: e.to_string(),
                })?;
            Ok(SourcePullRequest::from_raw(raw, project)?)
        })
        .collect::<Result<Vec<_>, SourceError>>()?;
    requests.sort_by_key(|request| request.id);
    Ok(requests)
}

#[async_trait]
impl SourceTracker for PagureSource {
    async fn list_issues(&self, filter: StatusFilter) -> Result<Vec<SourceIssue>, SourceError> {
        let values = self.raw_issues(filter).await?;
        decode_issues(values, &self.project)
    }

    async fn list_pull_requests(&self) -> Result<Vec<SourcePullRequest>, SourceError> {
        let values = self.raw_pull_requests().await?;
        decode_pull_requests(values, &self.project)
    }

    async fn comment(&self, issue_id: u64, body: &str) -> Result<(), SourceError> {
        self.post_form(&format!("issue/{issue_id}/comment"), &[("comment", body)])
            .await
    }

    async fn set_status(
        &self,
        issue_id: u64,
        transition: &StatusTransition,
    ) -> Result<(), SourceError> {
        let mut form = vec![("status", transition.status.as_str())];
        if let Some(close_status) = &transition.close_status {
            form.push(("close_status", close_status.as_str()));
        }
        self.post_form(&format!("issue/{issue_id}/status"), &form)
            .await
    }
}
