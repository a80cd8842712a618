//! HTTP client for the two LeetCode endpoints: the REST catalog listing and
//! the GraphQL problem-detail query.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Difficulty, ProblemDetail, ProblemSummary};

const CATALOG_URL: &str = "https://leetcode.com/api/problems/all/";
const GRAPHQL_URL: &str = "https://leetcode.com/graphql";

const QUESTION_DATA_QUERY: &str = "query questionData($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    questionId
    title
    content
    difficulty
  }
}";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("no question found for slug {slug:?}")]
    MissingQuestion { slug: String },
}

/// Source of problem summaries and details. `LeetCodeClient` is the real
/// implementation; anything driving the press loop can be swapped in through
/// this seam.
#[async_trait]
pub trait ProblemSource {
    /// List the full catalog, sorted ascending by id. Paid-only entries are
    /// excluded unless `include_paid` is set.
    async fn list_problems(&self, include_paid: bool) -> Result<Vec<ProblemSummary>, FetchError>;

    /// Fetch the detail page for one problem by slug.
    async fn fetch_detail(&self, title_slug: &str) -> Result<ProblemDetail, FetchError>;
}

#[derive(Debug, Clone)]
pub struct LeetCodeClient {
    client: reqwest::Client,
    catalog_url: String,
    graphql_url: String,
}

impl Default for LeetCodeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LeetCodeClient {
    pub fn new() -> Self {
        Self::with_endpoints(CATALOG_URL, GRAPHQL_URL)
    }

    /// Point the client at alternate endpoints. URLs are taken as-is.
    pub fn with_endpoints(catalog_url: impl Into<String>, graphql_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            catalog_url: catalog_url.into(),
            graphql_url: graphql_url.into(),
        }
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, FetchError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }
}

#[async_trait]
impl ProblemSource for LeetCodeClient {
    async fn list_problems(&self, include_paid: bool) -> Result<Vec<ProblemSummary>, FetchError> {
        debug!(url = %self.catalog_url, "fetching problem catalog");
        let resp = self.client.get(&self.catalog_url).send().await?;
        let catalog: CatalogResponse = Self::check(resp).await?.json().await?;

        Ok(order_catalog(catalog.stat_status_pairs, include_paid))
    }

    async fn fetch_detail(&self, title_slug: &str) -> Result<ProblemDetail, FetchError> {
        let request = GraphQlRequest {
            operation_name: "questionData",
            query: QUESTION_DATA_QUERY,
            variables: Variables { title_slug },
        };

        debug!(url = %self.graphql_url, slug = title_slug, "querying problem detail");
        let resp = self.client.post(&self.graphql_url).json(&request).send().await?;
        let detail: DetailResponse = Self::check(resp).await?.json().await?;

        question_from_response(detail, title_slug)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    operation_name: &'a str,
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Variables<'a> {
    title_slug: &'a str,
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    stat_status_pairs: Vec<StatStatusPair>,
}

#[derive(Debug, Deserialize)]
struct StatStatusPair {
    paid_only: bool,
    stat: Stat,
}

#[derive(Debug, Deserialize)]
struct Stat {
    question_id: u32,
    #[serde(rename = "question__title_slug")]
    title_slug: String,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    data: Option<DetailData>,
}

#[derive(Debug, Deserialize)]
struct DetailData {
    question: Option<Question>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Question {
    question_id: u32,
    title: String,
    content: String,
    difficulty: Difficulty,
}

fn order_catalog(pairs: Vec<StatStatusPair>, include_paid: bool) -> Vec<ProblemSummary> {
    let mut problems: Vec<ProblemSummary> = pairs
        .into_iter()
        .filter(|p| include_paid || !p.paid_only)
        .map(|p| ProblemSummary {
            id: p.stat.question_id,
            title_slug: p.stat.title_slug,
            paid_only: p.paid_only,
        })
        .collect();
    problems.sort_by(|a, b| a.id.cmp(&b.id));
    problems
}

fn question_from_response(
    resp: DetailResponse,
    title_slug: &str,
) -> Result<ProblemDetail, FetchError> {
    let question = resp
        .data
        .and_then(|d| d.question)
        .ok_or_else(|| FetchError::MissingQuestion {
            slug: title_slug.to_string(),
        })?;

    Ok(ProblemDetail {
        id: question.question_id,
        title: question.title,
        difficulty: question.difficulty,
        content: question.content,
    })
}
