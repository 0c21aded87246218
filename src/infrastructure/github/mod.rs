//! GitHub REST API 연동 구현.

mod dto;

use anyhow::{Context, Result};
use async_trait::async_trait;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::ports::PullRequestSource;
use crate::domain::checks::CheckRun;
use crate::domain::pull_request::{Comment, Commit, PullRequest, Review};
use crate::domain::target::RepoRef;

use dto::{CheckRunsDto, CommentDto, CommitDto, PullDto, PullSummaryDto, ReviewDto};

pub struct GitHubClient {
    client: Client,
    repo: RepoRef,
    token: Option<String>,
    api_base: Option<String>,
}

impl GitHubClient {
    /// 저장소 단위 클라이언트를 생성한다.
    pub fn new(repo: RepoRef, token: Option<String>, api_base: Option<String>) -> Self {
        Self {
            client: Client::new(),
            repo,
            token,
            api_base,
        }
    }

    fn api_base(&self) -> String {
        // github.com은 공개 API, 그 외는 Enterprise 기본 경로를 사용한다.
        if let Some(base) = &self.api_base {
            return base.trim_end_matches('/').to_string();
        }
        if self.repo.host == "github.com" {
            "https://api.github.com".to_string()
        } else {
            format!("https://{}/api/v3", self.repo.host)
        }
    }

    fn repo_endpoint(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base(),
            self.repo.owner,
            self.repo.name,
            path
        )
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        // 공통 헤더/인증 적용.
        let req = self
            .client
            .request(method, url)
            .header("User-Agent", "prview")
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            req.bearer_auth(token)
        } else {
            req
        }
    }

    /// GET 후 상태 코드를 검사하고 JSON을 역직렬화한다.
    async fn get_json<T: DeserializeOwned>(&self, url: String, what: &str) -> Result<T> {
        debug!(url = %url, "github GET");
        let resp = self
            .request(Method::GET, url)
            .send()
            .await
            .with_context(|| format!("github: failed to fetch {what}"))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .with_context(|| format!("github: failed to read {what} body"))?;

        if !status.is_success() {
            anyhow::bail!("github: failed to fetch {what} ({status}): {body}");
        }

        serde_json::from_str(&body).with_context(|| format!("github: invalid {what} JSON"))
    }
}

#[async_trait]
impl PullRequestSource for GitHubClient {
    async fn find_open_pr(&self, branch: &str) -> Result<Option<u64>> {
        let head = format!("{}:{}", self.repo.owner, branch);
        let url = format!(
            "{}?head={}&state=open",
            self.repo_endpoint("pulls"),
            utf8_percent_encode(&head, NON_ALPHANUMERIC)
        );
        let pulls: Vec<PullSummaryDto> = self.get_json(url, "open PRs").await?;
        Ok(pulls.first().map(|p| p.number))
    }

    async fn fetch_pull(&self, number: u64) -> Result<PullRequest> {
        let pull: PullDto = self
            .get_json(self.repo_endpoint(&format!("pulls/{number}")), "PR")
            .await?;
        Ok(pull.into())
    }

    async fn list_issue_comments(&self, number: u64) -> Result<Vec<Comment>> {
        let comments: Vec<CommentDto> = self
            .get_json(
                self.repo_endpoint(&format!("issues/{number}/comments")),
                "comments",
            )
            .await?;
        Ok(comments.into_iter().map(Comment::from).collect())
    }

    async fn list_reviews(&self, number: u64) -> Result<Vec<Review>> {
        let reviews: Vec<ReviewDto> = self
            .get_json(
                self.repo_endpoint(&format!("pulls/{number}/reviews")),
                "reviews",
            )
            .await?;
        Ok(reviews.into_iter().filter_map(ReviewDto::into_review).collect())
    }

    async fn list_review_comments(&self, number: u64) -> Result<Vec<Comment>> {
        let comments: Vec<CommentDto> = self
            .get_json(
                self.repo_endpoint(&format!("pulls/{number}/comments")),
                "review comments",
            )
            .await?;
        Ok(comments.into_iter().map(Comment::from).collect())
    }

    async fn list_commits(&self, number: u64) -> Result<Vec<Commit>> {
        let commits: Vec<CommitDto> = self
            .get_json(
                self.repo_endpoint(&format!("pulls/{number}/commits")),
                "commits",
            )
            .await?;
        Ok(commits.into_iter().filter_map(CommitDto::into_commit).collect())
    }

    async fn list_check_runs(&self, sha: &str) -> Result<Vec<CheckRun>> {
        let runs: CheckRunsDto = self
            .get_json(
                self.repo_endpoint(&format!("commits/{sha}/check-runs")),
                "check runs",
            )
            .await?;
        Ok(runs.check_runs.into_iter().map(CheckRun::from).collect())
    }
}
