//! PR 데이터 수집과 주석(스레드/답글 수/check 집계) 단계.

use anyhow::{Context, Result};
use futures::future::join_all;
use tracing::{debug, warn};

use crate::application::ports::PullRequestSource;
use crate::domain::checks::tally_check_runs;
use crate::domain::pull_request::{CheckCounts, PullRequest};
use crate::domain::thread::{attach_threads, resolve_threads};

/// PR 본문과 코멘트/리뷰/커밋을 모두 가져와 렌더링 가능한 상태로 만든다.
pub(super) async fn load_pull_request(
    source: &dyn PullRequestSource,
    number: u64,
    fetch_checks: bool,
) -> Result<PullRequest> {
    let mut pr = source
        .fetch_pull(number)
        .await
        .with_context(|| format!("error fetching PR #{number}"))?;

    pr.comments = source
        .list_issue_comments(number)
        .await
        .with_context(|| format!("error fetching comments for PR #{number}"))?;

    let mut reviews = source
        .list_reviews(number)
        .await
        .with_context(|| format!("error fetching reviews for PR #{number}"))?;

    let review_comments = source
        .list_review_comments(number)
        .await
        .with_context(|| format!("error fetching review comments for PR #{number}"))?;

    attach_threads(&mut reviews, resolve_threads(&review_comments));
    pr.reviews = reviews;

    let mut commits = source
        .list_commits(number)
        .await
        .with_context(|| format!("error fetching commits for PR #{number}"))?;

    if fetch_checks {
        let tallies = join_all(commits.iter().map(|c| commit_checks(source, &c.sha))).await;
        for (commit, checks) in commits.iter_mut().zip(tallies) {
            commit.checks = checks;
        }
    }
    pr.commits = commits;

    debug!(
        comments = pr.comments.len(),
        reviews = pr.reviews.len(),
        review_comments = review_comments.len(),
        commits = pr.commits.len(),
        "loaded pull request"
    );

    Ok(pr)
}

/// check run 조회 실패는 빈 집계로 취급한다.
async fn commit_checks(source: &dyn PullRequestSource, sha: &str) -> CheckCounts {
    match source.list_check_runs(sha).await {
        Ok(runs) => tally_check_runs(&runs),
        Err(err) => {
            warn!(sha, "failed to fetch check runs: {err:#}");
            CheckCounts::default()
        }
    }
}
