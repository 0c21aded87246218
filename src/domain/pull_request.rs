//! PR 도메인 엔티티/값 객체.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub login: String,
}

impl User {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }
}

/// 이슈 코멘트 또는 리뷰(코드) 코멘트.
/// 리뷰 코멘트만 `diff_hunk`/`path`/`pull_request_review_id`를 가진다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub body: String,
    pub user: User,
    pub created_at: DateTime<Utc>,
    pub diff_hunk: Option<String>,
    pub path: Option<String>,
    pub in_reply_to_id: Option<i64>,
    pub pull_request_review_id: Option<i64>,
}

impl Comment {
    /// 답글이 아닌 루트 코멘트인지 여부.
    pub fn is_root(&self) -> bool {
        self.in_reply_to_id.is_none()
    }
}

/// 하나의 루트 코멘트에 매달린 답글 체인.
/// 항상 비어 있지 않으며 `created_at` 오름차순, 첫 원소가 루트다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    pub comments: Vec<Comment>,
}

impl CommentThread {
    pub fn root(&self) -> &Comment {
        &self.comments[0]
    }

    pub fn replies(&self) -> &[Comment] {
        &self.comments[1..]
    }

    /// 스레드를 귀속시킬 리뷰(루트 코멘트의 리뷰).
    pub fn review_id(&self) -> Option<i64> {
        self.root().pull_request_review_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i64,
    pub body: Option<String>,
    pub state: String,
    pub user: User,
    pub submitted_at: DateTime<Utc>,
    /// 스레드 복원 후 채워진다.
    pub threads: Vec<CommentThread>,
    /// 이 리뷰 소속 답글 수(스레드 귀속과 무관하게 집계).
    pub reply_count: usize,
}

/// 커밋별 CI check run 집계.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckCounts {
    pub succeeded: usize,
    pub failed: usize,
    pub pending: usize,
    pub skipped: usize,
}

impl CheckCounts {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.pending + self.skipped
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    /// 커밋 메시지 첫 줄
    pub message: String,
    pub author: User,
    pub created_at: DateTime<Utc>,
    pub checks: CheckCounts,
}

impl Commit {
    pub fn short_sha(&self) -> &str {
        let end = self
            .sha
            .char_indices()
            .nth(7)
            .map(|(idx, _)| idx)
            .unwrap_or(self.sha.len());
        &self.sha[..end]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub user: User,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<Comment>,
    pub reviews: Vec<Review>,
    pub commits: Vec<Commit>,
}

/// 커밋 메시지에서 첫 줄만 남긴다.
pub fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or("").trim_end_matches('\r')
}
