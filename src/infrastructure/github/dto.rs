//! GitHub REST 응답 DTO와 도메인 변환.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::checks::CheckRun;
use crate::domain::pull_request::{
    CheckCounts, Comment, Commit, PullRequest, Review, User, first_line,
};

/// 삭제된 계정은 `user: null`로 내려온다.
const GHOST_LOGIN: &str = "ghost";

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    login: String,
}

fn user_or_ghost(user: Option<UserDto>) -> User {
    User::new(user.map(|u| u.login).unwrap_or_else(|| GHOST_LOGIN.to_string()))
}

#[derive(Debug, Deserialize)]
pub(super) struct PullDto {
    number: u64,
    title: String,
    body: Option<String>,
    created_at: DateTime<Utc>,
    user: Option<UserDto>,
}

impl From<PullDto> for PullRequest {
    fn from(dto: PullDto) -> Self {
        PullRequest {
            number: dto.number,
            title: dto.title,
            body: dto.body.filter(|b| !b.trim().is_empty()),
            user: user_or_ghost(dto.user),
            created_at: dto.created_at,
            comments: Vec::new(),
            reviews: Vec::new(),
            commits: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PullSummaryDto {
    pub number: u64,
}

/// 이슈 코멘트와 리뷰 코멘트를 같은 DTO로 받는다. 리뷰 전용 필드는 optional.
#[derive(Debug, Deserialize)]
pub(super) struct CommentDto {
    id: i64,
    #[serde(default)]
    body: Option<String>,
    created_at: DateTime<Utc>,
    user: Option<UserDto>,
    #[serde(default)]
    diff_hunk: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    in_reply_to_id: Option<i64>,
    #[serde(default)]
    pull_request_review_id: Option<i64>,
}

impl From<CommentDto> for Comment {
    fn from(dto: CommentDto) -> Self {
        Comment {
            id: dto.id,
            body: dto.body.unwrap_or_default(),
            user: user_or_ghost(dto.user),
            created_at: dto.created_at,
            diff_hunk: dto.diff_hunk.filter(|h| !h.is_empty()),
            path: dto.path.filter(|p| !p.is_empty()),
            in_reply_to_id: dto.in_reply_to_id,
            pull_request_review_id: dto.pull_request_review_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ReviewDto {
    id: i64,
    #[serde(default)]
    body: Option<String>,
    state: String,
    /// 제출 전(PENDING) 리뷰는 비어 있다.
    submitted_at: Option<DateTime<Utc>>,
    user: Option<UserDto>,
}

impl ReviewDto {
    /// 제출되지 않은 리뷰는 타임라인 위치가 없으므로 None.
    pub(super) fn into_review(self) -> Option<Review> {
        let submitted_at = self.submitted_at?;
        Some(Review {
            id: self.id,
            body: self.body.filter(|b| !b.trim().is_empty()),
            state: self.state,
            user: user_or_ghost(self.user),
            submitted_at,
            threads: Vec::new(),
            reply_count: 0,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CommitDto {
    sha: String,
    commit: CommitDetailDto,
    author: Option<UserDto>,
}

#[derive(Debug, Deserialize)]
struct CommitDetailDto {
    message: String,
    committer: Option<SignatureDto>,
    author: Option<SignatureDto>,
}

#[derive(Debug, Deserialize)]
struct SignatureDto {
    #[serde(default)]
    name: Option<String>,
    date: DateTime<Utc>,
}

impl CommitDto {
    /// 커미터 날짜를 우선하고, 없으면 작성자 날짜를 쓴다.
    pub(super) fn into_commit(self) -> Option<Commit> {
        let detail = self.commit;
        let created_at = detail
            .committer
            .as_ref()
            .or(detail.author.as_ref())
            .map(|s| s.date)?;

        // GitHub 계정과 연결되지 않은 커밋은 git author 이름으로 대신한다.
        let author = match self.author {
            Some(user) => User::new(user.login),
            None => User::new(
                detail
                    .author
                    .and_then(|a| a.name)
                    .unwrap_or_else(|| GHOST_LOGIN.to_string()),
            ),
        };

        Some(Commit {
            sha: self.sha,
            message: first_line(&detail.message).to_string(),
            author,
            created_at,
            checks: CheckCounts::default(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CheckRunsDto {
    #[serde(default)]
    pub check_runs: Vec<CheckRunDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CheckRunDto {
    status: String,
    #[serde(default)]
    conclusion: Option<String>,
}

impl From<CheckRunDto> for CheckRun {
    fn from(dto: CheckRunDto) -> Self {
        CheckRun {
            status: dto.status,
            conclusion: dto.conclusion,
        }
    }
}
