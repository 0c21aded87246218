//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::config::{Config, HostConfig};
use crate::domain::checks::CheckRun;
use crate::domain::pull_request::{Comment, Commit, PullRequest, Review};
use crate::domain::target::RepoRef;
use crate::domain::timeline::TimelineItem;

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 호스트 토큰 해석 결과.
#[derive(Debug, Clone, Default)]
pub struct HostTokenResolution {
    pub token: Option<String>,
    /// 토큰 출처(inline, env:NAME, cmd:...)
    pub source: Option<String>,
}

/// 호스트 설정(token/env/cmd)을 실제 토큰으로 해석하는 포트.
pub trait HostTokenResolver: Send + Sync {
    fn resolve(&self, host_cfg: Option<&HostConfig>) -> Result<HostTokenResolution>;
}

/// 현재 작업 디렉터리의 git 상태 조회 포트.
#[async_trait]
pub trait RepoContext: Send + Sync {
    /// 현재 체크아웃된 브랜치 이름
    async fn current_branch(&self) -> Result<String>;
    /// 환경변수 또는 git remote로 현재 저장소를 추론한다.
    async fn current_repo(&self, remote: &str, default_host: &str) -> Result<RepoRef>;
}

/// PR 데이터 조회 포트(GitHub REST).
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// 브랜치에 대한 열린 PR 번호(없으면 None)
    async fn find_open_pr(&self, branch: &str) -> Result<Option<u64>>;
    /// PR 메타데이터. 코멘트/리뷰/커밋 목록은 비어 있다.
    async fn fetch_pull(&self, number: u64) -> Result<PullRequest>;
    /// 이슈(일반) 코멘트
    async fn list_issue_comments(&self, number: u64) -> Result<Vec<Comment>>;
    async fn list_reviews(&self, number: u64) -> Result<Vec<Review>>;
    /// 모든 리뷰의 코드 코멘트(평평한 목록)
    async fn list_review_comments(&self, number: u64) -> Result<Vec<Comment>>;
    async fn list_commits(&self, number: u64) -> Result<Vec<Commit>>;
    async fn list_check_runs(&self, sha: &str) -> Result<Vec<CheckRun>>;
}

/// 저장소/호스트 설정에 맞는 데이터 소스를 생성하는 팩토리 포트.
pub trait SourceFactory: Send + Sync {
    fn build(
        &self,
        repo: &RepoRef,
        host_cfg: Option<&HostConfig>,
        token: Option<String>,
    ) -> Box<dyn PullRequestSource>;
}

/// 타임라인 텍스트 렌더링 포트.
pub trait TimelineRenderer: Send + Sync {
    fn render(&self, pr: &PullRequest, timeline: &[TimelineItem<'_>]) -> String;
}

/// 콘솔 출력 추상화 포트.
pub trait Reporter: Send + Sync {
    fn raw(&self, text: &str);
}
