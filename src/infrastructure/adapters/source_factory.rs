//! PR 데이터 소스 팩토리 포트 구현 어댑터.

use crate::application::config::HostConfig;
use crate::application::ports::{PullRequestSource, SourceFactory};
use crate::domain::target::RepoRef;
use crate::infrastructure::github::GitHubClient;

/// GitHub REST 클라이언트를 만드는 팩토리 어댑터.
pub struct GitHubSourceFactory;

impl SourceFactory for GitHubSourceFactory {
    fn build(
        &self,
        repo: &RepoRef,
        host_cfg: Option<&HostConfig>,
        token: Option<String>,
    ) -> Box<dyn PullRequestSource> {
        let api_base = host_cfg.and_then(|h| h.api_base.clone());
        Box::new(GitHubClient::new(repo.clone(), token, api_base))
    }
}
