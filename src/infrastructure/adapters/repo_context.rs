//! git 저장소 컨텍스트 포트 구현 어댑터.

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::RepoContext;
use crate::domain::target::RepoRef;
use crate::infrastructure::git;

/// 현재 디렉터리의 git CLI를 호출하는 어댑터.
pub struct GitRepoContext;

#[async_trait]
impl RepoContext for GitRepoContext {
    async fn current_branch(&self) -> Result<String> {
        git::current_branch().await
    }

    async fn current_repo(&self, remote: &str, default_host: &str) -> Result<RepoRef> {
        git::current_repo(remote, default_host).await
    }
}
