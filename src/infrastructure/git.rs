//! 로컬 git 체크아웃 조회(현재 브랜치, remote URL).

use std::env;

use anyhow::{Context, Result, bail};
use tokio::process::Command;

use crate::domain::target::RepoRef;

/// `OWNER/NAME` 또는 `HOST/OWNER/NAME`으로 저장소를 강제하는 환경변수.
pub const REPO_ENV: &str = "GH_REPO";

/// `git <args>`를 실행해 trim된 stdout을 반환한다.
async fn git_output(args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .output()
        .await
        .with_context(|| format!("failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "git {} failed ({}): {}",
            args.join(" "),
            output.status,
            stderr.trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// 현재 브랜치 이름. detached HEAD면 빈 문자열.
pub async fn current_branch() -> Result<String> {
    git_output(&["branch", "--show-current"]).await
}

pub async fn remote_url(remote: &str) -> Result<String> {
    git_output(&["remote", "get-url", remote]).await
}

/// GH_REPO > git remote 순으로 현재 저장소를 결정한다.
pub async fn current_repo(remote: &str, default_host: &str) -> Result<RepoRef> {
    if let Some(slug) = env::var(REPO_ENV).ok().filter(|v| !v.trim().is_empty()) {
        return RepoRef::parse_slug(&slug, default_host)
            .with_context(|| format!("invalid {REPO_ENV}"));
    }

    let url = remote_url(remote).await?;
    RepoRef::parse_remote_url(&url)
}
