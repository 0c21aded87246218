//! 조회 컨텍스트(설정/저장소/PR 번호/데이터 소스) 준비 단계.

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::application::config::Config;
use crate::application::ports::PullRequestSource;
use crate::application::usecases::view_pr::{ViewOptions, ViewPrUseCase};
use crate::domain::target::{PrSelector, RepoRef};

/// 유스케이스 전 구간에서 공유되는 실행 상태.
pub(super) struct ViewContext {
    pub config: Config,
    pub number: u64,
    pub source: Box<dyn PullRequestSource>,
}

/// 설정 로딩, 대상 해석, 토큰 해석, PR 번호 결정까지 선행한다.
pub(super) async fn load_view_context(
    use_case: &ViewPrUseCase<'_>,
    options: &ViewOptions,
) -> Result<ViewContext> {
    let config = use_case
        .config_repo
        .load()
        .context("failed to load prview config")?;

    let selector = PrSelector::parse(options.pr.as_deref())?;
    let repo = resolve_repo(use_case, &config, &selector, options.repo.as_deref())
        .await
        .context("error getting repository information")?;
    debug!(repo = %repo, host = %repo.host, "resolved repository");

    let host_cfg = config.host_config(&repo.host);
    let token = use_case.token_resolver.resolve(host_cfg)?;
    match &token.source {
        Some(source) => debug!(source = %source, resolved = token.token.is_some(), "host token"),
        None => debug!("no host token configured; using anonymous API access"),
    }

    let source = use_case.source_factory.build(&repo, host_cfg, token.token);

    let number = match selector.number() {
        Some(number) => number,
        None => current_branch_pr(use_case, source.as_ref())
            .await
            .context("error determining PR number")?,
    };
    info!(repo = %repo, number, "viewing pull request");

    Ok(ViewContext {
        config,
        number,
        source,
    })
}

/// URL > --repo > 현재 git 저장소 순으로 저장소를 결정한다.
async fn resolve_repo(
    use_case: &ViewPrUseCase<'_>,
    config: &Config,
    selector: &PrSelector,
    repo_arg: Option<&str>,
) -> Result<RepoRef> {
    if let Some(repo) = selector.repo() {
        return Ok(repo.clone());
    }
    if let Some(slug) = repo_arg {
        return RepoRef::parse_slug(slug, config.default_host());
    }
    use_case
        .repo_context
        .current_repo(config.remote(), config.default_host())
        .await
}

async fn current_branch_pr(
    use_case: &ViewPrUseCase<'_>,
    source: &dyn PullRequestSource,
) -> Result<u64> {
    let branch = use_case.repo_context.current_branch().await?;
    if branch.is_empty() {
        bail!("not on a branch (detached HEAD); pass a PR number");
    }

    match source.find_open_pr(&branch).await? {
        Some(number) => Ok(number),
        None => bail!("no open PR found for current branch: {branch}"),
    }
}
