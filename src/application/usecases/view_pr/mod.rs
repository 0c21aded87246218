//! PR 조회부터 스레드 복원, 타임라인 병합, 렌더링까지의 유스케이스.

mod context;
mod load;

use anyhow::Result;

use crate::application::ports::{
    ConfigRepository, HostTokenResolver, RepoContext, Reporter, SourceFactory, TimelineRenderer,
};
use crate::domain::timeline::build_timeline;

use context::load_view_context;
use load::load_pull_request;

/// CLI에서 넘어오는 조회 옵션.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    /// PR 번호, `#번호`, PR URL (없으면 현재 브랜치)
    pub pr: Option<String>,
    /// `OWNER/NAME` 저장소 지정
    pub repo: Option<String>,
    /// check run 조회 생략
    pub no_checks: bool,
}

/// 대상 해석, 데이터 수집, 스레드/타임라인 구성, 출력을 조율한다.
pub struct ViewPrUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub token_resolver: &'a dyn HostTokenResolver,
    pub repo_context: &'a dyn RepoContext,
    pub source_factory: &'a dyn SourceFactory,
    pub renderer: &'a dyn TimelineRenderer,
    pub reporter: &'a dyn Reporter,
}

impl<'a> ViewPrUseCase<'a> {
    /// 렌더링 결과를 리포터로 출력한다.
    pub async fn execute(&self, options: ViewOptions) -> Result<()> {
        let rendered = self.render(&options).await?;
        self.reporter.raw(&rendered);
        Ok(())
    }

    /// 출력 없이 렌더링 문자열만 만든다.
    pub async fn render(&self, options: &ViewOptions) -> Result<String> {
        let ctx = load_view_context(self, options).await?;
        let fetch_checks = ctx.config.fetch_checks() && !options.no_checks;

        let pr = load_pull_request(ctx.source.as_ref(), ctx.number, fetch_checks).await?;
        let timeline = build_timeline(&pr);

        Ok(self.renderer.render(&pr, &timeline))
    }
}
