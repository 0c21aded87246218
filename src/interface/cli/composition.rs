//! 애플리케이션 조립(composition root) 모듈.

use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::view_pr::ViewPrUseCase;
use crate::infrastructure::adapters::{
    ConsoleReporter, GitHubSourceFactory, GitRepoContext, HostTokenResolverAdapter,
    JsonConfigRepository, TextRendererAdapter,
};

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: JsonConfigRepository,
    token_resolver: HostTokenResolverAdapter,
    repo_context: GitRepoContext,
    source_factory: GitHubSourceFactory,
    renderer: TextRendererAdapter,
    reporter: ConsoleReporter,
}

impl Default for AppComposition {
    fn default() -> Self {
        Self {
            config_repo: JsonConfigRepository,
            token_resolver: HostTokenResolverAdapter,
            repo_context: GitRepoContext,
            source_factory: GitHubSourceFactory,
            renderer: TextRendererAdapter,
            reporter: ConsoleReporter,
        }
    }
}

impl AppComposition {
    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: &self.config_repo,
        }
    }

    /// PR 타임라인 조회 유스케이스를 생성한다.
    pub fn view_usecase(&self) -> ViewPrUseCase<'_> {
        ViewPrUseCase {
            config_repo: &self.config_repo,
            token_resolver: &self.token_resolver,
            repo_context: &self.repo_context,
            source_factory: &self.source_factory,
            renderer: &self.renderer,
            reporter: &self.reporter,
        }
    }
}
