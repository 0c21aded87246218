//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod host_token_resolver;
mod repo_context;
mod reporter;
mod source_factory;
mod text_renderer;

pub use config_repository::JsonConfigRepository;
pub use host_token_resolver::HostTokenResolverAdapter;
pub use repo_context::GitRepoContext;
pub use reporter::ConsoleReporter;
pub use source_factory::GitHubSourceFactory;
pub use text_renderer::TextRendererAdapter;
