//! Domain layer
//! 스레드 복원/타임라인 병합 등 PR 뷰의 핵심 규칙을 외부 의존성 없이 표현한다.

pub mod checks;
pub mod pull_request;
pub mod target;
pub mod thread;
pub mod timeline;
