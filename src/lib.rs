//! prview library root.
//! PR 코멘트/리뷰 스레드/커밋을 하나의 타임라인으로 보여주는 도구.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use application::usecases::view_pr::ViewOptions;
use interface::cli::AppComposition;

/// 라이브러리 직접 호출용 실행 함수. 렌더링 결과를 반환한다.
pub async fn render(options: ViewOptions) -> Result<String> {
    let composition = AppComposition::default();
    composition.view_usecase().render(&options).await
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    let composition = AppComposition::default();
    composition.inspect_config_usecase().execute()
}
