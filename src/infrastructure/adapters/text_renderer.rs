//! 타임라인 렌더링 포트 구현 어댑터.

use crate::application::ports::TimelineRenderer;
use crate::domain::pull_request::PullRequest;
use crate::domain::timeline::TimelineItem;
use crate::infrastructure::render;

/// 평문 텍스트 렌더링 어댑터.
pub struct TextRendererAdapter;

impl TimelineRenderer for TextRendererAdapter {
    fn render(&self, pr: &PullRequest, timeline: &[TimelineItem<'_>]) -> String {
        render::render_pull_request(pr, timeline)
    }
}
