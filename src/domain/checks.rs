//! 커밋 CI check run 집계 규칙.

use crate::domain::pull_request::CheckCounts;

/// check run 한 건의 상태/결론.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckRun {
    pub status: String,
    pub conclusion: Option<String>,
}

/// check run 목록을 성공/실패/대기/건너뜀으로 집계한다.
/// 완료됐지만 분류되지 않는 결론(neutral, action_required 등)은 세지 않는다.
pub fn tally_check_runs<'a>(runs: impl IntoIterator<Item = &'a CheckRun>) -> CheckCounts {
    let mut counts = CheckCounts::default();

    for run in runs {
        if run.status != "completed" {
            counts.pending += 1;
            continue;
        }

        match run.conclusion.as_deref() {
            Some("success") => counts.succeeded += 1,
            Some("failure" | "cancelled" | "timed_out") => counts.failed += 1,
            Some("skipped") => counts.skipped += 1,
            _ => {}
        }
    }

    counts
}
