//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, Write};

use crate::application::ports::Reporter;

/// stdout 출력 어댑터.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn raw(&self, text: &str) {
        let mut out = io::stdout().lock();
        // 파이프가 닫힌 경우(`| head`) 출력 실패는 무시한다.
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }
}
