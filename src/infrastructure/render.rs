//! PR 타임라인 텍스트 렌더링 모듈.

use chrono::{DateTime, Utc};

use crate::domain::pull_request::{CheckCounts, Comment, Commit, PullRequest, Review};
use crate::domain::timeline::TimelineItem;

const SEPARATOR_WIDTH: usize = 80;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 헤더와 타임라인 전체를 렌더링한다. 각 항목 뒤에 구분선을 둔다.
pub fn render_pull_request(pr: &PullRequest, timeline: &[TimelineItem<'_>]) -> String {
    let mut out = String::new();
    render_header(&mut out, pr);
    push_separator(&mut out);

    for item in timeline {
        match item {
            TimelineItem::Comment(comment) => render_comment(&mut out, comment, 0),
            TimelineItem::Review(review) => render_review(&mut out, review),
            TimelineItem::Commit(commit) => render_commit(&mut out, commit),
        }
        push_separator(&mut out);
    }

    out
}

fn render_header(out: &mut String, pr: &PullRequest) {
    out.push_str(&format!("\nPR #{}: {}\n", pr.number, pr.title));
    out.push_str(&format!("Author: {}\n", pr.user.login));
    out.push_str(&format!("Created: {}\n\n", format_time(&pr.created_at)));
    if let Some(body) = &pr.body {
        out.push_str(body.trim_end());
        out.push('\n');
    }
    out.push('\n');
}

/// 코멘트 하나를 들여쓰기와 함께 렌더링한다. diff가 있으면 본문 아래 붙인다.
pub fn render_comment(out: &mut String, comment: &Comment, indent: usize) {
    render_comment_with(out, comment, indent, true);
}

fn render_comment_with(out: &mut String, comment: &Comment, indent: usize, with_diff: bool) {
    let pad = " ".repeat(indent);
    out.push_str(&format!(
        "{pad}Comment by {} on {}\n{pad}\n",
        comment.user.login,
        format_time(&comment.created_at)
    ));
    push_indented(out, &comment.body, &pad);

    if !with_diff {
        return;
    }
    if let Some(path) = &comment.path {
        out.push_str(&format!("\n{pad}File: {path}\n"));
    }
    if let Some(hunk) = &comment.diff_hunk {
        out.push_str(&format!("\n{pad}Diff:\n"));
        push_indented(out, hunk, &format!("{pad}  "));
    }
}

/// 리뷰 요약과 귀속된 스레드를 렌더링한다.
/// 스레드는 루트 2칸, 답글 4칸 들여쓰기이며 답글에는 diff를 반복하지 않는다.
pub fn render_review(out: &mut String, review: &Review) {
    out.push_str(&format!(
        "Review by {} on {}\n",
        review.user.login,
        format_time(&review.submitted_at)
    ));
    out.push_str(&format!("State: {}\n\n", review.state));
    match &review.body {
        Some(body) => {
            out.push_str(body.trim_end());
            out.push('\n');
        }
        None => out.push_str("(No summary comment)\n"),
    }

    if !review.threads.is_empty() {
        out.push_str("\nReview comments:\n");
        for thread in &review.threads {
            out.push('\n');
            render_comment(out, thread.root(), 2);
            for reply in thread.replies() {
                out.push('\n');
                render_comment_with(out, reply, 4, false);
            }
        }
    } else if review.reply_count > 0 {
        let noun = if review.reply_count == 1 {
            "reply"
        } else {
            "replies"
        };
        out.push_str(&format!(
            "\n({} {noun} in other threads)\n",
            review.reply_count
        ));
    }
}

pub fn render_commit(out: &mut String, commit: &Commit) {
    out.push_str(&format!(
        "Commit {} by {} on {}\n",
        commit.short_sha(),
        commit.author.login,
        format_time(&commit.created_at)
    ));
    out.push_str(&format!("\n{}\n", commit.message));
    if let Some(checks) = format_checks(&commit.checks) {
        out.push_str(&format!("\nChecks: {checks}\n"));
    }
}

/// check가 하나도 없으면 None.
pub fn format_checks(counts: &CheckCounts) -> Option<String> {
    if counts.total() == 0 {
        return None;
    }
    Some(format!(
        "{} passed, {} failed, {} pending, {} skipped",
        counts.succeeded, counts.failed, counts.pending, counts.skipped
    ))
}

pub fn format_time(time: &DateTime<Utc>) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn push_indented(out: &mut String, text: &str, pad: &str) {
    for line in text.split('\n') {
        out.push_str(pad);
        out.push_str(line.trim_end_matches('\r'));
        out.push('\n');
    }
}

fn push_separator(out: &mut String) {
    out.push_str(&"-".repeat(SEPARATOR_WIDTH));
    out.push('\n');
}
