//! 코멘트/리뷰/커밋을 하나의 시간순 타임라인으로 병합한다.

use chrono::{DateTime, Utc};

use crate::domain::pull_request::{Comment, Commit, PullRequest, Review};

/// 타임라인 한 항목. 렌더러는 variant만 보고 분기한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineItem<'a> {
    Comment(&'a Comment),
    Review(&'a Review),
    Commit(&'a Commit),
}

impl TimelineItem<'_> {
    /// 정렬 키: 코멘트/커밋은 작성 시각, 리뷰는 제출 시각.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            TimelineItem::Comment(c) => c.created_at,
            TimelineItem::Review(r) => r.submitted_at,
            TimelineItem::Commit(c) => c.created_at,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TimelineItem::Comment(_) => "comment",
            TimelineItem::Review(_) => "review",
            TimelineItem::Commit(_) => "commit",
        }
    }
}

/// PR의 타임라인을 만든다.
pub fn build_timeline(pr: &PullRequest) -> Vec<TimelineItem<'_>> {
    merge_timeline(&pr.comments, &pr.reviews, &pr.commits)
}

/// comments -> reviews -> commits 순으로 이어 붙인 뒤 안정 정렬한다.
/// 같은 시각이면 코멘트, 리뷰, 커밋 순서가 유지된다.
pub fn merge_timeline<'a>(
    comments: &'a [Comment],
    reviews: &'a [Review],
    commits: &'a [Commit],
) -> Vec<TimelineItem<'a>> {
    let mut timeline: Vec<TimelineItem<'a>> =
        Vec::with_capacity(comments.len() + reviews.len() + commits.len());
    timeline.extend(comments.iter().map(TimelineItem::Comment));
    timeline.extend(reviews.iter().map(TimelineItem::Review));
    timeline.extend(commits.iter().map(TimelineItem::Commit));

    // sort_by_key는 안정 정렬이다. sort_unstable로 바꾸면 동시각 순서가 깨진다.
    timeline.sort_by_key(TimelineItem::timestamp);
    timeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pull_request::{CheckCounts, User};

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn comment(id: i64, t: i64) -> Comment {
        Comment {
            id,
            body: format!("comment {id}"),
            user: User::new("commenter"),
            created_at: at(t),
            diff_hunk: None,
            path: None,
            in_reply_to_id: None,
            pull_request_review_id: None,
        }
    }

    fn review(id: i64, t: i64) -> Review {
        Review {
            id,
            body: Some("looks fine".to_string()),
            state: "APPROVED".to_string(),
            user: User::new("reviewer"),
            submitted_at: at(t),
            threads: Vec::new(),
            reply_count: 0,
        }
    }

    fn commit(sha: &str, t: i64) -> Commit {
        Commit {
            sha: sha.to_string(),
            message: "change".to_string(),
            author: User::new("author"),
            created_at: at(t),
            checks: CheckCounts::default(),
        }
    }

    fn kinds(timeline: &[TimelineItem<'_>]) -> Vec<&'static str> {
        timeline.iter().map(TimelineItem::kind).collect()
    }

    #[test]
    fn interleaves_sources_by_timestamp() {
        let comments = vec![comment(1, 10), comment(2, 40)];
        let reviews = vec![review(100, 20)];
        let commits = vec![commit("a", 5), commit("b", 30)];

        let timeline = merge_timeline(&comments, &reviews, &commits);

        assert_eq!(
            kinds(&timeline),
            vec!["commit", "comment", "review", "commit", "comment"]
        );
        assert!(
            timeline
                .windows(2)
                .all(|w| w[0].timestamp() <= w[1].timestamp())
        );
    }

    #[test]
    fn equal_timestamps_order_comment_review_commit() {
        let comments = vec![comment(1, 10)];
        let reviews = vec![review(100, 10)];
        let commits = vec![commit("a", 10)];

        let timeline = merge_timeline(&comments, &reviews, &commits);
        assert_eq!(kinds(&timeline), vec!["comment", "review", "commit"]);
    }

    #[test]
    fn equal_timestamps_keep_order_within_source() {
        let comments = vec![comment(2, 10), comment(1, 10)];
        let commits = vec![commit("b", 10), commit("a", 10)];

        let timeline = merge_timeline(&comments, &[], &commits);
        let labels: Vec<String> = timeline
            .iter()
            .map(|item| match item {
                TimelineItem::Comment(c) => c.id.to_string(),
                TimelineItem::Review(r) => r.id.to_string(),
                TimelineItem::Commit(c) => c.sha.clone(),
            })
            .collect();
        assert_eq!(labels, vec!["2", "1", "b", "a"]);
    }

    #[test]
    fn covers_every_input_exactly_once() {
        let comments = vec![comment(1, 3), comment(2, 1)];
        let reviews = vec![review(100, 2), review(101, 2), review(102, 0)];
        let commits = vec![commit("a", 4)];

        let timeline = merge_timeline(&comments, &reviews, &commits);

        assert_eq!(timeline.len(), comments.len() + reviews.len() + commits.len());
        let count = |kind: &str| timeline.iter().filter(|i| i.kind() == kind).count();
        assert_eq!(count("comment"), 2);
        assert_eq!(count("review"), 3);
        assert_eq!(count("commit"), 1);
        assert!(matches!(timeline[0], TimelineItem::Review(r) if r.id == 102));
    }

    #[test]
    fn empty_inputs_give_empty_timeline() {
        assert!(merge_timeline(&[], &[], &[]).is_empty());
    }

    #[test]
    fn build_timeline_reads_pull_request_collections() {
        let pr = PullRequest {
            number: 7,
            title: "Add feature".to_string(),
            body: None,
            user: User::new("author"),
            created_at: at(0),
            comments: vec![comment(1, 20)],
            reviews: vec![review(100, 10)],
            commits: vec![commit("a", 5)],
        };

        let timeline = build_timeline(&pr);
        assert_eq!(kinds(&timeline), vec!["commit", "review", "comment"]);
    }
}
