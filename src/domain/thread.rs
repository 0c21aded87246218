//! 평평한 리뷰 코멘트 목록에서 답글 스레드를 복원하는 모듈.
//!
//! 코멘트는 id 기반 인덱스 포레스트로 다룬다. 부모 참조는 id 조회로만 따라가며
//! 어떤 코멘트도 수정하지 않는다.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::pull_request::{Comment, CommentThread, Review};

/// 스레드 복원 결과.
#[derive(Debug, Clone, Default)]
pub struct ResolvedThreads {
    /// 루트 코멘트 시각 오름차순 스레드 목록
    pub threads: Vec<CommentThread>,
    /// 리뷰 id별 답글 수(답글 자신의 리뷰 기준)
    pub reply_counts: HashMap<i64, usize>,
}

impl ResolvedThreads {
    /// 루트 코멘트의 리뷰 기준으로 스레드를 묶는다. 순서는 `threads` 순서를 따른다.
    pub fn by_review(&self) -> HashMap<i64, Vec<&CommentThread>> {
        let mut out: HashMap<i64, Vec<&CommentThread>> = HashMap::new();
        for thread in &self.threads {
            if let Some(review_id) = thread.review_id() {
                out.entry(review_id).or_default().push(thread);
            }
        }
        out
    }

    pub fn reply_count(&self, review_id: i64) -> usize {
        self.reply_counts.get(&review_id).copied().unwrap_or(0)
    }

    /// 스레드 소유권을 리뷰 id별 맵으로 넘긴다.
    pub fn into_review_map(self) -> HashMap<i64, Vec<CommentThread>> {
        let mut out: HashMap<i64, Vec<CommentThread>> = HashMap::new();
        for thread in self.threads {
            if let Some(review_id) = thread.review_id() {
                out.entry(review_id).or_default().push(thread);
            }
        }
        out
    }
}

/// 리뷰 코멘트를 루트 기준 스레드로 묶고 리뷰별 답글 수를 집계한다.
pub fn resolve_threads(comments: &[Comment]) -> ResolvedThreads {
    let index: HashMap<i64, usize> = comments
        .iter()
        .enumerate()
        .map(|(idx, c)| (c.id, idx))
        .collect();

    // 그룹 순서는 첫 등장 순서로 고정해 입력 순서에 대한 안정성을 보장한다.
    let mut group_of_root: HashMap<i64, usize> = HashMap::new();
    let mut groups: Vec<Vec<&Comment>> = Vec::new();
    let mut roots = RootResolver::new(comments, &index);
    for (idx, comment) in comments.iter().enumerate() {
        let root = roots.root_of(idx);
        let slot = *group_of_root.entry(root).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(comment);
    }

    let mut threads: Vec<CommentThread> = groups
        .into_iter()
        .map(|mut group| {
            // 루트(부모 없음)를 맨 앞에 두고 나머지는 작성 시각 순.
            group.sort_by_key(|c| (!c.is_root(), c.created_at));
            CommentThread {
                comments: group.into_iter().cloned().collect(),
            }
        })
        .collect();
    threads.sort_by_key(|t| t.root().created_at);

    let mut reply_counts: HashMap<i64, usize> = HashMap::new();
    for comment in comments.iter().filter(|c| !c.is_root()) {
        if let Some(review_id) = comment.pull_request_review_id {
            *reply_counts.entry(review_id).or_default() += 1;
        }
    }

    debug!(
        comments = comments.len(),
        threads = threads.len(),
        "resolved review comment threads"
    );

    ResolvedThreads {
        threads,
        reply_counts,
    }
}

/// 부모 체인을 따라가 유효 루트 id를 구한다.
///
/// 부모 id가 조회되지 않으면 그 id 자체가 루트 키가 된다(해당 id의 코멘트가
/// 존재하지 않을 수 있음). 순환 참조는 순환 구간의 최소 id로 끊는다.
pub fn effective_root(
    comment: &Comment,
    comments: &[Comment],
    index: &HashMap<i64, usize>,
) -> i64 {
    let mut roots = RootResolver::new(comments, index);
    if let Some(&idx) = index.get(&comment.id) {
        return roots.root_of(idx);
    }
    match comment.in_reply_to_id {
        None => comment.id,
        Some(parent_id) => match index.get(&parent_id) {
            Some(&parent_idx) => roots.root_of(parent_idx),
            None => parent_id,
        },
    }
}

/// 인덱스별 유효 루트를 메모이즈한다. 한 번 걸은 경로는 다시 걷지 않는다.
struct RootResolver<'c> {
    comments: &'c [Comment],
    index: &'c HashMap<i64, usize>,
    memo: Vec<Option<i64>>,
}

impl<'c> RootResolver<'c> {
    fn new(comments: &'c [Comment], index: &'c HashMap<i64, usize>) -> Self {
        Self {
            comments,
            index,
            memo: vec![None; comments.len()],
        }
    }

    fn root_of(&mut self, start: usize) -> i64 {
        let mut path: Vec<usize> = Vec::new();
        let mut visited: HashSet<i64> = HashSet::new();
        let mut current = start;

        let root = loop {
            if let Some(root) = self.memo[current] {
                break root;
            }
            let comment = &self.comments[current];
            visited.insert(comment.id);
            path.push(current);

            let Some(parent_id) = comment.in_reply_to_id else {
                break comment.id;
            };
            if visited.contains(&parent_id) {
                break self.cycle_key(&path, parent_id);
            }
            let Some(&parent_idx) = self.index.get(&parent_id) else {
                break parent_id;
            };
            current = parent_idx;
        };

        for idx in path {
            self.memo[idx] = Some(root);
        }
        root
    }

    /// 순환 구간(재방문한 id부터 경로 끝까지)의 최소 id.
    fn cycle_key(&self, path: &[usize], revisited: i64) -> i64 {
        let ids = path.iter().map(|&idx| self.comments[idx].id);
        let from = ids.clone().position(|id| id == revisited).unwrap_or(0);
        ids.skip(from).min().unwrap_or(revisited)
    }
}

/// 복원 결과를 리뷰에 붙인다. 스레드는 루트의 리뷰로, 답글 수는 답글 자신의 리뷰로 귀속된다.
pub fn attach_threads(reviews: &mut [Review], mut resolved: ResolvedThreads) {
    let reply_counts = std::mem::take(&mut resolved.reply_counts);
    let mut by_review = resolved.into_review_map();

    for review in reviews.iter_mut() {
        review.threads = by_review.remove(&review.id).unwrap_or_default();
        review.reply_count = reply_counts.get(&review.id).copied().unwrap_or(0);
    }

    if !by_review.is_empty() {
        debug!(
            unmatched_reviews = by_review.len(),
            "threads reference reviews that were not fetched"
        );
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::domain::pull_request::User;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn comment(id: i64, t: i64, parent: Option<i64>, review: Option<i64>) -> Comment {
        Comment {
            id,
            body: format!("comment {id}"),
            user: User::new("reviewer"),
            created_at: at(t),
            diff_hunk: Some("@@ -1 +1 @@".to_string()),
            path: Some("src/lib.rs".to_string()),
            in_reply_to_id: parent,
            pull_request_review_id: review,
        }
    }

    fn review(id: i64, t: i64) -> Review {
        Review {
            id,
            body: None,
            state: "COMMENTED".to_string(),
            user: User::new("reviewer"),
            submitted_at: at(t),
            threads: Vec::new(),
            reply_count: 0,
        }
    }

    fn ids(thread: &CommentThread) -> Vec<i64> {
        thread.comments.iter().map(|c| c.id).collect()
    }

    #[test]
    fn reply_joins_root_thread() {
        let comments = vec![
            comment(1, 10, None, Some(100)),
            comment(2, 11, Some(1), Some(100)),
        ];
        let resolved = resolve_threads(&comments);

        assert_eq!(resolved.threads.len(), 1);
        assert_eq!(ids(&resolved.threads[0]), vec![1, 2]);

        let by_review = resolved.by_review();
        assert_eq!(by_review[&100].len(), 1);
        assert_eq!(ids(by_review[&100][0]), vec![1, 2]);
        // 답글 자신의 리뷰 기준 집계이므로 같은 리뷰여도 1.
        // 같은 리뷰 안의 답글도 0으로 빼지 않는다. 버그가 아니라 의도된 집계 규칙이다.
        assert_eq!(resolved.reply_count(100), 1);
    }

    #[test]
    fn cross_review_reply_stays_in_root_thread() {
        let comments = vec![
            comment(1, 10, None, Some(1)),
            comment(2, 11, Some(1), Some(2)),
        ];
        let resolved = resolve_threads(&comments);

        assert_eq!(resolved.threads.len(), 1);
        assert_eq!(ids(&resolved.threads[0]), vec![1, 2]);

        let by_review = resolved.by_review();
        assert_eq!(by_review.len(), 1);
        assert!(by_review.contains_key(&1));
        assert!(!by_review.contains_key(&2));

        assert_eq!(resolved.reply_count(1), 0);
        assert_eq!(resolved.reply_count(2), 1);
    }

    #[test]
    fn deep_chain_resolves_to_top_root() {
        let comments = vec![
            comment(4, 13, Some(3), Some(1)),
            comment(2, 11, Some(1), Some(1)),
            comment(1, 10, None, Some(1)),
            comment(3, 12, Some(2), Some(1)),
        ];
        let resolved = resolve_threads(&comments);

        assert_eq!(resolved.threads.len(), 1);
        assert_eq!(ids(&resolved.threads[0]), vec![1, 2, 3, 4]);
    }

    #[test]
    fn threads_ordered_by_root_timestamp() {
        let comments = vec![
            comment(10, 50, None, Some(1)),
            comment(20, 20, None, Some(1)),
            comment(21, 60, Some(20), Some(1)),
            comment(30, 30, None, Some(2)),
        ];
        let resolved = resolve_threads(&comments);

        let roots: Vec<i64> = resolved.threads.iter().map(|t| t.root().id).collect();
        assert_eq!(roots, vec![20, 30, 10]);

        let by_review = resolved.by_review();
        let review_one: Vec<i64> = by_review[&1].iter().map(|t| t.root().id).collect();
        assert_eq!(review_one, vec![20, 10]);
    }

    #[test]
    fn every_comment_lands_in_exactly_one_thread() {
        let comments = vec![
            comment(1, 10, None, Some(1)),
            comment(2, 11, Some(1), Some(2)),
            comment(3, 12, None, Some(2)),
            comment(4, 13, Some(3), Some(2)),
            comment(5, 14, Some(99), Some(3)),
            comment(6, 15, Some(5), Some(3)),
            comment(7, 16, None, None),
        ];
        let resolved = resolve_threads(&comments);

        let mut seen: Vec<i64> = resolved
            .threads
            .iter()
            .flat_map(|t| t.comments.iter().map(|c| c.id))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 7]);

        for thread in &resolved.threads {
            assert!(!thread.comments.is_empty());
            assert!(
                thread
                    .comments
                    .windows(2)
                    .all(|w| w[0].created_at <= w[1].created_at)
            );
            for c in thread.replies() {
                assert!(!c.is_root(), "root comment must lead its thread");
            }
        }
    }

    #[test]
    fn dangling_parent_groups_under_unresolved_id() {
        // 부모(99)가 수집 범위 밖이면 99를 루트 키로 묶는다. 알려진 동작이며 의도적으로 유지한다.
        let comments = vec![
            comment(5, 20, Some(99), Some(3)),
            comment(6, 21, Some(5), Some(3)),
            comment(7, 22, Some(99), Some(4)),
        ];
        let index: HashMap<i64, usize> =
            comments.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        assert_eq!(effective_root(&comments[0], &comments, &index), 99);
        assert_eq!(effective_root(&comments[1], &comments, &index), 99);

        let resolved = resolve_threads(&comments);
        assert_eq!(resolved.threads.len(), 1);
        assert_eq!(ids(&resolved.threads[0]), vec![5, 6, 7]);
        assert_eq!(resolved.threads[0].review_id(), Some(3));
        assert_eq!(resolved.reply_count(3), 2);
        assert_eq!(resolved.reply_count(4), 1);
    }

    #[test]
    fn cyclic_parents_terminate() {
        let comments = vec![
            comment(1, 10, Some(2), Some(1)),
            comment(2, 11, Some(1), Some(1)),
        ];
        let resolved = resolve_threads(&comments);

        assert_eq!(resolved.threads.len(), 1);
        assert_eq!(ids(&resolved.threads[0]), vec![1, 2]);
    }

    #[test]
    fn cycle_members_share_smallest_id_as_root() {
        let comments = vec![
            comment(7, 10, Some(5), Some(1)),
            comment(5, 11, Some(9), Some(1)),
            comment(9, 12, Some(7), Some(1)),
            comment(11, 13, Some(9), Some(1)),
        ];
        let index: HashMap<i64, usize> =
            comments.iter().enumerate().map(|(i, c)| (c.id, i)).collect();
        for c in &comments {
            assert_eq!(effective_root(c, &comments, &index), 5);
        }

        let resolved = resolve_threads(&comments);
        assert_eq!(resolved.threads.len(), 1);
        assert_eq!(ids(&resolved.threads[0]), vec![7, 5, 9, 11]);
    }

    #[test]
    fn long_reversed_chain_resolves_to_single_thread() {
        let len: i64 = 5_000;
        let mut comments: Vec<Comment> = (1..=len)
            .map(|id| {
                let parent = (id > 1).then_some(id - 1);
                comment(id, id, parent, Some(1))
            })
            .collect();
        comments.reverse();

        let resolved = resolve_threads(&comments);

        assert_eq!(resolved.threads.len(), 1);
        let thread = &resolved.threads[0];
        assert_eq!(thread.root().id, 1);
        assert_eq!(thread.comments.len(), len as usize);
        assert_eq!(ids(thread), (1..=len).collect::<Vec<_>>());
        assert_eq!(resolved.reply_count(1), len as usize - 1);
    }

    #[test]
    fn input_order_does_not_change_result() {
        let comments = vec![
            comment(1, 10, None, Some(1)),
            comment(2, 12, Some(1), Some(1)),
            comment(3, 11, Some(1), Some(2)),
            comment(4, 5, None, Some(2)),
            comment(5, 6, Some(4), Some(2)),
        ];
        let mut reversed = comments.clone();
        reversed.reverse();

        let a = resolve_threads(&comments);
        let b = resolve_threads(&reversed);

        assert_eq!(a.threads, b.threads);
        assert_eq!(a.reply_counts, b.reply_counts);
        assert_eq!(ids(&a.threads[0]), vec![4, 5]);
        assert_eq!(ids(&a.threads[1]), vec![1, 3, 2]);
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let comments = vec![
            comment(1, 10, None, Some(1)),
            comment(3, 11, Some(1), Some(1)),
            comment(2, 11, Some(1), Some(1)),
        ];
        let resolved = resolve_threads(&comments);
        assert_eq!(ids(&resolved.threads[0]), vec![1, 3, 2]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let resolved = resolve_threads(&[]);
        assert!(resolved.threads.is_empty());
        assert!(resolved.reply_counts.is_empty());
        assert!(resolved.by_review().is_empty());
    }

    #[test]
    fn attach_uses_root_review_for_threads_and_own_review_for_counts() {
        let comments = vec![
            comment(1, 10, None, Some(1)),
            comment(2, 11, Some(1), Some(2)),
            comment(3, 12, None, None),
        ];
        let mut reviews = vec![review(1, 10), review(2, 11), review(3, 12)];
        attach_threads(&mut reviews, resolve_threads(&comments));

        assert_eq!(reviews[0].threads.len(), 1);
        assert_eq!(ids(&reviews[0].threads[0]), vec![1, 2]);
        assert_eq!(reviews[0].reply_count, 0);

        assert!(reviews[1].threads.is_empty());
        assert_eq!(reviews[1].reply_count, 1);

        assert!(reviews[2].threads.is_empty());
        assert_eq!(reviews[2].reply_count, 0);
    }
}
