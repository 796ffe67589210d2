//! Fallback question table — static, hand-authored scenario questions keyed
//! by lowercase technology token. Used when normalization of the completion
//! service's output yields too few usable questions.

use crate::screening::normalize::{Normalized, NormalizePolicy};

/// Hand-authored fallback questions per technology. Keys are exact lowercase
/// tokens; unmatched stack tokens contribute nothing.
const FALLBACK_QUESTIONS: &[(&str, &[&str])] = &[
    (
        "python",
        &[
            "Your Python service's memory keeps growing under steady load — how do you track down the leak?",
            "A teammate's Python batch job takes hours on data that fits in memory — how would you speed it up?",
        ],
    ),
    (
        "sql",
        &["A query that was fast last month now times out — how do you diagnose and fix it?"],
    ),
    (
        "rust",
        &[
            "A Rust service deadlocks under load but never in tests — how do you hunt it down?",
            "When would you reach for Arc<Mutex<T>> versus message passing, and what trade-off decides it?",
        ],
    ),
    (
        "docker",
        &[
            "A container runs fine locally but is OOM-killed in production — what do you check first?",
            "How would you cut a 2 GB Docker image down without breaking the build?",
        ],
    ),
    (
        "javascript",
        &[
            "A page freezes for seconds during data refresh — how do you find and fix the blocking work?",
        ],
    ),
    (
        "react",
        &[
            "A React list view re-renders everything on each keystroke — how do you isolate and fix it?",
        ],
    ),
    (
        "go",
        &["A Go service leaks goroutines over days of uptime — how do you find where they pile up?"],
    ),
    (
        "java",
        &["A Java service stalls for seconds at random — how would you confirm or rule out GC pauses?"],
    ),
    (
        "kubernetes",
        &["A pod crash-loops only in one cluster — walk through how you would debug it?"],
    ),
    (
        "aws",
        &["Your AWS bill doubled month over month — how do you find the culprit and stop it recurring?"],
    ),
];

/// Fallback questions for one lowercase technology token. Exact match only.
pub fn fallback_for_token(token: &str) -> &'static [&'static str] {
    FALLBACK_QUESTIONS
        .iter()
        .find(|(key, _)| *key == token)
        .map(|(_, qs)| *qs)
        .unwrap_or(&[])
}

/// Merges a normalization result with the fallback table. Pure function:
///
/// - `Complete` passes through untouched (already capped by normalization).
/// - `TooFew` keeps the usable partial list and appends fallback questions
///   for each stack token in order, skipping duplicates, then truncates to
///   `policy.max_questions`.
///
/// May return fewer than `policy.min_viable` items — or none at all — when
/// no token matches the table; the caller decides whether that halts the
/// session.
pub fn merge_with_fallback(
    normalized: Normalized,
    stack_tokens: &[String],
    policy: &NormalizePolicy,
) -> Vec<String> {
    let mut questions = match normalized {
        Normalized::Complete(qs) => return qs,
        Normalized::TooFew(qs) => qs,
    };

    for token in stack_tokens {
        for &q in fallback_for_token(&token.to_lowercase()) {
            if questions.len() >= policy.max_questions {
                break;
            }
            if !questions.iter().any(|have| have.eq_ignore_ascii_case(q)) {
                questions.push(q.to_string());
            }
        }
    }

    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> NormalizePolicy {
        NormalizePolicy::default()
    }

    #[test]
    fn test_exact_lowercase_token_match_only() {
        assert_eq!(fallback_for_token("python").len(), 2);
        assert_eq!(fallback_for_token("Python").len(), 0);
        assert_eq!(fallback_for_token("pythonista").len(), 0);
        assert_eq!(fallback_for_token("cobol").len(), 0);
    }

    // Zero well-formed lines + "Python, SQL" stack → 2 Python + 1 SQL = 3.
    #[test]
    fn test_empty_output_with_matching_stack_reaches_min_viable() {
        let stack = vec!["Python".to_string(), "SQL".to_string()];
        let merged = merge_with_fallback(Normalized::TooFew(vec![]), &stack, &policy());
        assert_eq!(merged.len(), 3);
        assert!(merged[0].contains("Python"));
        assert!(merged[2].contains("query"));
    }

    #[test]
    fn test_complete_result_is_untouched() {
        let qs = vec![
            "How would you design a rate limiter for a public API?".to_string(),
            "What breaks first when traffic grows tenfold overnight?".to_string(),
            "How do you keep deploys safe without slowing the team down?".to_string(),
        ];
        let stack = vec!["python".to_string()];
        let merged = merge_with_fallback(Normalized::Complete(qs.clone()), &stack, &policy());
        assert_eq!(merged, qs);
    }

    #[test]
    fn test_partial_result_is_kept_and_topped_up() {
        let partial = vec!["Why would a b-tree rebalance under heavy writes?".to_string()];
        let stack = vec!["docker".to_string()];
        let merged = merge_with_fallback(Normalized::TooFew(partial.clone()), &stack, &policy());
        assert_eq!(merged[0], partial[0]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_merge_never_exceeds_max() {
        let stack = vec![
            "python".to_string(),
            "rust".to_string(),
            "docker".to_string(),
            "sql".to_string(),
        ];
        let merged = merge_with_fallback(Normalized::TooFew(vec![]), &stack, &policy());
        assert!(merged.len() <= policy().max_questions);
        assert_eq!(merged.len(), 5);
    }

    #[test]
    fn test_unmatched_stack_yields_empty_merge() {
        let stack = vec!["cobol".to_string(), "fortran".to_string()];
        let merged = merge_with_fallback(Normalized::TooFew(vec![]), &stack, &policy());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_duplicate_fallbacks_are_not_added_twice() {
        let stack = vec!["sql".to_string(), "sql".to_string()];
        let merged = merge_with_fallback(Normalized::TooFew(vec![]), &stack, &policy());
        assert_eq!(merged.len(), 1);
    }
}
