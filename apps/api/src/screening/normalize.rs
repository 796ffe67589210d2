//! Normalization — turns the completion service's free-form text into a list
//! of usable question strings.
//!
//! The service is untrusted: it may emit preamble, enumeration markers,
//! statements without a terminal '?', or filler lines. A line survives iff it
//! contains a '?' (kept through the first one) AND the kept text is at least
//! `min_len` characters after stripping leading enumeration markers.

/// Minimum character length of a usable question line.
pub const MIN_QUESTION_LEN: usize = 25;
/// Below this many usable lines the fallback table kicks in.
pub const MIN_VIABLE: usize = 3;
/// Hard cap on questions served per session.
pub const MAX_QUESTIONS: usize = 5;

/// Thresholds for one normalization run. One policy is the contract —
/// the defaults above — but tests pin specific values.
#[derive(Debug, Clone, Copy)]
pub struct NormalizePolicy {
    pub min_len: usize,
    pub min_viable: usize,
    pub max_questions: usize,
}

impl Default for NormalizePolicy {
    fn default() -> Self {
        Self {
            min_len: MIN_QUESTION_LEN,
            min_viable: MIN_VIABLE,
            max_questions: MAX_QUESTIONS,
        }
    }
}

/// Tagged normalization result. `TooFew` carries the usable partial list so
/// the fallback merge can top it up rather than discard it.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Complete(Vec<String>),
    TooFew(Vec<String>),
}

impl Normalized {
    pub fn questions(&self) -> &[String] {
        match self {
            Normalized::Complete(qs) | Normalized::TooFew(qs) => qs,
        }
    }
}

/// Normalizes raw completion output into an ordered question list,
/// capped at `policy.max_questions`, preserving source order.
pub fn normalize_questions(raw: &str, policy: &NormalizePolicy) -> Normalized {
    let questions: Vec<String> = raw
        .lines()
        .filter_map(|line| extract_question(line, policy.min_len))
        .take(policy.max_questions)
        .collect();

    if questions.len() >= policy.min_viable {
        Normalized::Complete(questions)
    } else {
        Normalized::TooFew(questions)
    }
}

/// Extracts the usable question from one raw line, or None if the line is
/// not well-formed under the policy.
fn extract_question(line: &str, min_len: usize) -> Option<String> {
    let stripped = strip_enumeration(line);
    // Keep through the first '?' — models sometimes append commentary after it.
    let end = stripped.find('?')?;
    let question = stripped[..=end].trim();
    if question.chars().count() >= min_len {
        Some(question.to_string())
    } else {
        None
    }
}

/// Strips leading enumeration markers: digits, dots, parens, dashes,
/// bullets, and surrounding whitespace.
fn strip_enumeration(line: &str) -> &str {
    line.trim_start_matches(|c: char| {
        c.is_ascii_digit()
            || c.is_whitespace()
            || matches!(c, '.' | ')' | '(' | '-' | '*' | '•' | ':' | '#')
    })
    .trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(min_len: usize) -> NormalizePolicy {
        NormalizePolicy {
            min_len,
            ..NormalizePolicy::default()
        }
    }

    #[test]
    fn test_strips_numbering_and_bullets() {
        assert_eq!(
            strip_enumeration("1. How does Rust ownership work?"),
            "How does Rust ownership work?"
        );
        assert_eq!(
            strip_enumeration("  - • 3) What breaks first under load?"),
            "What breaks first under load?"
        );
    }

    #[test]
    fn test_line_without_question_mark_is_rejected() {
        assert_eq!(
            extract_question("Explain the borrow checker in complete detail", 25),
            None
        );
    }

    #[test]
    fn test_short_question_is_rejected() {
        assert_eq!(extract_question("2. ok?", 25), None);
    }

    #[test]
    fn test_trailing_commentary_after_question_mark_is_cut() {
        let q = extract_question(
            "1. How would you shard a Postgres table? (a classic)",
            25,
        )
        .unwrap();
        assert_eq!(q, "How would you shard a Postgres table?");
    }

    // Mirrors the canonical malformed-output scenario: numbered lines, one
    // filler line below threshold.
    #[test]
    fn test_normalize_mixed_output_drops_filler() {
        let raw = "1. Why would a b-tree rebalance?\n2. ok\n3. How would you profile a slow Docker build under memory pressure?";
        let result = normalize_questions(raw, &policy(25));
        assert_eq!(
            result.questions(),
            &[
                "Why would a b-tree rebalance?".to_string(),
                "How would you profile a slow Docker build under memory pressure?".to_string(),
            ]
        );
        // Two usable lines < MIN_VIABLE → tagged TooFew for the fallback merge.
        assert!(matches!(result, Normalized::TooFew(_)));
    }

    #[test]
    fn test_normalize_never_exceeds_max_questions() {
        let raw = (1..=10)
            .map(|i| format!("{i}. How would you design system number {i} for scale?"))
            .collect::<Vec<_>>()
            .join("\n");
        let result = normalize_questions(&raw, &NormalizePolicy::default());
        assert_eq!(result.questions().len(), MAX_QUESTIONS);
        assert!(matches!(result, Normalized::Complete(_)));
    }

    #[test]
    fn test_normalize_preserves_source_order() {
        let raw = "1. How do you roll back a bad deploy safely in production?\n\
                   2. When would you reach for a message queue over an RPC call?\n\
                   3. What does a healthy code review look like to you in practice?";
        let result = normalize_questions(raw, &NormalizePolicy::default());
        let qs = result.questions();
        assert!(qs[0].starts_with("How do you roll back"));
        assert!(qs[1].starts_with("When would you reach"));
        assert!(qs[2].starts_with("What does a healthy"));
    }

    #[test]
    fn test_preamble_and_empty_response_yield_too_few() {
        let raw = "Sure! Here are some great questions for the candidate:";
        assert!(matches!(
            normalize_questions(raw, &NormalizePolicy::default()),
            Normalized::TooFew(qs) if qs.is_empty()
        ));
        assert!(matches!(
            normalize_questions("", &NormalizePolicy::default()),
            Normalized::TooFew(qs) if qs.is_empty()
        ));
    }
}
