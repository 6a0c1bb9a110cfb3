use std::sync::Arc;
use std::thread;

use backtrack_regex::{compile, is_match, Alternation, CompiledRegex, MatchConfig};

fn re(pattern: &str) -> CompiledRegex {
    compile(pattern).expect("pattern should compile")
}

#[test]
fn matching_when_literal_then_exact_substring_required() {
    assert!(re("a").is_match("a"));
    assert!(re("abc").is_match("xxabcxx"));
    assert!(!re("abc").is_match("abxc"));
    assert!(!re("a").is_match(""));
}

#[test]
fn matching_when_start_anchored_then_only_offset_zero() {
    let anchored = re("^ab");
    assert!(anchored.is_match("abc"));
    assert!(!anchored.is_match(" ab"));
    assert!(!anchored.is_match("cab"));
}

#[test]
fn matching_when_end_anchored_then_match_ends_at_subject_end() {
    let anchored = re("ab$");
    assert!(anchored.is_match("cab"));
    assert!(!anchored.is_match("abc"));
    assert_eq!(anchored.find("xab"), Some(1..3));
}

#[test]
fn matching_when_bounded_repetition_anchored_then_counts_are_exact() {
    let bounded = re("^a{2,4}$");
    for (count, expected) in [(0, false), (1, false), (2, true), (3, true), (4, true), (5, false)] {
        let subject = "a".repeat(count);
        assert_eq!(bounded.is_match(&subject), expected, "{count} copies");
    }
}

#[test]
fn matching_when_lower_bound_above_cap_then_upper_bound_is_open() {
    let large = re("^a{1000,}$");
    assert!(large.is_match(&"a".repeat(1000)));
    assert!(!large.is_match(&"a".repeat(999)));
}

#[test]
fn matching_when_bounded_repetition_unanchored_then_prefix_is_enough() {
    assert!(!re("^a{1,2}$").is_match("aaa"));
    assert!(re("a{1,2}").is_match("aaa"));
}

#[test]
fn matching_when_star_before_literal_then_backs_off() {
    let star = re("a*b");
    assert_eq!(star.find("aaab"), Some(0..4));
    assert!(!star.is_match("aaa"));
}

#[test]
fn matching_when_literals_merged_then_results_unchanged() {
    let merged = re("abc");
    let split = re("a(b)c");
    for subject in ["abc", "xabcx", "ab", "acb", ""] {
        assert_eq!(merged.is_match(subject), split.is_match(subject), "{subject:?}");
    }
    assert_eq!(merged.tree().reachable(merged.root()), 1);
}

#[test]
fn matching_when_bracket_class_then_ranges_apply() {
    assert!(re("[a-z]").is_match("m"));
    assert!(!re("[^a-z]").is_match("m"));
    assert!(!re("[a-z]").is_match("M"));
    assert!(re("[^a-z]").is_match("M"));
}

#[test]
fn matching_when_alternation_then_either_side() {
    let or = re("a|b");
    assert!(or.is_match("a"));
    assert!(or.is_match("b"));
    assert!(!or.is_match("c"));
}

#[test]
fn matching_when_operator_repeated_then_same_result() {
    for subject in ["", "a", "aaa", "b", "ba"] {
        assert_eq!(re("a**").is_match(subject), re("a*").is_match(subject));
        assert_eq!(re("^a++$").is_match(subject), re("^a+$").is_match(subject));
        assert_eq!(re("^a??$").is_match(subject), re("^a?$").is_match(subject));
    }
}

#[test]
fn matching_when_email_pattern_then_address_accepted() {
    let email = re(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}");
    assert!(email.is_match("user@example.com"));
    assert!(email.is_match("contact: first.last+tag@mail.example.org"));
    assert!(!email.is_match("user@localhost"));
}

#[test]
fn matching_when_grouped_alternation_repeated_then_backtracks_count() {
    assert!(re("a(b|c)*d").is_match("abcbcd"));
    assert!(!re("a(b|c)*d").is_match("abxd"));
}

#[test]
fn matching_when_committed_mode_then_first_branch_wins() {
    let pattern = re("a|(ab)c");
    assert!(!pattern.is_match("abc"));
    let backtracking = MatchConfig::new().alternation(Alternation::Backtracking);
    assert!(pattern.is_match_with("abc", &backtracking));
}

#[test]
fn matching_when_backtracking_mode_then_agrees_on_plain_patterns() {
    let backtracking = MatchConfig::new().alternation(Alternation::Backtracking);
    for (pattern, subject) in [("a(b|c)*d", "abcbcd"), ("^a+c$", "aaac"), ("^[ab]|c$", "ac")] {
        let compiled = re(pattern);
        assert_eq!(
            compiled.is_match(subject),
            compiled.is_match_with(subject, &backtracking),
            "{pattern} on {subject}"
        );
    }
}

#[test]
fn matching_when_backtracking_mode_then_repeated_alternation_rechooses() {
    let pattern = re("^(a|(ab))*c$");
    assert!(!pattern.is_match("abc"));
    let backtracking = MatchConfig::new().alternation(Alternation::Backtracking);
    assert!(pattern.is_match_with("abc", &backtracking));
    assert!(pattern.is_match_with("aababc", &backtracking));
    assert!(!pattern.is_match_with("abbc", &backtracking));
}

#[test]
fn matching_when_step_limit_exhausted_then_no_match() {
    let nested = re("a*a*a*b");
    let subject = format!("{}xb", "a".repeat(20));
    assert!(nested.is_match(&subject));
    let limited = MatchConfig::new().step_limit(1_000);
    assert!(!nested.is_match_with(&subject, &limited));
}

#[test]
fn matching_when_shared_across_threads_then_results_agree() {
    let shared = Arc::new(re("^[a-z]+[0-9]{1,3}$"));
    let handles: Vec<_> = ["abc1", "abc1234", "x99", "9x"]
        .into_iter()
        .map(|subject| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || shared.is_match(subject))
        })
        .collect();
    let results: Vec<bool> = handles
        .into_iter()
        .map(|handle| handle.join().expect("matcher thread should not panic"))
        .collect();
    assert_eq!(results, vec![true, false, true, false]);
}

#[test]
fn is_match_when_one_shot_then_compiles_and_matches() {
    assert!(is_match("hello", "l+o$").expect("pattern should compile"));
    assert!(is_match("hello", "(").is_err());
}
