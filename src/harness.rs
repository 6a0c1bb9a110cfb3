//! Table-driven checks: run `(pattern, subject, expected)` cases and count
//! the outcome.

use std::fmt;

use crate::regex::compile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Case {
    pub pattern: &'static str,
    pub subject: &'static str,
    pub expected: bool,
}

const fn hit(pattern: &'static str, subject: &'static str) -> Case {
    Case {
        pattern,
        subject,
        expected: true,
    }
}

const fn miss(pattern: &'static str, subject: &'static str) -> Case {
    Case {
        pattern,
        subject,
        expected: false,
    }
}

/// A case that did not come out as expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub case: Case,
    /// Set when the pattern did not compile.
    pub error: Option<String>,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Case {
            pattern,
            subject,
            expected,
        } = self.case;
        match &self.error {
            Some(err) => write!(f, "\"{pattern}\" does not compile: {err}"),
            None if expected => write!(f, "\"{subject}\" doesn't match regex \"{pattern}\""),
            None => write!(f, "\"{subject}\" matches regex \"{pattern}\""),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    pub failures: Vec<Failure>,
}

impl Tally {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed()
    }

    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run every case in order. A pattern that fails to compile counts as a
/// failure.
pub fn run_cases(cases: &[Case]) -> Tally {
    let mut tally = Tally::default();
    for &case in cases {
        let outcome = compile(case.pattern).map(|re| re.is_match(case.subject));
        match outcome {
            Ok(matched) if matched == case.expected => tally.passed += 1,
            Ok(_) => tally.failures.push(Failure { case, error: None }),
            Err(err) => tally.failures.push(Failure {
                case,
                error: Some(err.to_string()),
            }),
        }
    }
    tally
}

const EMAIL: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

/// Regression table for the default (committed) matching mode.
///
/// The old negative case `^a[]$` against `a]` is left out: an empty class
/// is now a compile error, which `run_cases` reports as a failure.
pub const REGRESSION: &[Case] = &[
    hit("a", "a"),
    hit("^a", "a"),
    hit("^$", ""),
    hit("a$", "a"),
    hit("[ab]", "a"),
    hit("[ab]", "b"),
    hit("[^ab]", "c"),
    hit("[^ab]", "d"),
    hit("a[ab]c", "abc"),
    hit("(a)", "a"),
    hit("a(a)", "aa"),
    hit("a(a)b", "aab"),
    hit(".", "a"),
    hit("a.", "ab"),
    hit(".a", "ba"),
    hit("^a*$", "a"),
    hit("a*$", "a"),
    hit("^a*", "a"),
    hit("a*", "a"),
    hit("a*", "aaaaaa"),
    hit("a*", ""),
    hit("a{0,}", ""),
    hit("a[ab]*c", "abc"),
    hit("a[ab]*c", "aabbc"),
    hit("a[ab]*c", "ac"),
    hit("a[bc]*d$", "abcbcd"),
    hit("a**[bc]*d$", "abd"),
    hit("a([bc])***d$", "ad"),
    hit("a[bc]*d$", "abbbbbbbd"),
    hit(r"a[bc\]]", "a]"),
    hit("a{1,2}", "a"),
    hit("a{1,2}", "aa"),
    hit("a{,2}", "aa"),
    hit("a{,2}", "a"),
    hit("a{,2}", ""),
    hit("a{1,}", "a"),
    hit("a{1,}", "aaa"),
    hit("[a-z]", "b"),
    hit("[a-z]", "a"),
    hit("[a-z]", "z"),
    hit("[0-9]", "3"),
    hit("[A-Za-z0-9._%+-]", "3"),
    hit(EMAIL, "hugo.coto@rai.usc.es"),
    hit(EMAIL, "hugocoto100305@gmail.com"),
    hit(EMAIL, "hugocoto100305+1@gmail.com"),
    hit(".at", "hat"),
    hit(".at", "cat"),
    hit(".at", "bat"),
    hit(".at", "4at"),
    hit(".at", "#at"),
    hit(".at", " at"),
    hit("[hc]at", "hat"),
    hit("[hc]at", "cat"),
    hit("[^b]at", "cat"),
    hit("[^bc]at", "hat"),
    hit(r"\[.\]", "[a]"),
    hit("s.*", "saw"),
    hit("a?", ""),
    hit("a?", "a"),
    hit("ab?c", "abc"),
    hit("ab?c", "ac"),
    hit("a+", "a"),
    hit("a+", "aaa"),
    hit("ab+c", "abc"),
    hit("ab+c", "abbbc"),
    hit("a|b", "a"),
    hit("a|b", "b"),
    hit("[ab]|c", "a"),
    hit("[ab]|c", "b"),
    hit("[ab]|c", "c"),
    hit("a([ab]|c)*c", "abcabc"),
    hit("a([ab]|c)*c", "ac"),
    hit("^a+$", "a"),
    hit("^a+$", "aa"),
    hit("^a+$", "aaa"),
    hit("^a+$", "aaaaa"),
    hit("^a+c$", "ac"),
    hit("^a+c$", "aac"),
    hit("^a+c$", "aaac"),
    hit("^a+c$", "aaaac"),
    hit("^ba+c$", "bac"),
    hit("^ba+c$", "baac"),
    hit("^ba+c$", "baaac"),
    hit("^ba+c$", "baaaac"),
    hit("a{,}", ""),
    hit("a{0,0}", ""),
    hit("a{,0}", ""),
    hit("a{0,1}", ""),
    hit("a{0,1}", "a"),
    hit("^a{1,1}$", "a"),
    hit("a(b|c)*d", "abcbcd"),
    miss("a", ""),
    miss("a", "b"),
    miss("^a", " a"),
    miss("^$", "a"),
    miss("a$", "a "),
    miss("[ab]", "c"),
    miss("^[ab]$", "ab"),
    miss("^[^ab]$", "a"),
    miss("^[^ab]$", "b"),
    miss("^a[ab]c$", "ac"),
    miss("^(a)", ""),
    miss("^a(a)", "a"),
    miss("^a(a)b$", "ab"),
    miss("^.$", "aa"),
    miss("^.$", ""),
    miss("^a.$", "a"),
    miss("^.a$", "a"),
    miss("^.a$", "aaa"),
    miss("^a[ab]*c$", "aabcc"),
    miss("^a[ab]*c$", "bc"),
    miss("^a([bc])***d$", "aabcd"),
    miss("^a{1,2}$", ""),
    miss("^a{1,2}$", "aaa"),
    miss("^a{,2}$", "aaa"),
    miss("^a{1,}$", ""),
    miss("^a{2,6}$", "a"),
    miss("^[a-z]$", "A"),
    miss("^[a-z]$", "Z"),
    miss("^[a-z]$", "0"),
    miss("^[0-9]$", ""),
    miss("^[A-Za-z0-9._%+-]$", "@"),
    miss(EMAIL, "@rai.usc.es"),
    miss(EMAIL, "hugocoto100305@.com"),
    miss(EMAIL, "hugocoto100305@gmail"),
    miss(r"^\[.\]$", "[]"),
    miss("^a?$", "b"),
    miss("^a?$", "aa"),
    miss("^ab?c$", "abbc"),
    miss("^a+$", ""),
    miss("^ab+c$", "ac"),
    miss("^a|b$", "c"),
    miss("^a|b$", "ab"),
    miss("^[ab]|c$", "ac"),
    miss("^a([ab]|c)*c$", "abcdc"),
    miss("^a+c$", "c"),
    miss("^a$", " a "),
    miss("^ba+c$", "bc"),
    miss("^a{0,1}$", "aa"),
    miss("^a{1,1}$", "aa"),
    miss("^a{1,1}$", ""),
    miss("a(b|c)*d", "abxd"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regression_table_passes() {
        let tally = run_cases(REGRESSION);
        let report: Vec<String> = tally.failures.iter().map(ToString::to_string).collect();
        assert!(tally.all_passed(), "failures: {report:#?}");
        assert_eq!(tally.total(), REGRESSION.len());
    }

    #[test]
    fn wrong_expectations_are_collected() {
        let tally = run_cases(&[hit("a", "a"), hit("a", "b"), miss("b", "b")]);
        assert_eq!(tally.passed, 1);
        assert_eq!(tally.failed(), 2);
        assert_eq!(
            tally.failures[0].to_string(),
            "\"b\" doesn't match regex \"a\""
        );
        assert_eq!(tally.failures[1].to_string(), "\"b\" matches regex \"b\"");
    }

    #[test]
    fn compile_errors_are_failures() {
        let tally = run_cases(&[miss("a[]", "a]")]);
        assert_eq!(tally.failed(), 1);
        assert!(tally.failures[0].error.is_some());
    }
}
