//! Backtracking regular expressions.
//!
//! A pattern is parsed into a tree of nodes linked by continuations, then
//! matched by trying each start offset and backtracking through
//! quantifiers.
//!
//! | Syntax    | Meaning                                   |
//! |-----------|-------------------------------------------|
//! | `c`       | the character `c`                         |
//! | `\c`      | `c` taken literally                       |
//! | `.`       | any one character                         |
//! | `[a-z_]`  | one character in the class                |
//! | `[^a-z]`  | one character not in the class            |
//! | `(...)`   | group                                     |
//! | `x*`      | zero or more `x`                          |
//! | `x?`      | zero or one `x`                           |
//! | `x+`      | one or more `x`                           |
//! | `x{m,n}`  | `m` to `n` of `x`, either bound optional  |
//! | `x\|y`    | `x` or `y` (one element on each side)     |
//! | `^` / `$` | start / end of the subject                |
//!
//! Back-references (`\1`..`\9`) parse but are rejected as unsupported.

pub mod ast;
pub mod class;
pub mod config;
pub mod debug;
pub mod error;
pub mod harness;
pub mod matcher;
pub mod parser;
pub mod regex;
pub mod rewrite;

pub use config::{Alternation, MatchConfig};
pub use error::{CompileError, Result};
pub use regex::{compile, CompiledRegex};

/// Compile `pattern` and test it against `input` in one go.
pub fn is_match(input: &str, pattern: &str) -> Result<bool> {
    Ok(compile(pattern)?.is_match(input))
}
