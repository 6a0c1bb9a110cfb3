use std::io::{self, BufRead};
use std::process;

use anyhow::Context;
use clap::Parser;

use backtrack_regex::harness::{run_cases, REGRESSION};
use backtrack_regex::{compile, Alternation, MatchConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pattern to match each input line against
    #[arg(short = 'E', value_name = "PATTERN", required_unless_present = "self_test")]
    pattern: Option<String>,

    /// Print the compiled node tree and exit
    #[arg(long)]
    tree: bool,

    /// Let alternations and groups backtrack into the rest of the pattern
    #[arg(long)]
    backtrack: bool,

    /// Give up on a line after this many evaluation steps
    #[arg(long, value_name = "N")]
    step_limit: Option<usize>,

    /// Run the built-in regression table and report the tally
    #[arg(long)]
    self_test: bool,
}

// Usage: echo <input_text> | btre -E <pattern>
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.self_test {
        let tally = run_cases(REGRESSION);
        for failure in &tally.failures {
            println!("Fail: {failure}");
        }
        println!("{}/{} passed", tally.passed, tally.total());
        process::exit(if tally.all_passed() { 0 } else { 1 });
    }

    let Some(pattern) = args.pattern else {
        anyhow::bail!("no pattern given");
    };
    let regex = compile(&pattern).with_context(|| format!("invalid pattern `{pattern}`"))?;

    if args.tree {
        print!("{}", regex.debug_tree());
        return Ok(());
    }

    let mut config = MatchConfig::new();
    if args.backtrack {
        config = config.alternation(Alternation::Backtracking);
    }
    if let Some(limit) = args.step_limit {
        config = config.step_limit(limit);
    }

    let mut matched = false;
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        if regex.is_match_with(&line, &config) {
            println!("{line}");
            matched = true;
        }
    }

    process::exit(if matched { 0 } else { 1 })
}
