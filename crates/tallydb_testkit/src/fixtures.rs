//! Script fixtures.
//!
//! Helpers for running command text against a fresh or existing engine.

use tallydb_core::{Config, Engine, Session};

/// Runs `lines` against a fresh engine and returns the reply texts.
pub fn run_script(lines: &[&str]) -> Vec<String> {
    let mut engine = Engine::new();
    run_on(&mut engine, lines)
}

/// Runs `lines` against `engine` and returns the reply texts.
///
/// Panics on engine errors and checks the reverse-index invariant after
/// every line.
pub fn run_on(engine: &mut Engine, lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            let reply = engine
                .execute_line(line)
                .unwrap_or_else(|e| panic!("engine failed on {line:?}: {e}"));
            engine
                .check_invariants()
                .unwrap_or_else(|e| panic!("invariant broken after {line:?}: {e}"));
            reply.to_string()
        })
        .collect()
}

/// Runs a newline-delimited transcript through a [`Session`] and returns
/// the raw output.
pub fn run_transcript(input: &str) -> String {
    run_transcript_with(Config::default(), input)
}

/// Like [`run_transcript`] with a custom configuration.
pub fn run_transcript_with(config: Config, input: &str) -> String {
    let mut output = Vec::new();
    Session::with_config(config)
        .run(input.as_bytes(), &mut output)
        .expect("session failed");
    String::from_utf8(output).expect("session wrote invalid UTF-8")
}

/// Asserts that `lines` produce `expected` replies on a fresh engine.
pub fn assert_replies(lines: &[&str], expected: &[&str]) {
    let actual = run_script(lines);
    assert_eq!(
        actual, expected,
        "reply mismatch for script {lines:?}"
    );
}
