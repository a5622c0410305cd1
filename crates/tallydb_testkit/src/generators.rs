//! Property-based test generators using proptest.
//!
//! Keys and values are drawn from small alphabets so that generated scripts
//! overwrite, delete and share values often.

use proptest::prelude::*;
use tallydb_core::Command;

/// Strategy for keys from a small fixed set.
pub fn key_strategy() -> impl Strategy<Value = String> {
    (0u8..6).prop_map(|i| format!("k{i}"))
}

/// Strategy for values from a small fixed set.
pub fn value_strategy() -> impl Strategy<Value = String> {
    (0u8..4).prop_map(|i| format!("v{i}"))
}

/// Strategy for a single well-formed command.
pub fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(key, value)| Command::Set { key, value }),
        2 => key_strategy().prop_map(|key| Command::Unset { key }),
        2 => key_strategy().prop_map(|key| Command::Get { key }),
        2 => value_strategy().prop_map(|value| Command::NumEqualTo { value }),
        2 => Just(Command::Begin),
        1 => Just(Command::Commit),
        2 => Just(Command::Rollback),
    ]
}

/// Strategy for a raw input line, including junk the engine must ignore.
pub fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => command_strategy().prop_map(|c| c.to_string()),
        1 => prop::string::string_regex("[A-Za-z ]{0,12}").expect("Invalid regex"),
        1 => Just("SET lonely".to_string()),
    ]
}

/// Strategy for a script of up to `max_len` commands.
pub fn script_strategy(max_len: usize) -> impl Strategy<Value = Vec<Command>> {
    prop::collection::vec(command_strategy(), 0..max_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn generated_commands_round_trip_through_text() {
        let mut runner = TestRunner::default();
        for _ in 0..64 {
            let command = command_strategy().new_tree(&mut runner).unwrap().current();
            assert_eq!(Command::parse(&command.to_string()), command);
        }
    }

    #[test]
    fn scripts_respect_length() {
        let mut runner = TestRunner::default();
        let script = script_strategy(10).new_tree(&mut runner).unwrap().current();
        assert!(script.len() < 10);
    }
}
