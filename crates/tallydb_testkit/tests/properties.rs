//! Property tests: the engine against the reference model.

use proptest::prelude::*;
use tallydb_core::{Command, Engine, Reply};
use tallydb_testkit::{
    assert_matches_model, key_strategy, line_strategy, script_strategy, value_strategy, ModelStore,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn engine_agrees_with_model(script in script_strategy(120)) {
        let mut engine = Engine::new();
        let mut model = ModelStore::new();

        for command in &script {
            let actual = engine.execute(command).unwrap();
            let expected = model.apply(command);
            prop_assert_eq!(actual, expected, "after {}", command);
            engine.check_invariants().unwrap();
        }
        assert_matches_model(&engine, &model);
    }

    #[test]
    fn raw_lines_never_fail(lines in prop::collection::vec(line_strategy(), 0..80)) {
        let mut engine = Engine::new();
        for line in &lines {
            prop_assert!(engine.execute_line(line).is_ok());
        }
        engine.check_invariants().unwrap();
    }

    #[test]
    fn rollback_restores_pre_begin_state(
        setup in script_strategy(30),
        body in script_strategy(40),
    ) {
        let mut engine = Engine::new();
        for command in &setup {
            engine.execute(command).unwrap();
        }
        let _ = engine.commit();

        let before: Vec<(String, String)> = {
            let mut pairs: Vec<_> = engine
                .store()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            pairs.sort();
            pairs
        };
        let index_before = engine.store().index().clone();

        engine.begin().unwrap();
        for command in body.iter().filter(|c| !matches!(c, Command::Begin | Command::Commit | Command::Rollback)) {
            engine.execute(command).unwrap();
        }
        engine.rollback().unwrap();

        let mut after: Vec<_> = engine
            .store()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        after.sort();

        prop_assert_eq!(before, after);
        prop_assert_eq!(&index_before, engine.store().index());
        prop_assert!(!engine.in_transaction());
    }

    #[test]
    fn repeated_writes_roll_back_to_first_state(
        key in key_strategy(),
        initial in prop::option::of(value_strategy()),
        writes in prop::collection::vec(prop::option::of(value_strategy()), 1..10),
    ) {
        let mut engine = Engine::new();
        if let Some(value) = &initial {
            engine.set(&key, value).unwrap();
        }

        engine.begin().unwrap();
        for write in &writes {
            match write {
                Some(value) => engine.set(&key, value).unwrap(),
                None => engine.unset(&key).unwrap(),
            }
        }
        engine.rollback().unwrap();

        prop_assert_eq!(engine.get(&key), initial.as_deref());
        prop_assert_eq!(engine.len(), usize::from(initial.is_some()));
        engine.check_invariants().unwrap();
    }

    #[test]
    fn commit_always_empties_the_stack(depth in 1usize..12) {
        let mut engine = Engine::new();
        for i in 0..depth {
            engine.begin().unwrap();
            engine.set("k", &i.to_string()).unwrap();
        }
        prop_assert_eq!(engine.execute(&Command::Commit).unwrap(), Reply::Empty);
        let last = (depth - 1).to_string();
        prop_assert_eq!(engine.get("k"), Some(last.as_str()));
        prop_assert_eq!(engine.execute(&Command::Rollback).unwrap(), Reply::NoTransaction);
    }
}
