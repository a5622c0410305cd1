//! Benchmark utilities.

#![warn(missing_docs)]

use rand::Rng;
use tallydb_core::Engine;

/// Generate `count` SET command lines over `keys` keys and `values` values.
pub fn random_set_lines(count: usize, keys: usize, values: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            format!(
                "SET k{} v{}",
                rng.gen_range(0..keys),
                rng.gen_range(0..values)
            )
        })
        .collect()
}

/// Build an engine preloaded with `keys` keys spread over `values` values.
pub fn populated_engine(keys: usize, values: usize) -> Engine {
    let mut engine = Engine::new();
    for i in 0..keys {
        engine
            .set(&format!("k{i}"), &format!("v{}", i % values))
            .expect("populate failed");
    }
    engine
}
