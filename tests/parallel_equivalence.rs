#![cfg(feature = "parallel")]

use quicked::{align, align_batch, Algorithm, AlignmentConfigBuilder};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn batch_matches_sequential(
        pairs in prop::collection::vec(("[ACGT]{0,40}", "[ACGT]{0,40}"), 0..24),
        algorithm in prop::sample::select(Algorithm::ALL.to_vec()),
    ) {
        let config = AlignmentConfigBuilder::new()
            .with_algorithm(algorithm)
            .with_bandwidth(64)
            .build()
            .unwrap();
        let inputs: Vec<(Vec<u8>, Vec<u8>)> = pairs
            .iter()
            .map(|(a, b)| (a.clone().into_bytes(), b.clone().into_bytes()))
            .collect();
        let batch = align_batch(&inputs, &config);
        prop_assert_eq!(batch.len(), inputs.len());
        for ((s, t), result) in inputs.iter().zip(batch) {
            prop_assert_eq!(result, align(s, t, &config));
        }
    }
}
