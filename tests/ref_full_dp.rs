use quicked::{align, Algorithm, AlignmentConfig, AlignmentConfigBuilder};
use proptest::prelude::*;

fn full_edit_distance(s: &[u8], t: &[u8]) -> u32 {
    let n = s.len();
    let m = t.len();
    let mut dp = vec![vec![0u32; m + 1]; n + 1];
    for i in 0..=n {
        dp[i][0] = i as u32;
    }
    for j in 0..=m {
        dp[0][j] = j as u32;
    }
    for i in 1..=n {
        for j in 1..=m {
            let diag = dp[i - 1][j - 1] + u32::from(s[i - 1] != t[j - 1]);
            let up = dp[i - 1][j] + 1;
            let left = dp[i][j - 1] + 1;
            dp[i][j] = diag.min(up).min(left);
        }
    }
    dp[n][m]
}

fn config(algorithm: Algorithm, bandwidth: usize, force_scalar: bool) -> AlignmentConfig {
    AlignmentConfigBuilder::new()
        .with_algorithm(algorithm)
        .with_bandwidth(bandwidth)
        .with_force_scalar(force_scalar)
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn quicked_matches_full(
        a in "[ACGT]{0,60}",
        b in "[ACGT]{0,60}",
        seed in 1usize..8,
        force_scalar in any::<bool>(),
    ) {
        let (s, t) = (a.as_bytes(), b.as_bytes());
        let expected = full_edit_distance(s, t);
        let result = align(s, t, &config(Algorithm::Quicked, seed, force_scalar)).unwrap();
        prop_assert_eq!(result.score(), expected);
        let cigar = result.cigar().unwrap();
        prop_assert_eq!(cigar.verify(s, t), Ok(expected));
    }

    #[test]
    fn wide_banded_matches_full(a in "[ACGT]{0,40}", b in "[ACGT]{0,40}") {
        let (s, t) = (a.as_bytes(), b.as_bytes());
        let bandwidth = s.len().max(t.len()).max(1);
        let result = align(s, t, &config(Algorithm::Banded, bandwidth, false)).unwrap();
        prop_assert_eq!(result.score(), full_edit_distance(s, t));
    }

    #[test]
    fn narrow_banded_is_exact_or_refuses(
        a in "[ACGT]{0,40}",
        b in "[ACGT]{0,40}",
        bandwidth in 1usize..6,
    ) {
        let (s, t) = (a.as_bytes(), b.as_bytes());
        match align(s, t, &config(Algorithm::Banded, bandwidth, false)) {
            Ok(result) => prop_assert_eq!(result.score(), full_edit_distance(s, t)),
            Err(quicked::QuickedError::BandTooNarrow { upper_bound, .. }) => {
                prop_assert!(upper_bound >= full_edit_distance(s, t));
            }
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }

    #[test]
    fn hirschberg_matches_full(a in "[ACGT]{0,120}", b in "[ACGT]{0,120}") {
        let (s, t) = (a.as_bytes(), b.as_bytes());
        let expected = full_edit_distance(s, t);
        let result = align(s, t, &config(Algorithm::Hirschberg, 15, false)).unwrap();
        prop_assert_eq!(result.score(), expected);
        prop_assert_eq!(result.cigar().unwrap().verify(s, t), Ok(expected));
    }

    #[test]
    fn windowed_is_an_upper_bound(
        a in "[ACGT]{0,200}",
        b in "[ACGT]{0,200}",
        fallback in any::<bool>(),
    ) {
        let (s, t) = (a.as_bytes(), b.as_bytes());
        let config = AlignmentConfigBuilder::new()
            .with_algorithm(Algorithm::Windowed)
            .with_window_size(48)
            .with_overlap_size(12)
            .with_bandwidth(4)
            .with_hew_fallback(fallback)
            .build()
            .unwrap();
        let result = align(s, t, &config).unwrap();
        prop_assert!(result.score() >= full_edit_distance(s, t));
        prop_assert_eq!(result.cigar().unwrap().verify(s, t), Ok(result.score()));
    }

    #[test]
    fn exact_algorithms_agree(a in "[AC]{0,50}", b in "[AC]{0,50}") {
        let (s, t) = (a.as_bytes(), b.as_bytes());
        let quick = align(s, t, &config(Algorithm::Quicked, 2, false)).unwrap();
        let hirsch = align(s, t, &config(Algorithm::Hirschberg, 2, true)).unwrap();
        prop_assert_eq!(quick.score(), hirsch.score());
    }
}
