// ============================================================
// Layer 4 - Seeded Shuffle and Train/Test Splitter
// ============================================================
// Shuffles records and partitions them into two disjoint sets:
//   - Training set: handed to the classifier for fitting
//   - Test set:     held out for evaluation
//
// Both steps take an explicit seed. The same (corpus, seed)
// always gives the same permutation and the same partition,
// so a re-run produces byte-identical CSV files.
//
// Partition sizes:
//   n_test  = ceil(test_fraction * n)
//   n_train = n - n_test
//
// Uses Fisher-Yates via rand::seq::SliceRandom driven by a
// StdRng seeded from a u64.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::domain::corpus::Corpus;
use crate::domain::error::{PipelineError, PipelineResult};

/// Absorbs float noise such as 0.7 * 10 = 7.000000000000001
const FRACTION_EPSILON: f64 = 1e-9;

/// Shuffle a slice in place, deterministically for a given seed.
pub fn shuffle_seeded<T>(items: &mut [T], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);
}

/// Shuffle `samples` and split into (train, test).
///
/// # Arguments
/// * `samples`       - All records (consumed)
/// * `test_fraction` - Share held out for testing, strictly between 0 and 1
/// * `seed`          - RNG seed for the shuffle
pub fn split_train_test<T>(
    mut samples:   Vec<T>,
    test_fraction: f64,
    seed:          u64,
) -> PipelineResult<(Vec<T>, Vec<T>)> {
    validate_fraction(test_fraction)?;

    shuffle_seeded(&mut samples, seed);

    let total  = samples.len();
    let n_test = test_size(total, test_fraction);

    // After split_off: samples = test [0..n_test], train = [n_test..total]
    let train = samples.split_off(n_test);
    let test  = samples;

    tracing::debug!(
        "Dataset split: {} train, {} test (test_fraction={})",
        train.len(),
        test.len(),
        test_fraction,
    );

    Ok((train, test))
}

pub fn validate_fraction(test_fraction: f64) -> PipelineResult<()> {
    if test_fraction.is_finite() && test_fraction > 0.0 && test_fraction < 1.0 {
        Ok(())
    } else {
        Err(PipelineError::InvalidConfig(format!(
            "test fraction must lie strictly between 0 and 1, got {test_fraction}"
        )))
    }
}

fn test_size(total: usize, test_fraction: f64) -> usize {
    let raw = (total as f64 * test_fraction - FRACTION_EPSILON).ceil();
    (raw.max(0.0) as usize).min(total)
}

/// Uniformly permute a corpus, keeping its column layout.
pub fn shuffle(corpus: Corpus, seed: u64) -> Corpus {
    let (columns, mut records) = corpus.into_parts();
    shuffle_seeded(&mut records, seed);
    Corpus::new(columns, records)
}

/// Partition a corpus into (train, test) with the same column layout.
pub fn split(corpus: Corpus, test_fraction: f64, seed: u64) -> PipelineResult<(Corpus, Corpus)> {
    let (columns, records) = corpus.into_parts();
    let (train, test) = split_train_test(records, test_fraction, seed)?;
    Ok((Corpus::new(columns.clone(), train), Corpus::new(columns, test)))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test) = split_train_test(items, 0.2, 42).unwrap();
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
    }

    #[test]
    fn test_test_size_rounds_up() {
        let items: Vec<usize> = (0..11).collect();
        let (train, test) = split_train_test(items, 0.2, 42).unwrap();
        // ceil(2.2) = 3
        assert_eq!(test.len(), 3);
        assert_eq!(train.len(), 8);
    }

    #[test]
    fn test_float_noise_does_not_add_a_row() {
        let items: Vec<usize> = (0..10).collect();
        let (_, test) = split_train_test(items, 0.7, 1).unwrap();
        assert_eq!(test.len(), 7);
    }

    #[test]
    fn test_partitions_are_disjoint_and_complete() {
        let items: Vec<usize> = (0..57).collect();
        let (train, test) = split_train_test(items, 0.3, 7).unwrap();

        let train_set: HashSet<_> = train.iter().copied().collect();
        let test_set: HashSet<_> = test.iter().copied().collect();
        assert!(train_set.is_disjoint(&test_set));

        let union: HashSet<_> = train_set.union(&test_set).copied().collect();
        assert_eq!(union, (0..57).collect::<HashSet<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_train_test((0..40).collect::<Vec<_>>(), 0.25, 42).unwrap();
        let b = split_train_test((0..40).collect::<Vec<_>>(), 0.25, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_same_seed_same_shuffle() {
        let mut a: Vec<usize> = (0..50).collect();
        let mut b: Vec<usize> = (0..50).collect();
        shuffle_seeded(&mut a, 42);
        shuffle_seeded(&mut b, 42);
        assert_eq!(a, b);

        let mut c: Vec<usize> = (0..50).collect();
        shuffle_seeded(&mut c, 43);
        assert_ne!(a, c);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut a: Vec<usize> = (0..30).collect();
        shuffle_seeded(&mut a, 9);
        a.sort_unstable();
        assert_eq!(a, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_dataset() {
        let (train, test) = split_train_test(Vec::<usize>::new(), 0.2, 42).unwrap();
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_fraction_bounds_rejected() {
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            let err = split_train_test(vec![1, 2, 3], bad, 42).unwrap_err();
            assert!(matches!(err, PipelineError::InvalidConfig(_)));
        }
    }
}
