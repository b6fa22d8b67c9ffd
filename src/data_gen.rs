//! Value feeds for exercising the tree: sorted runs, shuffled runs, and
//! random draws with and without repeats.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, NormalError, Uniform};

// default = 64k values
const DEFAULT_COUNT: usize = 1 << 16;

/// `0, 1, ..., count - 1`, the worst case for an unbalanced tree.
pub fn sorted_u64(count: Option<usize>) -> Vec<u64> {
    let count = count.unwrap_or(DEFAULT_COUNT);
    (0..count as u64).collect()
}

/// A permutation of `0..count` drawn from `rng`.
pub fn shuffled_u64<R: Rng>(count: usize, rng: &mut R) -> Vec<u64> {
    let mut values: Vec<u64> = (0..count as u64).collect();
    values.shuffle(rng);
    values
}

/// Uniform draws from `[min, max]`; repeats are likely when the range is small.
pub fn uniform_u64<R: Rng>(count: usize, min: u64, max: u64, rng: &mut R) -> Vec<u64> {
    let uniform = Uniform::new_inclusive(min, max);
    (0..count).map(|_| uniform.sample(rng)).collect()
}

/// Normal draws clamped to `i64`, clustered around `mean`.
pub fn normal_i64<R: Rng>(
    count: usize,
    mean: f64,
    std_dev: f64,
    rng: &mut R,
) -> Result<Vec<i64>, NormalError> {
    let normal = Normal::new(mean, std_dev)?;

    Ok((0..count)
        .map(|_| {
            let sample: f64 = normal.sample(rng);
            sample.max(i64::MIN as f64).min(i64::MAX as f64) as i64
        })
        .collect())
}

/// Random feed over `[0, max]` using a fixed seed, for reproducible runs.
pub fn seeded_uniform_u64(count: usize, max: u64, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    uniform_u64(count, 0, max, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_default() {
        let data = sorted_u64(None);
        assert_eq!(data.len(), DEFAULT_COUNT);
        assert!(data.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_shuffled_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut data = shuffled_u64(1000, &mut rng);
        data.sort();
        assert_eq!(data, (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn test_uniform_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let data = uniform_u64(1000, 10, 20, &mut rng);
        assert_eq!(data.len(), 1000);
        assert!(data.iter().all(|&x| (10..=20).contains(&x)));
    }

    #[test]
    fn test_normal_clusters() {
        let mut rng = StdRng::seed_from_u64(3);
        let data = normal_i64(1000, 0.0, 10.0, &mut rng).unwrap();
        assert_eq!(data.len(), 1000);
        assert!(data.iter().all(|&x| x.abs() < 1000));

        assert!(normal_i64(10, 0.0, f64::NAN, &mut rng).is_err());
        assert!(normal_i64(10, 0.0, f64::INFINITY, &mut rng).is_err());
    }

    #[test]
    fn test_seeded_is_reproducible() {
        assert_eq!(seeded_uniform_u64(100, 50, 42), seeded_uniform_u64(100, 50, 42));
    }
}
