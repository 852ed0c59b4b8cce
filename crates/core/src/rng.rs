use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of uniform integers. Everything random in a round is derived from
/// `uniform_int`, so a scripted fake makes a round fully deterministic.
pub trait RandomSource {
    /// Uniform draw from `lo..=hi_inclusive`. Callers guarantee `lo <= hi_inclusive`.
    fn uniform_int(&mut self, lo: usize, hi_inclusive: usize) -> usize;
}

#[derive(Debug, Clone)]
pub struct RngState {
    seed: u64,
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for RngState {
    fn uniform_int(&mut self, lo: usize, hi_inclusive: usize) -> usize {
        self.rng.gen_range(lo..=hi_inclusive)
    }
}

/// Picks one element uniformly. `None` for an empty slice.
pub fn choose<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let idx = rng.uniform_int(0, items.len() - 1);
    items.get(idx)
}

/// Fisher–Yates, walking from the last index down to 1.
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    let mut n = items.len();
    while n > 1 {
        n -= 1;
        let k = rng.uniform_int(0, n);
        items.swap(k, n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RngState::from_seed(7);
        let mut b = RngState::from_seed(7);
        let seq_a: Vec<_> = (0..32).map(|_| a.uniform_int(0, 1000)).collect();
        let seq_b: Vec<_> = (0..32).map(|_| b.uniform_int(0, 1000)).collect();
        assert_eq!(seq_a, seq_b);
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn uniform_int_stays_in_bounds() {
        let mut rng = RngState::from_seed(99);
        for _ in 0..1000 {
            let value = rng.uniform_int(3, 5);
            assert!((3..=5).contains(&value));
        }
        assert_eq!(rng.uniform_int(4, 4), 4);
    }

    #[test]
    fn choose_handles_empty_and_single() {
        let mut rng = RngState::from_seed(1);
        let empty: Vec<u8> = Vec::new();
        assert!(choose(&mut rng, &empty).is_none());
        assert_eq!(choose(&mut rng, &[42]), Some(&42));
    }

    #[test]
    fn shuffle_keeps_the_same_elements() {
        let mut rng = RngState::from_seed(42);
        let mut data: Vec<u32> = (1..=10).collect();
        shuffle(&mut rng, &mut data);
        assert_eq!(data.len(), 10);
        data.sort_unstable();
        assert_eq!(data, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_is_close_to_uniform() {
        let mut rng = RngState::from_seed(0xC0FFEE);
        let trials = 60_000;
        let mut counts: HashMap<[u8; 3], u32> = HashMap::new();
        for _ in 0..trials {
            let mut perm = [0u8, 1, 2];
            shuffle(&mut rng, &mut perm);
            *counts.entry(perm).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 6);
        let expected = trials / 6;
        for (perm, count) in counts {
            let diff = (count as i64 - expected as i64).abs();
            assert!(diff < 500, "{perm:?} drawn {count} times");
        }
    }
}
