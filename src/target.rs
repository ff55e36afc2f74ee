//! Strategies for choosing one goal among several candidate targets.
use bevy::math::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Picks which of several candidate targets a search heads for.
///
/// `select` is only called with a non-empty slice and returns an index into it.
pub trait TargetSelector {
    fn select(&mut self, candidates: &[Vec3]) -> usize;
}

/// Picks a candidate uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomTarget {
    rng: StdRng,
}

impl RandomTarget {
    /// Seeded from the operating system.
    pub fn new() -> Self {
        RandomTarget {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A reproducible sequence of picks.
    pub fn seeded(seed: u64) -> Self {
        RandomTarget {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetSelector for RandomTarget {
    fn select(&mut self, candidates: &[Vec3]) -> usize {
        self.rng.random_range(0..candidates.len())
    }
}

/// Always picks the first candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstTarget;

impl TargetSelector for FirstTarget {
    fn select(&mut self, _candidates: &[Vec3]) -> usize {
        0
    }
}

/// Always picks the candidate at a fixed index.
#[derive(Debug, Clone, Copy)]
pub struct IndexTarget(pub usize);

impl TargetSelector for IndexTarget {
    fn select(&mut self, _candidates: &[Vec3]) -> usize {
        self.0
    }
}

impl<F> TargetSelector for F
where
    F: FnMut(&[Vec3]) -> usize,
{
    fn select(&mut self, candidates: &[Vec3]) -> usize {
        self(candidates)
    }
}
