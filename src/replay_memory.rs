use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Geometric};
use tracing::debug;

use crate::config::ReservoirStrategy;
use crate::error::GymError;
use crate::transition::{Transition, TransitionColumns};

/// Outcome of a single [`ReplayMemory::insert`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Appended,
    Replaced(usize),
    Skipped,
}

/// Fixed-capacity store whose contents are a uniform sample of every item
/// ever inserted (reservoir sampling).
///
/// Instead of flipping a coin per overflow item, the memory jumps straight
/// to the next accepted index (`skip_insert_until`) by drawing the gap.
#[derive(Debug, Clone)]
pub struct ReplayMemory<T> {
    items: Vec<T>,
    capacity: usize,
    memory_num: usize,
    skip_insert_until: usize,
    strategy: ReservoirStrategy,
    // running weight of Algorithm L
    weight: f64,
    rng: StdRng,
}

impl<T> ReplayMemory<T> {
    pub fn new(
        capacity: usize,
        strategy: ReservoirStrategy,
        seed: Option<u64>,
    ) -> Result<Self, GymError> {
        if capacity == 0 {
            return Err(GymError::InvalidConfig(
                "replay memory capacity must be positive".to_string(),
            ));
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            items: Vec::with_capacity(capacity),
            capacity,
            memory_num: 0,
            skip_insert_until: capacity,
            strategy,
            weight: 1.0,
            rng,
        })
    }

    pub fn insert(&mut self, item: T) -> Insertion {
        let outcome = if self.memory_num < self.capacity {
            self.items.push(item);
            if self.items.len() == self.capacity && self.strategy == ReservoirStrategy::AlgorithmL
            {
                self.weight = self.shrink_weight();
                let skip = self.algorithm_l_skip();
                self.skip_insert_until = self.capacity.saturating_add(skip);
            }
            Insertion::Appended
        } else if self.memory_num >= self.skip_insert_until {
            let gap = self.next_gap();
            self.skip_insert_until = self.skip_insert_until.saturating_add(gap);
            let slot = self.rng.gen_range(0..self.capacity);
            self.items[slot] = item;
            debug!(
                memory_num = self.memory_num,
                slot,
                next = self.skip_insert_until,
                "replaced transition in replay memory"
            );
            Insertion::Replaced(slot)
        } else {
            Insertion::Skipped
        };
        self.memory_num += 1;
        outcome
    }

    /// Distance from the item accepted now to the next one to accept.
    fn next_gap(&mut self) -> usize {
        match self.strategy {
            ReservoirStrategy::GeometricSkip => {
                let p = self.capacity as f64 / self.memory_num as f64;
                // `Geometric` counts failures before the first success, the
                // gap counts trials, hence the +1
                match Geometric::new(p) {
                    Ok(dist) => usize::try_from(dist.sample(&mut self.rng))
                        .unwrap_or(usize::MAX)
                        .saturating_add(1),
                    Err(_) => 1,
                }
            }
            ReservoirStrategy::AlgorithmL => {
                let shrink = self.shrink_weight();
                self.weight *= shrink;
                self.algorithm_l_skip().saturating_add(1)
            }
        }
    }

    fn shrink_weight(&mut self) -> f64 {
        (self.open_unit().ln() / self.capacity as f64).exp()
    }

    fn algorithm_l_skip(&mut self) -> usize {
        let skip = (self.open_unit().ln() / (1.0 - self.weight).ln()).floor();
        // float-to-int casts saturate, a weight near zero yields a huge skip
        skip as usize
    }

    fn open_unit(&mut self) -> f64 {
        self.rng.gen_range(f64::MIN_POSITIVE..1.0)
    }

    /// Indices of up to `batch_size` distinct stored items, in random order.
    /// Asking for more than is stored returns every stored index.
    pub fn sample_indices(&mut self, batch_size: usize) -> Vec<usize> {
        let amount = batch_size.min(self.items.len());
        index::sample(&mut self.rng, self.items.len(), amount).into_vec()
    }

    pub fn sample(&mut self, batch_size: usize) -> Vec<&T> {
        let indices = self.sample_indices(batch_size);
        indices.into_iter().map(|i| &self.items[i]).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of insert calls so far, accepted or not.
    pub fn memory_num(&self) -> usize {
        self.memory_num
    }

    pub fn skip_insert_until(&self) -> usize {
        self.skip_insert_until
    }

    pub fn strategy(&self) -> ReservoirStrategy {
        self.strategy
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl ReplayMemory<Transition> {
    pub fn sample_columns(&mut self, batch_size: usize) -> TransitionColumns<'_> {
        self.sample(batch_size).into_iter().collect()
    }
}
