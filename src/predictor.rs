use fxhash::FxHashMap;
use ndarray::{Array2, ArrayView1};
use ndarray_rand::RandomExt;
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::env::State;
use crate::utils::argmax;

/// Sparse keyed representation of a state or action, feature index -> value.
pub type FeatureMap = FxHashMap<usize, f32>;

/// Flattens a state into `{index: value}` over all of its scalars.
pub fn state_features(state: &State) -> FeatureMap {
    state.iter().copied().enumerate().collect()
}

/// Predictor that outputs an action label directly.
pub trait DiscreteDecisionMaker {
    fn decide(&self, state: &FeatureMap) -> String;
}

/// Predictor that scores a (state, action) pair.
pub trait ValueEstimator {
    fn estimate(&self, state: &FeatureMap, action: &FeatureMap) -> f32;
}

/// The capability the caller wants the policy to consult.
#[derive(Clone, Copy)]
pub enum DecisionMaker<'a> {
    Discrete(&'a dyn DiscreteDecisionMaker),
    Value(&'a dyn ValueEstimator),
}

/// Linear action-value model, `q(s, a) = w_a · s`.
///
/// Stands in for a trained network when collecting episodes; it implements
/// both predictor capabilities.
#[derive(Debug, Clone)]
pub struct LinearQ {
    state_dim: usize,
    // one row per action
    weights: Array2<f32>,
}

impl LinearQ {
    pub fn new(weights: Array2<f32>) -> Self {
        Self {
            state_dim: weights.ncols(),
            weights,
        }
    }

    pub fn random(action_dim: usize, state_dim: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let weights = Array2::random_using(
            (action_dim, state_dim),
            Uniform::new(-0.1, 0.1),
            &mut rng,
        );
        Self::new(weights)
    }

    pub fn q_value(&self, state: &FeatureMap, action: usize) -> f32 {
        let row: ArrayView1<f32> = self.weights.row(action);
        state
            .iter()
            .filter(|(k, _)| **k < self.state_dim)
            .map(|(k, v)| row[*k] * v)
            .sum()
    }

    pub fn action_dim(&self) -> usize {
        self.weights.nrows()
    }
}

impl DiscreteDecisionMaker for LinearQ {
    fn decide(&self, state: &FeatureMap) -> String {
        let values: Vec<f32> = (0..self.action_dim())
            .map(|a| self.q_value(state, a))
            .collect();
        argmax(values.iter()).to_string()
    }
}

impl ValueEstimator for LinearQ {
    /// Actions are keyed by `state_dim + action_index`.
    fn estimate(&self, state: &FeatureMap, action: &FeatureMap) -> f32 {
        action
            .iter()
            .filter(|(k, _)| **k >= self.state_dim && **k < self.state_dim + self.action_dim())
            .map(|(k, v)| v * self.q_value(state, k - self.state_dim))
            .sum()
    }
}
