use ndarray::Array1;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::env::{EnvDescriptor, State};
use crate::error::GymError;
use crate::normalization::action_feature_keys;
use crate::predictor::{state_features, DecisionMaker, FeatureMap};

/// Epsilon-greedy selection on top of an external predictor.
#[derive(Debug, Clone)]
pub struct EpsilonGreedyPolicy {
    pub epsilon: f32,
    action_dim: usize,
    action_labels: Vec<String>,
    // `None` for image observations, which have no action key offset
    action_keys: Option<Vec<usize>>,
    exploration_decider: Uniform<f32>,
    rand_action_selecter: Uniform<usize>,
    rng: StdRng,
}

impl EpsilonGreedyPolicy {
    pub fn new(epsilon: f32, descriptor: &EnvDescriptor, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let action_dim = descriptor.action_dim;
        Self {
            epsilon,
            action_dim,
            action_labels: (0..action_dim).map(|a| a.to_string()).collect(),
            action_keys: descriptor
                .state_dim()
                .map(|state_dim| action_feature_keys(state_dim, action_dim)),
            exploration_decider: Uniform::new(0.0, 1.0),
            rand_action_selecter: Uniform::new(0, action_dim),
            rng,
        }
    }

    pub fn action_labels(&self) -> &[String] {
        &self.action_labels
    }

    fn should_explore(&mut self) -> bool {
        self.epsilon != 0.0 && self.exploration_decider.sample(&mut self.rng) < self.epsilon
    }

    /// Picks an action for `state` and returns it one-hot encoded.
    ///
    /// With `explore` set, a uniformly random action is taken with
    /// probability `epsilon`; otherwise `decision_maker` decides.
    pub fn choose_action(
        &mut self,
        decision_maker: DecisionMaker<'_>,
        state: &State,
        explore: bool,
    ) -> Result<Array1<f32>, GymError> {
        let action_idx = if explore && self.should_explore() {
            self.rand_action_selecter.sample(&mut self.rng)
        } else {
            let features = state_features(state);
            match decision_maker {
                DecisionMaker::Discrete(predictor) => {
                    let label = predictor.decide(&features);
                    self.action_labels
                        .iter()
                        .position(|l| *l == label)
                        .ok_or(GymError::UnknownActionLabel(label))?
                }
                DecisionMaker::Value(predictor) => {
                    let keys = self.action_keys.as_ref().ok_or(GymError::UnsupportedPredictor(
                        "value estimators need vector observations to key actions",
                    ))?;
                    let mut best: Option<(usize, f32)> = None;
                    for (idx, key) in keys.iter().enumerate() {
                        let action: FeatureMap = [(*key, 1.0)].into_iter().collect();
                        let score = predictor.estimate(&features, &action);
                        // strict comparison, ties keep the earlier action
                        match best {
                            Some((_, best_score)) if best_score < score => best = Some((idx, score)),
                            None => best = Some((idx, score)),
                            _ => {}
                        }
                    }
                    best.map(|(idx, _)| idx).unwrap_or(0)
                }
            }
        };
        let mut action = Array1::zeros(self.action_dim);
        action[action_idx] = 1.0;
        Ok(action)
    }
}
