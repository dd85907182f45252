use indexmap::IndexMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureType {
    Binary,
    Probability,
    Continuous,
    Enum,
    Quantile,
}

/// How the training graph should normalize one input feature.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationParameters {
    pub feature_type: FeatureType,
    pub boxcox_lambda: Option<f32>,
    pub boxcox_shift: f32,
    pub mean: f32,
    pub stddev: f32,
    pub possible_values: Option<Vec<i64>>,
    pub quantiles: Option<Vec<f32>>,
}

impl Default for NormalizationParameters {
    /// Identity normalization of a continuous feature.
    fn default() -> Self {
        Self {
            feature_type: FeatureType::Continuous,
            boxcox_lambda: None,
            boxcox_shift: 0.0,
            mean: 0.0,
            stddev: 1.0,
            possible_values: None,
            quantiles: None,
        }
    }
}

pub type Normalization = IndexMap<usize, NormalizationParameters>;

pub fn default_normalizer(features: impl IntoIterator<Item = usize>) -> Normalization {
    features
        .into_iter()
        .map(|f| (f, NormalizationParameters::default()))
        .collect()
}

/// Feature keys of the candidate actions, placed right after the state
/// features, in ascending order.
pub fn action_feature_keys(state_dim: usize, action_dim: usize) -> Vec<usize> {
    let mut keys: Vec<usize> = default_normalizer(state_dim..state_dim + action_dim)
        .keys()
        .copied()
        .collect();
    keys.sort_unstable();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_normalizer_keeps_feature_order() {
        let norm = default_normalizer([3, 1, 2]);
        let keys: Vec<usize> = norm.keys().copied().collect();
        assert_eq!(keys, vec![3, 1, 2]);
        assert!(norm.values().all(|p| *p == NormalizationParameters::default()));
    }

    #[test]
    fn action_keys_follow_state_features() {
        assert_eq!(action_feature_keys(4, 2), vec![4, 5]);
        assert!(action_feature_keys(4, 0).is_empty());
    }
}
