use ndarray::{Array1, Array2};

use crate::config::ModelType;
use crate::env::State;

/// Valid actions from `next_state`, in the layout the model type expects.
#[derive(Debug, Clone, PartialEq)]
pub enum PossibleNextActions {
    /// One entry per discrete action, 1.0 when the action is available.
    Mask(Array1<f32>),
    /// One one-hot row per available action.
    Enumerated(Array2<f32>),
}

impl PossibleNextActions {
    /// Returns the representation together with its length.
    ///
    /// Discrete models always get a mask of `action_dim` entries (all zeros
    /// once the episode ended). Parametric models enumerate every action as
    /// an identity row, or nothing at all on terminal steps.
    pub fn for_step(model_type: ModelType, action_dim: usize, terminal: bool) -> (Self, usize) {
        match model_type {
            ModelType::DiscreteAction => {
                let fill = if terminal { 0.0 } else { 1.0 };
                (
                    PossibleNextActions::Mask(Array1::from_elem(action_dim, fill)),
                    action_dim,
                )
            }
            ModelType::ParametricAction if terminal => (
                PossibleNextActions::Enumerated(Array2::zeros((0, action_dim))),
                0,
            ),
            ModelType::ParametricAction => (
                PossibleNextActions::Enumerated(Array2::eye(action_dim)),
                action_dim,
            ),
        }
    }

    pub fn rows(&self) -> usize {
        match self {
            PossibleNextActions::Mask(_) => 1,
            PossibleNextActions::Enumerated(rows) => rows.nrows(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: State,
    pub action: Array1<f32>,
    pub reward: f32,
    pub next_state: State,
    pub next_action: Array1<f32>,
    pub terminal: bool,
    pub possible_next_actions: PossibleNextActions,
    pub possible_next_actions_lengths: usize,
}

/// A sampled batch unzipped into one column per transition field.
#[derive(Debug, Default)]
pub struct TransitionColumns<'a> {
    pub states: Vec<&'a State>,
    pub actions: Vec<&'a Array1<f32>>,
    pub rewards: Vec<f32>,
    pub next_states: Vec<&'a State>,
    pub next_actions: Vec<&'a Array1<f32>>,
    pub terminals: Vec<bool>,
    pub possible_next_actions: Vec<&'a PossibleNextActions>,
    pub possible_next_actions_lengths: Vec<usize>,
}

impl<'a> TransitionColumns<'a> {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<'a> FromIterator<&'a Transition> for TransitionColumns<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Transition>>(iter: I) -> Self {
        let mut cols = TransitionColumns::default();
        for t in iter {
            cols.states.push(&t.state);
            cols.actions.push(&t.action);
            cols.rewards.push(t.reward);
            cols.next_states.push(&t.next_state);
            cols.next_actions.push(&t.next_action);
            cols.terminals.push(t.terminal);
            cols.possible_next_actions.push(&t.possible_next_actions);
            cols.possible_next_actions_lengths
                .push(t.possible_next_actions_lengths);
        }
        cols
    }
}
