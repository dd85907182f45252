use ndarray::{concatenate, stack, Array1, Array2, ArrayD, ArrayView2, ArrayViewD, Axis};
use tracing::debug;

use crate::config::ModelType;
use crate::env::{Environment, State};
use crate::error::GymError;
use crate::gym::GymEnvironment;
use crate::replay_memory::ReplayMemory;
use crate::transition::{PossibleNextActions, Transition};
use crate::workspace::{
    Blob, TrainingWorkspace, ACTIONS, NEXT_ACTIONS, NEXT_STATES, NOT_TERMINALS,
    POSSIBLE_NEXT_ACTIONS, POSSIBLE_NEXT_ACTIONS_LENGTHS, REWARDS, STATES,
};

/// Samples replay memory and publishes the batch as the training graph's
/// named inputs.
#[derive(Debug, Clone, Copy)]
pub struct BatchFeeder {
    action_dim: usize,
}

impl BatchFeeder {
    pub fn new(action_dim: usize) -> Self {
        Self { action_dim }
    }

    /// Feeds up to `num_samples` transitions and returns how many were fed.
    ///
    /// `use_max_q` selects Q-learning inputs (possible next actions) over
    /// SARSA inputs (the next action actually taken).
    pub fn feed_batch<W: TrainingWorkspace>(
        &self,
        memory: &mut ReplayMemory<Transition>,
        workspace: &mut W,
        num_samples: usize,
        model_type: ModelType,
        use_max_q: bool,
    ) -> Result<usize, GymError> {
        let cols = memory.sample_columns(num_samples);
        if cols.is_empty() {
            return Err(GymError::EmptyBatch);
        }
        let batch = cols.len();

        let states = stack_states(&cols.states)?;
        let actions = stack_vectors(&cols.actions)?;
        let rewards = Array2::from_shape_vec((batch, 1), cols.rewards.clone())?;
        let next_states = stack_states(&cols.next_states)?;
        let not_terminals = Array2::from_shape_vec(
            (batch, 1),
            cols.terminals.iter().map(|t| !t).collect::<Vec<bool>>(),
        )?;

        workspace.feed_blob(STATES, Blob::Float32(states));
        workspace.feed_blob(ACTIONS, Blob::Float32(actions.into_dyn()));
        workspace.feed_blob(REWARDS, Blob::Float32(rewards.into_dyn()));
        workspace.feed_blob(NEXT_STATES, Blob::Float32(next_states));
        workspace.feed_blob(NOT_TERMINALS, Blob::Bool(not_terminals.into_dyn()));

        // SARSA does not need possible next actions
        if !use_max_q {
            let next_actions = stack_vectors(&cols.next_actions)?;
            workspace.feed_blob(NEXT_ACTIONS, Blob::Float32(next_actions.into_dyn()));
            debug!(batch, "fed sarsa batch");
            return Ok(batch);
        }

        match model_type {
            ModelType::DiscreteAction => {
                let masks = cols
                    .possible_next_actions
                    .iter()
                    .map(|pna| match pna {
                        PossibleNextActions::Mask(mask) => Ok(mask.view()),
                        PossibleNextActions::Enumerated(_) => Err(GymError::InvalidConfig(
                            "discrete model fed with enumerated possible next actions".to_string(),
                        )),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let possible_next_actions = stack(Axis(0), &masks)?;
                workspace.feed_blob(
                    POSSIBLE_NEXT_ACTIONS,
                    Blob::Float32(possible_next_actions.into_dyn()),
                );
            }
            ModelType::ParametricAction => {
                let mut rows: Vec<ArrayView2<f32>> = Vec::with_capacity(batch);
                for pna in cols.possible_next_actions.iter() {
                    match pna {
                        PossibleNextActions::Enumerated(matrix) => rows.push(matrix.view()),
                        PossibleNextActions::Mask(_) => {
                            return Err(GymError::InvalidConfig(
                                "parametric model fed with masked possible next actions"
                                    .to_string(),
                            ))
                        }
                    }
                }
                let possible_next_actions = if rows.is_empty() {
                    Array2::zeros((0, self.action_dim))
                } else {
                    concatenate(Axis(0), &rows)?
                };
                let lengths: Array1<i32> = cols
                    .possible_next_actions_lengths
                    .iter()
                    .map(|l| *l as i32)
                    .collect();
                workspace.feed_blob(
                    POSSIBLE_NEXT_ACTIONS_LENGTHS,
                    Blob::Int32(lengths.into_dyn()),
                );
                workspace.feed_blob(
                    POSSIBLE_NEXT_ACTIONS,
                    Blob::Float32(possible_next_actions.into_dyn()),
                );
            }
        }
        debug!(batch, model_type = %model_type, "fed max-q batch");
        Ok(batch)
    }
}

fn stack_states(states: &[&State]) -> Result<ArrayD<f32>, GymError> {
    let views: Vec<ArrayViewD<f32>> = states.iter().map(|s| s.view()).collect();
    Ok(stack(Axis(0), &views)?)
}

fn stack_vectors(vectors: &[&Array1<f32>]) -> Result<Array2<f32>, GymError> {
    let views: Vec<_> = vectors.iter().map(|v| v.view()).collect();
    Ok(stack(Axis(0), &views)?)
}

impl<E: Environment> GymEnvironment<E> {
    /// Samples `num_samples` transitions and loads them into `workspace`.
    pub fn sample_and_load_training_data<W: TrainingWorkspace>(
        &mut self,
        workspace: &mut W,
        num_samples: usize,
        model_type: ModelType,
        maxq_learning: bool,
    ) -> Result<usize, GymError> {
        BatchFeeder::new(self.descriptor.action_dim).feed_batch(
            &mut self.replay_memory,
            workspace,
            num_samples,
            model_type,
            maxq_learning,
        )
    }
}
