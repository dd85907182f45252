use tracing::debug;

use crate::config::ModelType;
use crate::env::Environment;
use crate::error::GymError;
use crate::gym::GymEnvironment;
use crate::predictor::DecisionMaker;
use crate::transition::{PossibleNextActions, Transition};
use crate::utils::argmax;

impl<E: Environment> GymEnvironment<E> {
    /// Runs one episode to termination, storing every transition in replay
    /// memory, and returns the sum of rewards.
    ///
    /// The action for the following step is chosen as soon as the next
    /// state is known and stored with the transition, so SARSA-style
    /// training sees the action that was actually taken.
    pub fn run_episode(
        &mut self,
        model_type: ModelType,
        decision_maker: DecisionMaker<'_>,
        test: bool,
        render: bool,
    ) -> Result<f32, GymError> {
        let action_dim = self.descriptor.action_dim;
        let mut terminal = false;
        let mut next_state = self.env.reset()?;
        let mut next_action = self.policy(decision_maker, &next_state, test)?;
        let mut reward_sum: f32 = 0.0;
        let mut steps: usize = 0;

        while !terminal {
            let state = next_state;
            let action = next_action;
            let action_index = argmax(action.iter());

            if render {
                println!("{}", self.env.render());
            }

            let (observed, reward, done, _info) = self.env.step(action_index)?;
            next_state = observed;
            terminal = done;
            next_action = self.policy(decision_maker, &next_state, test)?;
            reward_sum += reward;
            steps += 1;

            let (possible_next_actions, possible_next_actions_lengths) =
                PossibleNextActions::for_step(model_type, action_dim, terminal);

            self.insert_into_memory(Transition {
                state,
                action,
                reward,
                next_state: next_state.clone(),
                next_action: next_action.clone(),
                terminal,
                possible_next_actions,
                possible_next_actions_lengths,
            });
        }

        debug!(
            steps,
            reward = reward_sum,
            memory = self.replay_memory.len(),
            memory_num = self.replay_memory.memory_num(),
            "episode finished"
        );
        Ok(reward_sum)
    }
}
