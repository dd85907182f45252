mod common;

use common::{Favourite, FixedLabel, ImageEnv, ScriptedEnv};
use gym_adapter::feeder::BatchFeeder;
use gym_adapter::predictor::DecisionMaker;
use gym_adapter::replay_memory::ReplayMemory;
use gym_adapter::transition::Transition;
use gym_adapter::workspace::{self, Workspace};
use gym_adapter::{GymConfig, GymEnvironment, GymError, ModelType, ReservoirStrategy};

fn collected(
    model_type: ModelType,
    episodes: usize,
    episode_len: usize,
) -> GymEnvironment<ScriptedEnv> {
    let config = GymConfig {
        epsilon: 0.0,
        max_replay_memory_size: 1000,
        reservoir: ReservoirStrategy::GeometricSkip,
        seed: Some(5),
    };
    let mut gym = GymEnvironment::new(ScriptedEnv::new(4, 3, episode_len), config).unwrap();
    let label = FixedLabel("2");
    let favourite = Favourite(6);
    let decision_maker = match model_type {
        ModelType::DiscreteAction => DecisionMaker::Discrete(&label),
        ModelType::ParametricAction => DecisionMaker::Value(&favourite),
    };
    for _ in 0..episodes {
        gym.run_episode(model_type, decision_maker, false, false).unwrap();
    }
    gym
}

#[test]
fn sarsa_batch_publishes_next_actions() {
    let mut gym = collected(ModelType::DiscreteAction, 2, 5);
    let mut ws = Workspace::new();
    let fed = gym
        .sample_and_load_training_data(&mut ws, 6, ModelType::DiscreteAction, false)
        .unwrap();
    assert_eq!(fed, 6);
    assert_eq!(
        ws.blob_names(),
        vec![
            workspace::ACTIONS,
            workspace::NEXT_ACTIONS,
            workspace::NEXT_STATES,
            workspace::NOT_TERMINALS,
            workspace::REWARDS,
            workspace::STATES,
        ]
    );
    assert_eq!(ws.fetch_blob(workspace::STATES).unwrap().shape(), &[6, 4]);
    assert_eq!(ws.fetch_blob(workspace::ACTIONS).unwrap().shape(), &[6, 3]);
    assert_eq!(ws.fetch_blob(workspace::NEXT_ACTIONS).unwrap().shape(), &[6, 3]);
    let rewards = ws.fetch_blob(workspace::REWARDS).unwrap().as_f32().unwrap();
    assert_eq!(rewards.shape(), &[6, 1]);
    assert!(rewards.iter().all(|r| *r == 1.0));
    assert!(ws
        .fetch_blob(workspace::NOT_TERMINALS)
        .unwrap()
        .as_bool()
        .is_some());
}

#[test]
fn not_terminals_negate_the_terminal_flags() {
    // every episode has one step, so every transition is terminal
    let mut gym = collected(ModelType::DiscreteAction, 4, 1);
    let mut ws = Workspace::new();
    gym.sample_and_load_training_data(&mut ws, 4, ModelType::DiscreteAction, false)
        .unwrap();
    let not_terminals = ws.fetch_blob(workspace::NOT_TERMINALS).unwrap().as_bool().unwrap();
    assert_eq!(not_terminals.shape(), &[4, 1]);
    assert!(not_terminals.iter().all(|t| !t));
}

#[test]
fn discrete_max_q_batch_publishes_action_masks() {
    let mut gym = collected(ModelType::DiscreteAction, 3, 4);
    let mut ws = Workspace::new();
    gym.sample_and_load_training_data(&mut ws, 12, ModelType::DiscreteAction, true)
        .unwrap();
    assert!(!ws.has_blob(workspace::NEXT_ACTIONS));
    assert!(!ws.has_blob(workspace::POSSIBLE_NEXT_ACTIONS_LENGTHS));
    let pna = ws
        .fetch_blob(workspace::POSSIBLE_NEXT_ACTIONS)
        .unwrap()
        .as_f32()
        .unwrap();
    assert_eq!(pna.shape(), &[12, 3]);
    // three of the twelve transitions end an episode
    let zero_rows = pna.outer_iter().filter(|row| row.iter().all(|v| *v == 0.0)).count();
    let one_rows = pna.outer_iter().filter(|row| row.iter().all(|v| *v == 1.0)).count();
    assert_eq!((zero_rows, one_rows), (3, 9));
}

#[test]
fn parametric_max_q_batch_concatenates_rows_and_lengths() {
    let mut gym = collected(ModelType::ParametricAction, 2, 3);
    let mut ws = Workspace::new();
    gym.sample_and_load_training_data(&mut ws, 6, ModelType::ParametricAction, true)
        .unwrap();
    let lengths = ws
        .fetch_blob(workspace::POSSIBLE_NEXT_ACTIONS_LENGTHS)
        .unwrap()
        .as_i32()
        .unwrap();
    assert_eq!(lengths.shape(), &[6]);
    assert_eq!(lengths.iter().filter(|l| **l == 0).count(), 2);
    assert_eq!(lengths.iter().filter(|l| **l == 3).count(), 4);

    let pna = ws
        .fetch_blob(workspace::POSSIBLE_NEXT_ACTIONS)
        .unwrap()
        .as_f32()
        .unwrap();
    let total: i32 = lengths.iter().sum();
    assert_eq!(pna.shape(), &[total as usize, 3]);
    // every non-terminal transition contributes an identity block
    for block in pna.axis_chunks_iter(ndarray::Axis(0), 3) {
        assert_eq!(block, ndarray::Array2::<f32>::eye(3).into_dyn());
    }
}

#[test]
fn all_terminal_parametric_batch_has_no_rows() {
    let mut gym = collected(ModelType::ParametricAction, 3, 1);
    let mut ws = Workspace::new();
    gym.sample_and_load_training_data(&mut ws, 3, ModelType::ParametricAction, true)
        .unwrap();
    let pna = ws.fetch_blob(workspace::POSSIBLE_NEXT_ACTIONS).unwrap();
    assert_eq!(pna.shape(), &[0, 3]);
}

#[test]
fn oversized_request_feeds_everything_stored() {
    let mut gym = collected(ModelType::DiscreteAction, 1, 4);
    let mut ws = Workspace::new();
    let fed = gym
        .sample_and_load_training_data(&mut ws, 100, ModelType::DiscreteAction, true)
        .unwrap();
    assert_eq!(fed, 4);
    assert_eq!(ws.fetch_blob(workspace::STATES).unwrap().shape(), &[4, 4]);
}

#[test]
fn empty_memory_cannot_be_fed() {
    let mut memory: ReplayMemory<Transition> =
        ReplayMemory::new(10, ReservoirStrategy::GeometricSkip, Some(0)).unwrap();
    let mut ws = Workspace::new();
    let result =
        BatchFeeder::new(2).feed_batch(&mut memory, &mut ws, 4, ModelType::DiscreteAction, true);
    assert!(matches!(result, Err(GymError::EmptyBatch)));
    assert!(ws.blob_names().is_empty());
}

#[test]
fn image_states_are_batched_with_their_shape() {
    let config = GymConfig {
        epsilon: 0.0,
        max_replay_memory_size: 10,
        reservoir: ReservoirStrategy::GeometricSkip,
        seed: Some(1),
    };
    let mut gym = GymEnvironment::new(ImageEnv { height: 3, width: 2 }, config).unwrap();
    for _ in 0..3 {
        gym.run_episode(
            ModelType::DiscreteAction,
            DecisionMaker::Discrete(&FixedLabel("0")),
            false,
            false,
        )
        .unwrap();
    }
    let mut ws = Workspace::new();
    gym.sample_and_load_training_data(&mut ws, 2, ModelType::DiscreteAction, true)
        .unwrap();
    assert_eq!(ws.fetch_blob(workspace::STATES).unwrap().shape(), &[2, 3, 2, 3]);
    assert_eq!(ws.fetch_blob(workspace::NEXT_STATES).unwrap().shape(), &[2, 3, 2, 3]);
}
