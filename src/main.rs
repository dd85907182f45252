use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use kdam::tqdm;
use plotters::style::{BLUE, RED};
use structopt::StructOpt;
use tracing::{error, info, Level};

use gym_adapter::predictor::{DecisionMaker, LinearQ};
use gym_adapter::utils::{moving_average, plot_moving_average};
use gym_adapter::workspace::Workspace;
use gym_adapter::{GymConfig, GymEnvironment, ModelType, ReservoirStrategy};

/// Collect episodes into replay memory and feed sampled batches to a training workspace
#[derive(StructOpt, Debug)]
#[structopt(name = "gym_adapter")]
struct Cli {
    /// Registered environment id
    #[structopt(long = "env", default_value = "CartPole-v0")]
    env: String,

    /// Number of episodes to collect
    #[structopt(long = "n_episodes", short = "n", default_value = "200")]
    n_episodes: usize,

    /// Number of evaluation episodes run without exploration at the end
    #[structopt(long = "eval_episodes", default_value = "10")]
    eval_episodes: usize,

    /// Fraction of the time a random action is selected during collection
    #[structopt(long = "epsilon", default_value = "0.2")]
    epsilon: f32,

    /// Upper bound on the number of transitions kept in replay memory
    #[structopt(long = "max_replay_memory_size", default_value = "10000")]
    max_replay_memory_size: usize,

    /// Transitions fed to the workspace after every episode
    #[structopt(long = "batch_size", default_value = "64")]
    batch_size: usize,

    /// Model type, "discrete" or "parametric"
    #[structopt(long = "model_type", default_value = "discrete")]
    model_type: ModelType,

    /// Feed possible next actions (Q-learning) instead of next actions (SARSA)
    #[structopt(long = "maxq_learning")]
    maxq_learning: bool,

    /// Use the exact Algorithm L reservoir cadence
    #[structopt(long = "exact_reservoir")]
    exact_reservoir: bool,

    /// Render every step of every episode
    #[structopt(long = "render")]
    render: bool,

    /// Seed for every random source
    #[structopt(long = "seed")]
    seed: Option<u64>,

    /// Write a moving average of the episode rewards to this PNG file
    #[structopt(long = "plot", parse(from_os_str))]
    plot: Option<PathBuf>,

    /// Moving average window used on the plot
    #[structopt(long = "moving_average_window", default_value = "10")]
    moving_average_window: usize,

    /// Log every replay memory replacement and batch feed
    #[structopt(long = "verbose", short = "v")]
    verbose: bool,
}

fn main() {
    let cli: Cli = Cli::from_args();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    if let Err(e) = run(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = GymConfig {
        epsilon: cli.epsilon,
        max_replay_memory_size: cli.max_replay_memory_size,
        reservoir: if cli.exact_reservoir {
            ReservoirStrategy::AlgorithmL
        } else {
            ReservoirStrategy::GeometricSkip
        },
        seed: cli.seed,
    };
    let mut gym = GymEnvironment::from_id(&cli.env, config)?;
    let model = LinearQ::random(gym.action_dim(), gym.descriptor().state_len(), cli.seed);
    let decision_maker = match cli.model_type {
        ModelType::DiscreteAction => DecisionMaker::Discrete(&model),
        ModelType::ParametricAction => DecisionMaker::Value(&model),
    };
    let mut workspace = Workspace::new();

    println!("Collecting {} episodes on {}", cli.n_episodes, cli.env);
    let now: Instant = Instant::now();
    let mut rewards: Vec<f32> = Vec::with_capacity(cli.n_episodes);
    for _ in tqdm!(0..cli.n_episodes) {
        let reward = gym.run_episode(cli.model_type, decision_maker, false, cli.render)?;
        rewards.push(reward);
        gym.sample_and_load_training_data(
            &mut workspace,
            cli.batch_size,
            cli.model_type,
            cli.maxq_learning,
        )?;
    }
    let elapsed: std::time::Duration = now.elapsed();
    println!("Collection done!");
    println!("Time elapsed: {:.2?}", elapsed);
    info!(
        memory = gym.replay_memory().len(),
        memory_num = gym.replay_memory().memory_num(),
        blobs = ?workspace.blob_names(),
        "replay memory state"
    );

    let mut eval_rewards: Vec<f32> = Vec::with_capacity(cli.eval_episodes);
    for _ in 0..cli.eval_episodes {
        eval_rewards.push(gym.run_episode(cli.model_type, decision_maker, true, false)?);
    }
    if !eval_rewards.is_empty() {
        let avg = eval_rewards.iter().sum::<f32>() / eval_rewards.len() as f32;
        println!("Avg evaluation return: {:.3}", avg);
    }

    if let Some(path) = cli.plot {
        let ma_train = moving_average(cli.moving_average_window, &rewards);
        let ma_eval = moving_average(cli.moving_average_window, &eval_rewards);
        plot_moving_average(&path, &[ma_train, ma_eval], &[BLUE, RED])?;
        println!("Rewards plotted to {}", path.display());
    }
    Ok(())
}
