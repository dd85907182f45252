use ndarray::Array1;
use ndarray_rand::RandomExt;
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{EnvError, Environment, Info, Space, State, StepResult};

#[derive(Debug, Clone)]
pub struct CartPoleEnv {
    ready: bool,
    max_steps: u128,
    curr_step: u128,
    /// `[cart_position, cart_velocity, pole_angle, pole_angular_velocity]`
    state: Array1<f32>,
    dist: Uniform<f32>,
    rng: StdRng,
}

impl CartPoleEnv {
    pub const ACTIONS: [&'static str; 2] = ["PUSH TO THE LEFT", "PUSH TO THE RIGHT"];
    const GRAVITY: f32 = 9.8;
    const POLE_MASS: f32 = 0.1;
    const TOTAL_MASS: f32 = 1.1;
    const POLE_HALF_LENGTH: f32 = 0.5;
    const POLE_MASS_LENGTH: f32 = 0.05;
    const FORCE_MAG: f32 = 10.0;
    const TAU: f32 = 0.02;
    const THETA_THRESHOLD_RADIANS: f32 = 12.0 * 2.0 * std::f32::consts::PI / 360.0;
    const X_THRESHOLD: f32 = 2.4;

    pub fn new(max_steps: u128, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            ready: false,
            max_steps,
            curr_step: 0,
            state: Array1::zeros(4),
            dist: Uniform::new(-0.05, 0.05),
            rng,
        }
    }

    fn observation(&self) -> State {
        self.state.clone().into_dyn()
    }
}

impl Default for CartPoleEnv {
    fn default() -> Self {
        Self::new(200, None)
    }
}

impl Environment for CartPoleEnv {
    fn reset(&mut self) -> Result<State, EnvError> {
        self.state = Array1::random_using(4, &self.dist, &mut self.rng);
        self.ready = true;
        self.curr_step = 0;
        Ok(self.observation())
    }

    fn step(&mut self, action: usize) -> Result<StepResult, EnvError> {
        if !self.ready {
            return Err(EnvError::EnvNotReady);
        }
        if action >= Self::ACTIONS.len() {
            return Err(EnvError::InvalidAction {
                action,
                size: Self::ACTIONS.len(),
            });
        }
        self.curr_step += 1;

        let force = if action == 1 {
            Self::FORCE_MAG
        } else {
            -Self::FORCE_MAG
        };
        let (x, x_dot, theta, theta_dot) =
            (self.state[0], self.state[1], self.state[2], self.state[3]);
        let cos_theta = theta.cos();
        let sin_theta = theta.sin();

        let temp = (force + Self::POLE_MASS_LENGTH * theta_dot * theta_dot * sin_theta)
            / Self::TOTAL_MASS;
        let thetaacc = (Self::GRAVITY * sin_theta - cos_theta * temp)
            / (Self::POLE_HALF_LENGTH
                * (4.0 / 3.0 - Self::POLE_MASS * cos_theta * cos_theta / Self::TOTAL_MASS));
        let xacc = temp - Self::POLE_MASS_LENGTH * thetaacc * cos_theta / Self::TOTAL_MASS;

        self.state[0] = x + Self::TAU * x_dot;
        self.state[1] = x_dot + Self::TAU * xacc;
        self.state[2] = theta + Self::TAU * theta_dot;
        self.state[3] = theta_dot + Self::TAU * thetaacc;

        let fell = self.state[0].abs() > Self::X_THRESHOLD
            || self.state[2].abs() > Self::THETA_THRESHOLD_RADIANS;
        let truncated = self.curr_step >= self.max_steps;
        let terminal = fell || truncated;
        if terminal {
            self.ready = false;
        }

        let mut info = Info::default();
        info.insert("elapsed_steps".to_string(), self.curr_step as f32);
        Ok((self.observation(), 1.0, terminal, info))
    }

    fn render(&self) -> String {
        const WIDTH: usize = 41;
        let span = 2.0 * Self::X_THRESHOLD;
        let pos = ((self.state[0] + Self::X_THRESHOLD) / span * (WIDTH - 1) as f32)
            .round()
            .clamp(0.0, (WIDTH - 1) as f32) as usize;
        let mut track: Vec<char> = vec!['-'; WIDTH];
        track[pos] = if self.state[2] > 0.0 { '/' } else { '\\' };
        format!(
            "{} x={:+.3} theta={:+.3}",
            track.into_iter().collect::<String>(),
            self.state[0],
            self.state[2]
        )
    }

    fn observation_space(&self) -> Space {
        Space::vector(4, f32::NEG_INFINITY, f32::INFINITY)
    }

    fn action_space(&self) -> Space {
        Space::Discrete(Self::ACTIONS.len())
    }
}
