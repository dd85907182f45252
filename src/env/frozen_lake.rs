use ndarray::arr1;

use super::{EnvError, Environment, Info, Space, State, StepResult};

/// Grid world with a discrete observation (the agent's cell index).
#[derive(Debug, Clone)]
pub struct FrozenLakeEnv {
    ready: bool,
    map: Vec<Vec<u8>>,
    player_pos: usize,
    max_steps: u128,
    curr_step: u128,
}

impl FrozenLakeEnv {
    // default 4x4 map
    pub const MAP_4X4: [&'static str; 4] = ["SFFF", "FHFH", "FFFH", "HFFG"];

    pub const ACTIONS: [&'static str; 4] = ["LEFT", "DOWN", "RIGHT", "UP"];

    pub fn new(map: &[&str], max_steps: u128) -> Self {
        let map: Vec<Vec<u8>> = map.iter().map(|row| row.as_bytes().to_vec()).collect();
        Self {
            ready: false,
            map,
            player_pos: 0,
            max_steps,
            curr_step: 0,
        }
    }

    fn ncol(&self) -> usize {
        self.map[0].len()
    }

    fn nrow(&self) -> usize {
        self.map.len()
    }

    fn start_pos(&self) -> usize {
        self.map
            .iter()
            .flatten()
            .position(|c| *c == b'S')
            .unwrap_or(0)
    }

    fn observation(&self) -> State {
        arr1(&[self.player_pos as f32]).into_dyn()
    }
}

impl Default for FrozenLakeEnv {
    fn default() -> Self {
        Self::new(&Self::MAP_4X4, 100)
    }
}

impl Environment for FrozenLakeEnv {
    fn reset(&mut self) -> Result<State, EnvError> {
        self.player_pos = self.start_pos();
        self.curr_step = 0;
        self.ready = true;
        Ok(self.observation())
    }

    fn step(&mut self, action: usize) -> Result<StepResult, EnvError> {
        if !self.ready {
            return Err(EnvError::EnvNotReady);
        }
        let (row, col) = (self.player_pos / self.ncol(), self.player_pos % self.ncol());
        let (row, col) = match action {
            0 => (row, col.saturating_sub(1)),
            1 => ((row + 1).min(self.nrow() - 1), col),
            2 => (row, (col + 1).min(self.ncol() - 1)),
            3 => (row.saturating_sub(1), col),
            _ => {
                return Err(EnvError::InvalidAction {
                    action,
                    size: Self::ACTIONS.len(),
                })
            }
        };
        self.curr_step += 1;
        self.player_pos = row * self.ncol() + col;
        let letter = self.map[row][col];
        let reward = if letter == b'G' { 1.0 } else { 0.0 };
        let terminal = letter == b'G' || letter == b'H' || self.curr_step >= self.max_steps;
        if terminal {
            self.ready = false;
        }
        Ok((self.observation(), reward, terminal, Info::default()))
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.map.iter().enumerate() {
            for (j, c) in row.iter().enumerate() {
                if i * self.ncol() + j == self.player_pos {
                    out.push('@');
                } else {
                    out.push(*c as char);
                }
            }
            out.push('\n');
        }
        out
    }

    fn observation_space(&self) -> Space {
        Space::Discrete(self.nrow() * self.ncol())
    }

    fn action_space(&self) -> Space {
        Space::Discrete(Self::ACTIONS.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walking_into_a_hole_terminates() {
        let mut env = FrozenLakeEnv::default();
        env.reset().unwrap();
        // (0,0) -> (1,0) -> (1,1) which is a hole
        let (_, _, terminal, _) = env.step(1).unwrap();
        assert!(!terminal);
        let (obs, reward, terminal, _) = env.step(2).unwrap();
        assert!(terminal);
        assert_eq!(reward, 0.0);
        assert_eq!(obs[[0]], 5.0);
    }

    #[test]
    fn reaching_the_goal_pays_one() {
        let mut env = FrozenLakeEnv::default();
        env.reset().unwrap();
        let mut last = (0.0, false);
        for action in [2, 2, 1, 1, 1, 2] {
            let (_, reward, terminal, _) = env.step(action).unwrap();
            last = (reward, terminal);
        }
        assert_eq!(last, (1.0, true));
    }
}
