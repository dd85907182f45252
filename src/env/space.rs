use std::fmt;

use crate::error::GymError;

#[derive(Debug, Clone, PartialEq)]
pub enum Space {
    Discrete(usize),
    Box { shape: Vec<usize>, low: f32, high: f32 },
}

impl Space {
    pub fn vector(len: usize, low: f32, high: f32) -> Self {
        Space::Box {
            shape: vec![len],
            low,
            high,
        }
    }

    pub fn image(height: usize, width: usize, channels: usize) -> Self {
        Space::Box {
            shape: vec![height, width, channels],
            low: 0.0,
            high: 255.0,
        }
    }

    pub fn contains_action(&self, action: usize) -> bool {
        match self {
            Space::Discrete(n) => action < *n,
            Space::Box { .. } => false,
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Space::Discrete(n) => write!(f, "Discrete({})", n),
            Space::Box { shape, .. } if shape.len() == 1 => write!(f, "Box({},)", shape[0]),
            Space::Box { shape, .. } => {
                let dims: Vec<String> = shape.iter().map(|d| d.to_string()).collect();
                write!(f, "Box({})", dims.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationKind {
    Vector {
        state_dim: usize,
    },
    Image {
        height: usize,
        width: usize,
        channels: usize,
    },
}

/// Shape information the adapter needs from an environment: how many
/// discrete actions it accepts and what its observations look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvDescriptor {
    pub action_dim: usize,
    pub observation: ObservationKind,
}

impl EnvDescriptor {
    /// Only `Box` observations of rank 1 (feature vector) or rank 3 (image)
    /// paired with a non-empty `Discrete` action space are supported.
    pub fn from_spaces(observation: &Space, action: &Space) -> Result<Self, GymError> {
        let unsupported = || GymError::UnsupportedSpace {
            observation: observation.to_string(),
            action: action.to_string(),
        };
        let action_dim = match action {
            Space::Discrete(n) if *n > 0 => *n,
            _ => return Err(unsupported()),
        };
        let observation = match observation {
            Space::Box { shape, .. } => match shape.as_slice() {
                [state_dim] => ObservationKind::Vector {
                    state_dim: *state_dim,
                },
                [height, width, channels] => ObservationKind::Image {
                    height: *height,
                    width: *width,
                    channels: *channels,
                },
                _ => return Err(unsupported()),
            },
            Space::Discrete(_) => return Err(unsupported()),
        };
        Ok(Self {
            action_dim,
            observation,
        })
    }

    pub fn is_image(&self) -> bool {
        matches!(self.observation, ObservationKind::Image { .. })
    }

    pub fn state_dim(&self) -> Option<usize> {
        match self.observation {
            ObservationKind::Vector { state_dim } => Some(state_dim),
            ObservationKind::Image { .. } => None,
        }
    }

    /// Number of scalars in one flattened observation.
    pub fn state_len(&self) -> usize {
        match self.observation {
            ObservationKind::Vector { state_dim } => state_dim,
            ObservationKind::Image {
                height,
                width,
                channels,
            } => height * width * channels,
        }
    }
}
