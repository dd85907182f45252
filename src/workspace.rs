use fxhash::FxHashMap;
use ndarray::ArrayD;

pub const STATES: &str = "states";
pub const ACTIONS: &str = "actions";
pub const REWARDS: &str = "rewards";
pub const NEXT_STATES: &str = "next_states";
pub const NEXT_ACTIONS: &str = "next_actions";
pub const NOT_TERMINALS: &str = "not_terminals";
pub const POSSIBLE_NEXT_ACTIONS: &str = "possible_next_actions";
pub const POSSIBLE_NEXT_ACTIONS_LENGTHS: &str = "possible_next_actions_lengths";

/// A typed tensor handed to the training computation.
#[derive(Debug, Clone, PartialEq)]
pub enum Blob {
    Float32(ArrayD<f32>),
    Int32(ArrayD<i32>),
    Bool(ArrayD<bool>),
}

impl Blob {
    pub fn shape(&self) -> &[usize] {
        match self {
            Blob::Float32(a) => a.shape(),
            Blob::Int32(a) => a.shape(),
            Blob::Bool(a) => a.shape(),
        }
    }

    pub fn as_f32(&self) -> Option<&ArrayD<f32>> {
        match self {
            Blob::Float32(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<&ArrayD<i32>> {
        match self {
            Blob::Int32(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<&ArrayD<bool>> {
        match self {
            Blob::Bool(a) => Some(a),
            _ => None,
        }
    }
}

/// Named-input store of the external training computation.
pub trait TrainingWorkspace {
    fn feed_blob(&mut self, name: &str, blob: Blob);
}

/// In-memory workspace, later feeds overwrite earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    blobs: FxHashMap<String, Blob>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch_blob(&self, name: &str) -> Option<&Blob> {
        self.blobs.get(name)
    }

    pub fn has_blob(&self, name: &str) -> bool {
        self.blobs.contains_key(name)
    }

    pub fn blob_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.blobs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn reset(&mut self) {
        self.blobs.clear();
    }
}

impl TrainingWorkspace for Workspace {
    fn feed_blob(&mut self, name: &str, blob: Blob) {
        self.blobs.insert(name.to_string(), blob);
    }
}
