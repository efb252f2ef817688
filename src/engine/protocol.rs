use crate::model::response::{ChooseResponse, SceneResponse};

/// Monotonic tag attached to every command so late answers can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestSeq(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    LoadScene { seq: RequestSeq },
    Choose { seq: RequestSeq, choice_idx: usize },
    /// Submit the name, then reload the scene.
    SetName { seq: RequestSeq, name: String },
    /// Reset the game, then reload the scene.
    Reset { seq: RequestSeq },
    SetApiKey { seq: RequestSeq, key: String },
}

impl ClientCommand {
    pub fn seq(&self) -> RequestSeq {
        match self {
            ClientCommand::LoadScene { seq }
            | ClientCommand::Choose { seq, .. }
            | ClientCommand::SetName { seq, .. }
            | ClientCommand::Reset { seq }
            | ClientCommand::SetApiKey { seq, .. } => *seq,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientResponse {
    SceneLoaded {
        seq: RequestSeq,
        payload: SceneResponse,
    },
    ChoiceResolved {
        seq: RequestSeq,
        payload: ChooseResponse,
    },
    KeyUpdated {
        seq: RequestSeq,
        result: Result<(), String>,
    },
    Failed {
        seq: RequestSeq,
        error: String,
    },
}
