use std::sync::mpsc::{Receiver, Sender};

use tracing::{error, info, warn};

use crate::engine::api_client::GameApi;
use crate::engine::protocol::{ClientCommand, ClientResponse};

/// Runs on its own thread and performs the blocking HTTP work for the UI.
pub struct Engine<A: GameApi> {
    api: A,
    rx: Receiver<ClientCommand>,
    tx: Sender<ClientResponse>,
}

impl<A: GameApi> Engine<A> {
    pub fn new(api: A, rx: Receiver<ClientCommand>, tx: Sender<ClientResponse>) -> Self {
        Self { api, rx, tx }
    }

    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            let resp = self.handle(cmd);
            if self.tx.send(resp).is_err() {
                break;
            }
        }
        info!("engine stopped");
    }

    pub fn handle(&self, cmd: ClientCommand) -> ClientResponse {
        let seq = cmd.seq();

        let result = match cmd {
            ClientCommand::LoadScene { .. } => self
                .api
                .scene()
                .map(|payload| ClientResponse::SceneLoaded { seq, payload }),

            ClientCommand::Choose { choice_idx, .. } => {
                info!(choice_idx, "submitting choice");
                self.api
                    .choose(choice_idx)
                    .map(|payload| ClientResponse::ChoiceResolved { seq, payload })
            }

            ClientCommand::SetName { name, .. } => {
                info!(%name, "setting player name");
                self.api
                    .set_name(&name)
                    .and_then(|_| self.api.scene())
                    .map(|payload| ClientResponse::SceneLoaded { seq, payload })
            }

            ClientCommand::Reset { .. } => {
                info!("resetting game");
                self.api
                    .reset()
                    .and_then(|_| self.api.scene())
                    .map(|payload| ClientResponse::SceneLoaded { seq, payload })
            }

            ClientCommand::SetApiKey { key, .. } => {
                let result = self.api.set_key(&key).map_err(|e| {
                    warn!(error = %e, "api key rejected");
                    e.to_string()
                });
                return ClientResponse::KeyUpdated { seq, result };
            }
        };

        result.unwrap_or_else(|e| {
            error!(seq = seq.0, error = %e, "request failed");
            ClientResponse::Failed {
                seq,
                error: e.to_string(),
            }
        })
    }
}
