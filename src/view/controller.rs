use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::engine::protocol::{ClientCommand, ClientResponse, RequestSeq};
use crate::model::response::ChooseResponse;
use crate::model::scene::{Player, Scene};
use crate::view::format::{self, ERROR_PREFIX, INVALID_SCENE_MESSAGE, PLACEHOLDER_NAME};
use crate::view::state::{ChoiceControl, ViewState};
use crate::view::typewriter::TextTarget;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub scene_typing: Duration,
    pub narration_typing: Duration,
    pub next_scene_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            scene_typing: Duration::from_millis(16),
            narration_typing: Duration::from_millis(12),
            next_scene_delay: Duration::from_millis(900),
        }
    }
}

/// A resolved choice whose next scene is shown once `due` passes. Only a
/// scene that actually arrives afterwards cancels it.
#[derive(Debug, Clone)]
struct PendingTransition {
    due: Instant,
    payload: ChooseResponse,
}

/// Owns the view state and turns user intents and server answers into
/// changes to it.
///
/// Every command is stamped with a fresh [`RequestSeq`]. Answers to anything
/// older than the latest view-changing request are dropped, so a slow reply
/// can never overwrite a newer scene.
pub struct ViewController {
    view: ViewState,
    timing: Timing,
    last_seq: RequestSeq,
    latest_view_seq: RequestSeq,
    pending: Option<PendingTransition>,
}

impl ViewController {
    pub fn new(timing: Timing) -> Self {
        Self {
            view: ViewState {
                player_name: PLACEHOLDER_NAME.to_string(),
                ..Default::default()
            },
            timing,
            last_seq: RequestSeq::default(),
            latest_view_seq: RequestSeq::default(),
            pending: None,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn player_name_mut(&mut self) -> &mut String {
        &mut self.view.player_name
    }

    pub fn set_timing(&mut self, timing: Timing) {
        self.timing = timing;
    }

    fn issue(&mut self) -> RequestSeq {
        self.last_seq = RequestSeq(self.last_seq.0 + 1);
        self.last_seq
    }

    fn issue_view(&mut self) -> RequestSeq {
        let seq = self.issue();
        self.latest_view_seq = seq;
        seq
    }

    fn is_stale(&self, seq: RequestSeq) -> bool {
        seq < self.latest_view_seq
    }

    /* =========================
       User intents
       ========================= */

    pub fn load_scene(&mut self) -> ClientCommand {
        ClientCommand::LoadScene {
            seq: self.issue_view(),
        }
    }

    /// Locks the choice list and builds the submission. Returns `None` while
    /// the list is locked or for an index that is not on screen.
    pub fn choose(&mut self, choice_idx: usize) -> Option<ClientCommand> {
        if !self.view.choices_enabled {
            debug!(choice_idx, "choice ignored while controls are disabled");
            return None;
        }
        if !self.view.choices.iter().any(|c| c.index == choice_idx) {
            warn!(choice_idx, "choice is not on screen");
            return None;
        }

        self.view.choices_enabled = false;
        Some(ClientCommand::Choose {
            seq: self.issue_view(),
            choice_idx,
        })
    }

    pub fn set_name(&mut self) -> ClientCommand {
        let name = if self.view.player_name.is_empty() {
            PLACEHOLDER_NAME.to_string()
        } else {
            self.view.player_name.clone()
        };

        ClientCommand::SetName {
            seq: self.issue_view(),
            name,
        }
    }

    /// Callers confirm with the player first.
    pub fn reset(&mut self) -> ClientCommand {
        ClientCommand::Reset {
            seq: self.issue_view(),
        }
    }

    pub fn set_api_key(&mut self, key: &str) -> Option<ClientCommand> {
        let key = key.trim();
        if key.is_empty() {
            self.view.status = Some("API key is empty".to_string());
            return None;
        }

        Some(ClientCommand::SetApiKey {
            seq: self.issue(),
            key: key.to_string(),
        })
    }

    pub fn dismiss_alert(&mut self) {
        self.view.alert = None;
    }

    /* =========================
       Server answers
       ========================= */

    pub fn apply(&mut self, resp: ClientResponse, now: Instant) {
        match resp {
            ClientResponse::KeyUpdated { result, .. } => {
                self.view.status = Some(match result {
                    Ok(()) => "API key saved".to_string(),
                    Err(e) => format!("API key not saved: {e}"),
                });
            }

            ClientResponse::SceneLoaded { seq, .. }
            | ClientResponse::ChoiceResolved { seq, .. }
            | ClientResponse::Failed { seq, .. }
                if self.is_stale(seq) =>
            {
                debug!(seq = seq.0, latest = self.latest_view_seq.0, "dropping stale response");
            }

            ClientResponse::SceneLoaded { payload, .. } => {
                self.pending = None;
                self.view.status = None;
                self.view.context = payload.context;
                self.render(payload.scene, payload.player, payload.turn, &payload.history, now);
            }

            ClientResponse::ChoiceResolved { payload, .. } => {
                self.resolve_choice(payload, now);
            }

            ClientResponse::Failed { error, .. } => {
                self.view.status = Some(error);
                // The choices on screen are already answered when a
                // transition is due; it re-enables them itself.
                if self.pending.is_none() {
                    self.view.choices_enabled = true;
                }
            }
        }
    }

    fn resolve_choice(&mut self, payload: ChooseResponse, now: Instant) {
        if let Some(error) = payload.error.as_deref().filter(|e| !e.is_empty()) {
            info!(%error, "server rejected choice");
            self.view.alert = Some(format!("{ERROR_PREFIX}{error}"));
            self.view.choices_enabled = true;
            return;
        }

        let narration = format::narration(&payload);
        self.view
            .typing
            .reveal(TextTarget::Narration, &narration, self.timing.narration_typing, now);

        self.view.log.insert(0, format::turn_summary(&payload));

        self.pending = Some(PendingTransition {
            due: now + self.timing.next_scene_delay,
            payload,
        });
    }

    /// Runs the delayed scene transition once it is due.
    pub fn tick(&mut self, now: Instant) {
        let due = matches!(&self.pending, Some(p) if p.due <= now);
        if !due {
            return;
        }
        let Some(pending) = self.pending.take() else {
            return;
        };

        let p = pending.payload;
        self.render(p.next_scene, p.player, Some(p.turn), &p.history, now);
        self.view.choices_enabled = true;
    }

    /// Whether something on screen is still changing over time.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.pending.is_some() || self.view.typing.is_animating(now)
    }

    /* =========================
       Scene rendering
       ========================= */

    pub fn render(
        &mut self,
        scene: Option<Scene>,
        player: Option<Player>,
        turn: Option<i64>,
        history: &[Value],
        now: Instant,
    ) {
        let Some(scene) = scene.filter(|s| s.text().is_some()) else {
            warn!("scene payload has no text");
            self.view.typing.set(TextTarget::SceneText, INVALID_SCENE_MESSAGE, now);
            self.view.choices.clear();
            self.view.scene = None;
            return;
        };

        let text = scene.text().unwrap_or_default().to_string();
        self.view
            .typing
            .reveal(TextTarget::SceneText, &text, self.timing.scene_typing, now);
        self.view.typing.clear(TextTarget::Narration);

        self.view.choices = scene
            .choices
            .iter()
            .enumerate()
            .map(|(index, choice)| ChoiceControl {
                index,
                label: format::choice_label(choice),
            })
            .collect();
        self.view.choices_enabled = true;

        self.view.player_name = format::player_name(player.as_ref());
        self.view.log = format::history_rows(history);

        self.view.scene = Some(scene);
        self.view.player = player;
        self.view.turn = turn;
    }
}
