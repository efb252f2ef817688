use std::time::Instant;

use serde_json::{Map, Value};

use crate::model::scene::{Player, Scene};
use crate::view::typewriter::{TextTarget, TypingEffects};

/// One interactive control in the choice list.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceControl {
    pub index: usize,
    pub label: String,
}

/// Everything the window shows. The egui layer draws this and nothing else.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub typing: TypingEffects,

    pub choices: Vec<ChoiceControl>,
    pub choices_enabled: bool,

    /// Contents of the editable name field.
    pub player_name: String,

    /// Log rows, top first.
    pub log: Vec<String>,

    /// Blocking message the player has to dismiss.
    pub alert: Option<String>,

    /// Non-blocking line for failures the game itself did not report.
    pub status: Option<String>,

    pub scene: Option<Scene>,
    pub player: Option<Player>,
    pub turn: Option<i64>,
    pub context: Map<String, Value>,
}

impl ViewState {
    pub fn scene_text(&self, now: Instant) -> String {
        self.typing.text(TextTarget::SceneText, now)
    }

    pub fn narration(&self, now: Instant) -> String {
        self.typing.text(TextTarget::Narration, now)
    }

    #[cfg(test)]
    pub fn choice_labels(&self) -> Vec<&str> {
        self.choices.iter().map(|c| c.label.as_str()).collect()
    }
}
