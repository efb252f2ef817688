use serde::{Deserialize, Serialize};

use crate::model::lenient;

/// A unit of narrative content plus the actions offered to the player.
///
/// Only `scene` and `choices` drive rendering; the remaining fields are
/// informational and shown in the scene details tab when the server sends them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub scene: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub choices: Vec<Choice>,

    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub scene_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::texts")]
    pub env_tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::texts")]
    pub npcs: Vec<String>,
    #[serde(default, deserialize_with = "lenient::texts")]
    pub threats: Vec<String>,
    #[serde(default, deserialize_with = "lenient::texts")]
    pub clues: Vec<String>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub loot: Vec<Item>,
}

impl Scene {
    /// Narrative text, if the scene carries any.
    pub fn text(&self) -> Option<&str> {
        self.scene.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default, deserialize_with = "lenient::text")]
    pub action: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub hint: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub check_tag: Option<String>,
    #[serde(default, deserialize_with = "lenient::texts")]
    pub choice_tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub leads: Option<String>,
}

/// Loot on the ground or an entry in the player's inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::texts")]
    pub effect_tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub usage_notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub identity: Option<String>,
    #[serde(default, deserialize_with = "lenient::texts")]
    pub traits: Vec<String>,
    #[serde(default, deserialize_with = "lenient::texts")]
    pub conditions: Vec<String>,
    #[serde(default, deserialize_with = "lenient::items")]
    pub inventory: Vec<Item>,
}
