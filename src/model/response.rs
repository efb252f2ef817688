use serde::Deserialize;
use serde_json::{Map, Value};

use crate::model::lenient;
use crate::model::scene::{Player, Scene};

/// Body of `GET /api/scene`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SceneResponse {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub scene: Option<Scene>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub player: Option<Player>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub turn: Option<i64>,
    /// Log entries, oldest first. Entries are usually strings but are kept
    /// as raw JSON so anything the server sends can still be displayed.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub history: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub context: Map<String, Value>,
}

/// The server's computed outcome of a chosen action.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Resolution {
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub narration: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub log_entry: Option<String>,
}

/// Body of `POST /api/choose`. On failure the server only sends `error`,
/// so everything else is defaulted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChooseResponse {
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub error: Option<String>,
    #[serde(default)]
    pub roll: i64,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub outcome: String,
    #[serde(default)]
    pub turn: i64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub resolution: Resolution,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub next_scene: Option<Scene>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub player: Option<Player>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub history: Vec<Value>,
}

/// Body of `POST /api/set_key`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_only_choose_body_decodes() {
        let resp: ChooseResponse = serde_json::from_value(json!({"error": "无效选项"})).unwrap();
        assert_eq!(resp.error.as_deref(), Some("无效选项"));
        assert!(resp.next_scene.is_none());
        assert_eq!(resp.resolution, Resolution::default());
    }

    #[test]
    fn resolved_choose_body_decodes() {
        let resp: ChooseResponse = serde_json::from_value(json!({
            "roll": 15,
            "mode": "attack",
            "outcome": "hit",
            "turn": 2,
            "resolution": {"narration": "你击中了！", "log_entry": "回合1：命中"},
            "next_scene": {"scene": "下一幕", "choices": []},
            "player": {"name": "侠客"},
            "history": ["回合1：命中"]
        }))
        .unwrap();

        assert!(resp.error.is_none());
        assert_eq!(resp.roll, 15);
        assert_eq!(resp.resolution.narration.as_deref(), Some("你击中了！"));
        assert_eq!(resp.next_scene.unwrap().text(), Some("下一幕"));
        assert_eq!(resp.history, vec![json!("回合1：命中")]);
    }

    #[test]
    fn loosely_typed_scene_body_decodes() {
        let resp: SceneResponse = serde_json::from_value(json!({
            "scene": {
                "scene": "旧驿",
                "npcs": [{"name": "书生"}],
                "threats": "黑衣人潜踪",
                "loot": [{"name": "竹筒残简", "effect_tags": null}, "铜钱", 5],
                "choices": [{"action": "闲叙", "hint": null, "choice_tags": [1, "social"]}]
            },
            "player": {
                "name": "浪人",
                "traits": null,
                "inventory": [{"name": "短刀"}, {"name": "竹简", "usage_notes": null}]
            },
            "turn": 2,
            "history": ["启程"],
            "context": {"seed": ["x"]}
        }))
        .unwrap();

        let scene = resp.scene.unwrap();
        assert_eq!(scene.text(), Some("旧驿"));
        assert_eq!(scene.npcs, vec!["书生"]);
        assert_eq!(scene.threats, vec!["黑衣人潜踪"]);
        assert_eq!(
            scene.loot.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
            vec!["竹筒残简", "铜钱"]
        );
        assert_eq!(scene.choices[0].hint, None);
        assert_eq!(scene.choices[0].choice_tags, vec!["1", "social"]);

        let player = resp.player.unwrap();
        assert!(player.traits.is_empty());
        assert_eq!(player.inventory[1].usage_notes, "");
    }

    #[test]
    fn non_string_log_entry_still_resolves() {
        let resp: ChooseResponse = serde_json::from_value(json!({
            "roll": 9,
            "mode": "normal",
            "outcome": "部分成功",
            "turn": 3,
            "resolution": {"narration": null, "log_entry": {"check": "social"}},
            "next_scene": {"scene": "荒祠", "choices": []},
            "player": {"name": "浪人", "conditions": "疲惫"},
            "history": [{"check": "social"}]
        }))
        .unwrap();

        assert_eq!(resp.resolution.narration, None);
        assert_eq!(resp.resolution.log_entry.as_deref(), Some(r#"{"check":"social"}"#));
        assert_eq!(resp.player.unwrap().conditions, vec!["疲惫"]);
        assert_eq!(resp.next_scene.unwrap().text(), Some("荒祠"));
    }

    #[test]
    fn malformed_nested_objects_fall_back() {
        let resp: ChooseResponse = serde_json::from_value(json!({
            "roll": 3,
            "outcome": "失败",
            "turn": 2,
            "resolution": "oops",
            "next_scene": {"scene": 42},
            "player": null
        }))
        .unwrap();

        assert_eq!(resp.resolution, Resolution::default());
        assert_eq!(resp.next_scene.and_then(|s| s.scene), None);
        assert!(resp.player.is_none());
    }

    #[test]
    fn scene_body_keeps_non_string_history() {
        let resp: SceneResponse = serde_json::from_value(json!({
            "scene": null,
            "player": {"name": "浪人"},
            "turn": 3,
            "history": ["a", null, 7],
            "context": {"seed": "雾锁山道上的旧驿"}
        }))
        .unwrap();

        assert!(resp.scene.is_none());
        assert_eq!(resp.history.len(), 3);
        assert_eq!(resp.context.get("seed"), Some(&json!("雾锁山道上的旧驿")));
    }
}
