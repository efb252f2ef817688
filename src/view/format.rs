//! Text shown to the player, built from server payloads.

use serde_json::Value;

use crate::model::lenient::value_text;
use crate::model::response::ChooseResponse;
use crate::model::scene::{Choice, Player};

pub const INVALID_SCENE_MESSAGE: &str = "当前场景无效（检查后端日志或 API Key）。";
pub const PLACEHOLDER_NAME: &str = "侠客";
pub const ERROR_PREFIX: &str = "错误：";
pub const RESET_PROMPT: &str = "确定重置游戏？";
pub const HISTORY_LIMIT: usize = 30;

pub fn choice_label(choice: &Choice) -> String {
    match choice.hint.as_deref().filter(|h| !h.is_empty()) {
        Some(hint) => format!("{} — {}", choice.action, hint),
        None => choice.action.clone(),
    }
}

pub fn player_name(player: Option<&Player>) -> String {
    player
        .and_then(|p| p.name.as_deref())
        .filter(|n| !n.is_empty())
        .unwrap_or(PLACEHOLDER_NAME)
        .to_string()
}

/// Narration for a resolved choice, falling back to the raw roll.
pub fn narration(resp: &ChooseResponse) -> String {
    match resp.resolution.narration.as_deref().filter(|n| !n.is_empty()) {
        Some(n) => n.to_string(),
        None => format!("d20={} → {}", resp.roll, resp.outcome),
    }
}

/// One-line summary of the turn that was just played.
pub fn turn_summary(resp: &ChooseResponse) -> String {
    format!(
        "回合 {}｜掷骰 {} ({}) → {} ｜ {}",
        resp.turn.saturating_sub(1),
        resp.roll,
        resp.mode,
        resp.outcome,
        resp.resolution.log_entry.as_deref().unwrap_or("")
    )
}

pub fn history_entry(entry: &Value) -> String {
    value_text(entry)
}

/// The most recent entries, newest first.
pub fn history_rows(history: &[Value]) -> Vec<String> {
    history
        .iter()
        .rev()
        .take(HISTORY_LIMIT)
        .map(history_entry)
        .collect()
}
