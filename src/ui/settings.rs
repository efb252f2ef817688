use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::engine::api_client::DEFAULT_SERVER_URL;
use crate::view::controller::Timing;

pub const SERVER_URL_ENV: &str = "NARRATIVE_SERVER_URL";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClientSettings {
    pub ui_scale: f32,
    pub server_url: String,

    pub scene_typing_ms: u64,
    pub narration_typing_ms: u64,
    pub next_scene_delay_ms: u64,

    /// Font file with CJK glyphs; egui's bundled fonts have none.
    pub cjk_font_path: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            ui_scale: 1.0,
            server_url: DEFAULT_SERVER_URL.to_string(),
            scene_typing_ms: 16,
            narration_typing_ms: 12,
            next_scene_delay_ms: 900,
            cjk_font_path: None,
        }
    }
}

impl ClientSettings {
    pub fn timing(&self) -> Timing {
        Timing {
            scene_typing: Duration::from_millis(self.scene_typing_ms),
            narration_typing: Duration::from_millis(self.narration_typing_ms),
            next_scene_delay: Duration::from_millis(self.next_scene_delay_ms),
        }
    }

    /// Applies an environment override for the server URL, if set.
    pub fn with_env_override(mut self, server_url: Option<String>) -> Self {
        if let Some(url) = server_url.filter(|u| !u.trim().is_empty()) {
            self.server_url = url.trim().to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_client_timing() {
        assert_eq!(ClientSettings::default().timing(), Timing::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let s: ClientSettings = serde_json::from_str(r#"{"ui_scale": 1.5}"#).unwrap();
        assert_eq!(s.ui_scale, 1.5);
        assert_eq!(s.server_url, DEFAULT_SERVER_URL);
        assert_eq!(s.next_scene_delay_ms, 900);
    }

    #[test]
    fn env_override_wins_unless_blank() {
        let s = ClientSettings::default().with_env_override(Some("http://game:9000".into()));
        assert_eq!(s.server_url, "http://game:9000");

        let s = ClientSettings::default().with_env_override(Some("  ".into()));
        assert_eq!(s.server_url, DEFAULT_SERVER_URL);
    }
}
