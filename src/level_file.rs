//! JSON level files
//!
//! ```json
//! { "tile_size": 75, "layout": ["   S  ", "======"], "scroll_speed": 320.0 }
//! ```
//!
//! Reading the file is the host's job; this only maps text onto a layout.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TILE_SIZE;
use crate::sim::{Level, LevelLayout};
use crate::tuning::Tuning;

fn default_tile_size() -> f64 {
    DEFAULT_TILE_SIZE
}

/// On-disk level description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    #[serde(default = "default_tile_size")]
    pub tile_size: f64,
    pub layout: Vec<String>,
    /// Overrides the tuning's scroll speed for this level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_speed: Option<f64>,
    /// Player hitbox top-left at spawn, `[x, y]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_start: Option<[f64; 2]>,
    /// Asset theme name, resolved by the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl LevelFile {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn layout(&self) -> LevelLayout {
        let layout = LevelLayout::new(self.layout.iter().cloned(), self.tile_size);
        match self.player_start {
            Some([x, y]) => layout.with_player_start(DVec2::new(x, y)),
            None => layout,
        }
    }

    /// `base` with this level's overrides applied
    pub fn tuning(&self, base: &Tuning) -> Tuning {
        let mut tuning = base.clone();
        if let Some(speed) = self.scroll_speed {
            tuning.scroll_speed = speed;
        }
        tuning
    }

    pub fn into_level(self, base: &Tuning) -> Level {
        let tuning = self.tuning(base);
        let level = Level::new(self.layout(), tuning);
        match self.theme {
            Some(theme) => level.with_theme(theme),
            None => level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_file() {
        let file = LevelFile::from_json(r#"{ "layout": ["  S", "==="] }"#).unwrap();
        assert_eq!(file.tile_size, 75.0);
        assert!(file.scroll_speed.is_none());
        let layout = file.layout();
        assert_eq!(layout.columns(), 3);
        assert_eq!(layout.start(), DVec2::new(100.0, 200.0));
    }

    #[test]
    fn test_overrides() {
        let json = r#"{
            "tile_size": 10,
            "layout": ["=="],
            "scroll_speed": 42.0,
            "player_start": [1.0, 2.0],
            "theme": "neon"
        }"#;
        let file = LevelFile::from_json(json).unwrap();
        let tuning = file.tuning(&Tuning::default());
        assert_eq!(tuning.scroll_speed, 42.0);
        assert_eq!(file.layout().start(), DVec2::new(1.0, 2.0));

        let level = file.into_level(&Tuning::default());
        assert_eq!(level.theme(), Some("neon"));
        assert_eq!(level.camera().scroll_speed, 42.0);
        assert_eq!(level.tile_size(), 10.0);
    }

    #[test]
    fn test_missing_layout_is_error() {
        assert!(LevelFile::from_json(r#"{ "tile_size": 75 }"#).is_err());
        assert!(LevelFile::from_json("not json").is_err());
    }

    #[test]
    fn test_serialize_skips_absent_overrides() {
        let file = LevelFile {
            tile_size: 75.0,
            layout: vec!["=".into()],
            scroll_speed: None,
            player_start: None,
            theme: None,
        };
        let json = file.to_json().unwrap();
        assert!(!json.contains("scroll_speed"));
        assert_eq!(LevelFile::from_json(&json).unwrap(), file);
    }
}
