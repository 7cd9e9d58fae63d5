//! Level file loading and validation.
//!
//! Levels are authored as JSON. Malformed or inconsistent files are rejected
//! here at load time; the simulation core assumes level data it receives is
//! already valid.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::enemy::EnemyKind;
use crate::platform::{Platform, PlatformKind};
use jb_core::geom::Rect;

pub const DEFAULT_WORLD_WIDTH: f32 = 1600.0;
pub const DEFAULT_WORLD_HEIGHT: f32 = 1200.0;

#[derive(Debug, Clone, Deserialize)]
pub struct LevelFile {
    #[serde(default = "default_world_width")]
    pub world_width: f32,
    #[serde(default = "default_world_height")]
    pub world_height: f32,
    pub player_spawn: (f32, f32),
    #[serde(default)]
    pub gun_spawn: Option<(f32, f32)>,
    pub platforms: Vec<PlatformDesc>,
    #[serde(default)]
    pub enemy_spawns: Vec<EnemySpawn>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformDesc {
    #[serde(rename = "type")]
    pub kind: PlatformKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub pair_id: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnemySpawn {
    #[serde(rename = "type")]
    pub kind: EnemyKind,
    pub position: (f32, f32),
}

impl PlatformDesc {
    pub fn build(&self) -> Platform {
        let rect = Rect::new(self.x, self.y, self.width, self.height);
        match self.kind {
            PlatformKind::Teleporter => Platform::teleporter(rect, self.pair_id),
            kind => Platform::new(rect, kind),
        }
    }
}

fn default_world_width() -> f32 {
    DEFAULT_WORLD_WIDTH
}

fn default_world_height() -> f32 {
    DEFAULT_WORLD_HEIGHT
}

pub fn parse_level(raw: &str) -> Result<LevelFile, String> {
    let level: LevelFile =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse level: {e}"))?;
    validate_level(&level)?;
    Ok(level)
}

pub fn load_level_from_path(path: &Path) -> Result<LevelFile, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read level file {}: {e}", path.display()))?;
    let level: LevelFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse level file {}: {e}", path.display()))?;
    validate_level(&level)?;
    log::info!(
        "loaded level {}: {} platforms, {} enemy spawns",
        path.display(),
        level.platforms.len(),
        level.enemy_spawns.len()
    );
    Ok(level)
}

pub fn validate_level(level: &LevelFile) -> Result<(), String> {
    if level.world_width <= 0.0 || level.world_height <= 0.0 {
        return Err(format!(
            "World dimensions must be positive, got {}x{}",
            level.world_width, level.world_height
        ));
    }
    for (i, p) in level.platforms.iter().enumerate() {
        if p.width <= 0.0 || p.height <= 0.0 {
            return Err(format!(
                "Platform {i} has non-positive size {}x{}",
                p.width, p.height
            ));
        }
    }
    for desc in &level.platforms {
        if desc.kind != PlatformKind::Teleporter {
            continue;
        }
        let sharing = level
            .platforms
            .iter()
            .filter(|p| p.kind == PlatformKind::Teleporter && p.pair_id == desc.pair_id)
            .count();
        if sharing > 2 {
            return Err(format!(
                "Teleporter pair_id {} is shared by {sharing} platforms, expected at most 2",
                desc.pair_id
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "jb_level_test_{}_{}.json",
            std::process::id(),
            contents.len()
        ));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    const MINIMAL: &str = r#"{
        "player_spawn": [100.0, 100.0],
        "platforms": [
            {"type": "Solid", "x": 0.0, "y": 300.0, "width": 400.0, "height": 20.0},
            {"type": "Teleporter", "x": 0.0, "y": 280.0, "width": 40.0, "height": 10.0, "pair_id": 1},
            {"type": "Teleporter", "x": 300.0, "y": 280.0, "width": 40.0, "height": 10.0, "pair_id": 1}
        ],
        "enemy_spawns": [
            {"type": "Ground", "position": [200.0, 260.0]}
        ]
    }"#;

    #[test]
    fn loads_a_minimal_level_with_defaults() {
        let path = write_temp(MINIMAL);
        let level = load_level_from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(level.world_width, DEFAULT_WORLD_WIDTH);
        assert_eq!(level.world_height, DEFAULT_WORLD_HEIGHT);
        assert_eq!(level.platforms.len(), 3);
        assert_eq!(level.enemy_spawns.len(), 1);
        assert!(level.gun_spawn.is_none());
        assert_eq!(level.enemy_spawns[0].kind, EnemyKind::Ground);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_level_from_path(Path::new("/nonexistent/level.json")).unwrap_err();
        assert!(err.contains("/nonexistent/level.json"));
    }

    #[test]
    fn rejects_non_positive_platform_size() {
        let raw = r#"{
            "player_spawn": [0.0, 0.0],
            "platforms": [
                {"type": "Solid", "x": 0.0, "y": 0.0, "width": 0.0, "height": 20.0}
            ]
        }"#;
        let err = parse_level(raw).unwrap_err();
        assert!(err.contains("non-positive size"));
    }

    #[test]
    fn rejects_a_teleporter_triple() {
        let raw = r#"{
            "player_spawn": [0.0, 0.0],
            "platforms": [
                {"type": "Teleporter", "x": 0.0, "y": 0.0, "width": 10.0, "height": 10.0, "pair_id": 7},
                {"type": "Teleporter", "x": 50.0, "y": 0.0, "width": 10.0, "height": 10.0, "pair_id": 7},
                {"type": "Teleporter", "x": 90.0, "y": 0.0, "width": 10.0, "height": 10.0, "pair_id": 7}
            ]
        }"#;
        let err = parse_level(raw).unwrap_err();
        assert!(err.contains("pair_id 7"));
    }

    #[test]
    fn platform_desc_builds_the_right_kind() {
        let desc = PlatformDesc {
            kind: PlatformKind::Teleporter,
            x: 10.0,
            y: 20.0,
            width: 40.0,
            height: 10.0,
            pair_id: 3,
        };
        let platform = desc.build();
        assert!(platform.kind.teleporting());
        assert_eq!(platform.pair_id, 3);
        assert_eq!(platform.rect, Rect::new(10.0, 20.0, 40.0, 10.0));
    }
}
