//! Input scripts: JSON frame sequences the headless runner feeds into the
//! simulation, one snapshot per tick. `repeat` compresses held keys.

use jb_core::input::InputSnapshot;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ScriptFile {
    pub frames: Vec<ScriptFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScriptFrame {
    #[serde(default)]
    pub move_x: f32,
    #[serde(default)]
    pub jump: bool,
    #[serde(default)]
    pub fire: bool,
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ScriptFile {
    pub fn expanded_inputs(&self) -> Vec<InputSnapshot> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(InputSnapshot {
                    move_x: frame.move_x.clamp(-1.0, 1.0),
                    up_held: frame.up,
                    down_held: frame.down,
                    jump_held: frame.jump,
                    fire_held: frame.fire,
                });
            }
        }
        out
    }
}

pub fn parse_script(raw: &str) -> Result<ScriptFile, String> {
    let script: ScriptFile =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse input script: {e}"))?;
    validate_script(&script)?;
    Ok(script)
}

pub fn load_script_from_path(path: &Path) -> Result<ScriptFile, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let script: ScriptFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse input script {}: {e}", path.display()))?;
    validate_script(&script)?;
    Ok(script)
}

fn validate_script(script: &ScriptFile) -> Result<(), String> {
    if script.frames.is_empty() {
        return Err("Script validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use jb_sim::level::parse_level;
    use jb_sim::world::World;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "jb_script_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn script_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
                "frames": [
                    {"move_x": 1.0, "repeat": 3},
                    {"jump": true, "fire": true},
                    {"move_x": -2.5}
                ]
            }"#,
        )
        .unwrap();
        let script = load_script_from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        let inputs = script.expanded_inputs();
        assert_eq!(inputs.len(), 5);
        assert_eq!(inputs[0].move_x, 1.0);
        assert!(!inputs[2].jump_held);
        assert!(inputs[3].jump_held && inputs[3].fire_held);
        // Axis values are clamped on expansion.
        assert_eq!(inputs[4].move_x, -1.0);
    }

    #[test]
    fn empty_scripts_are_rejected() {
        let err = parse_script(r#"{"frames": []}"#).unwrap_err();
        assert!(err.contains("empty"));
    }

    #[test]
    fn scripted_runs_are_reproducible() {
        let level = parse_level(
            r#"{
                "player_spawn": [100.0, 240.0],
                "platforms": [
                    {"type": "Solid", "x": 0.0, "y": 290.0, "width": 800.0, "height": 20.0}
                ],
                "enemy_spawns": [
                    {"type": "Ground", "position": [500.0, 260.0]}
                ]
            }"#,
        )
        .unwrap();
        let script = parse_script(
            r#"{
                "frames": [
                    {"move_x": 1.0, "repeat": 60},
                    {"move_x": 1.0, "jump": true, "repeat": 10},
                    {"repeat": 30}
                ]
            }"#,
        )
        .unwrap();

        let mut a = World::from_level(&level, (800.0, 600.0));
        let mut b = World::from_level(&level, (800.0, 600.0));
        let mut events_a = Vec::new();
        let mut events_b = Vec::new();
        for input in script.expanded_inputs() {
            events_a.extend(a.step(&input));
            events_b.extend(b.step(&input));
        }
        assert_eq!(a.player.rect, b.player.rect);
        assert_eq!(events_a, events_b);
        assert!(a.player.rect.x > 100.0, "the script walked the player right");
    }
}
