use std::fs;
use std::path::Path;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::world::World;

const SAVE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    version: u32,
    #[serde(default)]
    world: Option<World>,
}

/// Metadata about a save file discovered by [`SaveCodec::list_saves`].
#[derive(Debug, Clone)]
pub struct SaveMeta {
    pub path: std::path::PathBuf,
    pub save_name: String,
    pub day: u64,
    pub player_name: String,
    pub cash: f64,
    pub saved_at: SystemTime,
}

/// Serializes and deserializes [`World`] snapshots as JSON.
pub struct SaveCodec;

impl SaveCodec {
    pub fn save(world: &World) -> String {
        let file = SaveFile { version: SAVE_FORMAT_VERSION, world: Some(world.clone()) };
        serde_json::to_string_pretty(&file).expect("World serialization never fails")
    }

    pub fn load(text: &str) -> Result<World, GameError> {
        let file: SaveFile = serde_json::from_str(text).map_err(|_| GameError::UnknownId)?;
        file.world.ok_or(GameError::UnknownId)
    }

    /// Enumerate `*.json` files in `dir`, skipping any that don't parse as a
    /// save rather than failing the whole listing.
    pub fn list_saves(dir: &Path) -> std::io::Result<Vec<SaveMeta>> {
        let mut saves = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Ok(text) = fs::read_to_string(&path) else { continue };
            let Ok(world) = Self::load(&text) else { continue };
            let saved_at = entry.metadata()?.modified()?;
            let save_name = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string();
            saves.push(SaveMeta {
                path,
                save_name,
                day: world.day,
                player_name: world.player.name.clone(),
                cash: world.player.cash,
                saved_at,
            });
        }
        Ok(saves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::PersonalityKind;
    use crate::world::{advance_day, new_world};

    #[test]
    fn round_trip_preserves_state() {
        let mut world = new_world(11, "Round Trip Air", "JFK", vec![PersonalityKind::Budget]).unwrap();
        advance_day(&mut world);
        advance_day(&mut world);

        let text = SaveCodec::save(&world);
        let restored = SaveCodec::load(&text).unwrap();

        assert_eq!(restored.day, world.day);
        assert_eq!(restored.seed, world.seed);
        assert_eq!(restored.player.cash, world.player.cash);
        assert_eq!(restored.competitors.len(), world.competitors.len());
    }

    #[test]
    fn load_rejects_garbage() {
        assert!(SaveCodec::load("not json").is_err());
    }

    #[test]
    fn list_saves_skips_unparseable_files() {
        let dir = tempfile::tempdir().unwrap();
        let world = new_world(1, "A", "JFK", vec![]).unwrap();
        fs::write(dir.path().join("good.json"), SaveCodec::save(&world)).unwrap();
        fs::write(dir.path().join("bad.json"), "not a save").unwrap();
        fs::write(dir.path().join("ignored.txt"), "irrelevant").unwrap();

        let saves = SaveCodec::list_saves(dir.path()).unwrap();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].player_name, "A");
        assert_eq!(saves[0].save_name, "good");
    }
}
