//! Scenes and the scene manager.
//!
//! A scene owns its immutable script document, its map configuration and
//! its own dialogue engine; nothing dialogue-related is shared across
//! scenes. The manager loads every scene's assets up front, tracks which
//! scene is active and applies scene transitions.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::command::{MapAtlas, MapConfig};
use crate::engine::{DialogueEngine, Effect, START_PROGRESS};
use crate::error::ScriptError;
use crate::script::ScriptDocument;

/// The closed set of scene identifiers.
///
/// `Void` is the sentinel for map directions that lead nowhere; it never
/// has assets and can never become active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneId {
    Beach,
    Forest,
    Void,
}

impl SceneId {
    /// Scenes with script and map assets.
    pub const PLAYABLE: [SceneId; 2] = [SceneId::Beach, SceneId::Forest];

    fn asset_stem(self) -> Option<&'static str> {
        match self {
            SceneId::Beach => Some("beach"),
            SceneId::Forest => Some("forest"),
            SceneId::Void => None,
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneId::Beach => write!(f, "Beach"),
            SceneId::Forest => write!(f, "Forest"),
            SceneId::Void => write!(f, "Void"),
        }
    }
}

/// Errors from loading scene assets or entering scenes.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse map config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("script error in scene {scene}: {source}")]
    Script {
        scene: SceneId,
        #[source]
        source: ScriptError,
    },

    #[error("no such scene: {0}")]
    UnknownScene(SceneId),
}

/// One scene: script, map data and dialogue state.
pub struct Scene {
    id: SceneId,
    script: ScriptDocument,
    map: MapConfig,
    engine: DialogueEngine,
}

impl Scene {
    /// Load a scene's script (`scripts/<name>.md`) and map config
    /// (`maps/<name>.json`) from the assets root.
    pub fn from_assets(id: SceneId, assets_root: &Path) -> Result<Self, SceneError> {
        let stem = id.asset_stem().ok_or(SceneError::UnknownScene(id))?;

        let script_path = assets_root.join("scripts").join(format!("{stem}.md"));
        let script = fs::read_to_string(&script_path).map_err(|source| SceneError::Io {
            path: script_path,
            source,
        })?;

        let map_path = assets_root.join("maps").join(format!("{stem}.json"));
        let map_text = fs::read_to_string(&map_path).map_err(|source| SceneError::Io {
            path: map_path.clone(),
            source,
        })?;
        let map = serde_json::from_str(&map_text).map_err(|source| SceneError::Config {
            path: map_path,
            source,
        })?;

        Ok(Self::from_parts(id, ScriptDocument::new(script), map))
    }

    /// Build a scene from in-memory parts. Useful for tests.
    pub fn from_parts(id: SceneId, script: ScriptDocument, map: MapConfig) -> Self {
        Self {
            id,
            script,
            map,
            engine: DialogueEngine::new(),
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn script(&self) -> &ScriptDocument {
        &self.script
    }

    pub fn map(&self) -> &MapConfig {
        &self.map
    }

    pub fn engine(&self) -> &DialogueEngine {
        &self.engine
    }

    pub fn visited(&self) -> u32 {
        self.map.visited
    }
}

/// Owns every scene and the active-scene cursor.
pub struct SceneManager {
    scenes: HashMap<SceneId, Scene>,
    atlas: MapAtlas,
    active: SceneId,
}

impl SceneManager {
    /// Load all playable scenes from `assets_root`.
    pub fn load(assets_root: &Path) -> Result<Self, SceneError> {
        let mut scenes = HashMap::new();
        let mut atlas = MapAtlas::new();
        for id in SceneId::PLAYABLE {
            let scene = Scene::from_assets(id, assets_root)?;
            atlas.insert(id, scene.map().clone());
            scenes.insert(id, scene);
        }
        Ok(Self {
            scenes,
            atlas,
            active: SceneId::Beach,
        })
    }

    /// Build a manager from prepared scenes. Useful for tests.
    pub fn from_scenes(scenes: Vec<Scene>, active: SceneId) -> Self {
        let mut atlas = MapAtlas::new();
        let mut map = HashMap::new();
        for scene in scenes {
            atlas.insert(scene.id(), scene.map().clone());
            map.insert(scene.id(), scene);
        }
        Self {
            scenes: map,
            atlas,
            active,
        }
    }

    pub fn active_id(&self) -> SceneId {
        self.active
    }

    pub fn active(&self) -> &Scene {
        // The active id always refers to a loaded scene; `enter` rejects
        // anything else.
        &self.scenes[&self.active]
    }

    pub fn atlas(&self) -> &MapAtlas {
        &self.atlas
    }

    /// Make `id` the active scene: bump its visit counter and reset its
    /// dialogue to the conventional start section.
    pub fn enter(&mut self, id: SceneId) -> Result<(), SceneError> {
        let scene = self
            .scenes
            .get_mut(&id)
            .ok_or(SceneError::UnknownScene(id))?;
        scene.map.visited += 1;
        scene
            .engine
            .enter_scene(&scene.script, START_PROGRESS)
            .map_err(|source| SceneError::Script { scene: id, source })?;
        self.active = id;
        info!(scene = %id, visited = scene.map.visited, "scene entered");
        Ok(())
    }

    /// Forward one confirmation event to the active scene's engine.
    pub fn confirm(&mut self, typed: &str) -> Result<Vec<Effect>, SceneError> {
        let Self {
            scenes,
            atlas,
            active,
        } = self;
        let scene = scenes
            .get_mut(active)
            .ok_or(SceneError::UnknownScene(*active))?;
        scene
            .engine
            .confirm(&scene.script, typed, &scene.map, atlas)
            .map_err(|source| SceneError::Script {
                scene: *active,
                source,
            })
    }
}
