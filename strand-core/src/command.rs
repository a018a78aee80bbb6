//! Reserved verb dispatch.
//!
//! `go` and `look` are resolved through per-scene map configuration
//! before the script's keyword table gets a chance, so movement between
//! scenes works independently of whatever the active section's script
//! happens to define.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::Effect;
use crate::scene::SceneId;

/// Per-scene adjacency and description data, loaded from scene-adjacent
/// configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Direction word (lower-case) to target scene.
    pub directions: HashMap<String, SceneId>,
    /// Free text shown when the player looks toward this scene.
    pub look: String,
    /// How often the player has entered this scene. Written by the scene
    /// manager, read-only everywhere else.
    pub visited: u32,
}

/// Every scene's map config, for resolving `look <direction>` against
/// the *target* scene's description.
#[derive(Debug, Default)]
pub struct MapAtlas {
    configs: HashMap<SceneId, MapConfig>,
}

impl MapAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: SceneId, config: MapConfig) {
        self.configs.insert(id, config);
    }

    pub fn get(&self, id: SceneId) -> Option<&MapConfig> {
        self.configs.get(&id)
    }
}

/// Outcome of offering player input to the dispatcher.
#[derive(Debug, PartialEq)]
pub enum Dispatch {
    /// A reserved verb resolved; the effects are final.
    Handled(Vec<Effect>),
    /// A reserved verb that did not resolve through the map. The keyword
    /// table gets a chance first; these rejection effects apply only if
    /// it also misses.
    Fallback(Vec<Effect>),
    /// Not a reserved verb at all.
    NotCommand,
}

/// Try to interpret `input` as a reserved verb plus argument.
///
/// Reserved verbs require an argument: a bare `look` stays available as
/// an ordinary script keyword.
pub fn try_dispatch(input: &str, map: &MapConfig, atlas: &MapAtlas) -> Dispatch {
    let Some((verb, rest)) = input.trim().split_once(char::is_whitespace) else {
        return Dispatch::NotCommand;
    };
    let argument = rest.trim();
    if argument.is_empty() {
        return Dispatch::NotCommand;
    }

    match verb.to_lowercase().as_str() {
        "go" => dispatch_go(argument, map),
        "look" => dispatch_look(argument, map, atlas),
        _ => Dispatch::NotCommand,
    }
}

fn resolve(argument: &str, map: &MapConfig) -> Option<SceneId> {
    map.directions.get(&argument.to_lowercase()).copied()
}

fn dispatch_go(argument: &str, map: &MapConfig) -> Dispatch {
    match resolve(argument, map) {
        Some(target) if target != SceneId::Void => {
            debug!(%target, direction = argument, "go resolved to scene transition");
            Dispatch::Handled(vec![Effect::Transition(target)])
        }
        _ => Dispatch::Fallback(vec![Effect::Narrate(format!(
            "You can't go {argument} from here."
        ))]),
    }
}

fn dispatch_look(argument: &str, map: &MapConfig, atlas: &MapAtlas) -> Dispatch {
    let look = resolve(argument, map)
        .filter(|target| *target != SceneId::Void)
        .and_then(|target| atlas.get(target))
        .map(|config| config.look.clone());

    match look {
        Some(text) => Dispatch::Handled(vec![Effect::Narrate(text)]),
        None => Dispatch::Fallback(vec![Effect::Narrate(format!(
            "There is nothing to see {argument} of here."
        ))]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beach_map() -> MapConfig {
        let mut directions = HashMap::new();
        directions.insert("north".to_string(), SceneId::Forest);
        directions.insert("east".to_string(), SceneId::Void);
        MapConfig {
            directions,
            look: "A pale strip of sand.".to_string(),
            visited: 0,
        }
    }

    fn atlas() -> MapAtlas {
        let mut atlas = MapAtlas::new();
        atlas.insert(SceneId::Beach, beach_map());
        atlas.insert(
            SceneId::Forest,
            MapConfig {
                directions: HashMap::new(),
                look: "A dark treeline.".to_string(),
                visited: 0,
            },
        );
        atlas
    }

    #[test]
    fn go_transitions_to_known_scene() {
        let dispatch = try_dispatch("go north", &beach_map(), &atlas());
        assert_eq!(
            dispatch,
            Dispatch::Handled(vec![Effect::Transition(SceneId::Forest)])
        );
    }

    #[test]
    fn go_into_the_void_is_rejected() {
        match try_dispatch("go east", &beach_map(), &atlas()) {
            Dispatch::Fallback(effects) => {
                assert_eq!(
                    effects,
                    vec![Effect::Narrate("You can't go east from here.".to_string())]
                );
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[test]
    fn look_shows_target_scene_description() {
        let dispatch = try_dispatch("look north", &beach_map(), &atlas());
        assert_eq!(
            dispatch,
            Dispatch::Handled(vec![Effect::Narrate("A dark treeline.".to_string())])
        );
    }

    #[test]
    fn bare_look_is_not_a_command() {
        assert_eq!(
            try_dispatch("look", &beach_map(), &atlas()),
            Dispatch::NotCommand
        );
    }

    #[test]
    fn other_verbs_defer_to_the_keyword_table() {
        assert_eq!(
            try_dispatch("inspect compass", &beach_map(), &atlas()),
            Dispatch::NotCommand
        );
    }
}
