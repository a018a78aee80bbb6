//! End-to-end dialogue flow over in-memory script documents, plus a
//! smoke test over the shipped scene assets.

use std::path::PathBuf;

use strand_core::{
    DialogueEngine, Effect, MapAtlas, MapConfig, SceneId, SceneManager, ScriptDocument,
};

fn confirm(engine: &mut DialogueEngine, document: &ScriptDocument, typed: &str) -> Vec<Effect> {
    engine
        .confirm(document, typed, &MapConfig::default(), &MapAtlas::new())
        .unwrap()
}

#[test]
fn basic_drain() {
    let document = ScriptDocument::new("# beginning\nHello.\n\nWorld.\n\n");
    let mut engine = DialogueEngine::new();
    engine.enter_scene(&document, "beginning").unwrap();

    assert_eq!(
        confirm(&mut engine, &document, ""),
        vec![Effect::Narrate("Hello.".to_string())]
    );
    assert_eq!(
        confirm(&mut engine, &document, ""),
        vec![Effect::Narrate("World.".to_string())]
    );
    assert!(!engine.awaiting_keyword());
}

const BRANCHING: &str = "# beginning\nIntro line.\n\n`(look)`\nYou see sand.\n\n`(go north) > forest`\n\n# forest\nTrees.\n";

#[test]
fn keyword_dispatch() {
    let document = ScriptDocument::new(BRANCHING);
    let mut engine = DialogueEngine::new();
    engine.enter_scene(&document, "beginning").unwrap();

    // Drain the intro line.
    assert_eq!(
        confirm(&mut engine, &document, ""),
        vec![Effect::Narrate("Intro line.".to_string())]
    );

    let effects = confirm(&mut engine, &document, "look");
    assert_eq!(
        effects,
        vec![
            Effect::ClearPlayerText,
            Effect::Narrate("You see sand.".to_string())
        ]
    );
    assert_eq!(engine.progress(), "beginning");
}

#[test]
fn progress_jump_is_atomic() {
    let document = ScriptDocument::new(BRANCHING);
    let mut engine = DialogueEngine::new();
    engine.enter_scene(&document, "beginning").unwrap();
    confirm(&mut engine, &document, "");

    // The jump response carries no text of its own; the narration comes
    // from the target section's queue, drained in the same turn.
    let effects = confirm(&mut engine, &document, "go north");
    assert_eq!(
        effects,
        vec![
            Effect::ClearPlayerText,
            Effect::Narrate("Trees.".to_string())
        ]
    );
    assert_eq!(engine.progress(), "forest");

    // The old section's table is gone with the jump: "look" no longer
    // answers. The exhausted forest section restarts instead.
    assert_eq!(
        confirm(&mut engine, &document, "look"),
        vec![Effect::Narrate("Trees.".to_string())]
    );
}

#[test]
fn unmatched_input_is_a_no_op() {
    let document = ScriptDocument::new(BRANCHING);
    let mut engine = DialogueEngine::new();
    engine.enter_scene(&document, "beginning").unwrap();
    confirm(&mut engine, &document, "");

    let effects = confirm(&mut engine, &document, "dance");
    assert_eq!(effects, vec![Effect::ClearPlayerText]);
    assert_eq!(engine.progress(), "beginning");

    // The table is untouched: the known keyword still answers.
    assert_eq!(
        confirm(&mut engine, &document, "look"),
        vec![
            Effect::ClearPlayerText,
            Effect::Narrate("You see sand.".to_string())
        ]
    );
}

#[test]
fn ambience_batching() {
    let document = ScriptDocument::new("# beginning\n`[Audio: wave.ogg]`\nThe waves crash.\n\n");
    let mut engine = DialogueEngine::new();
    engine.enter_scene(&document, "beginning").unwrap();

    assert_eq!(
        confirm(&mut engine, &document, ""),
        vec![
            Effect::Ambience {
                kind: "Audio".to_string(),
                argument: "wave.ogg".to_string()
            },
            Effect::Narrate("The waves crash.".to_string()),
        ]
    );
}

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../assets")
}

#[test]
fn shipped_scenes_load_and_link_up() {
    let mut manager = SceneManager::load(&assets_root()).unwrap();
    manager.enter(SceneId::Beach).unwrap();
    assert_eq!(manager.active().visited(), 1);

    // Drain the beach intro (three narrator responses).
    let first = manager.confirm("").unwrap();
    assert!(matches!(first[0], Effect::Ambience { .. }));
    manager.confirm("").unwrap();
    manager.confirm("").unwrap();

    // Keyword jump within the beach script.
    let effects = manager.confirm("take compass").unwrap();
    assert!(effects.contains(&Effect::Narrate(
        "The compass is cold in your palm. North, it insists. North.".to_string()
    )));
    assert_eq!(manager.active().engine().progress(), "compass");

    // Movement through the map config.
    let effects = manager.confirm("go north").unwrap();
    assert!(effects.contains(&Effect::Transition(SceneId::Forest)));

    manager.enter(SceneId::Forest).unwrap();
    assert_eq!(manager.active_id(), SceneId::Forest);
    assert_eq!(manager.active().engine().progress(), "beginning");
}
