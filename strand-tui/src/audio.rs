//! Ambience playback seam.

use tracing::info;

/// Receives ambience cues dispatched from the script.
pub trait AmbiencePlayer {
    /// Play the cue named by `argument`, e.g. an audio file for the
    /// `Audio` kind.
    fn play(&mut self, kind: &str, argument: &str);
}

/// Logs cues instead of playing them. Real audio output plugs in behind
/// the same trait.
#[derive(Debug, Default)]
pub struct LoggingAmbience;

impl AmbiencePlayer for LoggingAmbience {
    fn play(&mut self, kind: &str, argument: &str) {
        info!(kind, argument, "ambience cue");
    }
}
