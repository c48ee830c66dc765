//! Sound cues
//!
//! The core emits cue values; the platform's `AudioSink` turns them into
//! actual playback. Fire-and-forget: nothing is read back.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player hit a car, bike or pedestrian
    Collision,
    /// Scream on pedestrian collisions; two recorded variants
    Scream { variant: usize },
    /// Fuel canister picked up
    CanisterPickup,
    /// Engine rev when the game starts
    Vroom,
    /// A bike entered the road
    BikeBell,
    /// A pedestrian stepped onto the sidewalk
    Footsteps,
    /// Looping main-game soundtrack
    SoundtrackStart,
    SoundtrackStop,
    /// Looping start-screen ambience
    StartScreenLoopStart,
    StartScreenLoopStop,
    /// Looping game-over jingle
    GameOverLoopStart,
    /// Button feedback
    UiStartClick,
    UiQuitClick,
    /// Cut everything (screen transitions)
    StopAll,
}
