use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Core trait for a frame-driven single-player game.
///
/// The scheduler owns timing and input collection; the game only advances
/// its own state and reports events.
pub trait FrameGame {
    /// Events emitted by `update`, consumed by HUD/dialog presenters.
    type Event;

    /// Game metadata for the title screen.
    fn metadata(&self) -> GameMetadata;

    /// Frames per second the scheduler should aim for.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    /// Begin play from the title state.
    fn start(&mut self) -> Vec<Self::Event>;

    /// Called once per frame with the elapsed time since the previous frame.
    fn update(&mut self, dt: f32) -> Vec<Self::Event>;

    /// Decode and queue an rmp-serde encoded input snapshot for the next frame.
    fn apply_input(&mut self, input: &[u8]);

    /// Serialize the full game state for a renderer.
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the game state with a previously serialized snapshot.
    fn apply_state(&mut self, state: &[u8]);

    fn pause(&mut self);

    fn resume(&mut self);

    /// Whether the run has reached its terminal state.
    fn is_complete(&self) -> bool;
}

/// Game metadata for the title screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    pub estimated_run_duration: Duration,
}

/// Generates the state-snapshot and pause boilerplate of `FrameGame`:
/// `serialize_state`, `apply_state`, `pause`, `resume`.
///
/// Requires the implementing struct to have `state: $StateType` and `paused: bool` fields.
#[macro_export]
macro_rules! frame_game_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            match rmp_serde::to_vec(&self.state) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize game state");
                    Vec::new()
                },
            }
        }

        fn apply_state(&mut self, state: &[u8]) {
            match rmp_serde::from_slice::<$StateType>(state) {
                Ok(s) => self.state = s,
                Err(e) => tracing::debug!(error = %e, "Ignoring undecodable state snapshot"),
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }
    };
}
