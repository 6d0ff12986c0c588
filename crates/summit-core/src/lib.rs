pub mod deferred;
pub mod events;
pub mod game_trait;
pub mod geometry;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game_trait::FrameGame;

    /// Standard frame step used by tests (60 Hz).
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Run N frames, returning all accumulated events.
    pub fn run_frames<G: FrameGame>(game: &mut G, n: usize, dt: f32) -> Vec<G::Event> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(dt));
        }
        all_events
    }

    /// Assert that the game's serialized state differs from `before`.
    pub fn assert_game_state_changed<G: FrameGame>(game: &G, before: &[u8]) {
        let after = game.serialize_state();
        assert_ne!(
            before,
            &after[..],
            "Game state should have changed after operation"
        );
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // Every FrameGame implementation is expected to pass these. Game crates
    // call them from their own #[cfg(test)] modules with a concrete game.

    /// After start(), serialize_state() must return non-empty bytes.
    pub fn contract_start_produces_state<G: FrameGame>(game: &mut G) {
        game.start();
        assert!(
            !game.serialize_state().is_empty(),
            "serialize_state() must return non-empty bytes after start"
        );
    }

    /// update() with dt>0 on a started game must change state.
    pub fn contract_update_advances_state<G: FrameGame>(game: &mut G) {
        let before = game.serialize_state();
        game.update(FRAME_DT);
        assert_game_state_changed(game, &before);
    }

    /// apply_input() with valid data followed by update() must change state.
    pub fn contract_apply_input_changes_state<G: FrameGame>(game: &mut G, valid_input: &[u8]) {
        let before = game.serialize_state();
        game.apply_input(valid_input);
        game.update(FRAME_DT);
        assert_game_state_changed(game, &before);
    }

    /// Garbage input bytes must be ignored without panicking or changing state.
    pub fn contract_garbage_input_ignored<G: FrameGame>(game: &mut G) {
        let before = game.serialize_state();
        game.apply_input(&[0xFF, 0xFE, 0x00, 0x01, 0xAB, 0xCD]);
        let after = game.serialize_state();
        assert_eq!(before, after, "Garbage input must not change state");
    }

    /// serialize → apply → serialize must be stable.
    pub fn contract_state_roundtrip_preserves<G: FrameGame>(game: &mut G) {
        let state_a = game.serialize_state();
        game.apply_state(&state_a);
        let state_b = game.serialize_state();
        assert_eq!(
            state_a, state_b,
            "State must be stable after serialize→apply→serialize roundtrip"
        );
    }

    /// pause() must freeze state, resume() must unfreeze it.
    pub fn contract_pause_stops_updates<G: FrameGame>(game: &mut G) {
        game.pause();
        let before = game.serialize_state();
        game.update(1.0);
        let during_pause = game.serialize_state();
        assert_eq!(before, during_pause, "State must not change while paused");

        game.resume();
        game.update(FRAME_DT);
        let after_resume = game.serialize_state();
        assert_ne!(during_pause, after_resume, "State must change after resume");
    }
}
