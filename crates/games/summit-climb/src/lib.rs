pub mod config;
pub mod events;
pub mod physics;
pub mod progression;
pub mod summary;
pub mod world_gen;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use summit_core::deferred::DeferredQueue;
use summit_core::frame_game_boilerplate;
use summit_core::game_trait::{FrameGame, GameMetadata};

use config::ClimbConfig;
use events::ClimbEvent;
use physics::{ClimbInput, Player, step_player};
use progression::{AltitudeZone, Camera, HudSnapshot, Inventory};
use summary::RunSummary;
use world_gen::{World, generate_world};

/// Session lifecycle. `Falling` always leads back to a fresh `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    NotStarted,
    Running,
    Falling,
    Completed,
}

/// Transitions that fire after a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingTransition {
    ShowSummary,
    Reset,
}

/// Everything a renderer needs for one frame. Owned by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub player: Player,
    pub world: World,
    pub camera: Camera,
    pub inventory: Inventory,
    /// Peak distance climbed from `start_y`; never decreases.
    pub altitude: f32,
    pub start_y: f32,
    /// Time spent running; frozen once the summit is reached.
    pub elapsed_secs: f32,
    pub phase: SessionPhase,
    pub pending: DeferredQueue<PendingTransition>,
    pub summary: Option<RunSummary>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(World::default())
    }
}

impl SessionState {
    pub fn new(world: World) -> Self {
        let player = Player::default();
        let mut camera = Camera::default();
        progression::update_camera(&mut camera, &player);
        Self {
            start_y: player.y,
            player,
            world,
            camera,
            inventory: Inventory::default(),
            altitude: 0.0,
            elapsed_secs: 0.0,
            phase: SessionPhase::NotStarted,
            pending: DeferredQueue::new(),
            summary: None,
        }
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::new(
            self.altitude,
            &self.player,
            self.elapsed_secs,
            &self.inventory,
        )
    }

    pub fn zone(&self) -> AltitudeZone {
        AltitudeZone::from_altitude(self.altitude)
    }
}

/// Run one simulation frame over an owned state.
///
/// Order: item use, physics and landings, camera and altitude, caves and
/// collectibles, then completion and failure. Does nothing unless the
/// session is running.
pub fn tick(
    mut state: SessionState,
    input: &ClimbInput,
    dt: f32,
    config: &ClimbConfig,
) -> (SessionState, Vec<ClimbEvent>) {
    let mut events = Vec::new();
    if state.phase != SessionPhase::Running {
        return (state, events);
    }

    if dt.is_finite() && dt > 0.0 {
        state.elapsed_secs += dt;
    }

    if input.interact
        && let Some(event) = progression::use_rope(
            &mut state.inventory,
            &mut state.player,
            config.physics.rope_impulse,
        )
    {
        events.push(event);
    }

    let outcome = step_player(&mut state.player, input, &state.world, &config.physics);

    progression::update_camera(&mut state.camera, &state.player);
    progression::update_altitude(&mut state.altitude, &state.player, state.start_y);

    events.extend(progression::discover_caves(
        &mut state.world,
        &state.player,
        &mut state.inventory,
    ));
    events.extend(progression::collect_items(
        &mut state.world,
        &state.player,
        &mut state.inventory,
    ));

    if outcome.landed_on_summit {
        state.phase = SessionPhase::Completed;
        state
            .pending
            .schedule(PendingTransition::ShowSummary, config.summary_delay_secs);
        tracing::info!(
            elapsed_secs = state.elapsed_secs,
            altitude = state.altitude,
            "Summit reached"
        );
        events.push(ClimbEvent::SummitReached);
    } else if progression::has_fallen(&state.player, config.fall_threshold_y) {
        state.phase = SessionPhase::Falling;
        state
            .pending
            .schedule(PendingTransition::Reset, config.fall_reset_delay_secs);
        tracing::info!(y = state.player.y, "Player fell");
        events.push(ClimbEvent::Fell);
    }

    (state, events)
}

/// The mountain climbing game session.
pub struct MountainClimb {
    state: SessionState,
    config: ClimbConfig,
    pending_input: ClimbInput,
    paused: bool,
    /// Source of world seeds for this session and every reset.
    seed_rng: StdRng,
}

impl MountainClimb {
    pub fn new(config: ClimbConfig) -> Self {
        let mut seed_rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let world = generate_world(seed_rng.random());
        Self {
            state: SessionState::new(world),
            config,
            pending_input: ClimbInput::default(),
            paused: false,
            seed_rng,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &ClimbConfig {
        &self.config
    }

    pub fn hud(&self) -> HudSnapshot {
        self.state.hud()
    }

    /// Queue an input snapshot for the next frame.
    pub fn queue_input(&mut self, input: ClimbInput) {
        self.pending_input.merge(input);
    }

    /// Return to the title state with a freshly generated world.
    pub fn restart(&mut self) {
        self.reinitialize();
        tracing::info!(seed = self.state.world.seed, "Session restarted");
    }

    fn reinitialize(&mut self) {
        self.state = SessionState::new(generate_world(self.seed_rng.random()));
        self.pending_input = ClimbInput::default();
    }

    fn fire_transition(&mut self, transition: PendingTransition) -> ClimbEvent {
        match transition {
            PendingTransition::ShowSummary => {
                let summary = RunSummary::new(
                    self.state.elapsed_secs,
                    self.state.altitude,
                    &self.state.inventory,
                );
                self.state.summary = Some(summary);
                ClimbEvent::ShowSummary(summary)
            },
            PendingTransition::Reset => {
                self.reinitialize();
                self.state.phase = SessionPhase::Running;
                tracing::debug!(seed = self.state.world.seed, "Session reset after fall");
                ClimbEvent::SessionReset {
                    seed: self.state.world.seed,
                }
            },
        }
    }
}

impl Default for MountainClimb {
    fn default() -> Self {
        Self::new(ClimbConfig::default())
    }
}

impl FrameGame for MountainClimb {
    type Event = ClimbEvent;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Summit".to_string(),
            description: "Climb the mountain, explore its caves, and reach the summit!"
                .to_string(),
            estimated_run_duration: Duration::from_secs(300),
        }
    }

    fn tick_rate(&self) -> f32 {
        self.config.tick_rate_hz
    }

    fn start(&mut self) -> Vec<ClimbEvent> {
        if self.state.phase != SessionPhase::NotStarted {
            return Vec::new();
        }
        self.state.phase = SessionPhase::Running;
        tracing::info!(seed = self.state.world.seed, "Climb started");
        vec![ClimbEvent::Welcome]
    }

    fn update(&mut self, dt: f32) -> Vec<ClimbEvent> {
        if self.paused {
            return Vec::new();
        }

        // A run that resets this frame starts simulating on the next one.
        let was_running = self.state.phase == SessionPhase::Running;

        let mut events = Vec::new();
        for transition in self.state.pending.advance(dt) {
            events.push(self.fire_transition(transition));
        }

        if was_running && self.state.phase == SessionPhase::Running {
            let input = self.pending_input;
            self.pending_input.interact = false;

            let state = std::mem::take(&mut self.state);
            let (state, tick_events) = tick(state, &input, dt, &self.config);
            self.state = state;
            events.extend(tick_events);
        }

        events
    }

    fn apply_input(&mut self, input: &[u8]) {
        match rmp_serde::from_slice::<ClimbInput>(input) {
            Ok(input) => self.queue_input(input),
            Err(e) => tracing::debug!(error = %e, "Ignoring undecodable input"),
        }
    }

    frame_game_boilerplate!(state_type: SessionState);

    fn is_complete(&self) -> bool {
        self.state.phase == SessionPhase::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{GRAVITY, PLAYER_HEIGHT, ROPE_IMPULSE};
    use crate::world_gen::{PlatformKind, SUMMIT};
    use summit_core::test_helpers::{FRAME_DT, run_frames};

    fn seeded_config(seed: u64) -> ClimbConfig {
        ClimbConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// A started game whose world keeps only the given platform kinds and no pickups.
    fn started_game(keep: &[PlatformKind]) -> MountainClimb {
        let mut game = MountainClimb::new(seeded_config(42));
        game.start();
        game.state
            .world
            .platforms
            .retain(|p| keep.contains(&p.kind));
        game.state.world.collectibles.clear();
        game
    }

    fn interact() -> ClimbInput {
        ClimbInput {
            interact: true,
            ..Default::default()
        }
    }

    #[test]
    fn new_session_waits_for_start() {
        let mut game = MountainClimb::new(seeded_config(1));
        assert_eq!(game.state.phase, SessionPhase::NotStarted);

        let before = game.state.clone();
        let events = run_frames(&mut game, 30, FRAME_DT);
        assert!(events.is_empty());
        assert_eq!(game.state, before, "Nothing moves before start");
    }

    #[test]
    fn start_emits_welcome_once() {
        let mut game = MountainClimb::new(seeded_config(1));
        assert_eq!(game.start(), vec![ClimbEvent::Welcome]);
        assert_eq!(game.state.phase, SessionPhase::Running);
        assert!(game.start().is_empty(), "Starting twice is a no-op");
    }

    #[test]
    fn same_seed_same_world() {
        let a = MountainClimb::new(seeded_config(9));
        let b = MountainClimb::new(seeded_config(9));
        assert_eq!(a.state.world, b.state.world);
    }

    #[test]
    fn landing_on_ground_from_scenario() {
        let mut game = started_game(&[PlatformKind::Ground]);
        game.state.player.y = 755.0;
        game.state.player.vy = 5.0;

        game.update(FRAME_DT);

        // Integration moves to y=760, overlapping the ground at 750.
        let player = &game.state.player;
        assert_eq!(player.y, 750.0 - PLAYER_HEIGHT);
        assert_eq!(player.vy, 0.0);
        assert!(!player.jumping);
    }

    #[test]
    fn summit_landing_completes_and_freezes_time() {
        let mut game = started_game(&[PlatformKind::Summit]);
        game.state.player.x = 500.0;
        game.state.player.y = SUMMIT.y - PLAYER_HEIGHT - 2.0;
        game.state.player.vy = 5.0;
        game.state.inventory.rope = 2;
        game.state.inventory.torch = 1;

        let events = game.update(FRAME_DT);
        assert!(events.contains(&ClimbEvent::SummitReached));
        assert_eq!(game.state.phase, SessionPhase::Completed);
        assert!(game.is_complete());

        let frozen = game.state.elapsed_secs;
        let events = run_frames(&mut game, 30, FRAME_DT);
        assert!(events.is_empty(), "Summary waits for its delay");
        assert_eq!(game.state.elapsed_secs, frozen, "Elapsed time is frozen");

        let events = run_frames(&mut game, 40, FRAME_DT);
        let summaries: Vec<&ClimbEvent> = events
            .iter()
            .filter(|e| matches!(e, ClimbEvent::ShowSummary(_)))
            .collect();
        assert_eq!(summaries.len(), 1, "Summary is shown exactly once");
        let summary = game.state.summary.expect("summary recorded");
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.elapsed_secs, frozen);
        assert_eq!(game.state.phase, SessionPhase::Completed);
    }

    #[test]
    fn falling_out_of_bounds_resets_after_delay() {
        let mut game = started_game(&[PlatformKind::Ground]);
        let first_seed = game.state.world.seed;
        game.state.player.y = 995.0;
        game.state.player.vy = 6.0;
        game.state.altitude = 500.0;
        game.state.inventory.rope = 4;

        let events = game.update(FRAME_DT);
        assert_eq!(game.state.player.y, 1001.0);
        assert_eq!(events, vec![ClimbEvent::Fell]);
        assert_eq!(game.state.phase, SessionPhase::Falling);

        // Fell fires once; the reset lands after two seconds.
        let mut frames = 0;
        loop {
            frames += 1;
            let events = game.update(FRAME_DT);
            if events
                .iter()
                .any(|e| matches!(e, ClimbEvent::SessionReset { .. }))
            {
                assert_eq!(events.len(), 1);
                break;
            }
            assert!(events.is_empty(), "No events while falling");
            assert!(frames < 200, "Reset never fired");
        }
        assert!(
            (119..=121).contains(&frames),
            "Reset should fire after ~2s, fired after {frames} frames"
        );

        let state = &game.state;
        assert_eq!(state.phase, SessionPhase::Running);
        assert_eq!(state.altitude, 0.0);
        assert_eq!(state.elapsed_secs, 0.0);
        assert_eq!(state.inventory, Inventory::default());
        assert_eq!(state.player, Player::default());
        assert_ne!(state.world.seed, first_seed, "A fresh world is generated");
        assert!(state.world.caves.iter().all(|c| !c.explored));
    }

    #[test]
    fn interact_uses_rope_once() {
        let mut game = started_game(&[]);
        game.state.player.y = 300.0;
        game.state.inventory.rope = 3;

        game.queue_input(interact());
        let events = game.update(FRAME_DT);

        assert_eq!(events, vec![ClimbEvent::RopeUsed { remaining: 2 }]);
        assert_eq!(game.state.player.y, 300.0 + ROPE_IMPULSE);
        assert_eq!(game.state.player.vy, ROPE_IMPULSE + GRAVITY);

        let events = game.update(FRAME_DT);
        assert!(events.is_empty(), "Interact is consumed by one frame");
        assert_eq!(game.state.inventory.rope, 2);
    }

    #[test]
    fn rope_beats_held_jump() {
        let mut game = started_game(&[PlatformKind::Ground]);
        game.state.inventory.rope = 1;
        game.queue_input(ClimbInput {
            jump: true,
            interact: true,
            ..Default::default()
        });

        game.update(FRAME_DT);

        assert_eq!(game.state.player.vy, ROPE_IMPULSE + GRAVITY);
    }

    #[test]
    fn interact_without_rope_is_silent() {
        let mut game = started_game(&[]);
        game.state.player.y = 300.0;
        game.queue_input(interact());
        let events = game.update(FRAME_DT);
        assert!(events.is_empty());
        assert_eq!(game.state.player.vy, GRAVITY);
    }

    #[test]
    fn entering_cave_grants_equipment() {
        let mut game = started_game(&[]);
        let ice = game.state.world.caves[0].rect;
        game.state.player.x = ice.x + 20.0;
        game.state.player.y = ice.y + 20.0;

        let events = game.update(FRAME_DT);

        assert!(events.iter().any(|e| matches!(e, ClimbEvent::CaveDiscovered { .. })));
        assert_eq!(game.state.inventory.rope, 2);
        assert_eq!(game.state.inventory.torch, 1);
    }

    #[test]
    fn camera_follows_player() {
        let mut game = started_game(&[PlatformKind::Ground]);
        game.update(FRAME_DT);
        let state = &game.state;
        assert_eq!(
            state.camera.y,
            state.player.y - progression::VIEWPORT_HEIGHT * progression::CAMERA_FOLLOW_RATIO
        );
    }

    #[test]
    fn restart_after_completion_returns_to_title() {
        let mut game = started_game(&[PlatformKind::Summit]);
        game.state.phase = SessionPhase::Completed;
        game.restart();
        assert_eq!(game.state.phase, SessionPhase::NotStarted);
        assert!(game.state.pending.is_empty());
        assert_eq!(game.start(), vec![ClimbEvent::Welcome]);
    }

    #[test]
    fn tick_ignores_non_running_state() {
        let state = SessionState::new(generate_world(3));
        let before = state.clone();
        let (after, events) = tick(state, &interact(), FRAME_DT, &ClimbConfig::default());
        assert_eq!(after, before);
        assert!(events.is_empty());
    }

    #[test]
    fn nan_dt_does_not_corrupt_time() {
        let mut game = started_game(&[PlatformKind::Ground]);
        game.update(f32::NAN);
        assert_eq!(game.state.elapsed_secs, 0.0);
        assert!(game.state.player.y.is_finite());
    }

    #[test]
    fn hud_reflects_state() {
        let mut game = started_game(&[PlatformKind::Ground]);
        game.state.altitude = 150.5;
        game.state.inventory.torch = 2;
        let hud = game.hud();
        assert_eq!(hud.altitude_m, 150);
        assert_eq!(hud.torch, 2);
        assert_eq!(hud.clock, "00:00");
    }

    #[test]
    fn input_bytes_are_decoded() {
        let mut game = started_game(&[PlatformKind::Ground]);
        let data = rmp_serde::to_vec(&ClimbInput {
            right: true,
            ..Default::default()
        })
        .unwrap();
        game.apply_input(&data);
        let x = game.state.player.x;
        game.update(FRAME_DT);
        assert_eq!(game.state.player.x, x + physics::MOVE_SPEED);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let game = MountainClimb::new(seeded_config(5));
        let json = serde_json::to_value(game.state()).unwrap();
        assert_eq!(json["phase"], "NotStarted");
        assert_eq!(json["inventory"]["pickaxe"], 1);
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================

    #[test]
    fn contract_start_produces_state() {
        let mut game = MountainClimb::new(seeded_config(1));
        summit_core::test_helpers::contract_start_produces_state(&mut game);
    }

    #[test]
    fn contract_update_advances_state() {
        let mut game = started_game(&[PlatformKind::Ground]);
        summit_core::test_helpers::contract_update_advances_state(&mut game);
    }

    #[test]
    fn contract_apply_input_changes_state() {
        let mut game = started_game(&[PlatformKind::Ground]);
        let data = rmp_serde::to_vec(&ClimbInput {
            left: true,
            ..Default::default()
        })
        .unwrap();
        summit_core::test_helpers::contract_apply_input_changes_state(&mut game, &data);
    }

    #[test]
    fn contract_garbage_input_ignored() {
        let mut game = started_game(&[PlatformKind::Ground]);
        summit_core::test_helpers::contract_garbage_input_ignored(&mut game);
    }

    #[test]
    fn contract_state_roundtrip_preserves() {
        let mut game = started_game(&[PlatformKind::Ground]);
        run_frames(&mut game, 10, FRAME_DT);
        summit_core::test_helpers::contract_state_roundtrip_preserves(&mut game);
    }

    #[test]
    fn contract_pause_stops_updates() {
        let mut game = started_game(&[PlatformKind::Ground]);
        summit_core::test_helpers::contract_pause_stops_updates(&mut game);
    }

    #[test]
    fn truncated_state_is_ignored() {
        let mut game = started_game(&[PlatformKind::Ground]);
        let state = game.serialize_state();
        let before = game.state.clone();
        game.apply_state(&state[..state.len() / 2]);
        assert_eq!(game.state, before);
    }

    // ================================================================
    // Property-based tests (proptest)
    // ================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn input_strategy() -> impl Strategy<Value = ClimbInput> {
            (
                any::<bool>(),
                any::<bool>(),
                any::<bool>(),
                any::<bool>(),
                proptest::bool::weighted(0.05),
            )
                .prop_map(|(left, right, jump, sprint, interact)| ClimbInput {
                    left,
                    right,
                    jump,
                    sprint,
                    interact,
                })
        }

        proptest! {
            #[test]
            fn session_invariants_hold(
                seed in 0u64..200,
                inputs in proptest::collection::vec(input_strategy(), 50..400)
            ) {
                let mut game = MountainClimb::new(seeded_config(seed));
                game.start();

                let mut last_altitude = 0.0f32;
                let mut explored = vec![false; game.state.world.caves.len()];
                let mut collected = vec![false; game.state.world.collectibles.len()];
                let mut world_seed = game.state.world.seed;

                for input in inputs {
                    game.queue_input(input);
                    game.update(FRAME_DT);
                    let state = game.state();

                    if state.world.seed != world_seed {
                        // Reset after a fall: fresh bookkeeping.
                        world_seed = state.world.seed;
                        last_altitude = 0.0;
                        explored = vec![false; state.world.caves.len()];
                        collected = vec![false; state.world.collectibles.len()];
                    }

                    prop_assert!(state.altitude >= last_altitude);
                    last_altitude = state.altitude;

                    prop_assert!(state.player.x >= 0.0);
                    prop_assert!(state.player.x <= world_gen::WORLD_WIDTH - state.player.width);

                    for (seen, cave) in explored.iter_mut().zip(&state.world.caves) {
                        prop_assert!(!*seen || cave.explored, "Explored flag reverted");
                        *seen = cave.explored;
                    }
                    for (seen, item) in collected.iter_mut().zip(&state.world.collectibles) {
                        prop_assert!(!*seen || item.collected, "Collected flag reverted");
                        *seen = item.collected;
                    }
                }
            }
        }
    }
}
