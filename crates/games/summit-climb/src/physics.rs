use serde::{Deserialize, Serialize};

use summit_core::geometry::{Bounds, Rect};

use crate::world_gen::{PlatformKind, WORLD_WIDTH, World};

/// Gravity added to vertical velocity every tick (units/tick^2, downward).
pub const GRAVITY: f32 = 0.8;
/// Vertical velocity set by a jump (negative is up).
pub const JUMP_IMPULSE: f32 = -16.0;
/// Walking speed (units/tick).
pub const MOVE_SPEED: f32 = 5.0;
/// Sprinting speed (units/tick).
pub const RUN_SPEED: f32 = 8.0;
/// Vertical velocity set by using a rope.
pub const ROPE_IMPULSE: f32 = -20.0;
pub const PLAYER_WIDTH: f32 = 30.0;
pub const PLAYER_HEIGHT: f32 = 50.0;
pub const PLAYER_START_X: f32 = 400.0;
pub const PLAYER_START_Y: f32 = 700.0;
pub const PLAYER_MAX_HEALTH: f32 = 100.0;

/// Tunable movement parameters, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    pub gravity: f32,
    pub jump_impulse: f32,
    pub move_speed: f32,
    pub run_speed: f32,
    pub rope_impulse: f32,
    pub world_width: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            move_speed: MOVE_SPEED,
            run_speed: RUN_SPEED,
            rope_impulse: ROPE_IMPULSE,
            world_width: WORLD_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The climber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub health: f32,
    pub max_health: f32,
    /// Airborne flag; jumping is only allowed while this is false.
    pub jumping: bool,
    pub facing: Facing,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            jumping: false,
            facing: Facing::Right,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_START_X, PLAYER_START_Y)
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Logical input actions for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClimbInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub sprint: bool,
    /// Edge-triggered: true only on the frame the interact key went down.
    pub interact: bool,
}

impl ClimbInput {
    /// Fold a newer snapshot into this one. Held actions take the newest
    /// value; `interact` stays set until the frame consumes it.
    pub fn merge(&mut self, newer: ClimbInput) {
        self.left = newer.left;
        self.right = newer.right;
        self.jump = newer.jump;
        self.sprint = newer.sprint;
        self.interact |= newer.interact;
    }
}

/// What happened to the player during one physics step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// The player landed on at least one platform.
    pub landed: bool,
    pub landed_on_summit: bool,
}

/// Advance the player by one tick and resolve platform landings.
pub fn step_player(
    player: &mut Player,
    input: &ClimbInput,
    world: &World,
    params: &PhysicsParams,
) -> StepOutcome {
    apply_movement_input(player, input, params);

    player.x += player.vx;
    player.y += player.vy;

    // Gravity lands after integration, so it shows up in next tick's displacement.
    player.vy += params.gravity;

    clamp_to_world(player, params.world_width);

    resolve_landings(player, world)
}

fn apply_movement_input(player: &mut Player, input: &ClimbInput, params: &PhysicsParams) {
    let speed = if input.sprint {
        params.run_speed
    } else {
        params.move_speed
    };

    player.vx = 0.0;
    if input.left {
        player.vx = -speed;
        player.facing = Facing::Left;
    }
    if input.right {
        player.vx = speed;
        player.facing = Facing::Right;
    }

    if input.jump && !player.jumping {
        player.vy = params.jump_impulse;
        player.jumping = true;
    }
}

pub(crate) fn clamp_to_world(player: &mut Player, world_width: f32) {
    let max_x = (world_width - player.width).max(0.0);
    player.x = player.x.clamp(0.0, max_x);
}

pub(crate) fn resolve_landings(player: &mut Player, world: &World) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    player.jumping = true;

    for platform in &world.platforms {
        if !player.overlaps(platform) {
            continue;
        }
        if player.vy > 0.0 && player.bottom() > platform.rect.y {
            player.y = platform.rect.y - player.height;
            player.vy = 0.0;
            player.jumping = false;
            outcome.landed = true;
            if platform.kind == PlatformKind::Summit {
                outcome.landed_on_summit = true;
            }
        }
    }

    outcome
}
