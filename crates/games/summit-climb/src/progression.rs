use serde::{Deserialize, Serialize};

use summit_core::geometry::Bounds;
use summit_core::time::format_clock;

use crate::events::ClimbEvent;
use crate::physics::Player;
use crate::world_gen::{ItemKind, WORLD_WIDTH, World};

/// Viewport height in world units.
pub const VIEWPORT_HEIGHT: f32 = 800.0;
/// Fraction of the viewport kept above the player.
pub const CAMERA_FOLLOW_RATIO: f32 = 0.7;
/// Ropes granted for exploring a cave.
pub const CAVE_ROPE_REWARD: u32 = 2;
/// Torches granted for exploring a cave.
pub const CAVE_TORCH_REWARD: u32 = 1;
/// Altitude at which the backdrop turns from sky to mountain.
const MOUNTAIN_ZONE_ALTITUDE: f32 = 1000.0;
/// Altitude at which the backdrop turns from mountain to peak.
const PEAK_ZONE_ALTITUDE: f32 = 2000.0;

/// Viewport origin. Follows the player vertically only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: WORLD_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub rope: u32,
    pub torch: u32,
    /// Always 1; the pickaxe is never consumed.
    pub pickaxe: u32,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            rope: 0,
            torch: 0,
            pickaxe: 1,
        }
    }
}

impl Inventory {
    pub fn add(&mut self, kind: ItemKind, count: u32) {
        match kind {
            ItemKind::Rope => self.rope += count,
            ItemKind::Torch => self.torch += count,
        }
    }

    pub fn total_items(&self) -> u32 {
        self.rope + self.torch
    }
}

/// Backdrop band for the renderer, chosen by peak altitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AltitudeZone {
    Sky,
    Mountain,
    Peak,
}

impl AltitudeZone {
    pub fn from_altitude(altitude: f32) -> Self {
        if altitude < MOUNTAIN_ZONE_ALTITUDE {
            AltitudeZone::Sky
        } else if altitude < PEAK_ZONE_ALTITUDE {
            AltitudeZone::Mountain
        } else {
            AltitudeZone::Peak
        }
    }
}

/// Numbers the HUD displays each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    /// Altitude floored to whole meters.
    pub altitude_m: u32,
    pub health: u32,
    /// Elapsed time as `MM:SS`.
    pub clock: String,
    pub rope: u32,
    pub torch: u32,
}

impl HudSnapshot {
    pub fn new(altitude: f32, player: &Player, elapsed_secs: f32, inventory: &Inventory) -> Self {
        Self {
            altitude_m: altitude.max(0.0).floor() as u32,
            health: player.health.max(0.0).floor() as u32,
            clock: format_clock(elapsed_secs),
            rope: inventory.rope,
            torch: inventory.torch,
        }
    }
}

pub fn update_camera(camera: &mut Camera, player: &Player) {
    camera.y = player.y - camera.height * CAMERA_FOLLOW_RATIO;
}

/// Raise `altitude` to the player's distance from `start_y` if that is higher.
pub fn update_altitude(altitude: &mut f32, player: &Player, start_y: f32) {
    let climbed = (player.y - start_y).abs();
    if climbed > *altitude {
        *altitude = climbed;
    }
}

/// Mark caves the player entered for the first time and hand out their rewards.
pub fn discover_caves(world: &mut World, player: &Player, inventory: &mut Inventory) -> Vec<ClimbEvent> {
    let mut events = Vec::new();
    for cave in &mut world.caves {
        if cave.explored || !player.overlaps(cave) {
            continue;
        }
        cave.explored = true;
        inventory.add(ItemKind::Rope, CAVE_ROPE_REWARD);
        inventory.add(ItemKind::Torch, CAVE_TORCH_REWARD);
        tracing::debug!(kind = ?cave.kind, "Cave discovered");
        events.push(ClimbEvent::CaveDiscovered { kind: cave.kind });
    }
    events
}

/// Pick up every uncollected item the player overlaps.
pub fn collect_items(world: &mut World, player: &Player, inventory: &mut Inventory) -> Vec<ClimbEvent> {
    let mut events = Vec::new();
    for item in &mut world.collectibles {
        if item.collected || !player.overlaps(item) {
            continue;
        }
        item.collected = true;
        inventory.add(item.kind, 1);
        events.push(ClimbEvent::ItemCollected { kind: item.kind });
    }
    events
}

/// Spend a rope for a strong upward boost, ignoring jump gating and current
/// vertical velocity. Does nothing without rope.
pub fn use_rope(inventory: &mut Inventory, player: &mut Player, impulse: f32) -> Option<ClimbEvent> {
    if inventory.rope == 0 {
        return None;
    }
    inventory.rope -= 1;
    player.vy = impulse;
    // Airborne, so a held jump key cannot overwrite the boost this frame.
    player.jumping = true;
    Some(ClimbEvent::RopeUsed {
        remaining: inventory.rope,
    })
}

/// True once the player has dropped below the fall threshold.
pub fn has_fallen(player: &Player, fall_threshold_y: f32) -> bool {
    player.y > fall_threshold_y
}
