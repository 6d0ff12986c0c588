use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use summit_core::geometry::{Bounds, Rect};

/// Full world width in units; the player is clamped to it.
pub const WORLD_WIDTH: f32 = 1200.0;
/// Horizontal span rock platforms and ledges are placed within.
pub const PLATFORM_SPAN: f32 = 1000.0;
/// Top edge of the ground platform.
pub const GROUND_Y: f32 = 750.0;
const GROUND_HEIGHT: f32 = 50.0;
/// Number of ascending rock platforms.
pub const ROCK_STEPS: usize = 50;
/// y of the first rock platform.
const FIRST_ROCK_Y: f32 = 700.0;
const ROCK_HEIGHT: f32 = 20.0;
const ROCK_MIN_WIDTH: f32 = 100.0;
const ROCK_MAX_WIDTH: f32 = 300.0;
const STEP_MIN_RISE: f32 = 40.0;
const STEP_MAX_RISE: f32 = 120.0;
/// A ledge is emitted on every Nth rock step.
const LEDGE_EVERY: usize = 5;
const LEDGE_WIDTH: f32 = 150.0;
/// Ledges sit this far below the step height they were emitted at.
const LEDGE_DROP: f32 = 100.0;
/// Summit platform rectangle.
pub const SUMMIT: Rect = Rect::new(400.0, -500.0, 400.0, 50.0);
pub const ROPE_COUNT: usize = 15;
pub const TORCH_COUNT: usize = 10;
/// Collectibles are drawn as small squares of this size.
pub const COLLECTIBLE_SIZE: f32 = 15.0;
const COLLECTIBLE_MIN_X: f32 = 100.0;
const ROPE_MAX_HEIGHT: f32 = 3000.0;
const TORCH_MAX_HEIGHT: f32 = 2500.0;

/// Kinds of static platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Ground,
    Rock,
    Ledge,
    Summit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
}

impl Bounds for Platform {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaveKind {
    Ice,
    Rock,
    Crystal,
}

impl CaveKind {
    pub fn label(&self) -> &'static str {
        match self {
            CaveKind::Ice => "ice",
            CaveKind::Rock => "rock",
            CaveKind::Crystal => "crystal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cave {
    pub rect: Rect,
    pub kind: CaveKind,
    pub explored: bool,
}

impl Bounds for Cave {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// Consumable item kinds that can be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Rope,
    Torch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub x: f32,
    pub y: f32,
    pub kind: ItemKind,
    pub collected: bool,
}

impl Bounds for Collectible {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE)
    }
}

/// Static level layout. Only the `explored`/`collected` flags change after generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub seed: u64,
    pub platforms: Vec<Platform>,
    pub caves: Vec<Cave>,
    pub collectibles: Vec<Collectible>,
}

impl World {
    pub fn summit(&self) -> Option<&Platform> {
        self.platforms
            .iter()
            .find(|p| p.kind == PlatformKind::Summit)
    }

    pub fn platform_count(&self, kind: PlatformKind) -> usize {
        self.platforms.iter().filter(|p| p.kind == kind).count()
    }
}

/// Generate a world from a seed. The same seed always yields the same layout.
///
/// Summit reachability is not checked: the rock staircase is random and may
/// leave gaps wider than a jump.
pub fn generate_world(seed: u64) -> World {
    let mut rng = StdRng::seed_from_u64(seed);
    let world = World {
        seed,
        platforms: generate_platforms(&mut rng),
        caves: generate_caves(),
        collectibles: generate_collectibles(&mut rng),
    };
    tracing::debug!(
        seed,
        platforms = world.platforms.len(),
        collectibles = world.collectibles.len(),
        "Generated world"
    );
    world
}

fn generate_platforms(rng: &mut StdRng) -> Vec<Platform> {
    let mut platforms = Vec::with_capacity(ROCK_STEPS + ROCK_STEPS / LEDGE_EVERY + 2);

    platforms.push(Platform {
        rect: Rect::new(0.0, GROUND_Y, WORLD_WIDTH, GROUND_HEIGHT),
        kind: PlatformKind::Ground,
    });

    let mut current_y = FIRST_ROCK_Y;
    for i in 0..ROCK_STEPS {
        let width = rng.random_range(ROCK_MIN_WIDTH..ROCK_MAX_WIDTH);
        let x = rng.random_range(0.0..PLATFORM_SPAN - width);
        platforms.push(Platform {
            rect: Rect::new(x, current_y, width, ROCK_HEIGHT),
            kind: PlatformKind::Rock,
        });

        current_y -= rng.random_range(STEP_MIN_RISE..STEP_MAX_RISE);

        if i % LEDGE_EVERY == 0 {
            let x = if rng.random_bool(0.5) {
                0.0
            } else {
                PLATFORM_SPAN - LEDGE_WIDTH
            };
            platforms.push(Platform {
                rect: Rect::new(x, current_y + LEDGE_DROP, LEDGE_WIDTH, ROCK_HEIGHT),
                kind: PlatformKind::Ledge,
            });
        }
    }

    platforms.push(Platform {
        rect: SUMMIT,
        kind: PlatformKind::Summit,
    });
    platforms
}

fn generate_caves() -> Vec<Cave> {
    [
        (Rect::new(100.0, 500.0, 300.0, 200.0), CaveKind::Ice),
        (Rect::new(800.0, 200.0, 250.0, 180.0), CaveKind::Rock),
        (Rect::new(200.0, -100.0, 350.0, 220.0), CaveKind::Crystal),
    ]
    .into_iter()
    .map(|(rect, kind)| Cave {
        rect,
        kind,
        explored: false,
    })
    .collect()
}

fn generate_collectibles(rng: &mut StdRng) -> Vec<Collectible> {
    let mut items = Vec::with_capacity(ROPE_COUNT + TORCH_COUNT);
    for (kind, count, max_height) in [
        (ItemKind::Rope, ROPE_COUNT, ROPE_MAX_HEIGHT),
        (ItemKind::Torch, TORCH_COUNT, TORCH_MAX_HEIGHT),
    ] {
        for _ in 0..count {
            items.push(Collectible {
                x: rng.random_range(COLLECTIBLE_MIN_X..COLLECTIBLE_MIN_X + PLATFORM_SPAN),
                y: -rng.random_range(0.0..max_height),
                kind,
                collected: false,
            });
        }
    }
    items
}
