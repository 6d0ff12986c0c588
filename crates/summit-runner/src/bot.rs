use summit_climb::physics::{ClimbInput, Player};
use summit_climb::world_gen::{Platform, WORLD_WIDTH};
use summit_climb::{SessionPhase, SessionState};

/// Highest rise (in units) the bot will try to jump. A standing jump clears
/// roughly 160 units, so this leaves a small margin.
const JUMP_REACH: f32 = 150.0;

/// Horizontal slack before the bot stops steering toward its target.
const STEER_DEADZONE: f32 = 10.0;

/// Beyond this horizontal distance the bot sprints.
const SPRINT_DISTANCE: f32 = 100.0;

/// Downward speed that counts as actually falling. A grounded player settles
/// into the platform by one gravity step each other frame.
const FALLING_SPEED: f32 = 2.0;

/// Generate the bot's input for the current frame.
///
/// The bot picks the highest platform it can reach from where its feet are,
/// walks under it and jumps. When airborne with nothing in reach it spends a
/// rope.
pub fn generate_bot_input(state: &SessionState) -> ClimbInput {
    if state.phase != SessionPhase::Running {
        return ClimbInput::default();
    }

    let player = &state.player;
    let center = player.x + player.width / 2.0;

    let Some(target) = reachable_target(player, &state.world.platforms) else {
        if player.jumping && player.vy > FALLING_SPEED {
            return ClimbInput {
                interact: state.inventory.rope > 0,
                ..ClimbInput::default()
            };
        }
        // Stranded on a platform: head for the middle of the mountain and hop.
        let dx = WORLD_WIDTH / 2.0 - center;
        return ClimbInput {
            left: dx < -STEER_DEADZONE,
            right: dx > STEER_DEADZONE,
            jump: true,
            sprint: dx.abs() > SPRINT_DISTANCE,
            interact: false,
        };
    };

    let dx = (target.rect.x + target.rect.width / 2.0) - center;
    ClimbInput {
        left: dx < -STEER_DEADZONE,
        right: dx > STEER_DEADZONE,
        jump: !player.jumping && dx.abs() <= target.rect.width / 2.0,
        sprint: dx.abs() > SPRINT_DISTANCE,
        interact: false,
    }
}

/// The highest platform whose top sits above the player's feet but within jump reach.
fn reachable_target<'a>(player: &Player, platforms: &'a [Platform]) -> Option<&'a Platform> {
    let feet = player.bottom();
    platforms
        .iter()
        .filter(|p| {
            let rise = feet - p.rect.y;
            rise > 1.0 && rise <= JUMP_REACH
        })
        .max_by(|a, b| (feet - a.rect.y).total_cmp(&(feet - b.rect.y)))
}
