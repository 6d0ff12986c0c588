use serde::{Deserialize, Serialize};

use summit_core::events::{Notify, Priority};

use crate::summary::RunSummary;
use crate::world_gen::{CaveKind, ItemKind};

/// Events emitted by the session for HUD and dialog presenters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClimbEvent {
    /// The run started from the title state.
    Welcome,
    CaveDiscovered { kind: CaveKind },
    ItemCollected { kind: ItemKind },
    RopeUsed { remaining: u32 },
    /// Landed on the summit; the summary follows after a short delay.
    SummitReached,
    ShowSummary(RunSummary),
    /// Fell below the mountain; the session resets after a short delay.
    Fell,
    SessionReset { seed: u64 },
}

impl Notify for ClimbEvent {
    fn priority(&self) -> Priority {
        match self {
            ClimbEvent::ItemCollected { .. } | ClimbEvent::SessionReset { .. } => {
                Priority::Ambient
            },
            ClimbEvent::Welcome | ClimbEvent::CaveDiscovered { .. } | ClimbEvent::RopeUsed { .. } => {
                Priority::Notice
            },
            ClimbEvent::SummitReached | ClimbEvent::ShowSummary(_) | ClimbEvent::Fell => {
                Priority::Urgent
            },
        }
    }

    fn message(&self) -> Option<String> {
        match self {
            ClimbEvent::Welcome => Some(
                "Welcome, climber! Reach the top of the mountain. Use the platforms to climb \
                 and explore caves to find equipment."
                    .to_string(),
            ),
            ClimbEvent::CaveDiscovered { kind } => Some(format!(
                "You discovered a {} cave! You found useful equipment.",
                kind.label()
            )),
            ClimbEvent::RopeUsed { .. } => {
                Some("You used a rope to reach higher ground!".to_string())
            },
            ClimbEvent::SummitReached => Some("You reached the summit!".to_string()),
            ClimbEvent::ShowSummary(summary) => Some(format!(
                "Time {} | Altitude {}m | Items {}",
                summary.clock(),
                summary.altitude_meters(),
                summary.total_items
            )),
            ClimbEvent::Fell => Some("You fell! Better luck on the next climb.".to_string()),
            ClimbEvent::ItemCollected { .. } | ClimbEvent::SessionReset { .. } => None,
        }
    }
}
