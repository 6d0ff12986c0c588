use std::time::Duration;

use summit_climb::MountainClimb;
use summit_climb::events::ClimbEvent;
use summit_climb::physics::ClimbInput;
use summit_climb::summary::RunSummary;
use summit_core::events::{Notify, Priority};
use summit_core::game_trait::FrameGame;

use crate::config::RunnerConfig;

/// Used when the configured tick rate is not a positive number.
const FALLBACK_TICK_RATE: f32 = 60.0;

/// What happened over one scheduler run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub frames: u64,
    pub completed: bool,
    /// Fall resets seen during the run.
    pub resets: u32,
    pub summary: Option<RunSummary>,
}

/// Drive a session frame by frame until it finishes, the frame cap is hit,
/// or the process is interrupted.
///
/// Each frame asks `next_input` for the current input, feeds it through the
/// game's byte-level input path, advances the game by one fixed step and logs
/// the resulting events.
pub async fn run_session<F>(
    game: &mut MountainClimb,
    mut next_input: F,
    config: &RunnerConfig,
) -> RunReport
where
    F: FnMut(&MountainClimb) -> ClimbInput,
{
    let mut report = RunReport::default();

    let meta = game.metadata();
    tracing::info!(name = %meta.name, "{}", meta.description);
    for event in game.start() {
        log_event(&event);
    }

    let tick_rate = match game.tick_rate() {
        rate if rate.is_finite() && rate > 0.0 => rate,
        rate => {
            tracing::warn!("Invalid tick rate {rate}, using {FALLBACK_TICK_RATE} Hz");
            FALLBACK_TICK_RATE
        },
    };
    let dt = 1.0 / tick_rate;
    let mut interval = tokio::time::interval(Duration::from_secs_f32(dt));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    while report.frames < config.max_frames {
        if config.realtime {
            tokio::select! {
                _ = interval.tick() => {},
                _ = &mut shutdown => {
                    tracing::info!("Interrupted, stopping run");
                    break;
                }
            }
        } else {
            tokio::task::yield_now().await;
        }

        let input = next_input(game);
        match rmp_serde::to_vec(&input) {
            Ok(bytes) => game.apply_input(&bytes),
            Err(e) => tracing::error!("Failed to encode input: {e}"),
        }

        report.frames += 1;
        for event in game.update(dt) {
            log_event(&event);
            match event {
                ClimbEvent::SessionReset { .. } => report.resets += 1,
                ClimbEvent::ShowSummary(summary) => report.summary = Some(summary),
                _ => {},
            }
        }
        report.completed = game.is_complete();

        if config.stop_on_summary && report.summary.is_some() {
            break;
        }
    }

    report
}

fn log_event(event: &ClimbEvent) {
    let Some(message) = event.message() else {
        tracing::trace!(?event, "Event");
        return;
    };
    match event.priority() {
        Priority::Ambient => tracing::debug!("{message}"),
        priority => tracing::info!(?priority, "{message}"),
    }
}
