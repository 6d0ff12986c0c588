mod bot;
mod config;
mod scheduler;

use tracing_subscriber::EnvFilter;

use summit_climb::MountainClimb;
use summit_climb::config::ClimbConfig;

use config::RunnerConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let climb_config = ClimbConfig::load();
    let runner_config = RunnerConfig::load();
    tracing::info!(?runner_config, "Summit runner starting");

    let mut game = MountainClimb::new(climb_config);
    let report = scheduler::run_session(
        &mut game,
        |game: &MountainClimb| bot::generate_bot_input(game.state()),
        &runner_config,
    )
    .await;

    if let Some(summary) = report.summary {
        tracing::info!(
            clock = %summary.clock(),
            altitude_m = summary.altitude_meters(),
            items = summary.total_items,
            "Summit summary"
        );
    }

    let hud = game.hud();
    tracing::info!(
        frames = report.frames,
        completed = report.completed,
        resets = report.resets,
        altitude_m = hud.altitude_m,
        clock = %hud.clock,
        rope = hud.rope,
        torch = hud.torch,
        "Run finished"
    );
}
