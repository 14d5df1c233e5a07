mod app;

use engine::{run_app, LoopConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use app::GameBootstrap;

fn main() {
    init_tracing();
    info!("=== Treads Startup ===");

    let config = LoopConfig {
        window_title: "Treads".to_string(),
        ..LoopConfig::default()
    };
    let bootstrap = GameBootstrap::from_env();

    if let Err(err) = run_app(config, Box::new(bootstrap)) {
        error!(error = %err, "startup_failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
