use std::path::PathBuf;
use std::sync::OnceLock;

use macroquad::prelude::Conf;

use physics_visualizer::config::{DEFAULT_CONFIG_FILE, SimConfig};

mod app;
mod constants;
mod gfx;
mod input;
mod panel;

static CONFIG: OnceLock<SimConfig> = OnceLock::new();

/// Loaded once, before the window opens; the first argument overrides the
/// default config path.
fn config() -> &'static SimConfig {
    CONFIG.get_or_init(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
        let path = std::env::args()
            .nth(1)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
        SimConfig::load_or_default(&path)
    })
}

fn window_conf() -> Conf {
    app::window_conf(config())
}

#[macroquad::main(window_conf)]
async fn main() {
    app::run(config().clone()).await;
}
