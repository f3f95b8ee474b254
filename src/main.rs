mod app;
mod config;
mod coords;
mod debug;
mod ecs;
mod field;
mod render;
mod sim;
mod swarm;

fn main() {
    env_logger::init();
    log::info!("SlimeGlow starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
