use std::env;

use anyhow::Context;
use graphics3d::Config;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => {
            Config::load(&path).with_context(|| format!("loading config from {path}"))?
        }
        None => {
            log::info!("No config file given; using defaults");
            Config::default()
        }
    };

    graphics3d::app::run(&config).context("running the demo")?;
    Ok(())
}
