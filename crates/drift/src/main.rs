mod app;
mod frame_clock;
mod logging;

use drift_config::Config;

use crate::app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    if let Some(path) = logging::init() {
        log::info!(
            "drift {} starting, logging to {}",
            env!("CARGO_PKG_VERSION"),
            path.display()
        );
    }

    // A config that failed to load is never overwritten.
    let (config, config_path) = match Config::load() {
        Ok(config) => (config, Config::default_path()),
        Err(e) => {
            log::warn!("{e}; falling back to defaults");
            (Config::default(), None)
        }
    };

    let terminal = ratatui::init();
    let result = App::new(config, config_path).run(terminal);
    ratatui::restore();
    result
}
