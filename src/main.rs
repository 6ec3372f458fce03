use anyhow::Result;
use log::LevelFilter;

use gcode_chamber_control::GCodeAnnotator;
use gcode_chamber_control::config::Config;

fn init_logger(level: &str) {
    let filter = level.parse().unwrap_or(LevelFilter::Info);
    env_logger::Builder::from_default_env()
        .filter_level(filter)
        .init();
}

fn main() -> Result<()> {
    // Parse configuration from command line and environment
    let config = Config::from_args_and_env()?;
    init_logger(&config.log_level);

    let gcode_file = config.gcode_file.clone();
    let annotator = GCodeAnnotator::new(config);
    let summary = annotator.run(&gcode_file)?;

    println!(
        "Chamber control commands added. Filament: {}, Chamber: {}°C",
        summary.profile.filament, summary.profile.chamber_temp_c
    );

    Ok(())
}
