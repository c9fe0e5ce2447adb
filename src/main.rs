use anyhow::Result;
use tracing::info;

use pkl_stats::analysis;
use pkl_stats::config::AppConfig;
use pkl_stats::logging::init_tracing;
use pkl_stats::viewer::show_figure;

fn main() {
    let config = AppConfig::from_env();
    init_tracing();
    if let Err(err) = run(&config) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(config: &AppConfig) -> Result<()> {
    info!(
        matches = %config.match_file.display(),
        players = %config.player_file.display(),
        charts = config.show_charts,
        "starting analysis"
    );
    if config.show_charts {
        analysis::run(config, show_figure)?;
    } else {
        analysis::run(config, |_| Ok(()))?;
    }
    info!("done");
    Ok(())
}
