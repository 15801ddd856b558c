//! CLI entry point for chromatix.

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr, bail};

use chromatix::cli::Cli;
use chromatix::config::AppConfig;
use chromatix::logging::init_logging;
use chromatix::session::Session;
use chromatix::tui;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            "chromatix",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let config = AppConfig::load(cli.config.as_deref(), &cli.to_config_overrides())
        .wrap_err("Failed to load configuration")?;

    let _guard = init_logging(&config.logging);
    tracing::debug!(?config, "configuration loaded");

    if let Some(ref path) = cli.save_config {
        config
            .save(path)
            .wrap_err_with(|| format!("Failed to write config to {}", path.display()))?;
        eprintln!("Wrote config to {}", path.display());
        return Ok(());
    }

    if cli.reset {
        let mut session = Session::open(&config);
        session.persistence.clear_all();
        let path = session.persistence.store().path().display();
        if session.persistence.is_degraded() {
            bail!("Failed to clear persisted state in {path}");
        }
        eprintln!("Cleared persisted state in {path}");
        return Ok(());
    }

    if cli.list {
        print_swatches(&config);
        return Ok(());
    }

    tui::run(&config)
}

/// Print every swatch with its metadata, marking the persisted selection.
fn print_swatches(config: &AppConfig) {
    let session = Session::open(config);
    let snapshot = session.persistence.load_snapshot();

    for swatch in &config.swatches {
        let mark = if snapshot.selection.contains(&swatch.id) {
            '●'
        } else {
            ' '
        };
        let info = session.catalog.as_ref().and_then(|c| c.find(&swatch.id));
        let name = info.map(|i| i.name.as_str()).unwrap_or(swatch.id.as_str());
        let mood = info
            .filter(|i| !i.mood.is_empty())
            .map(|i| format!(" ({})", i.mood))
            .unwrap_or_default();
        println!(
            "{mark} {:<16} {name}{mood}  {}",
            swatch.id.as_str(),
            swatch.colors.join(" -> ")
        );
    }

    if let Some(gradient) = snapshot.last_gradient {
        println!();
        println!("background: {gradient}");
    }
}
