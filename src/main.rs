use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use veribet_odds::config::{ScrapeConfig, SourceSpec};
use veribet_odds::output;
use veribet_odds::pipeline::LinePipeline;
use veribet_odds::source::{FixtureSource, GameSource, HtmlGridSource};

fn main() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("config error: {err:#}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_filter))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&cfg) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn load_config() -> Result<ScrapeConfig> {
    let mut cfg = ScrapeConfig::from_env()?;
    cfg.apply_args(std::env::args().skip(1))?;
    Ok(cfg)
}

fn run(cfg: &ScrapeConfig) -> Result<()> {
    let source: Box<dyn GameSource> = match cfg.source() {
        SourceSpec::Fixture(path) => Box::new(FixtureSource::new(path)),
        SourceSpec::HtmlFile(path) => Box::new(HtmlGridSource::from_file(path)),
        SourceSpec::Url(url) => Box::new(HtmlGridSource::from_url(url, cfg.http_timeout)),
    };
    info!(source = %source.describe(), "scraping odds grid");
    let games = source.scrape()?;

    let pipeline = LinePipeline::for_today();
    info!(reference_date = %pipeline.reference_date(), games = games.len(), "normalizing");
    let report = if cfg.parallel {
        pipeline.run_parallel(&games)
    } else {
        pipeline.run(games)
    };

    let written = output::write_json(&cfg.output_path, &report, cfg.layout)?;

    println!("Data saved in '{}'", cfg.output_path.display());
    println!("Total incoming events: {}", report.games.len());
    println!("Records written: {written}");
    if !report.skipped.is_empty() {
        let (parse_failures, shape_failures) = report.skipped_by_kind();
        println!(
            "Skipped games: {} (event time: {parse_failures}, shape: {shape_failures})",
            report.skipped.len()
        );
        for skipped in report.skipped.iter().take(8) {
            println!(
                " - {} {}: {}",
                skipped.league,
                skipped.teams.join(" vs "),
                skipped.error
            );
        }
    }

    Ok(())
}
