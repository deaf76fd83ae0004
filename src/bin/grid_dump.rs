use std::path::PathBuf;

use anyhow::{Context, Result};

use veribet_odds::source::{GameSource, HtmlGridSource};

// Dumps the raw panels of a rendered grid as fixture JSON, without normalizing.
fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ODDS_HTML").ok())
        .map(PathBuf::from)
        .context("usage: grid_dump <snapshot.html> (or set ODDS_HTML)")?;

    let source = HtmlGridSource::from_file(path);
    let games = source.scrape()?;
    let json = serde_json::to_string_pretty(&games).context("serialize raw panels")?;
    println!("{json}");

    let short = games.iter().filter(|g| g.teams.len() != 2).count();
    eprintln!("{} panels from {} ({short} without two team rows)", games.len(), source.describe());
    Ok(())
}
