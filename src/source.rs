use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::html_grid::parse_grid_html;
use crate::http_client::fetch_page;
use crate::model::RawGameOdds;

/// Supplies raw per-game scrape records to the pipeline.
pub trait GameSource {
    fn describe(&self) -> String;
    fn scrape(&self) -> Result<Vec<RawGameOdds>>;
}

/// Where a rendered odds grid comes from.
#[derive(Debug, Clone)]
pub enum HtmlInput {
    File(PathBuf),
    Url { url: String, timeout: Duration },
}

#[derive(Debug, Clone)]
pub struct HtmlGridSource {
    input: HtmlInput,
}

impl HtmlGridSource {
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            input: HtmlInput::File(path.into()),
        }
    }

    pub fn from_url(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            input: HtmlInput::Url {
                url: url.into(),
                timeout,
            },
        }
    }

    fn load_html(&self) -> Result<String> {
        match &self.input {
            HtmlInput::File(path) => fs::read_to_string(path)
                .with_context(|| format!("failed reading html snapshot {}", path.display())),
            HtmlInput::Url { url, timeout } => fetch_page(url, *timeout),
        }
    }
}

impl GameSource for HtmlGridSource {
    fn describe(&self) -> String {
        match &self.input {
            HtmlInput::File(path) => format!("html snapshot {}", path.display()),
            HtmlInput::Url { url, .. } => format!("page {url}"),
        }
    }

    fn scrape(&self) -> Result<Vec<RawGameOdds>> {
        let html = self.load_html()?;
        let games = parse_grid_html(&html)?;
        info!(panels = games.len(), bytes = html.len(), "odds grid walked");
        Ok(games)
    }
}

/// JSON array of raw records, e.g. captured from an earlier scrape.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    path: PathBuf,
}

impl FixtureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GameSource for FixtureSource {
    fn describe(&self) -> String {
        format!("fixture {}", self.path.display())
    }

    fn scrape(&self) -> Result<Vec<RawGameOdds>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed reading fixture {}", self.path.display()))?;
        parse_fixture_json(&raw)
    }
}

pub fn parse_fixture_json(raw: &str) -> Result<Vec<RawGameOdds>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid fixture json")
}
