use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};

pub const DEFAULT_ODDS_URL: &str = "https://veri.bet/odds-picks?filter=upcoming";
const DEFAULT_OUTPUT: &str = "output.json";
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLayout {
    /// One inner array per game.
    Grouped,
    Flat,
}

impl OutputLayout {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "grouped" | "games" => Ok(OutputLayout::Grouped),
            "flat" => Ok(OutputLayout::Flat),
            other => Err(anyhow!(
                "unsupported layout={other}, expected grouped or flat"
            )),
        }
    }
}

/// Where the raw grid is read from, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Fixture(PathBuf),
    HtmlFile(PathBuf),
    Url(String),
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub url: String,
    pub html_path: Option<PathBuf>,
    pub fixture_path: Option<PathBuf>,
    pub output_path: PathBuf,
    pub layout: OutputLayout,
    pub parallel: bool,
    pub log_filter: String,
    pub http_timeout: Duration,
}

impl ScrapeConfig {
    pub fn from_env() -> Result<Self> {
        let url = env_string("ODDS_URL").unwrap_or_else(|| DEFAULT_ODDS_URL.to_string());
        let layout = match env_string("ODDS_LAYOUT") {
            Some(raw) => OutputLayout::parse(&raw)?,
            None => OutputLayout::Grouped,
        };
        let timeout_secs = env::var("ODDS_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
            .clamp(5, 120);

        Ok(Self {
            url,
            html_path: env_string("ODDS_HTML").map(PathBuf::from),
            fixture_path: env_string("ODDS_FIXTURE").map(PathBuf::from),
            output_path: env_string("ODDS_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            layout,
            parallel: env_bool("ODDS_PARALLEL", false),
            log_filter: env_string("ODDS_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Apply command-line overrides (`--flag value` or `--flag=value`).
    pub fn apply_args<I>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg.clone(), None),
            };
            if flag == "--parallel" {
                self.parallel = true;
                continue;
            }
            if !matches!(
                flag.as_str(),
                "--html" | "--fixture" | "--url" | "--out" | "--layout"
            ) {
                return Err(anyhow!("unknown argument: {arg}"));
            }
            let value = match inline.or_else(|| args.next()) {
                Some(v) if !v.trim().is_empty() => v.trim().to_string(),
                _ => return Err(anyhow!("missing value for {flag}")),
            };
            match flag.as_str() {
                "--html" => self.html_path = Some(PathBuf::from(value)),
                "--fixture" => self.fixture_path = Some(PathBuf::from(value)),
                "--url" => self.url = value,
                "--out" => self.output_path = PathBuf::from(value),
                _ => self.layout = OutputLayout::parse(&value)?,
            }
        }
        Ok(())
    }

    pub fn source(&self) -> SourceSpec {
        if let Some(path) = &self.fixture_path {
            return SourceSpec::Fixture(path.clone());
        }
        if let Some(path) = &self.html_path {
            return SourceSpec::HtmlFile(path.clone());
        }
        SourceSpec::Url(self.url.clone())
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_bool(key: &str, default: bool) -> bool {
    env_string(key).map_or(default, |v| parse_switch(&v))
}

// Blank env values fall back to the default; any other value is on unless it
// spells a negative.
fn parse_switch(value: &str) -> bool {
    !matches!(
        value.to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ScrapeConfig {
        ScrapeConfig {
            url: DEFAULT_ODDS_URL.to_string(),
            html_path: None,
            fixture_path: None,
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            layout: OutputLayout::Grouped,
            parallel: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn args_override_both_forms() {
        let mut cfg = base();
        cfg.apply_args(args(&["--html", "grid.html", "--out=lines.json", "--layout=flat", "--parallel"]))
            .unwrap();
        assert_eq!(cfg.source(), SourceSpec::HtmlFile(PathBuf::from("grid.html")));
        assert_eq!(cfg.output_path, PathBuf::from("lines.json"));
        assert_eq!(cfg.layout, OutputLayout::Flat);
        assert!(cfg.parallel);
    }

    #[test]
    fn fixture_takes_precedence() {
        let mut cfg = base();
        cfg.apply_args(args(&["--html=a.html", "--fixture", "games.json"]))
            .unwrap();
        assert_eq!(cfg.source(), SourceSpec::Fixture(PathBuf::from("games.json")));
    }

    #[test]
    fn defaults_to_url() {
        assert_eq!(base().source(), SourceSpec::Url(DEFAULT_ODDS_URL.to_string()));
    }

    #[test]
    fn rejects_bad_args() {
        assert!(base().apply_args(args(&["--bogus"])).is_err());
        assert!(base().apply_args(args(&["--out"])).is_err());
        assert!(base().apply_args(args(&["--layout", "csv"])).is_err());
    }

    #[test]
    fn switch_values() {
        for on in ["1", "true", "ON", "yes"] {
            assert!(parse_switch(on), "{on}");
        }
        for off in ["0", "False", "off", "NO"] {
            assert!(!parse_switch(off), "{off}");
        }
    }
}
