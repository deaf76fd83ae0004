use serde::{Deserialize, Serialize};

/// Marker the grid renders for a market with no posted line.
pub const NOT_AVAILABLE: &str = "N/A";
pub const FULL_GAME: &str = "FULL GAME";
pub const TOTAL_TEAM: &str = "total";

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// One team row of a game panel, cells exactly as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamOdds {
    #[serde(default)]
    pub name: String,
    #[serde(default = "not_available")]
    pub moneyline: String,
    #[serde(default = "not_available")]
    pub spread: String,
    #[serde(default = "not_available", alias = "over-under", alias = "over_under")]
    pub total: String,
}

impl TeamOdds {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            moneyline: not_available(),
            spread: not_available(),
            total: not_available(),
        }
    }

    pub fn with_cells(
        name: impl Into<String>,
        moneyline: impl Into<String>,
        spread: impl Into<String>,
        total: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            moneyline: moneyline.into(),
            spread: spread.into(),
            total: total.into(),
        }
    }
}

/// Raw scrape record for one game panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGameOdds {
    #[serde(default)]
    pub league: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub teams: Vec<TeamOdds>,
}

impl RawGameOdds {
    pub fn team_names(&self) -> Vec<&str> {
        self.teams.iter().map(|t| t.name.as_str()).collect()
    }

    /// Compact `moneyline|spread|total` dump of every team row, for log context.
    pub fn cells_summary(&self) -> String {
        self.teams
            .iter()
            .map(|t| {
                format!(
                    "{}: {}|{}|{}",
                    t.name,
                    t.moneyline.replace('\n', " "),
                    t.spread.replace('\n', " "),
                    t.total.replace('\n', " ")
                )
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    #[serde(rename = "moneyline")]
    Moneyline,
    #[serde(rename = "spread")]
    Spread,
    #[serde(rename = "over/under")]
    OverUnder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TotalSide {
    Over,
    Under,
}

impl TotalSide {
    pub fn label(self) -> &'static str {
        match self {
            TotalSide::Over => "over",
            TotalSide::Under => "under",
        }
    }
}

/// Flat output record. Field names on the wire follow the scraper's
/// historical JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBetLine {
    #[serde(rename = "sport_league")]
    pub league: String,
    #[serde(rename = "event_date_utc")]
    pub event_time_utc: String,
    pub team1: String,
    pub team2: String,
    #[serde(default)]
    pub pitcher: String,
    pub period: String,
    #[serde(rename = "line_type")]
    pub market: Market,
    // Price token exactly as quoted; None when the cell had no price.
    pub price: Option<String>,
    pub side: String,
    pub team: String,
    pub spread: f64,
}
