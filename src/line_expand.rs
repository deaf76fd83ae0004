use crate::error::ShapeError;
use crate::model::{
    FULL_GAME, Market, NormalizedBetLine, RawGameOdds, TOTAL_TEAM, TeamOdds, TotalSide,
};
use crate::odds_cell::parse_odds_cell;

pub const LINES_PER_GAME: usize = 6;

struct GameHeader<'a> {
    league: &'a str,
    event_time_utc: &'a str,
    team1: &'a str,
    team2: &'a str,
}

impl GameHeader<'_> {
    fn line(
        &self,
        market: Market,
        price: Option<String>,
        side: &str,
        team: &str,
        spread: f64,
    ) -> NormalizedBetLine {
        NormalizedBetLine {
            league: self.league.to_string(),
            event_time_utc: self.event_time_utc.to_string(),
            team1: self.team1.to_string(),
            team2: self.team2.to_string(),
            pitcher: String::new(),
            period: FULL_GAME.to_string(),
            market,
            price,
            side: side.to_string(),
            team: team.to_string(),
            spread,
        }
    }
}

/// Expand one game panel into its six full-game lines, in the order
/// moneyline(team1), moneyline(team2), spread(team1), spread(team2), over, under.
///
/// Markets quoted as `N/A` are still emitted, with no price and a zero line.
pub fn expand_game(
    raw: &RawGameOdds,
    event_time_utc: &str,
) -> Result<Vec<NormalizedBetLine>, ShapeError> {
    let [first, second] = raw.teams.as_slice() else {
        return Err(ShapeError::TeamCount {
            found: raw.teams.len(),
        });
    };
    let team1 = first.name.trim();
    let team2 = second.name.trim();
    if team1.is_empty() && team2.is_empty() {
        return Err(ShapeError::UnnamedTeams);
    }

    let header = GameHeader {
        league: raw.league.trim(),
        event_time_utc,
        team1,
        team2,
    };
    let mut lines = Vec::with_capacity(LINES_PER_GAME);

    for market in [Market::Moneyline, Market::Spread] {
        for (team, name) in [(first, team1), (second, team2)] {
            let cell = parse_odds_cell(market_cell(team, market));
            let spread = match market {
                Market::Spread => cell.spread.unwrap_or(0.0),
                _ => 0.0,
            };
            lines.push(header.line(market, cell.price, name, name, spread));
        }
    }

    // Rows without an O/U marker fall back to grid order: over on top.
    for (team, fallback) in [(first, TotalSide::Over), (second, TotalSide::Under)] {
        let cell = parse_odds_cell(&team.total);
        let side = cell.total_side.unwrap_or(fallback);
        lines.push(header.line(
            Market::OverUnder,
            cell.price,
            side.label(),
            TOTAL_TEAM,
            cell.spread.unwrap_or(0.0),
        ));
    }

    Ok(lines)
}

fn market_cell(team: &TeamOdds, market: Market) -> &str {
    match market {
        Market::Moneyline => &team.moneyline,
        Market::Spread => &team.spread,
        Market::OverUnder => &team.total,
    }
}
