use tracing::debug;

use crate::model::{NOT_AVAILABLE, TotalSide};

const HALF_POINT: char = '½';

/// Typed view of one rendered odds cell. Unusable fields are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OddsCell {
    pub price: Option<String>,
    pub spread: Option<f64>,
    pub total_side: Option<TotalSide>,
}

/// Split a cell like `"O 7½\n(-110)"` or `"-3.5\n(-120)"` into price and line.
///
/// A single-token cell (`"+150"`) serves as both the line and the price
/// source. Malformed tokens never fail the call; the affected field is left
/// unknown.
pub fn parse_odds_cell(cell: &str) -> OddsCell {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        return OddsCell::default();
    }

    let (total_side, body) = split_total_indicator(trimmed);
    let mut tokens = body.lines().map(str::trim).filter(|t| !t.is_empty());
    let Some(spread_token) = tokens.next() else {
        return OddsCell {
            total_side,
            ..OddsCell::default()
        };
    };
    let price_token = tokens.next().unwrap_or(spread_token);

    let price = parse_price(price_token);
    if price.is_none() {
        debug!(cell = %cell.escape_debug(), token = price_token, "price degraded to unknown");
    }
    let spread = parse_line_value(spread_token);
    if spread.is_none() {
        debug!(cell = %cell.escape_debug(), token = spread_token, "line degraded to unknown");
    }

    OddsCell {
        price,
        spread,
        total_side,
    }
}

fn split_total_indicator(cell: &str) -> (Option<TotalSide>, &str) {
    if let Some(rest) = cell.strip_prefix("O ") {
        return (Some(TotalSide::Over), rest);
    }
    if let Some(rest) = cell.strip_prefix("U ") {
        return (Some(TotalSide::Under), rest);
    }
    (None, cell)
}

fn parse_price(token: &str) -> Option<String> {
    let token = token
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim();
    if token.is_empty() || token == NOT_AVAILABLE {
        None
    } else {
        Some(token.to_string())
    }
}

/// Parse a spread or total line, honoring the half-point glyph.
pub fn parse_line_value(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() || token == NOT_AVAILABLE {
        return None;
    }
    if token.eq_ignore_ascii_case("PK") {
        return Some(0.0);
    }
    token
        .replace(HALF_POINT, ".5")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_available_is_all_unknown() {
        assert_eq!(parse_odds_cell("N/A"), OddsCell::default());
        assert_eq!(parse_odds_cell(""), OddsCell::default());
        assert_eq!(parse_odds_cell("  N/A \n"), OddsCell::default());
    }

    #[test]
    fn over_with_half_point() {
        let cell = parse_odds_cell("O 7½\n(-110)");
        assert_eq!(cell.price.as_deref(), Some("-110"));
        assert_eq!(cell.spread, Some(7.5));
        assert_eq!(cell.total_side, Some(TotalSide::Over));
    }

    #[test]
    fn under_with_whole_number() {
        let cell = parse_odds_cell("U 221\n(+100)");
        assert_eq!(cell.price.as_deref(), Some("+100"));
        assert_eq!(cell.spread, Some(221.0));
        assert_eq!(cell.total_side, Some(TotalSide::Under));
    }

    #[test]
    fn negative_spread() {
        let cell = parse_odds_cell("-3.5\n(-120)");
        assert_eq!(cell.price.as_deref(), Some("-120"));
        assert_eq!(cell.spread, Some(-3.5));
        assert_eq!(cell.total_side, None);
    }

    #[test]
    fn half_glyph_on_signed_spread() {
        let cell = parse_odds_cell("+1½\n(-105)");
        assert_eq!(cell.spread, Some(1.5));
        let cell = parse_odds_cell("-½\n(-105)");
        assert_eq!(cell.spread, Some(-0.5));
    }

    #[test]
    fn single_token_moneyline() {
        let cell = parse_odds_cell("+150");
        assert_eq!(cell.price.as_deref(), Some("+150"));
        assert_eq!(cell.spread, Some(150.0));
    }

    #[test]
    fn single_token_spread_is_also_the_price() {
        let cell = parse_odds_cell("-3.5");
        assert_eq!(cell.price.as_deref(), Some("-3.5"));
        assert_eq!(cell.spread, Some(-3.5));

        let cell = parse_odds_cell("-3½");
        assert_eq!(cell.price.as_deref(), Some("-3½"));
        assert_eq!(cell.spread, Some(-3.5));
    }

    #[test]
    fn crlf_line_breaks() {
        let cell = parse_odds_cell("-7\r\n(-110)");
        assert_eq!(cell.price.as_deref(), Some("-110"));
        assert_eq!(cell.spread, Some(-7.0));
    }

    #[test]
    fn malformed_tokens_degrade() {
        let cell = parse_odds_cell("abc\n(xyz)");
        assert_eq!(cell.price.as_deref(), Some("xyz"));
        assert_eq!(cell.spread, None);

        let cell = parse_odds_cell("-4\n(N/A)");
        assert_eq!(cell.price, None);
        assert_eq!(cell.spread, Some(-4.0));

        let cell = parse_odds_cell("nan\n(-110)");
        assert_eq!(cell.spread, None);
        assert_eq!(cell.price.as_deref(), Some("-110"));
    }

    #[test]
    fn pick_em_and_even_money() {
        let cell = parse_odds_cell("PK\n(EVEN)");
        assert_eq!(cell.spread, Some(0.0));
        assert_eq!(cell.price.as_deref(), Some("EVEN"));
    }

    #[test]
    fn over_without_price_line() {
        let cell = parse_odds_cell("O 8");
        assert_eq!(cell.total_side, Some(TotalSide::Over));
        assert_eq!(cell.spread, Some(8.0));
        assert_eq!(cell.price.as_deref(), Some("8"));
    }
}
