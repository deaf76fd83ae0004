use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::model::{RawGameOdds, TeamOdds};

// Each bet row carries exactly these cells, in this order.
const BET_CELL_WIDTH: &str = "54";
const BET_CELLS_PER_ROW: usize = 3;

struct GridSelectors {
    rows: Selector,
    panels: Selector,
    league: Selector,
    date: Selector,
    team_names: Selector,
    bet_rows: Selector,
}

impl GridSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            rows: selector("#odds-picks > tbody > tr")?,
            panels: selector(r#"div[class="col col-md"]"#)?,
            league: selector("span.text-muted.text-wrap.text-left > a")?,
            date: selector("span.badge-light.text-wrap.text-left")?,
            team_names: selector(r#"a[href*="betting-trends"] > span.text-muted"#)?,
            bet_rows: selector(
                "table > tbody > tr:nth-child(2), table > tbody > tr:nth-child(3)",
            )?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {css:?}: {e:?}"))
}

/// Walk a rendered odds grid and recover one raw record per game panel.
///
/// League and date badges are only printed on the first panel of a group, so
/// both carry over until a panel shows a new one. A panel yields one team per
/// complete bet row; named teams without bet rows are not invented, so the
/// game is rejected downstream for its shape.
pub fn parse_grid_html(html: &str) -> Result<Vec<RawGameOdds>> {
    let sel = GridSelectors::new()?;
    let doc = Html::parse_document(html);

    let mut league = String::new();
    let mut date = String::new();
    let mut games = Vec::new();

    for row in doc.select(&sel.rows) {
        for panel in row.select(&sel.panels) {
            if let Some(el) = panel.select(&sel.league).next() {
                league = inline_text(el);
            }
            if let Some(el) = panel.select(&sel.date).next() {
                date = inline_text(el);
            }

            let names: Vec<String> = panel
                .select(&sel.team_names)
                .filter(|el| in_unsized_cell(*el, panel))
                .map(inline_text)
                .filter(|n| !n.is_empty())
                .collect();

            let mut teams = Vec::new();
            for (idx, bet_row) in panel.select(&sel.bet_rows).enumerate() {
                let cells: Vec<String> = bet_row
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|td| {
                        td.value().name() == "td"
                            && td.value().attr("width") == Some(BET_CELL_WIDTH)
                    })
                    .map(cell_text)
                    .collect();
                let [moneyline, spread, total] = <[String; BET_CELLS_PER_ROW]>::try_from(cells)
                    .map_err(|cells| cells.len())
                    .unwrap_or_else(|found| {
                        warn!(%league, found, "unexpected number of bet cells in row, dropping");
                        Default::default()
                    });
                if moneyline.is_empty() && spread.is_empty() && total.is_empty() {
                    continue;
                }
                let name = names.get(idx).cloned().unwrap_or_default();
                teams.push(TeamOdds::with_cells(name, moneyline, spread, total));
            }

            if teams.is_empty() && names.is_empty() {
                debug!(%league, "panel without teams or bet rows");
                continue;
            }
            if teams.is_empty() {
                debug!(%league, teams = ?names, "panel without bet rows");
            }

            games.push(RawGameOdds {
                league: league.clone(),
                date: date.clone(),
                teams,
            });
        }
    }

    Ok(games)
}

// Team links count only when their nearest cell inside the panel is unsized;
// sized cells hold odds.
fn in_unsized_cell(el: ElementRef<'_>, panel: ElementRef<'_>) -> bool {
    let panel_node = *panel;
    (*el)
        .ancestors()
        .take_while(|node| *node != panel_node)
        .filter_map(ElementRef::wrap)
        .find(|node| node.value().name() == "td")
        .is_some_and(|td| td.value().attr("width").is_none())
}

/// Visible text of a bet cell, one rendered line per text node.
fn cell_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn inline_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
