use chrono::{NaiveDate, Utc};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::GameError;
use crate::event_time::{normalize_event_time, site_today};
use crate::line_expand::expand_game;
use crate::model::{NormalizedBetLine, RawGameOdds};

/// A game that produced no lines, with enough context to find it on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedGame {
    pub league: String,
    pub date: String,
    pub teams: Vec<String>,
    pub cells: String,
    pub error: GameError,
}

impl SkippedGame {
    fn new(raw: &RawGameOdds, error: GameError) -> Self {
        Self {
            league: raw.league.clone(),
            date: raw.date.clone(),
            teams: raw.team_names().into_iter().map(str::to_string).collect(),
            cells: raw.cells_summary(),
            error,
        }
    }
}

pub type GameOutcome = Result<Vec<NormalizedBetLine>, SkippedGame>;

/// Result of one pass: produced lines grouped by game, plus skipped games.
#[derive(Debug, Clone, Default)]
pub struct PassReport {
    pub games: Vec<Vec<NormalizedBetLine>>,
    pub skipped: Vec<SkippedGame>,
}

impl PassReport {
    pub fn push(&mut self, outcome: GameOutcome) {
        match outcome {
            Ok(lines) => self.games.push(lines),
            Err(skipped) => self.skipped.push(skipped),
        }
    }

    pub fn record_count(&self) -> usize {
        self.games.iter().map(Vec::len).sum()
    }

    pub fn flat_lines(&self) -> Vec<&NormalizedBetLine> {
        self.games.iter().flatten().collect()
    }

    /// Skipped games as (event-time failures, shape failures).
    pub fn skipped_by_kind(&self) -> (usize, usize) {
        self.skipped
            .iter()
            .fold((0, 0), |(parse, shape), s| match s.error {
                GameError::Parse(_) => (parse + 1, shape),
                GameError::Shape(_) => (parse, shape + 1),
            })
    }
}

impl FromIterator<GameOutcome> for PassReport {
    fn from_iter<T: IntoIterator<Item = GameOutcome>>(iter: T) -> Self {
        let mut report = PassReport::default();
        for outcome in iter {
            report.push(outcome);
        }
        report
    }
}

/// Turns raw scrape records into normalized lines, one game at a time.
#[derive(Debug, Clone, Copy)]
pub struct LinePipeline {
    reference_date: NaiveDate,
}

impl LinePipeline {
    /// `reference_date` is the site-local day assumed for times quoted without a date.
    pub fn new(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    pub fn for_today() -> Self {
        Self::new(site_today(Utc::now()))
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn process_game(&self, raw: &RawGameOdds) -> Result<Vec<NormalizedBetLine>, GameError> {
        let event_time_utc = normalize_event_time(&raw.date, self.reference_date)?;
        Ok(expand_game(raw, &event_time_utc)?)
    }

    fn outcome(&self, raw: &RawGameOdds) -> GameOutcome {
        self.process_game(raw).map_err(|err| {
            let skipped = SkippedGame::new(raw, err);
            warn!(
                league = %skipped.league,
                teams = ?skipped.teams,
                date = %skipped.date,
                cells = %skipped.cells,
                kind = skipped.error.kind(),
                "skipping game: {}",
                skipped.error
            );
            skipped
        })
    }

    /// Lazily process games; a failed game yields `Err` and iteration continues.
    pub fn iter<I>(&self, games: I) -> impl Iterator<Item = GameOutcome>
    where
        I: IntoIterator<Item = RawGameOdds>,
    {
        let pipeline = *self;
        games.into_iter().map(move |raw| pipeline.outcome(&raw))
    }

    pub fn run<I>(&self, games: I) -> PassReport
    where
        I: IntoIterator<Item = RawGameOdds>,
    {
        let report: PassReport = self.iter(games).collect();
        log_summary(&report);
        report
    }

    /// Same as [`run`](Self::run) but spreads games over the rayon pool.
    /// Output order matches input order.
    pub fn run_parallel(&self, games: &[RawGameOdds]) -> PassReport {
        let outcomes: Vec<GameOutcome> = games.par_iter().map(|raw| self.outcome(raw)).collect();
        let report: PassReport = outcomes.into_iter().collect();
        log_summary(&report);
        report
    }
}

fn log_summary(report: &PassReport) {
    let (parse_failures, shape_failures) = report.skipped_by_kind();
    info!(
        games = report.games.len(),
        records = report.record_count(),
        skipped = report.skipped.len(),
        parse_failures,
        shape_failures,
        "pass complete"
    );
}
