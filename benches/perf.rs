use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use chrono::NaiveDate;

use veribet_odds::html_grid::parse_grid_html;
use veribet_odds::line_expand::expand_game;
use veribet_odds::model::{RawGameOdds, TeamOdds};
use veribet_odds::odds_cell::parse_odds_cell;
use veribet_odds::pipeline::LinePipeline;

const GRID_HTML: &str = include_str!("../tests/fixtures/odds_grid.html");

fn sample_games(n: usize) -> Vec<RawGameOdds> {
    (0..n)
        .map(|idx| RawGameOdds {
            league: "MLB".to_string(),
            date: if idx % 2 == 0 {
                "7:05 PM ET (04/12/2024)".to_string()
            } else {
                "1:10 PM ET".to_string()
            },
            teams: vec![
                TeamOdds::with_cells(
                    format!("Home {idx}"),
                    "-150",
                    "-1½\n(+120)",
                    "O 8½\n(-110)",
                ),
                TeamOdds::with_cells(format!("Away {idx}"), "+130", "+1½\n(-140)", "N/A"),
            ],
        })
        .collect()
}

fn bench_cell_parse(c: &mut Criterion) {
    c.bench_function("odds_cell_parse", |b| {
        b.iter(|| {
            let cell = parse_odds_cell(black_box("O 7½\n(-110)"));
            black_box(cell.spread);
        })
    });
}

fn bench_expand(c: &mut Criterion) {
    let game = sample_games(1).remove(0);
    c.bench_function("expand_game", |b| {
        b.iter(|| {
            let lines = expand_game(black_box(&game), "2024-04-12T14:05:00+00:00").unwrap();
            black_box(lines.len());
        })
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let games = sample_games(500);
    let pipeline = LinePipeline::new(NaiveDate::from_ymd_opt(2024, 4, 12).unwrap());
    c.bench_function("pipeline_run_500", |b| {
        b.iter(|| {
            let report = pipeline.run(black_box(games.clone()));
            black_box(report.record_count());
        })
    });
    c.bench_function("pipeline_run_parallel_500", |b| {
        b.iter(|| {
            let report = pipeline.run_parallel(black_box(&games));
            black_box(report.record_count());
        })
    });
}

fn bench_grid_walk(c: &mut Criterion) {
    c.bench_function("grid_walk_fixture", |b| {
        b.iter(|| {
            let games = parse_grid_html(black_box(GRID_HTML)).unwrap();
            black_box(games.len());
        })
    });
}

criterion_group!(
    benches,
    bench_cell_parse,
    bench_expand,
    bench_pipeline,
    bench_grid_walk
);
criterion_main!(benches);
