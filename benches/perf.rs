use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use lol_profiles::profile::{PlacementRow, build_trophies_and_timeline, champion_image_name};
use lol_profiles::query::parse_cargo_rows;

static SCOREBOARDS_JSON: &str = include_str!("../tests/fixtures/cargo_scoreboards.json");
static PLACEMENTS_JSON: &str = include_str!("../tests/fixtures/cargo_placements.json");

fn synthetic_placements(n: usize) -> Vec<PlacementRow> {
    (0..n)
        .map(|idx| PlacementRow {
            overview_page: format!("{}_Split_{}", 2010 + (idx % 15), idx),
            team: "T1".to_string(),
            role: "Mid".to_string(),
            place: if idx % 7 == 0 { "1" } else { "2" }.to_string(),
        })
        .collect()
}

fn bench_cargo_rows_parse(c: &mut Criterion) {
    c.bench_function("cargo_rows_parse", |b| {
        b.iter(|| {
            let rows = parse_cargo_rows(black_box(SCOREBOARDS_JSON)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_placements_parse(c: &mut Criterion) {
    c.bench_function("placements_parse", |b| {
        b.iter(|| {
            let rows = parse_cargo_rows(black_box(PLACEMENTS_JSON)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_trophies_timeline(c: &mut Criterion) {
    let placements = synthetic_placements(500);
    c.bench_function("trophies_timeline", |b| {
        b.iter(|| {
            let shaped = build_trophies_and_timeline(black_box(&placements));
            black_box(shaped.timeline.len());
        })
    });
}

fn bench_champion_image_name(c: &mut Criterion) {
    c.bench_function("champion_image_name", |b| {
        b.iter(|| {
            black_box(champion_image_name(black_box("Dr. Mundo")));
        })
    });
}

criterion_group!(
    perf,
    bench_cargo_rows_parse,
    bench_placements_parse,
    bench_trophies_timeline,
    bench_champion_image_name
);
criterion_main!(perf);
