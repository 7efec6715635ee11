use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use csv_charts::parser::{parse, parse_path};
use csv_charts::recommend::{default_config, recommend};
use csv_charts::reshape::reshape;
use csv_charts::schema::infer_schema;
use csv_charts::session::Session;
use csv_charts::sort::{SortState, sorted_rows};
use csv_charts::upload::UploadedFile;
use csv_charts::{ChartConfig, ChartKind};
use tempfile::TempDir;

fn generate_sales(rows: usize) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let csv_path = temp_dir.path().join("sales.csv");
    let mut file = File::create(&csv_path).expect("create csv");
    writeln!(file, "region,units,revenue,note").expect("header");
    for i in 0..rows {
        let region = match i % 4 {
            0 => "North",
            1 => "South",
            2 => "East",
            _ => "West",
        };
        let units = if i % 17 == 0 {
            String::new()
        } else {
            (i % 250).to_string()
        };
        writeln!(
            file,
            "{region},{units},{}.{:02},\"row {i}, batch {}\"",
            i * 3,
            i % 100,
            i / 1000
        )
        .expect("row");
    }
    (temp_dir, csv_path)
}

fn bench_pipeline(c: &mut Criterion) {
    let (temp_dir, csv_path) = generate_sales(20_000);
    let bytes = std::fs::read(&csv_path).expect("read csv");
    let dataset = parse_path(&csv_path).expect("parse");
    let schema = infer_schema(&dataset);

    let mut group = c.benchmark_group("pipeline");

    group.bench_function("parse", |b| {
        b.iter(|| parse(bytes.as_slice()).expect("parse"));
    });

    group.bench_function("infer_and_recommend", |b| {
        b.iter(|| {
            let schema = infer_schema(&dataset);
            default_config(recommend(&schema), &schema)
        });
    });

    let pie = ChartConfig::new(
        ChartKind::Pie,
        "Units by region",
        Some("region".to_string()),
        vec!["units".to_string()],
        &schema,
    )
    .expect("pie config");
    group.bench_function("reshape_pie", |b| {
        b.iter(|| reshape(&dataset, &pie).len());
    });

    let sort = SortState::request(None, "units");
    group.bench_function("sort_rows", |b| {
        b.iter(|| sorted_rows(&dataset, Some(&sort)).len());
    });

    group.bench_function("session_upload", |b| {
        b.iter_batched(
            || vec![UploadedFile::new("sales.csv", bytes.clone())],
            |files| {
                let mut session = Session::new();
                session.upload(files).expect("upload");
            },
            BatchSize::LargeInput,
        );
    });

    drop(temp_dir);
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
