use std::fmt::Write as _;
use std::path::Path;

use clap::Parser;
use prep::{Config, run};

fn write_prices(path: &Path, n: usize) {
    let mut content = String::from("Date,Close,Volume\n");
    for i in 0..n {
        let day = 1 + i % 28;
        let month = 1 + (i / 28) % 12;
        let year = 2020 + i / (28 * 12);
        let close = 200.0 + ((i * 7) % 11) as f64 - 5.0;
        writeln!(content, "{}-{:02}-{:02},{},{}", year, month, day, close, 5_000 + i).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn config(args: &[&str]) -> Config {
    Config::try_parse_from(std::iter::once("prep").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_run_writes_dense_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.csv");
    let output = dir.path().join("nested/out/features.csv");
    write_prices(&input, 120);

    let config = config(&[
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);
    let summary = run(&config).unwrap();

    assert_eq!(summary.rows_in, 120);
    assert_eq!(summary.rows_out, 120 - 49);
    // Adj_Close, Volume and 17 derived columns
    assert_eq!(summary.columns, 19);

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 1 + summary.rows_out);
    assert!(written.starts_with("Date,Adj_Close,Volume,LogReturn,"));
}

#[test]
fn test_run_with_short_windows() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.csv");
    let output = dir.path().join("out.csv");
    write_prices(&input, 60);

    let config = config(&[
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--ma-windows",
        "5,20",
        "--lags",
        "1",
    ]);
    let summary = run(&config).unwrap();
    assert_eq!(summary.rows_out, 60 - 33);

    let written = std::fs::read_to_string(&output).unwrap();
    let header = written.lines().next().unwrap();
    assert!(!header.contains("MA_50"));
    assert!(!header.contains("Lag2_LogReturn"));
}

#[test]
fn test_run_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&[
        "--input",
        dir.path().join("nope.csv").to_str().unwrap(),
        "--output",
        dir.path().join("out.csv").to_str().unwrap(),
    ]);
    let err = run(&config).unwrap_err();
    assert!(format!("{:#}", err).contains("nope.csv"));
}

#[test]
fn test_run_without_price_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.csv");
    std::fs::write(&input, "Date,Open\n2020-01-02,1\n").unwrap();

    let config = config(&[
        "--input",
        input.to_str().unwrap(),
        "--output",
        dir.path().join("out.csv").to_str().unwrap(),
    ]);
    assert!(run(&config).is_err());
}
