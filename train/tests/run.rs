use std::fmt::Write as _;
use std::path::Path;

use clap::Parser;
use train::{Config, run};

/// Feature file where the target is a noisy linear function of two columns.
fn write_features(path: &Path, n: usize) {
    let mut content = String::from("Date,MA_5,RSI_14,Volume,LogReturn\n");
    for i in 0..n {
        let ma = 100.0 + ((i * 7) % 23) as f64;
        let rsi = 30.0 + ((i * 11) % 41) as f64;
        let noise = if i % 2 == 0 { 1e-4 } else { -1e-4 };
        let target = 0.001 * (ma - 110.0) - 0.0005 * (rsi - 50.0) + noise;
        writeln!(content, "{},{},{},{},{}", i, ma, rsi, 1000 + i, target).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn config(input: &Path, extra: &[&str]) -> Config {
    let mut args = vec!["train", "--input", input.to_str().unwrap()];
    args.extend_from_slice(extra);
    Config::try_parse_from(args).unwrap()
}

#[test]
fn test_ridge_on_linear_target() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("features.csv");
    write_features(&input, 200);

    let config = config(&input, &["--features", "MA_5", "RSI_14", "--model", "ridge"]);
    config.validate().unwrap();
    let eval = run(&config).unwrap();

    assert_eq!(eval.n_test, 40);
    assert!(eval.r2 > 0.99, "r2 = {}", eval.r2);
    assert!(eval.mse < 1e-6);
}

#[test]
fn test_forest_search() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("features.csv");
    write_features(&input, 150);

    let config = config(
        &input,
        &["--features", "MA_5", "RSI_14", "--n-iter", "2", "--cv-splits", "3"],
    );
    let eval = run(&config).unwrap();

    assert_eq!(eval.n_test, 30);
    assert!(eval.r2.is_finite());
    assert!(eval.r2 > 0.0, "r2 = {}", eval.r2);
}

#[test]
fn test_unknown_feature() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("features.csv");
    write_features(&input, 50);

    let config = config(&input, &["--features", "MACD", "--model", "ridge"]);
    let err = run(&config).unwrap_err();
    assert!(format!("{:#}", err).contains("MACD"));
}

#[test]
fn test_too_few_rows_for_folds() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("features.csv");
    write_features(&input, 8);

    let config = config(&input, &["--features", "MA_5", "--cv-splits", "9"]);
    assert!(run(&config).is_err());
}
