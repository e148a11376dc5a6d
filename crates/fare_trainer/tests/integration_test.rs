//! Integration tests for the training pipeline
//!
//! Runs the full CSV → bundle → predictor flow on small synthetic datasets.

use airfare_core::{FareError, FarePredictor, ModelBundle};
use airfare_trainer::{run, train_from_csv, TrainerError, TrainingConfig};
use anyhow::Result;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

const HEADER: &str = "Year,quarter,citymarketid_1,city1,city2,passengers,fare_lg,carrier_lg";

/// Fares linear in the category codes, with a few incomplete rows mixed in
fn create_synthetic_dataset() -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "{HEADER}")?;

    let origins = ["Atlanta, GA", "Boston, MA (Metropolitan Area)", "Chicago, IL"];
    let destinations = ["Dallas/Fort Worth, TX", "Miami, FL", "Seattle, WA"];
    let carriers = ["AA", "DL", "WN"];
    for (i, origin) in origins.iter().enumerate() {
        for (j, destination) in destinations.iter().enumerate() {
            for quarter in 1..=4 {
                let k = (i + 2 * j + quarter) % 3;
                let fare = 90.0 + 20.0 * i as f64 + 35.0 * j as f64 + 6.0 * (quarter - 1) as f64
                    + 11.0 * k as f64;
                writeln!(
                    file,
                    "2022,{quarter},3019{i},\"{origin}\",\"{destination}\",{},{fare:.2},{}",
                    100 + i * 10 + j,
                    carriers[k]
                )?;
            }
        }
    }

    writeln!(file, "2022,1,30190,\"Atlanta, GA\",,55,120.00,AA")?;
    writeln!(file, "2022,,30190,\"Atlanta, GA\",\"Miami, FL\",55,120.00,AA")?;
    writeln!(file, "2022,2,30190,\"Atlanta, GA\",\"Miami, FL\",55,,AA")?;

    file.flush()?;
    Ok(file)
}

fn config_for(dataset: &Path, dir: &TempDir) -> TrainingConfig {
    TrainingConfig {
        dataset: dataset.to_path_buf(),
        output: dir.path().join("models").join("fare_bundle.json"),
        ..TrainingConfig::default()
    }
}

#[test]
fn test_pipeline_writes_loadable_bundle() -> Result<()> {
    let file = create_synthetic_dataset()?;
    let dir = tempfile::tempdir()?;
    let config = config_for(file.path(), &dir);

    let (path, outcome) = run(&config)?;

    assert_eq!(outcome.cleaning.rows_read, 39);
    assert_eq!(outcome.cleaning.rows_dropped, 3);
    assert_eq!(outcome.cleaning.rows_kept, 36);
    assert_eq!(outcome.bundle.metadata.test_rows, 8);
    assert_eq!(outcome.bundle.metadata.train_rows, 28);

    let predictor = FarePredictor::load(&path)?;
    assert_eq!(predictor.options().quarters, &[1, 2, 3, 4]);
    assert_eq!(predictor.options().carriers, &["AA", "DL", "WN"]);

    // Atlanta → Dallas/Fort Worth, Q1: k = (0 + 0 + 1) % 3 = 1 → DL, fare 101.
    let fare = predictor.predict_fare("Atlanta, GA", "Dallas/Fort Worth, TX", 1, "DL")?;
    assert!((fare - 101.0).abs() < 1e-6, "predicted {fare}");

    Ok(())
}

#[test]
fn test_repeated_training_is_reproducible() -> Result<()> {
    let file = create_synthetic_dataset()?;
    let config = TrainingConfig {
        dataset: file.path().to_path_buf(),
        ..TrainingConfig::default()
    };

    let first = train_from_csv(file.path(), &config)?;
    let second = train_from_csv(file.path(), &config)?;

    assert_eq!(first.bundle.model, second.bundle.model);
    assert_eq!(first.bundle.encoders, second.bundle.encoders);
    assert_eq!(
        first.bundle.metadata.evaluation,
        second.bundle.metadata.evaluation
    );

    Ok(())
}

#[test]
fn test_different_seed_keeps_vocabularies() -> Result<()> {
    let file = create_synthetic_dataset()?;
    let base = TrainingConfig {
        dataset: file.path().to_path_buf(),
        ..TrainingConfig::default()
    };
    let reseeded = TrainingConfig {
        seed: 7,
        ..base.clone()
    };

    let a = train_from_csv(file.path(), &base)?;
    let b = train_from_csv(file.path(), &reseeded)?;

    assert_eq!(a.bundle.encoders, b.bundle.encoders);
    assert_eq!(a.bundle.metadata.seed, 42);
    assert_eq!(b.bundle.metadata.seed, 7);

    Ok(())
}

#[test]
fn test_missing_dataset_is_fatal_and_writes_nothing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = config_for(&dir.path().join("absent.csv"), &dir);

    let result = run(&config);

    assert!(matches!(result, Err(TrainerError::Dataset(_))));
    assert!(!config.output.exists());

    Ok(())
}

#[test]
fn test_failed_run_keeps_previous_bundle() -> Result<()> {
    let file = create_synthetic_dataset()?;
    let dir = tempfile::tempdir()?;
    let config = config_for(file.path(), &dir);
    let (path, outcome) = run(&config)?;

    let mut broken = NamedTempFile::new()?;
    writeln!(broken, "{HEADER}")?;
    writeln!(broken, "2022,1,30190,A,B,10,not-a-fare,AA")?;
    broken.flush()?;

    let result = run(&config_for(broken.path(), &dir));
    assert!(matches!(result, Err(TrainerError::Dataset(_))));

    let reloaded = ModelBundle::load(&path)?;
    assert_eq!(reloaded, outcome.bundle);

    Ok(())
}

#[test]
fn test_unknown_route_after_training() -> Result<()> {
    let file = create_synthetic_dataset()?;
    let dir = tempfile::tempdir()?;
    let (path, _) = run(&config_for(file.path(), &dir))?;

    let predictor = FarePredictor::load(path)?;
    let err = predictor
        .predict_fare("Zanzibar", "Miami, FL", 2, "AA")
        .unwrap_err();

    assert!(matches!(err, FareError::UnknownCategory { .. }));

    Ok(())
}
