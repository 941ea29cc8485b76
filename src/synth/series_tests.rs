//! Time series tests.

use chrono::NaiveDate;

use crate::synth::calendar::DateRange;
use crate::synth::rng::{normal_samples, seeded_rng};
use crate::synth::series::{
    performance_trend, seasonality, share_of_voice, PREDICTION_STD, SEASONAL_AMPLITUDE,
    SHARE_OF_VOICE, TREND_STEP_MEAN, TREND_STEP_STD,
};

fn jan1() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn regions() -> Vec<String> {
    vec!["West".into(), "North".into(), "East".into()]
}

#[test]
fn test_seasonality_decomposition_is_exact_both_ways() {
    let range = DateRange::daily(jan1(), 365);
    for seed in 0..20 {
        let points = seasonality(&mut seeded_rng(seed), &range).unwrap();
        assert_eq!(points.len(), 365);
        for p in &points {
            assert_eq!(p.observed - p.trend - p.seasonal, p.residual, "seed {}", seed);
            assert_eq!(p.trend + p.seasonal + p.residual, p.observed, "seed {}", seed);
        }
    }
}

#[test]
fn test_seasonality_residual_tracks_gaussian_noise() {
    let points = seasonality(&mut seeded_rng(42), &DateRange::daily(jan1(), 365)).unwrap();
    let noise = normal_samples(&mut seeded_rng(42), 0.0, 5.0, 365).unwrap();
    for (p, n) in points.iter().zip(&noise) {
        assert!((p.residual - n).abs() < 1e-11);
    }
}

#[test]
fn test_seasonality_components() {
    let mut rng = seeded_rng(1);
    let points = seasonality(&mut rng, &DateRange::daily(jan1(), 365)).unwrap();

    assert_eq!(points[0].trend, 100.0);
    assert_eq!(points[364].trend, 200.0);
    assert_eq!(points[0].seasonal, 0.0);
    for pair in points.windows(2) {
        assert!(pair[1].trend > pair[0].trend);
    }
    assert!(points
        .iter()
        .all(|p| p.seasonal.abs() <= SEASONAL_AMPLITUDE + 1e-9));

    // 12 cycles over 364 steps: quarter period lands on t = 364 / 48
    let peak = points
        .iter()
        .map(|p| p.seasonal)
        .fold(f64::MIN, f64::max);
    assert!(peak > 19.9);
}

#[test]
fn test_seasonality_single_point() {
    let mut rng = seeded_rng(1);
    let points = seasonality(&mut rng, &DateRange::daily(jan1(), 1)).unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].trend, 100.0);
    assert_eq!(points[0].seasonal, 0.0);
}

#[test]
fn test_trend_follows_random_walk_recurrence() {
    let n = 30;
    let trend = performance_trend(&mut seeded_rng(42), &DateRange::daily(jan1(), n)).unwrap();

    // Every step is drawn before any prediction error.
    let mut replay = seeded_rng(42);
    let steps = normal_samples(&mut replay, TREND_STEP_MEAN, TREND_STEP_STD, n).unwrap();
    let errors = normal_samples(&mut replay, 0.0, PREDICTION_STD, n).unwrap();

    let mut actual = 0.0;
    for (i, point) in trend.iter().enumerate() {
        actual += steps[i];
        assert_eq!(point.actual, actual, "t = {}", i);
        assert_eq!(point.predicted, actual + errors[i], "t = {}", i);
    }
    assert_eq!(trend[0].actual, steps[0]);
}

#[test]
fn test_trend_dates_and_length() {
    let mut rng = seeded_rng(42);
    let trend = performance_trend(&mut rng, &DateRange::daily(jan1(), 30)).unwrap();
    assert_eq!(trend.len(), 30);
    assert_eq!(trend[0].date, jan1());
    assert_eq!(trend[29].date, NaiveDate::from_ymd_opt(2024, 1, 30).unwrap());
    assert!(trend.iter().all(|p| p.actual.is_finite() && p.predicted.is_finite()));
}

#[test]
fn test_same_rng_state_reproduces_series() {
    let range = DateRange::daily(jan1(), 30);
    let a = performance_trend(&mut seeded_rng(9), &range).unwrap();
    let b = performance_trend(&mut seeded_rng(9), &range).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_advancing_rng_yields_new_series() {
    let range = DateRange::daily(jan1(), 30);
    let mut rng = seeded_rng(9);
    let first = performance_trend(&mut rng, &range).unwrap();
    let second = performance_trend(&mut rng, &range).unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_share_of_voice_region_major() {
    let mut rng = seeded_rng(42);
    let points = share_of_voice(&mut rng, &regions(), &DateRange::weekly(jan1(), 20)).unwrap();
    assert_eq!(points.len(), 60);

    assert!(points[..20].iter().all(|p| p.region == "West"));
    assert!(points[20..40].iter().all(|p| p.region == "North"));
    assert_eq!(points[0].week, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
    assert_eq!(points[20].week, points[0].week);
    assert!(points
        .iter()
        .all(|p| SHARE_OF_VOICE.contains(&p.share_of_voice)));
}

#[test]
fn test_empty_inputs_rejected() {
    let mut rng = seeded_rng(0);
    assert!(share_of_voice(&mut rng, &[], &DateRange::weekly(jan1(), 20)).is_err());
    assert!(share_of_voice(&mut rng, &regions(), &DateRange::weekly(jan1(), 0)).is_err());
    assert!(performance_trend(&mut rng, &DateRange::daily(jan1(), 0)).is_err());
    assert!(seasonality(&mut rng, &DateRange::daily(jan1(), 0)).is_err());
}
