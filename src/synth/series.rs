//! Time series generators
//!
//! - performance trend: Gaussian random walk with a noisy prediction
//! - share of voice: uniform draws per region and week
//! - seasonality: linear trend + monthly sine + Gaussian residual

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::Range;

use super::calendar::DateRange;
use super::error::{GeneratorError, GeneratorResult};
use super::rng::normal_samples;

/// Mean of each random-walk step.
pub const TREND_STEP_MEAN: f64 = 1.0;
/// Standard deviation of each random-walk step.
pub const TREND_STEP_STD: f64 = 10.0;
/// Standard deviation of the prediction error around the actual value.
pub const PREDICTION_STD: f64 = 5.0;

pub const SHARE_OF_VOICE: Range<f64> = 0.1..0.5;

pub const SEASONAL_TREND_START: f64 = 100.0;
pub const SEASONAL_TREND_END: f64 = 200.0;
pub const SEASONAL_AMPLITUDE: f64 = 20.0;
/// Full sine cycles across the range (monthly over a year).
pub const SEASONAL_CYCLES: f64 = 12.0;
pub const RESIDUAL_STD: f64 = 5.0;

/// Components are snapped to multiples of 2^-40. Below 2^12 in magnitude
/// every sum and difference of such values is exact in f64.
const COMPONENT_SCALE: f64 = (1u64 << 40) as f64;

// =============================================================================
// PERFORMANCE TREND
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Actual")]
    pub actual: f64,
    #[serde(rename = "Predicted")]
    pub predicted: f64,
}

/// Cumulative random walk `actual[t] = actual[t-1] + N(1, 10)` with
/// `predicted[t] = actual[t] + N(0, 5)`.
///
/// All step draws happen before any prediction draw.
pub fn performance_trend<R: Rng + ?Sized>(
    rng: &mut R,
    range: &DateRange,
) -> GeneratorResult<Vec<TrendPoint>> {
    range.validate("trend_range")?;
    let dates = range.dates()?;
    let n = dates.len();

    let steps = normal_samples(rng, TREND_STEP_MEAN, TREND_STEP_STD, n)?;
    let errors = normal_samples(rng, 0.0, PREDICTION_STD, n)?;

    let mut actual = 0.0;
    Ok(dates
        .into_iter()
        .zip(steps)
        .zip(errors)
        .map(|((date, step), error)| {
            actual += step;
            TrendPoint {
                date,
                actual,
                predicted: actual + error,
            }
        })
        .collect())
}

// =============================================================================
// SHARE OF VOICE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SovPoint {
    #[serde(rename = "Week")]
    pub week: NaiveDate,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Share of Voice")]
    pub share_of_voice: f64,
}

/// One uniform share-of-voice value per region and week, region-major.
pub fn share_of_voice<R: Rng + ?Sized>(
    rng: &mut R,
    regions: &[String],
    range: &DateRange,
) -> GeneratorResult<Vec<SovPoint>> {
    if regions.is_empty() {
        return Err(GeneratorError::invalid(
            "regions",
            "share of voice needs at least one region",
        ));
    }
    range.validate("sov_range")?;
    let weeks = range.dates()?;

    let mut points = Vec::with_capacity(regions.len() * weeks.len());
    for region in regions {
        for week in &weeks {
            points.push(SovPoint {
                week: *week,
                region: region.clone(),
                share_of_voice: rng.gen_range(SHARE_OF_VOICE),
            });
        }
    }
    Ok(points)
}

// =============================================================================
// SEASONALITY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityPoint {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Observed")]
    pub observed: f64,
    #[serde(rename = "Trend")]
    pub trend: f64,
    #[serde(rename = "Seasonality")]
    pub seasonal: f64,
    #[serde(rename = "Residual")]
    pub residual: f64,
}

/// Additive decomposition over the range.
///
/// Trend, seasonal and residual sit on a fine binary grid, so
/// `observed == trend + seasonal + residual` and
/// `observed - trend - seasonal == residual` both hold exactly.
pub fn seasonality<R: Rng + ?Sized>(
    rng: &mut R,
    range: &DateRange,
) -> GeneratorResult<Vec<SeasonalityPoint>> {
    range.validate("seasonality_range")?;
    let dates = range.dates()?;
    let n = dates.len();
    let noise = normal_samples(rng, 0.0, RESIDUAL_STD, n)?;

    Ok(dates
        .into_iter()
        .zip(noise)
        .enumerate()
        .map(|(t, (date, noise))| {
            let frac = linspace_fraction(t, n);
            let trend = on_grid(
                SEASONAL_TREND_START + (SEASONAL_TREND_END - SEASONAL_TREND_START) * frac,
            );
            let seasonal = on_grid(SEASONAL_AMPLITUDE * (2.0 * PI * SEASONAL_CYCLES * frac).sin());
            let residual = on_grid(noise);
            SeasonalityPoint {
                date,
                observed: trend + seasonal + residual,
                trend,
                seasonal,
                residual,
            }
        })
        .collect())
}

fn on_grid(value: f64) -> f64 {
    (value * COMPONENT_SCALE).round() / COMPONENT_SCALE
}

/// Position of point `t` of `n` evenly spaced points on `[0, 1]`.
pub(crate) fn linspace_fraction(t: usize, n: usize) -> f64 {
    if n <= 1 {
        0.0
    } else {
        t as f64 / (n - 1) as f64
    }
}
