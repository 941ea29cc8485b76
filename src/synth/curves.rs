//! Diminishing-returns response curves per media channel

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::error::{GeneratorError, GeneratorResult};
use super::series::linspace_fraction;

pub const SATURATION_A: Range<f64> = 800.0..1200.0;
pub const SATURATION_B: Range<f64> = 0.0003..0.0007;

/// Saturating-exponential response `a * (1 - e^(-b * spend))`.
pub fn diminishing_returns(spend: f64, a: f64, b: f64) -> f64 {
    a * (1.0 - (-b * spend).exp())
}

/// Parameters of one channel's response curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturationParams {
    /// Asymptotic return
    pub a: f64,
    /// Saturation rate per dollar
    pub b: f64,
}

impl SaturationParams {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let a = rng.gen_range(SATURATION_A);
        let b = rng.gen_range(SATURATION_B);
        Self { a, b }
    }

    pub fn returns_at(&self, spend: f64) -> f64 {
        diminishing_returns(spend, self.a, self.b)
    }
}

/// Evenly spaced spend grid on `[0, max_spend]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpendGrid {
    pub points: usize,
    pub max_spend: f64,
}

impl Default for SpendGrid {
    fn default() -> Self {
        Self {
            points: 100,
            max_spend: 10_000.0,
        }
    }
}

impl SpendGrid {
    pub fn validate(&self) -> GeneratorResult<()> {
        if self.points < 2 {
            return Err(GeneratorError::invalid(
                "curve.points",
                format!("need at least 2 spend points, got {}", self.points),
            ));
        }
        if !self.max_spend.is_finite() || self.max_spend <= 0.0 {
            return Err(GeneratorError::invalid(
                "curve.max_spend",
                format!("must be positive and finite, got {}", self.max_spend),
            ));
        }
        Ok(())
    }

    pub fn spend_points(&self) -> Vec<f64> {
        (0..self.points)
            .map(|i| self.max_spend * linspace_fraction(i, self.points))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnsPoint {
    #[serde(rename = "Spend")]
    pub spend: f64,
    #[serde(rename = "Returns")]
    pub returns: f64,
}

/// Response curve of a single channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnsCurve {
    pub channel: String,
    pub params: SaturationParams,
    pub points: Vec<ReturnsPoint>,
}

impl ReturnsCurve {
    /// Return at the largest spend on the grid.
    pub fn max_return(&self) -> f64 {
        self.points.last().map(|p| p.returns).unwrap_or(0.0)
    }
}

/// One curve per channel, each with freshly drawn `(a, b)`.
pub fn diminishing_returns_curves<R: Rng + ?Sized>(
    rng: &mut R,
    channels: &[String],
    grid: &SpendGrid,
) -> GeneratorResult<Vec<ReturnsCurve>> {
    if channels.is_empty() {
        return Err(GeneratorError::invalid(
            "channels",
            "at least one channel is required",
        ));
    }
    grid.validate()?;
    let spend = grid.spend_points();

    Ok(channels
        .iter()
        .map(|channel| {
            let params = SaturationParams::sample(rng);
            let points = spend
                .iter()
                .map(|&s| ReturnsPoint {
                    spend: s,
                    returns: params.returns_at(s),
                })
                .collect();
            ReturnsCurve {
                channel: channel.clone(),
                params,
                points,
            }
        })
        .collect())
}
