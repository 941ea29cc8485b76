//! Inventory utilization grid (channels x weeks)

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::calendar::DateRange;
use super::error::{GeneratorError, GeneratorResult};

/// Availability percentage per cell, half-open.
pub const AVAILABILITY: Range<u32> = 50..100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryGrid {
    pub channels: Vec<String>,
    pub weeks: Vec<NaiveDate>,
    /// Row per channel, column per week.
    pub availability: Vec<Vec<u32>>,
}

impl InventoryGrid {
    /// Mean availability of one channel across all weeks.
    pub fn channel_mean(&self, channel: &str) -> Option<f64> {
        let row = self.channels.iter().position(|c| c == channel)?;
        let cells = self.availability.get(row)?;
        if cells.is_empty() {
            return None;
        }
        Some(cells.iter().map(|&v| f64::from(v)).sum::<f64>() / cells.len() as f64)
    }
}

/// Draw the grid row by row (all weeks of the first channel first).
pub fn utilization_grid<R: Rng + ?Sized>(
    rng: &mut R,
    channels: &[String],
    range: &DateRange,
) -> GeneratorResult<InventoryGrid> {
    if channels.is_empty() {
        return Err(GeneratorError::invalid(
            "channels",
            "at least one channel is required",
        ));
    }
    range.validate("inventory_range")?;
    let weeks = range.dates()?;

    let availability: Vec<Vec<u32>> = channels
        .iter()
        .map(|_| weeks.iter().map(|_| rng.gen_range(AVAILABILITY)).collect())
        .collect();

    Ok(InventoryGrid {
        channels: channels.to_vec(),
        weeks,
        availability,
    })
}
