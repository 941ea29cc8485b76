//! DMA / region selection over the store table

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::synth::{StoreRecord, StoreTable};

/// How many distinct values the selectors offer (and preselect).
pub const SELECTOR_OPTIONS: usize = 5;

/// A row passes when both its DMA and its region are selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreFilter {
    pub dmas: Vec<String>,
    pub regions: Vec<String>,
}

impl StoreFilter {
    pub fn new(dmas: Vec<String>, regions: Vec<String>) -> Self {
        Self { dmas, regions }
    }

    /// Default selection: the first few distinct DMAs and regions in order
    /// of appearance.
    pub fn default_for(table: &StoreTable) -> Self {
        let mut dmas = table.distinct_dmas();
        dmas.truncate(SELECTOR_OPTIONS);
        let mut regions = table.distinct_regions();
        regions.truncate(SELECTOR_OPTIONS);
        Self { dmas, regions }
    }

    /// Default selection with optional overrides for either selector.
    pub fn resolve(
        table: &StoreTable,
        dmas: Option<Vec<String>>,
        regions: Option<Vec<String>>,
    ) -> Self {
        let defaults = Self::default_for(table);
        Self {
            dmas: dmas.unwrap_or(defaults.dmas),
            regions: regions.unwrap_or(defaults.regions),
        }
    }

    pub fn matches(&self, record: &StoreRecord) -> bool {
        self.dmas.iter().any(|d| *d == record.dma)
            && self.regions.iter().any(|r| *r == record.region)
    }

    /// Rows that pass the filter, in table order.
    pub fn apply(&self, table: &StoreTable) -> StoreTable {
        let records: Vec<StoreRecord> = table
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        debug!(
            kept = records.len(),
            total = table.len(),
            dmas = self.dmas.len(),
            regions = self.regions.len(),
            "Applied store filter"
        );
        if records.is_empty() && !table.is_empty() {
            warn!("Store filter matches no rows");
        }
        StoreTable::from_records(records)
    }
}
