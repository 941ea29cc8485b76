//! Aggregations behind the map and bar panels

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

use crate::synth::StoreTable;

/// Revenue multiplier applied to spend per office.
pub const REVENUE_MULTIPLIER: Range<f64> = 1.5..3.0;
/// Offices shown in the revenue bar chart.
pub const REVENUE_PANEL_ROWS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmaSpend {
    #[serde(rename = "DMA")]
    pub dma: String,
    #[serde(rename = "Spend")]
    pub spend: u64,
}

/// Total spend per DMA, ordered by DMA code.
pub fn spend_by_dma(table: &StoreTable) -> Vec<DmaSpend> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for record in table {
        *totals.entry(record.dma.as_str()).or_default() += u64::from(record.spend);
    }
    totals
        .into_iter()
        .map(|(dma, spend)| DmaSpend {
            dma: dma.to_string(),
            spend,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficeRevenue {
    #[serde(rename = "Store")]
    pub store: String,
    #[serde(rename = "Spend")]
    pub spend: u32,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
}

/// `revenue = spend * U(1.5, 3.0)` for every row, then the first 20 rows
/// sorted by ascending revenue.
pub fn revenue_per_office<R: Rng + ?Sized>(rng: &mut R, table: &StoreTable) -> Vec<OfficeRevenue> {
    let mut rows: Vec<OfficeRevenue> = table
        .iter()
        .map(|r| OfficeRevenue {
            store: r.store.clone(),
            spend: r.spend,
            revenue: f64::from(r.spend) * rng.gen_range(REVENUE_MULTIPLIER),
        })
        .collect();
    rows.truncate(REVENUE_PANEL_ROWS);
    rows.sort_by(|a, b| a.revenue.total_cmp(&b.revenue));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{generate_store_table, seeded_rng};

    #[test]
    fn test_spend_by_dma_sums_and_sorts() {
        let table = generate_store_table(42, 50).unwrap();
        let totals = spend_by_dma(&table);

        let grand: u64 = totals.iter().map(|t| t.spend).sum();
        let expected: u64 = table.iter().map(|r| u64::from(r.spend)).sum();
        assert_eq!(grand, expected);
        assert_eq!(totals.len(), table.distinct_dmas().len());
        assert!(totals.windows(2).all(|w| w[0].dma < w[1].dma));
    }

    #[test]
    fn test_revenue_panel_sorted_and_bounded() {
        let table = generate_store_table(42, 50).unwrap();
        let mut rng = seeded_rng(1);
        let rows = revenue_per_office(&mut rng, &table);

        assert_eq!(rows.len(), REVENUE_PANEL_ROWS);
        assert!(rows.windows(2).all(|w| w[0].revenue <= w[1].revenue));
        for row in &rows {
            let spend = f64::from(row.spend);
            assert!(row.revenue >= spend * 1.5 && row.revenue < spend * 3.0);
        }

        // Only the first 20 stores make the panel.
        let first_twenty: Vec<&str> = table.records()[..20]
            .iter()
            .map(|r| r.store.as_str())
            .collect();
        assert!(rows.iter().all(|r| first_twenty.contains(&r.store.as_str())));
    }

    #[test]
    fn test_empty_table_aggregates() {
        let empty = StoreTable::default();
        assert!(spend_by_dma(&empty).is_empty());
        assert!(revenue_per_office(&mut seeded_rng(0), &empty).is_empty());
    }
}
