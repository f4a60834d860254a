//! The data cleaning pass: duplicate removal and missing-value imputation.
//!
//! Both operations work in place on the store. Deduplication keeps the first occurrence of
//! each sale id; imputation replaces the `quantity <= 0` and `unit_price <= 0` sentinels with
//! statistics computed over the positive-valued samples collected before any replacement.

use crate::model::SaleStore;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The statistic used to replace a missing unit price.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ImputeMethod {
    #[default]
    Mean,
    Median,
}

serde_plain::derive_display_from_serialize!(ImputeMethod);
serde_plain::derive_fromstr_from_deserialize!(ImputeMethod);

/// The sale ids removed by a deduplication pass, in removal order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DedupReport {
    pub removed: Vec<i64>,
}

/// One imputed field change: which record, which field, and the replacement value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "field")]
pub enum Imputation {
    /// A missing quantity replaced with the mode of the positive quantities.
    Quantity { id: i64, value: i64 },
    /// A missing unit price replaced with the configured statistic over the positive prices.
    UnitPrice {
        id: i64,
        method: ImputeMethod,
        value: f64,
    },
}

/// Removes records whose sale id was already seen earlier in the store.
///
/// Single left-to-right scan; the first occurrence of any id always wins and every later
/// occurrence is removed with an index shift. Running the pass twice is a no-op.
pub fn deduplicate(store: &mut SaleStore) -> DedupReport {
    let mut seen: HashSet<i64> = HashSet::new();
    let mut report = DedupReport::default();
    let mut ix = 0;
    while ix < store.len() {
        let id = store.records()[ix].id();
        if seen.contains(&id) {
            store.remove_at(ix);
            report.removed.push(id);
        } else {
            seen.insert(id);
            ix += 1;
        }
    }
    report
}

/// Replaces missing quantities and unit prices across the whole store.
///
/// Sample sets are collected from the current state of the store before any replacement
/// happens, so an imputed value never feeds back into another record's replacement. Returns
/// one entry per field changed.
pub fn impute_missing(store: &mut SaleStore, method: ImputeMethod) -> Vec<Imputation> {
    let quantities: Vec<i64> = store
        .iter()
        .map(|r| r.quantity())
        .filter(|&q| q > 0)
        .collect();
    let prices: Vec<f64> = store
        .iter()
        .map(|r| r.unit_price())
        .filter(|&p| p > 0.0)
        .collect();

    let quantity_value = mode(&quantities);
    let price_value = match method {
        ImputeMethod::Mean => mean(&prices),
        ImputeMethod::Median => median(&prices),
    };

    let mut changes = Vec::new();
    for record in store.iter_mut() {
        if record.quantity() <= 0 {
            record.set_quantity(quantity_value);
            changes.push(Imputation::Quantity {
                id: record.id(),
                value: quantity_value,
            });
        }
        if record.unit_price() <= 0.0 {
            record.set_unit_price(price_value);
            changes.push(Imputation::UnitPrice {
                id: record.id(),
                method,
                value: price_value,
            });
        }
    }
    changes
}

/// The most frequent value in `samples`. Ties break toward the value that first attains the
/// maximum count in iteration order. An empty sample set has a mode of 0.
fn mode(samples: &[i64]) -> i64 {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for &value in samples {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut best = 0;
    let mut best_count = 0;
    for &value in samples {
        let count = counts[&value];
        if count > best_count {
            best = value;
            best_count = count;
        }
    }
    best
}

/// The arithmetic mean of `samples`, or 0 when empty.
fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// The median of `samples`, or 0 when empty. Sorts a clone; the caller's ordering is kept.
fn median(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SaleRecord;

    fn sale(id: i64, quantity: i64, unit_price: f64) -> SaleRecord {
        SaleRecord::new(id, "2024-01-01", 1, "X", "A", quantity, unit_price, 0.0)
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut store = SaleStore::new();
        store.append(SaleRecord::new(5, "2024-01-01", 1, "First", "A", 1, 1.0, 0.0));
        store.append(sale(2, 1, 1.0));
        store.append(SaleRecord::new(5, "2024-02-02", 9, "Second", "B", 9, 9.0, 0.0));
        let report = deduplicate(&mut store);
        assert_eq!(report.removed, vec![5]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().product_name(), "First");
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let mut store = SaleStore::new();
        for id in [1, 2, 2, 3, 1, 1] {
            store.append(sale(id, 1, 1.0));
        }
        deduplicate(&mut store);
        assert_eq!(store.len(), 3);
        let second = deduplicate(&mut store);
        assert!(second.removed.is_empty());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_dedup_of_repeated_import_matches_single_import() {
        // Importing the same input twice then deduplicating once must leave the same record
        // count as importing it once and deduplicating.
        let ids = [4, 7, 9];
        let mut once = SaleStore::new();
        for &id in &ids {
            once.append(sale(id, 1, 1.0));
        }
        deduplicate(&mut once);

        let mut twice = SaleStore::new();
        for &id in ids.iter().chain(&ids) {
            twice.append(sale(id, 1, 1.0));
        }
        deduplicate(&mut twice);

        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn test_quantity_imputed_with_mode() {
        let mut store = SaleStore::new();
        store.append(sale(1, 0, 5.0));
        store.append(sale(2, 3, 5.0));
        store.append(sale(3, 3, 5.0));
        store.append(sale(4, 5, 5.0));
        let changes = impute_missing(&mut store, ImputeMethod::Mean);
        assert_eq!(store.get(0).unwrap().quantity(), 3);
        assert!(changes.contains(&Imputation::Quantity { id: 1, value: 3 }));
    }

    #[test]
    fn test_mode_tie_breaks_toward_first_seen() {
        assert_eq!(mode(&[7, 2, 2, 7]), 7);
        assert_eq!(mode(&[2, 7, 7, 2]), 2);
    }

    #[test]
    fn test_mode_of_empty_samples_is_zero() {
        assert_eq!(mode(&[]), 0);
    }

    #[test]
    fn test_unit_price_imputed_with_mean() {
        let mut store = SaleStore::new();
        store.append(sale(1, 1, 0.0));
        store.append(sale(2, 1, 10.0));
        store.append(sale(3, 1, 20.0));
        let changes = impute_missing(&mut store, ImputeMethod::Mean);
        assert_eq!(store.get(0).unwrap().unit_price(), 15.0);
        assert_eq!(
            changes,
            vec![Imputation::UnitPrice {
                id: 1,
                method: ImputeMethod::Mean,
                value: 15.0
            }]
        );
    }

    #[test]
    fn test_unit_price_imputed_with_median() {
        let mut store = SaleStore::new();
        store.append(sale(1, 1, -2.5));
        store.append(sale(2, 1, 30.0));
        store.append(sale(3, 1, 10.0));
        store.append(sale(4, 1, 20.0));
        impute_missing(&mut store, ImputeMethod::Median);
        assert_eq!(store.get(0).unwrap().unit_price(), 20.0);
    }

    #[test]
    fn test_median_even_count_averages_central_pair() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&[9.0, 1.0, 5.0]), 5.0);
    }

    #[test]
    fn test_median_does_not_reorder_the_input() {
        let samples = vec![3.0, 1.0, 2.0];
        median(&samples);
        assert_eq!(samples, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_empty_sample_sets_impute_zero() {
        let mut store = SaleStore::new();
        store.append(sale(1, 0, 0.0));
        store.append(sale(2, -4, -1.0));
        let changes = impute_missing(&mut store, ImputeMethod::Median);
        assert_eq!(changes.len(), 4);
        assert_eq!(store.get(0).unwrap().quantity(), 0);
        assert_eq!(store.get(0).unwrap().unit_price(), 0.0);
    }

    #[test]
    fn test_total_sales_consistent_after_cleaning() {
        let mut store = SaleStore::new();
        store.append(sale(1, 0, 0.0));
        store.append(sale(1, 2, 4.0));
        store.append(sale(2, 2, 4.0));
        deduplicate(&mut store);
        impute_missing(&mut store, ImputeMethod::Mean);
        let manual: f64 = store.iter().map(|r| r.effective_total()).sum();
        assert_eq!(crate::report::total_sales(&store), manual);
    }

    #[test]
    fn test_samples_are_collected_before_any_replacement() {
        // The record imputed first must not contribute its replacement value to the samples
        // used for the records after it.
        let mut store = SaleStore::new();
        store.append(sale(1, 0, 0.0));
        store.append(sale(2, 2, 8.0));
        store.append(sale(3, 0, 0.0));
        impute_missing(&mut store, ImputeMethod::Mean);
        assert_eq!(store.get(2).unwrap().quantity(), 2);
        assert_eq!(store.get(2).unwrap().unit_price(), 8.0);
    }
}
