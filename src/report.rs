//! The aggregation engine: overall totals and grouped sums over the record store.
//!
//! Grouping is pure string equality on a date prefix (`YYYY-MM` or `YYYY`) or on the verbatim
//! category name. Group order is first-encountered order, never sorted, so reports are stable
//! across runs for the same input. All sums use [`SaleRecord::effective_total`].

use crate::model::{SaleRecord, SaleStore};
use serde::{Deserialize, Serialize};

/// How many entries a category ranking reports at most.
const RANKING_LIMIT: usize = 5;

/// One grouped row: a label (month, year, or category) and the summed effective total.
/// Created fresh per query and discarded after reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub label: String,
    pub total: f64,
}

/// One entry of a category ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCategory {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub category: String,
    pub total: f64,
}

/// The sum of every record's effective total.
pub fn total_sales(store: &SaleStore) -> f64 {
    store.iter().map(SaleRecord::effective_total).sum()
}

/// Sums effective totals per `YYYY-MM` month key, in first-encountered order.
pub fn sales_by_month(store: &SaleStore) -> Vec<GroupTotal> {
    group_by(store, SaleRecord::month_key)
}

/// Sums effective totals per `YYYY` year key, in first-encountered order.
pub fn sales_by_year(store: &SaleStore) -> Vec<GroupTotal> {
    group_by(store, SaleRecord::year_key)
}

/// Sums effective totals per verbatim category name, in first-encountered order.
pub fn sales_by_category(store: &SaleStore) -> Vec<GroupTotal> {
    group_by(store, SaleRecord::category)
}

/// The top categories by summed effective total, at most [`RANKING_LIMIT`] entries.
///
/// The sort is stable and descending, so categories with equal totals keep their
/// first-encountered relative order.
pub fn top_categories(store: &SaleStore) -> Vec<RankedCategory> {
    let mut groups = sales_by_category(store);
    groups.sort_by(|a, b| b.total.total_cmp(&a.total));
    groups.truncate(RANKING_LIMIT);
    groups
        .into_iter()
        .enumerate()
        .map(|(ix, group)| RankedCategory {
            rank: ix + 1,
            category: group.label,
            total: group.total,
        })
        .collect()
}

/// Accumulates effective totals under the key produced by `key`. The linear key scan is
/// O(n*k) with k distinct keys, which is within bounds for the intended dataset sizes.
fn group_by<'a, F>(store: &'a SaleStore, key: F) -> Vec<GroupTotal>
where
    F: Fn(&'a SaleRecord) -> &'a str,
{
    let mut groups: Vec<GroupTotal> = Vec::new();
    for record in store.iter() {
        let label = key(record);
        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.total += record.effective_total(),
            None => groups.push(GroupTotal {
                label: label.to_string(),
                total: record.effective_total(),
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(id: i64, date: &str, category: &str, quantity: i64, unit_price: f64) -> SaleRecord {
        SaleRecord::new(id, date, 1, "X", category, quantity, unit_price, 0.0)
    }

    #[test]
    fn test_total_sales_from_quantity_and_price() {
        let mut store = SaleStore::new();
        store.append(sale(1, "2024-01-10", "A", 2, 10.0));
        assert_eq!(total_sales(&store), 20.0);
    }

    #[test]
    fn test_total_sales_prefers_explicit_totals() {
        let mut store = SaleStore::new();
        store.append(sale(1, "2024-01-10", "A", 2, 10.0));
        store.append(SaleRecord::new(2, "2024-01-11", 1, "X", "A", 2, 10.0, 50.0));
        assert_eq!(total_sales(&store), 70.0);
    }

    #[test]
    fn test_monthly_groups_in_first_encountered_order() {
        let mut store = SaleStore::new();
        store.append(sale(1, "2024-03-10", "A", 1, 5.0));
        store.append(sale(2, "2024-01-02", "A", 1, 7.0));
        store.append(sale(3, "2024-03-20", "A", 1, 3.0));
        let groups = sales_by_month(&store);
        assert_eq!(
            groups,
            vec![
                GroupTotal {
                    label: "2024-03".to_string(),
                    total: 8.0
                },
                GroupTotal {
                    label: "2024-01".to_string(),
                    total: 7.0
                },
            ]
        );
    }

    #[test]
    fn test_annual_groups() {
        let mut store = SaleStore::new();
        store.append(sale(1, "2023-12-31", "A", 1, 5.0));
        store.append(sale(2, "2024-01-01", "A", 1, 7.0));
        store.append(sale(3, "2023-06-15", "A", 1, 1.0));
        let groups = sales_by_year(&store);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "2023");
        assert_eq!(groups[0].total, 6.0);
        assert_eq!(groups[1].label, "2024");
    }

    #[test]
    fn test_category_groups_have_no_duplicate_keys() {
        let mut store = SaleStore::new();
        store.append(sale(1, "2024-01-01", "Food", 1, 5.0));
        store.append(sale(2, "2024-01-02", "Tools", 1, 5.0));
        store.append(sale(3, "2024-01-03", "Food", 1, 5.0));
        let groups = sales_by_category(&store);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Food", "Tools"]);
        assert_eq!(groups[0].total, 10.0);
    }

    #[test]
    fn test_ranking_is_descending_and_capped_at_five() {
        let mut store = SaleStore::new();
        for (id, category, price) in [
            (1, "A", 10.0),
            (2, "B", 60.0),
            (3, "C", 30.0),
            (4, "D", 40.0),
            (5, "E", 50.0),
            (6, "F", 20.0),
        ] {
            store.append(sale(id, "2024-01-01", category, 1, price));
        }
        let ranking = top_categories(&store);
        assert_eq!(ranking.len(), 5);
        assert_eq!(ranking[0].category, "B");
        assert_eq!(ranking[0].rank, 1);
        for pair in ranking.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
    }

    #[test]
    fn test_ranking_tie_preserves_first_encountered_order() {
        let mut store = SaleStore::new();
        store.append(sale(1, "2024-01-01", "First", 1, 10.0));
        store.append(sale(2, "2024-01-01", "Bigger", 1, 99.0));
        store.append(sale(3, "2024-01-01", "Second", 1, 10.0));
        let ranking = top_categories(&store);
        assert_eq!(ranking[0].category, "Bigger");
        assert_eq!(ranking[1].category, "First");
        assert_eq!(ranking[2].category, "Second");
    }

    #[test]
    fn test_ranking_with_fewer_than_five_categories() {
        let mut store = SaleStore::new();
        store.append(sale(1, "2024-01-01", "Only", 1, 10.0));
        let ranking = top_categories(&store);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].rank, 1);
    }
}
