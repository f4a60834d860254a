use serde::{Deserialize, Serialize};

/// Represents a single sales transaction.
///
/// The serde renames bind the Spanish keys of the external JSON format, e.g. `venta_id` and
/// `precio_unitario`. Serializing a record always writes all eight fields, so an exported
/// snapshot can be re-imported without loss.
///
/// `quantity <= 0` and `unit_price <= 0` are missing-value sentinels, never valid data. A
/// `total` of `0` means the source did not supply one; see [`SaleRecord::effective_total`].
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "venta_id")]
    id: i64,
    #[serde(rename = "fecha")]
    date: String,
    #[serde(rename = "producto_id")]
    product_id: i64,
    #[serde(rename = "producto_nombre")]
    product_name: String,
    #[serde(rename = "categoria")]
    category: String,
    #[serde(rename = "cantidad")]
    quantity: i64,
    #[serde(rename = "precio_unitario")]
    unit_price: f64,
    total: f64,
}

impl SaleRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        date: impl Into<String>,
        product_id: i64,
        product_name: impl Into<String>,
        category: impl Into<String>,
        quantity: i64,
        unit_price: f64,
        total: f64,
    ) -> Self {
        Self {
            id,
            date: date.into(),
            product_id,
            product_name: product_name.into(),
            category: category.into(),
            quantity,
            unit_price,
            total,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// The calendar date in canonical `YYYY-MM-DD` form.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// The monetary amount used by every aggregate: the explicit `total` when one was supplied,
    /// otherwise `quantity * unit_price`.
    pub fn effective_total(&self) -> f64 {
        if self.total != 0.0 {
            self.total
        } else {
            self.quantity as f64 * self.unit_price
        }
    }

    /// The `YYYY-MM` prefix of the date, used as the monthly grouping key.
    pub fn month_key(&self) -> &str {
        self.date.get(..7).unwrap_or(&self.date)
    }

    /// The `YYYY` prefix of the date, used as the annual grouping key.
    pub fn year_key(&self) -> &str {
        self.date.get(..4).unwrap_or(&self.date)
    }

    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    pub(crate) fn set_unit_price(&mut self, unit_price: f64) {
        self.unit_price = unit_price;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_total_prefers_explicit_total() {
        let record = SaleRecord::new(1, "2024-01-10", 1, "X", "A", 2, 10.0, 25.0);
        assert_eq!(record.effective_total(), 25.0);
    }

    #[test]
    fn test_effective_total_derived_when_total_missing() {
        let record = SaleRecord::new(1, "2024-01-10", 1, "X", "A", 2, 10.0, 0.0);
        assert_eq!(record.effective_total(), 20.0);
    }

    #[test]
    fn test_grouping_keys() {
        let record = SaleRecord::new(1, "2024-01-10", 1, "X", "A", 2, 10.0, 0.0);
        assert_eq!(record.month_key(), "2024-01");
        assert_eq!(record.year_key(), "2024");
    }

    #[test]
    fn test_grouping_keys_short_date() {
        // A malformed short date falls back to the whole string rather than panicking.
        let record = SaleRecord::new(1, "2024", 1, "X", "A", 2, 10.0, 0.0);
        assert_eq!(record.month_key(), "2024");
        assert_eq!(record.year_key(), "2024");
    }

    #[test]
    fn test_wire_field_names() {
        let record = SaleRecord::new(7, "2024-03-01", 42, "Widget", "Tools", 3, 9.5, 0.0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["venta_id"], 7);
        assert_eq!(json["fecha"], "2024-03-01");
        assert_eq!(json["producto_id"], 42);
        assert_eq!(json["producto_nombre"], "Widget");
        assert_eq!(json["categoria"], "Tools");
        assert_eq!(json["cantidad"], 3);
        assert_eq!(json["precio_unitario"], 9.5);
        assert_eq!(json["total"], 0.0);
    }
}
