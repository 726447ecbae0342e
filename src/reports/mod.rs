//! Group-by aggregations over a loaded record set.
//!
//! Every function is pure: the same slice always yields the same output, and
//! outputs use ordered containers so chart order is reproducible.


use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::models::Record;

/// Product types counted by the lab inventory charts.
pub const ALLOWED_PRODUCT_TYPES: [&str; 5] = ["Desktop", "Printer", "Projector", "Monitor", "CPU"];

pub fn is_allowed_product_type(product_type: &str) -> bool {
    ALLOWED_PRODUCT_TYPES.contains(&product_type)
}

/// Total `amount` per calendar year, ascending by year. Records whose date
/// does not parse are skipped.
pub fn yearly_amount_totals(records: &[Record]) -> Vec<(i32, Decimal)> {
    let mut totals = BTreeMap::new();
    for record in records {
        if let Some(year) = record.year() {
            *totals.entry(year).or_insert(Decimal::ZERO) += record.amount;
        }
    }

    totals.into_iter().collect()
}

/// Number of records per product type. Descending by count, ties ascending
/// by label.
pub fn product_type_counts(records: &[Record]) -> Vec<(String, usize)> {
    count_product_types(records.iter())
}

/// [`product_type_counts`] restricted to records in `lab`.
pub fn product_type_counts_in_lab(lab: i32, records: &[Record]) -> Vec<(String, usize)> {
    count_product_types(records.iter().filter(|record| record.lab == lab))
}

fn count_product_types<'a>(records: impl Iterator<Item = &'a Record>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.product_type.as_str()).or_default() += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(product_type, count)| (product_type.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Quantity per (lab, product type), limited to [`ALLOWED_PRODUCT_TYPES`].
#[derive(Debug, Clone, PartialEq)]
pub struct LabQuantityMatrix {
    /// Ascending.
    pub labs: Vec<i32>,
    /// In first-encountered order.
    pub product_types: Vec<String>,
    /// `quantities[lab_index][product_index]`; absent combinations are zero.
    pub quantities: Vec<Vec<Decimal>>,
}

impl LabQuantityMatrix {
    #[cfg(test)]
    pub fn quantity(&self, lab: i32, product_type: &str) -> Option<Decimal> {
        let lab_index = self.labs.iter().position(|&candidate| candidate == lab)?;
        let product_index = self.product_types.iter().position(|candidate| candidate == product_type)?;
        Some(self.quantities[lab_index][product_index])
    }

    /// One value per lab for the product type at `product_index`.
    pub fn column(&self, product_index: usize) -> Vec<Decimal> {
        self.quantities.iter().map(|row| row[product_index]).collect()
    }
}

/// Sums `quantity` by lab and allow-listed product type. `None` when no record
/// has an allow-listed product type.
pub fn lab_quantity_matrix(records: &[Record]) -> Option<LabQuantityMatrix> {
    let mut product_types: Vec<String> = Vec::new();
    let mut cells: BTreeMap<i32, HashMap<usize, Decimal>> = BTreeMap::new();

    for record in records.iter().filter(|record| is_allowed_product_type(&record.product_type)) {
        let product_index = match product_types.iter().position(|known| *known == record.product_type) {
            Some(index) => index,
            None => {
                product_types.push(record.product_type.clone());
                product_types.len() - 1
            }
        };

        *cells
            .entry(record.lab)
            .or_default()
            .entry(product_index)
            .or_insert(Decimal::ZERO) += record.quantity;
    }

    if cells.is_empty() {
        return None;
    }

    let labs = cells.keys().copied().collect();
    let quantities = cells
        .values()
        .map(|row| {
            (0..product_types.len())
                .map(|index| row.get(&index).copied().unwrap_or(Decimal::ZERO))
                .collect()
        })
        .collect();

    Some(LabQuantityMatrix { labs, product_types, quantities })
}

/// Total allow-listed quantity per lab, ascending by lab. `None` when empty.
pub fn lab_quantity_totals(records: &[Record]) -> Option<Vec<(i32, Decimal)>> {
    let mut totals = BTreeMap::new();
    for record in records.iter().filter(|record| is_allowed_product_type(&record.product_type)) {
        *totals.entry(record.lab).or_insert(Decimal::ZERO) += record.quantity;
    }

    if totals.is_empty() {
        None
    } else {
        Some(totals.into_iter().collect())
    }
}

/// Total `amount` per product type, ascending by product type.
pub fn amount_per_product_type(records: &[Record]) -> Vec<(String, Decimal)> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for record in records {
        *totals.entry(record.product_type.as_str()).or_insert(Decimal::ZERO) += record.amount;
    }

    totals
        .into_iter()
        .map(|(product_type, total)| (product_type.to_string(), total))
        .collect()
}

/// Records whose date parses. The overview charts are built from this subset.
pub fn dated_records(records: &[Record]) -> Vec<Record> {
    records.iter().filter(|record| record.parsed_date().is_some()).cloned().collect()
}

pub fn records_in_lab(lab: i32, records: &[Record]) -> Vec<Record> {
    records.iter().filter(|record| record.lab == lab).cloned().collect()
}
