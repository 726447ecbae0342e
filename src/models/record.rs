use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::errors::ParseError;

/// Day-month-year pattern used by the `Date` column.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Column headers of the backing table, in file order.
pub const COLUMNS: [&str; 10] = [
    "Sr",
    "Description",
    "Qty",
    "Date",
    "Supplier",
    "Main",
    "Lab",
    "Amount",
    "Product_Type",
    "Remarks",
];

/// One inventory transaction line.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub serial_number: i64,
    pub description: String,
    pub quantity: Decimal,
    /// Source text of the date. Kept verbatim so rows with a malformed date
    /// survive a load/save cycle.
    pub date: String,
    pub supplier: String,
    pub main: String,
    pub lab: i32,
    pub amount: Decimal,
    pub product_type: String,
    pub remarks: String,
}

impl Record {
    /// Date parsed with [`DATE_FORMAT`], or `None` when the text does not match.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    pub fn year(&self) -> Option<i32> {
        self.parsed_date().map(|date| date.year())
    }

    /// Display text of every column, in [`COLUMNS`] order. Search and the
    /// tabular dump both read records through this projection.
    pub fn field_texts(&self) -> [String; 10] {
        [
            self.serial_number.to_string(),
            self.description.clone(),
            self.quantity.to_string(),
            self.date.clone(),
            self.supplier.clone(),
            self.main.clone(),
            self.lab.to_string(),
            self.amount.to_string(),
            self.product_type.clone(),
            self.remarks.clone(),
        ]
    }
}

/// All-text form of a record as it appears in the CSV file and in the
/// add-entry form. The aliases accept the lowercase form field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    #[serde(rename = "Sr", alias = "sr")]
    pub sr: String,
    #[serde(rename = "Description", alias = "description", default)]
    pub description: String,
    #[serde(rename = "Qty", alias = "qty")]
    pub qty: String,
    #[serde(rename = "Date", alias = "date", default)]
    pub date: String,
    #[serde(rename = "Supplier", alias = "supplier", default)]
    pub supplier: String,
    #[serde(rename = "Main", alias = "main", default)]
    pub main: String,
    #[serde(rename = "Lab", alias = "lab")]
    pub lab: String,
    #[serde(rename = "Amount", alias = "amount")]
    pub amount: String,
    #[serde(rename = "Product_Type", alias = "product_type", default)]
    pub product_type: String,
    #[serde(rename = "Remarks", alias = "remarks", default)]
    pub remarks: String,
}

impl TryFrom<RecordRow> for Record {
    type Error = ParseError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        Ok(Self {
            serial_number: parse_integer("Sr", &row.sr)?,
            quantity: parse_decimal("Qty", &row.qty)?,
            lab: parse_lab(&row.lab)?,
            amount: parse_decimal("Amount", &row.amount)?,
            description: row.description,
            date: row.date,
            supplier: row.supplier,
            main: row.main,
            product_type: row.product_type,
            remarks: row.remarks,
        })
    }
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        let [sr, description, qty, date, supplier, main, lab, amount, product_type, remarks] =
            record.field_texts();

        Self {
            sr,
            description,
            qty,
            date,
            supplier,
            main,
            lab,
            amount,
            product_type,
            remarks,
        }
    }
}

pub fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new(field, value, "value is required"));
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|error| ParseError::new(field, value, error.to_string()))
}

/// Integers are also accepted in a zero-fraction float form (`"7.0"`), which
/// is how spreadsheet exports commonly write integer columns.
pub fn parse_integer(field: &'static str, value: &str) -> Result<i64, ParseError> {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Ok(parsed);
    }

    let decimal = parse_decimal(field, value)?;
    if !decimal.fract().is_zero() {
        return Err(ParseError::new(field, value, "expected a whole number"));
    }

    decimal
        .to_i64()
        .ok_or_else(|| ParseError::new(field, value, "number out of range"))
}

pub fn parse_lab(value: &str) -> Result<i32, ParseError> {
    let lab = parse_integer("Lab", value)?;
    i32::try_from(lab).map_err(|_| ParseError::new("Lab", value, "number out of range"))
}
