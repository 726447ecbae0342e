//! Renderer-neutral chart series. Each type serializes to the JSON read by
//! `static/charts.js`.

mod image;
mod table;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::reports::{LabQuantityMatrix, ALLOWED_PRODUCT_TYPES};

pub use image::StaticBarChart;
pub use table::{search_records, RecordTable};

const LINE_COLOR: &str = "skyblue";
const COUNT_COLOR: &str = "skyblue";
const AMOUNT_COLOR: &str = "orange";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub y: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub color: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub color: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stack {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedBarSeries {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub categories: Vec<String>,
    pub stacks: Vec<Stack>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSeries {
    pub title: String,
    pub segments: Vec<Segment>,
}

pub fn yearly_amount_line(totals: &[(i32, Decimal)]) -> LineSeries {
    LineSeries {
        title: "Amount Invested Every Year".to_string(),
        x_title: "Year".to_string(),
        y_title: "Amount Invested (in Rs)".to_string(),
        color: LINE_COLOR.to_string(),
        points: totals.iter().map(|&(x, y)| Point { x, y }).collect(),
    }
}

pub fn lab_quantity_stacks(matrix: &LabQuantityMatrix) -> StackedBarSeries {
    let stacks = matrix
        .product_types
        .iter()
        .enumerate()
        .map(|(index, name)| Stack {
            name: name.clone(),
            values: matrix.column(index).iter().map(to_f64).collect(),
        })
        .collect();

    StackedBarSeries {
        title: lab_inventory_title(),
        x_title: "Lab".to_string(),
        y_title: "Total Number of Items".to_string(),
        categories: matrix.labs.iter().map(ToString::to_string).collect(),
        stacks,
    }
}

pub fn lab_product_count_bars(lab: i32, counts: &[(String, usize)]) -> BarSeries {
    BarSeries {
        title: format!("Product Type Counts for Lab {lab}"),
        x_title: "Product Type".to_string(),
        y_title: "Count".to_string(),
        color: COUNT_COLOR.to_string(),
        bars: counts
            .iter()
            .map(|(category, count)| Bar {
                category: category.clone(),
                value: Decimal::from(*count),
            })
            .collect(),
    }
}

pub fn product_amount_bars(totals: &[(String, Decimal)]) -> BarSeries {
    BarSeries {
        title: "Total Amount for Each Product".to_string(),
        x_title: "Product Type".to_string(),
        y_title: "Total Amount".to_string(),
        color: AMOUNT_COLOR.to_string(),
        bars: totals
            .iter()
            .map(|(category, value)| Bar {
                category: category.clone(),
                value: *value,
            })
            .collect(),
    }
}

pub fn product_amount_pie(title: impl Into<String>, totals: &[(String, Decimal)]) -> PieSeries {
    PieSeries {
        title: title.into(),
        segments: totals
            .iter()
            .map(|(label, value)| Segment {
                label: label.clone(),
                value: *value,
            })
            .collect(),
    }
}

pub fn lab_inventory_title() -> String {
    format!("Total Number of Items in Each Lab ({})", ALLOWED_PRODUCT_TYPES.join(", "))
}

fn to_f64(value: &Decimal) -> f64 {
    use rust_decimal::prelude::ToPrimitive;

    value.to_f64().unwrap_or_default()
}
