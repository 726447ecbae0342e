use axum::{
    extract::{rejection::FormRejection, Form, State},
    response::Html,
};
use askama::Template;
use serde::Deserialize;

use crate::{
    charts::{self, BarSeries, LineSeries, PieSeries, StackedBarSeries, StaticBarChart},
    database::Database,
    error::AppError,
    filters,
    handlers::{lab_options, LabOption},
    models::parse_lab,
    reports,
};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    yearly: LineSeries,
    lab_stacks: Option<StackedBarSeries>,
    pie: PieSeries,
    lab_options: Vec<LabOption>,
}

#[derive(Template)]
#[template(path = "lab.html")]
struct LabTemplate {
    lab_number: i32,
    counts: BarSeries,
    lab_image: Option<String>,
    amounts: BarSeries,
    pie: PieSeries,
    lab_options: Vec<LabOption>,
}

#[derive(Deserialize)]
pub struct LabForm {
    lab: String,
}

// Overview: yearly spend, stacked lab inventory and the pie, all over dated rows
pub async fn index(State(db): State<Database>) -> Result<Html<String>, AppError> {
    let records = reports::dated_records(&db.load_all().await?);

    let template = IndexTemplate {
        yearly: charts::yearly_amount_line(&reports::yearly_amount_totals(&records)),
        lab_stacks: reports::lab_quantity_matrix(&records).map(|matrix| charts::lab_quantity_stacks(&matrix)),
        pie: charts::product_amount_pie(
            "Amount per Product Type",
            &reports::amount_per_product_type(&records),
        ),
        lab_options: lab_options(None),
    };

    Ok(Html(template.render()?))
}

pub async fn lab(
    State(db): State<Database>,
    form: Result<Form<LabForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form?;
    let lab_number = parse_lab(&form.lab)?;
    let records = db.load_all().await?;

    let lab_records = reports::records_in_lab(lab_number, &records);
    let lab_image = reports::lab_quantity_totals(&records)
        .and_then(|totals| StaticBarChart::render(&charts::lab_inventory_title(), &totals))
        .map(|chart| chart.data_uri());

    let template = LabTemplate {
        lab_number,
        counts: charts::lab_product_count_bars(
            lab_number,
            &reports::product_type_counts_in_lab(lab_number, &records),
        ),
        lab_image,
        amounts: charts::product_amount_bars(&reports::amount_per_product_type(&records)),
        pie: charts::product_amount_pie(
            format!("Amount per Product Type in Lab {lab_number}"),
            &reports::amount_per_product_type(&lab_records),
        ),
        lab_options: lab_options(Some(lab_number)),
    };

    Ok(Html(template.render()?))
}
