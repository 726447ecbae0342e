use axum::{
    extract::{rejection::FormRejection, Form, State},
    response::{Html, Redirect},
};
use askama::Template;
use log::debug;
use serde::Deserialize;

use crate::{
    charts::{search_records, RecordTable},
    database::Database,
    error::AppError,
    models::{parse_integer, Record, RecordRow},
    reports,
};

#[derive(Template)]
#[template(path = "admin.html")]
struct AdminTemplate {
    table: RecordTable,
    inventory_stats: Vec<(String, usize)>,
}

#[derive(Template)]
#[template(path = "search_results.html")]
struct SearchResultsTemplate {
    query: String,
    table: RecordTable,
}

#[derive(Deserialize)]
pub struct DeleteForm {
    sr: String,
}

#[derive(Deserialize)]
pub struct SearchForm {
    #[serde(rename = "searchQuery", default)]
    search_query: String,
}

// Full record dump plus per-product-type counts
pub async fn admin(State(db): State<Database>) -> Result<Html<String>, AppError> {
    let records = db.load_all().await?;

    let template = AdminTemplate {
        table: RecordTable::from_records(&records),
        inventory_stats: reports::product_type_counts(&records),
    };

    Ok(Html(template.render()?))
}

pub async fn add_entry(
    State(db): State<Database>,
    form: Result<Form<RecordRow>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(form) = form?;
    let record = Record::try_from(form)?;
    db.append(record).await?;

    Ok(Redirect::to("/admin"))
}

pub async fn delete_entry(
    State(db): State<Database>,
    form: Result<Form<DeleteForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let Form(form) = form?;
    let serial = parse_integer("Sr", &form.sr)?;
    db.delete_by_serial(serial).await?;

    Ok(Redirect::to("/admin"))
}

pub async fn search(
    State(db): State<Database>,
    form: Result<Form<SearchForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form?;
    let records = db.load_all().await?;
    let matches = search_records(&form.search_query, &records);
    debug!("Search '{}' matched {} of {} records", form.search_query, matches.len(), records.len());

    let template = SearchResultsTemplate {
        query: form.search_query,
        table: RecordTable::from_records(&matches),
    };

    Ok(Html(template.render()?))
}
