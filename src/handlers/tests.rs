use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tempfile::tempdir;
use tower::ServiceExt;

use crate::{
    create_router,
    models::Record,
    store::{CsvStore, MemoryStore, RecordRepository, RecordStore},
};

fn record(serial: i64, lab: i32, product_type: &str, description: &str, amount: &str, date: &str) -> Record {
    Record {
        serial_number: serial,
        description: description.to_string(),
        quantity: Decimal::from(3),
        date: date.to_string(),
        supplier: "Vision Infotech".to_string(),
        main: "Electronics".to_string(),
        lab,
        amount: Decimal::from_str(amount).unwrap(),
        product_type: product_type.to_string(),
        remarks: String::new(),
    }
}

fn inventory() -> Vec<Record> {
    vec![
        record(1, 2, "Desktop", "Lenovo ThinkCentre", "120000", "04-08-2018"),
        record(2, 2, "Printer", "Canon ImageClass", "22000", "17-01-2020"),
        record(3, 5, "Projector", "BenQ MX560", "41000", "09-09-2020"),
        record(4, 5, "Router", "TP-Link Archer", "3500", "unknown"),
    ]
}

fn app(records: Vec<Record>) -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new(records));
    let db = Arc::new(RecordRepository::new(store.clone()));
    (store, create_router(db, Path::new("static")))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: Response) -> Result<String> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

const NEW_ENTRY: &str = "sr=9&description=Dell+U2422H&qty=2&date=21-06-2023&supplier=Vision+Infotech&main=Electronics&lab=7&amount=31999.50&product_type=Monitor&remarks=";

#[tokio::test]
async fn test_overview_renders_every_chart() -> Result<()> {
    let (_, app) = app(inventory());

    let response = app.oneshot(get("/")).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await?;
    assert!(body.contains("Amount Invested Every Year"));
    assert!(body.contains("Total Number of Items in Each Lab"));
    assert!(body.contains("Amount per Product Type"));
    assert!(body.contains(r#"<option value="10">"#));

    Ok(())
}

#[tokio::test]
async fn test_overview_notes_missing_lab_data() -> Result<()> {
    let (_, app) = app(vec![record(1, 1, "Router", "Netgear", "100", "01-01-2020")]);

    let body = body_text(app.oneshot(get("/")).await?).await?;

    assert!(body.contains("No lab inventory data"));
    assert!(!body.contains("Total Number of Items in Each Lab"));

    Ok(())
}

#[tokio::test]
async fn test_lab_page_renders_lab_charts() -> Result<()> {
    let (_, app) = app(inventory());

    let response = app.oneshot(post_form("/lab", "lab=2")).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await?;
    assert!(body.contains("Product Type Counts for Lab 2"));
    assert!(body.contains("Total Amount for Each Product"));
    assert!(body.contains("Amount per Product Type in Lab 2"));
    assert!(body.contains("data:image/svg+xml;base64,"));

    Ok(())
}

#[tokio::test]
async fn test_lab_page_omits_image_without_allow_listed_items() -> Result<()> {
    let (_, app) = app(vec![record(1, 1, "Router", "Netgear", "100", "01-01-2020")]);

    let body = body_text(app.oneshot(post_form("/lab", "lab=1")).await?).await?;

    assert!(!body.contains("data:image/svg+xml;base64,"));

    Ok(())
}

#[tokio::test]
async fn test_lab_page_rejects_non_numeric_lab() -> Result<()> {
    let (_, app) = app(inventory());

    let response = app.oneshot(post_form("/lab", "lab=second")).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await?.contains("Invalid Lab value"));

    Ok(())
}

#[tokio::test]
async fn test_admin_lists_records_and_counts() -> Result<()> {
    let (_, app) = app(inventory());

    let response = app.oneshot(get("/admin")).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await?;
    assert!(body.contains("Lenovo ThinkCentre"));
    assert!(body.contains("TP-Link Archer"));
    assert!(body.contains("<th>Product_Type</th>"));
    assert!(body.contains("<td>Router</td><td>1</td>"));

    Ok(())
}

#[tokio::test]
async fn test_add_entry_appends_and_redirects() -> Result<()> {
    let (store, app) = app(inventory());

    let response = app.oneshot(post_form("/add_entry", NEW_ENTRY)).await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/admin");

    let records = store.snapshot();
    let added = records.iter().find(|record| record.serial_number == 9).unwrap();
    assert_eq!(added.description, "Dell U2422H");
    assert_eq!(added.lab, 7);
    assert_eq!(added.amount, Decimal::from_str("31999.50")?);
    assert_eq!(added.date, "21-06-2023");
    assert_eq!(added.remarks, "");

    Ok(())
}

#[tokio::test]
async fn test_add_entry_rejects_duplicate_serial() -> Result<()> {
    let (store, app) = app(inventory());
    let duplicate = NEW_ENTRY.replacen("sr=9", "sr=3", 1);

    let response = app.oneshot(post_form("/add_entry", &duplicate)).await?;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(store.snapshot(), inventory());

    Ok(())
}

#[tokio::test]
async fn test_add_entry_rejects_invalid_amount() -> Result<()> {
    let (store, app) = app(inventory());
    let invalid = NEW_ENTRY.replacen("amount=31999.50", "amount=lots", 1);

    let response = app.oneshot(post_form("/add_entry", &invalid)).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.snapshot(), inventory());

    Ok(())
}

#[tokio::test]
async fn test_failed_write_returns_server_error() -> Result<()> {
    let (store, app) = app(inventory());
    store.fail_writes(true);

    let response = app.oneshot(post_form("/add_entry", NEW_ENTRY)).await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(store.snapshot(), inventory());

    Ok(())
}

#[tokio::test]
async fn test_delete_entry_removes_serial_and_redirects() -> Result<()> {
    let (store, app) = app(inventory());

    let response = app.oneshot(post_form("/delete_entry", "sr=2")).await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(store.snapshot().iter().all(|record| record.serial_number != 2));
    assert_eq!(store.snapshot().len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_delete_entry_of_unknown_serial_still_redirects() -> Result<()> {
    let (store, app) = app(inventory());

    let response = app.oneshot(post_form("/delete_entry", "sr=77")).await?;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.snapshot(), inventory());

    Ok(())
}

#[tokio::test]
async fn test_search_lists_only_matching_records() -> Result<()> {
    let (_, app) = app(inventory());

    let response = app.oneshot(post_form("/search", "searchQuery=CANON")).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await?;
    assert!(body.contains("Canon ImageClass"));
    assert!(!body.contains("Lenovo ThinkCentre"));
    assert!(!body.contains("BenQ MX560"));

    Ok(())
}

#[tokio::test]
async fn test_search_without_matches_shows_empty_state() -> Result<()> {
    let (_, app) = app(inventory());

    let body = body_text(app.oneshot(post_form("/search", "searchQuery=scanner")).await?).await?;

    assert!(body.contains("No records match"));
    assert!(!body.contains("<td>"));

    Ok(())
}

#[tokio::test]
async fn test_overview_leaves_out_undated_rows() -> Result<()> {
    let (_, app) = app(inventory());

    let body = body_text(app.oneshot(get("/")).await?).await?;

    assert!(body.contains(r#""label":"Desktop""#));
    assert!(!body.contains(r#""label":"Router""#));

    Ok(())
}

#[tokio::test]
async fn test_lab_page_keeps_undated_rows() -> Result<()> {
    let (_, app) = app(inventory());

    let body = body_text(app.oneshot(post_form("/lab", "lab=5")).await?).await?;

    assert!(body.contains(r#""category":"Router""#));

    Ok(())
}

#[tokio::test]
async fn test_missing_form_field_is_rejected() -> Result<()> {
    let (store, app) = app(inventory());

    let response = app.oneshot(post_form("/delete_entry", "")).await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await?.contains("sr"));
    assert_eq!(store.snapshot(), inventory());

    Ok(())
}

#[tokio::test]
async fn test_add_entry_rejects_text_outside_latin1() -> Result<()> {
    let directory = tempdir()?;
    let path = directory.path().join("data.csv");
    let store = Arc::new(CsvStore::new(&path));
    store.save(&inventory())?;
    let before = std::fs::read(&path)?;
    let app = create_router(Arc::new(RecordRepository::new(store)), Path::new("static"));
    let euro = NEW_ENTRY.replacen("description=Dell+U2422H", "description=Dell+%E2%82%AC", 1);

    let response = app.oneshot(post_form("/add_entry", &euro)).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(std::fs::read(&path)?, before);

    Ok(())
}
