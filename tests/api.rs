//! Public API: lead forms and the read-only catalog

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use carstreet::backend::db::SiteStore;
use carstreet::shared::{FaqInput, LeadKind, LeadStatus, Vehicle, VehicleStatus};
use common::{add_vehicle, add_vehicle_with_status, spawn};

fn sell_request() -> Value {
    json!({
        "year": "2016", "make": "Mazda", "model": "3", "vin": null,
        "city": "Simcoe", "province": "ON", "odometer": "140000",
        "transmission": "Manual", "exteriorColor": "Red", "interiorColor": "Black",
        "keys": "2", "exteriorDamage": "false", "interiorDamage": "false",
        "accidentClaims": "true", "smokedIn": "false", "windshieldCrack": "false",
        "firstName": "Sam", "lastName": "Seller",
        "email": "sam@example.com", "phone": "5195550111"
    })
}

#[tokio::test]
async fn test_contact_submission_is_stored_and_notified() {
    let app = spawn();

    let response = app
        .server
        .post("/api/contact")
        .json(&json!({
            "name": "Jane <b>Driver</b>",
            "email": "jane@example.com",
            "phone": "5195550100",
            "message": "Is the Civic still available?"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let id = response.json::<Value>()["id"].as_str().unwrap().to_string();

    let leads = app.store.leads().await.unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].id.to_string(), id);
    assert_eq!(leads[0].status, LeadStatus::New);
    assert_eq!(leads[0].kind(), LeadKind::Contact);

    let sent = app.notifier.wait_for(1).await;
    assert_eq!(sent.len(), 1);
    assert!(sent[0].html.contains("Jane &lt;b&gt;Driver&lt;/b&gt;"));
}

#[tokio::test]
async fn test_contact_validation_errors_are_400_json() {
    let app = spawn();

    let response = app
        .server
        .post("/api/contact")
        .json(&json!({
            "name": "Jane",
            "email": "jane@example.com",
            "phone": "555-0100",
            "message": "Hello"
        }))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Phone number must be exactly 10 digits");
    assert!(app.store.leads().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sell_request_is_prefixed_lead() {
    let app = spawn();

    app.server
        .post("/api/sell-requests")
        .json(&sell_request())
        .await
        .assert_status(StatusCode::CREATED);

    let leads = app.store.leads().await.unwrap();
    assert_eq!(leads[0].message, "Sell Your Car Request: 2016 Mazda 3");
    assert_eq!(leads[0].name, "Sam Seller");
    let notes: Value = serde_json::from_str(leads[0].notes.as_deref().unwrap()).unwrap();
    assert_eq!(notes["accidentClaims"], "true");

    let sent = app.notifier.wait_for(1).await;
    assert_eq!(sent[0].subject, "New Sell Your Car Request: 2016 Mazda 3");
}

#[tokio::test]
async fn test_pre_approval_is_stored_with_payload() {
    let app = spawn();

    app.server
        .post("/api/pre-approval")
        .json(&json!({
            "firstName": "Pat", "lastName": "Buyer",
            "email": "pat@example.com", "phone": "5195550199",
            "incomeDetails": { "type": "employed", "annualIncome": "52000" },
            "budget": "20000"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let leads = app.store.leads().await.unwrap();
    assert_eq!(leads[0].message, "Pre-Approval Application: Pat Buyer");
    assert_eq!(leads[0].kind(), LeadKind::PreApproval);

    let sent = app.notifier.wait_for(1).await;
    assert!(sent[0].html.contains("<strong>Gross Income:</strong> 52000"));
}

#[tokio::test]
async fn test_store_outage_is_503() {
    let app = spawn();
    app.store.set_unavailable(true);

    let response = app
        .server
        .post("/api/contact")
        .json(&json!({ "name": "Jane", "email": "jane@example.com", "message": "Hi" }))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json::<Value>()["error"], "Service temporarily unavailable");
}

#[tokio::test]
async fn test_vehicle_listing_applies_filters() {
    let app = spawn();
    add_vehicle(&app.store, "Honda", "Civic", 2019, 18_500.0).await;
    add_vehicle(&app.store, "Toyota", "RAV4", 2021, 31_000.0).await;
    add_vehicle_with_status(&app.store, VehicleStatus::Sold).await;

    let all: Vec<Vehicle> = app.server.get("/api/vehicles").await.json();
    assert_eq!(all.len(), 2);

    let cheap: Vec<Vehicle> = app.server.get("/api/vehicles?price=under20k").await.json();
    assert_eq!(cheap.len(), 1);
    assert_eq!(cheap[0].make, "Honda");

    let searched: Vec<Vehicle> = app.server.get("/api/vehicles?q=rav").await.json();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].model, "RAV4");
}

#[tokio::test]
async fn test_vehicle_by_id() {
    let app = spawn();
    let civic = add_vehicle(&app.store, "Honda", "Civic", 2019, 18_500.0).await;

    let found: Vehicle = app.server.get(&format!("/api/vehicles/{}", civic.id)).await.json();
    assert_eq!(found.id, civic.id);

    let missing = app
        .server
        .get(&format!("/api/vehicles/{}", uuid::Uuid::new_v4()))
        .expect_failure()
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["error"], "Vehicle not found");
}

#[tokio::test]
async fn test_public_faqs_are_active_and_ordered() {
    let app = spawn();
    for (question, order, active) in [("Second?", 2, true), ("Hidden?", 0, false), ("First?", 1, true)] {
        app.store
            .create_faq(FaqInput {
                question: question.to_string(),
                answer: "Yes.".to_string(),
                display_order: order,
                is_active: active,
            })
            .await
            .unwrap();
    }

    let faqs: Vec<Value> = app.server.get("/api/faqs").await.json();
    let questions: Vec<&str> = faqs.iter().map(|f| f["question"].as_str().unwrap()).collect();
    assert_eq!(questions, vec!["First?", "Second?"]);
}
