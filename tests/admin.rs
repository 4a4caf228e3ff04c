//! Admin API: authentication guard and back-office operations

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use tempfile::TempDir;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use carstreet::backend::auth::create_token;
use carstreet::backend::db::SiteStore;
use carstreet::backend::server::RunMode;
use carstreet::shared::{NewLead, Role};
use common::{
    add_vehicle, admin_token, spawn, spawn_with, test_config, token_with_role, vehicle_input,
    write_file, JWT_SECRET, SHELL,
};

#[tokio::test]
async fn test_missing_token_is_401() {
    let app = spawn();

    let response = app.server.get("/api/admin/dashboard").expect_failure().await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["status"], 401);
}

#[tokio::test]
async fn test_token_with_wrong_secret_is_401() {
    let app = spawn();
    let token = create_token("some-other-secret-entirely-0123456789", Uuid::new_v4(), "x@y.ca", 3600).unwrap();

    app.server
        .get("/api/admin/dashboard")
        .authorization_bearer(token)
        .expect_failure()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_api_disabled_without_secret() {
    let root = TempDir::new().unwrap();
    write_file(root.path(), "src/index.html", SHELL);
    let mut config = test_config(RunMode::Development, root.path());
    config.jwt_secret = None;
    let app = spawn_with(root, config, |_| {});
    let token = admin_token(&app.store).await;

    app.server
        .get("/api/admin/dashboard")
        .authorization_bearer(token)
        .expect_failure()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_admin_is_403() {
    let app = spawn();
    let (_, token) = token_with_role(&app.store, Some(Role::User)).await;

    let response = app
        .server
        .get("/api/admin/dashboard")
        .authorization_bearer(token)
        .expect_failure()
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["error"], "Admin access required");
}

#[tokio::test]
async fn test_dashboard_counts() {
    let app = spawn();
    let token = admin_token(&app.store).await;
    add_vehicle(&app.store, "Honda", "Civic", 2019, 18_500.0).await;
    common::add_vehicle_with_status(&app.store, carstreet::shared::VehicleStatus::Sold).await;
    app.store
        .insert_lead(NewLead {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            phone: None,
            message: "Hello".into(),
            notes: None,
        })
        .await
        .unwrap();

    let stats: Value = app.server.get("/api/admin/dashboard").authorization_bearer(token).await.json();
    assert_eq!(
        stats,
        json!({ "total_vehicles": 2, "available_vehicles": 1, "sold_vehicles": 1, "total_leads": 1 })
    );
}

#[tokio::test]
async fn test_vehicle_crud_submits_to_indexnow() {
    let indexnow = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&indexnow)
        .await;

    let root = TempDir::new().unwrap();
    let mut config = test_config(RunMode::Development, root.path());
    config.indexnow_endpoint = format!("{}/indexnow", indexnow.uri());
    let app = spawn_with(root, config, |_| {});
    let token = admin_token(&app.store).await;

    let created = app
        .server
        .post("/api/admin/vehicles")
        .authorization_bearer(&token)
        .json(&vehicle_input("Honda", "Civic", 2019, 18_500.0))
        .await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<Value>()["id"].as_str().unwrap().to_string();

    let mut update = vehicle_input("Honda", "Civic", 2019, 17_900.0);
    update.featured = true;
    let updated: Value = app
        .server
        .put(&format!("/api/admin/vehicles/{id}"))
        .authorization_bearer(&token)
        .json(&update)
        .await
        .json();
    assert_eq!(updated["price"], 17_900.0);
    assert_eq!(updated["featured"], true);

    app.server
        .delete(&format!("/api/admin/vehicles/{id}"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .get(&format!("/api/admin/vehicles/{id}"))
        .authorization_bearer(&token)
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let mut received = Vec::new();
    for _ in 0..100 {
        received = indexnow.received_requests().await.unwrap_or_default();
        if received.len() >= 3 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(received.len(), 3);
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(
        body["urlList"],
        json!([format!("https://carstreet.ca/vehicle/{id}"), "https://carstreet.ca/inventory"])
    );
}

#[tokio::test]
async fn test_invalid_vehicle_is_400() {
    let app = spawn();
    let token = admin_token(&app.store).await;

    let response = app
        .server
        .post("/api/admin/vehicles")
        .authorization_bearer(token)
        .json(&vehicle_input("", "Civic", 2019, 18_500.0))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Make is required");
}

async fn upload_image(app: &common::TestApp, token: &str, vehicle_id: Uuid, url: &str, primary: bool) -> Uuid {
    let response = app
        .server
        .post(&format!("/api/admin/vehicles/{vehicle_id}/images"))
        .authorization_bearer(token)
        .json(&json!({ "image_url": url, "is_primary": primary }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["id"].as_str().and_then(|id| id.parse().ok()).unwrap()
}

async fn image_orders(app: &common::TestApp, vehicle_id: Uuid) -> Vec<(Uuid, i32)> {
    let vehicle = app.store.vehicle(vehicle_id).await.unwrap().unwrap();
    vehicle.images.iter().map(|i| (i.id, i.display_order)).collect()
}

#[tokio::test]
async fn test_primary_image_and_order() {
    let app = spawn();
    let token = admin_token(&app.store).await;
    let civic = add_vehicle(&app.store, "Honda", "Civic", 2019, 18_500.0).await;
    let front = upload_image(&app, &token, civic.id, "/img/front.jpg", true).await;
    let side = upload_image(&app, &token, civic.id, "/img/side.jpg", false).await;

    app.server
        .put(&format!("/api/admin/vehicles/{}/images/{side}/primary", civic.id))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .put(&format!("/api/admin/vehicles/{}/images/order", civic.id))
        .authorization_bearer(&token)
        .json(&json!([side, front]))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let vehicle = app.store.vehicle(civic.id).await.unwrap().unwrap();
    let primaries: Vec<Uuid> = vehicle.images.iter().filter(|i| i.is_primary).map(|i| i.id).collect();
    assert_eq!(primaries, vec![side]);
    assert_eq!(image_orders(&app, civic.id).await, vec![(side, 0), (front, 1)]);

    app.server
        .put(&format!("/api/admin/vehicles/{}/images/order", Uuid::new_v4()))
        .authorization_bearer(&token)
        .json(&json!([side]))
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reorder_requires_every_image_exactly_once() {
    let app = spawn();
    let token = admin_token(&app.store).await;
    let civic = add_vehicle(&app.store, "Honda", "Civic", 2019, 18_500.0).await;
    let a = upload_image(&app, &token, civic.id, "/img/a.jpg", false).await;
    let b = upload_image(&app, &token, civic.id, "/img/b.jpg", false).await;
    let c = upload_image(&app, &token, civic.id, "/img/c.jpg", false).await;

    for body in [json!([c]), json!([a, a, c]), json!([a, b, c, c]), json!([a, b, Uuid::new_v4()])] {
        let response = app
            .server
            .put(&format!("/api/admin/vehicles/{}/images/order", civic.id))
            .authorization_bearer(&token)
            .json(&body)
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Image order must list each of the vehicle's images exactly once"
        );
    }
    assert_eq!(image_orders(&app, civic.id).await, vec![(a, 0), (b, 1), (c, 2)]);

    app.server
        .put(&format!("/api/admin/vehicles/{}/images/order", civic.id))
        .authorization_bearer(&token)
        .json(&json!([c, a, b]))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(image_orders(&app, civic.id).await, vec![(c, 0), (a, 1), (b, 2)]);
}

#[tokio::test]
async fn test_add_and_delete_images() {
    let app = spawn();
    let token = admin_token(&app.store).await;
    let civic = add_vehicle(&app.store, "Honda", "Civic", 2019, 18_500.0).await;

    let response = app
        .server
        .post(&format!("/api/admin/vehicles/{}/images", civic.id))
        .authorization_bearer(&token)
        .json(&json!({ "image_url": "https://cdn.carstreet.ca/civic/front.jpg", "is_primary": true }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["vehicle_id"], json!(civic.id));
    assert_eq!(body["is_primary"], true);
    assert_eq!(body["display_order"], 0);
    let front: Uuid = body["id"].as_str().and_then(|id| id.parse().ok()).unwrap();

    let rear = upload_image(&app, &token, civic.id, "/img/rear.jpg", false).await;
    let cabin = upload_image(&app, &token, civic.id, "/img/cabin.jpg", false).await;

    app.server
        .delete(&format!("/api/admin/vehicles/{}/images/{rear}", civic.id))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(image_orders(&app, civic.id).await, vec![(front, 0), (cabin, 1)]);

    app.server
        .delete(&format!("/api/admin/vehicles/{}/images/{rear}", civic.id))
        .authorization_bearer(&token)
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .post(&format!("/api/admin/vehicles/{}/images", Uuid::new_v4()))
        .authorization_bearer(&token)
        .json(&json!({ "image_url": "/img/x.jpg" }))
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = app
        .server
        .post(&format!("/api/admin/vehicles/{}/images", civic.id))
        .authorization_bearer(&token)
        .json(&json!({ "image_url": "javascript:alert(1)" }))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_image_routes_require_admin() {
    let app = spawn();
    let civic = add_vehicle(&app.store, "Honda", "Civic", 2019, 18_500.0).await;
    app.server
        .post(&format!("/api/admin/vehicles/{}/images", civic.id))
        .json(&json!({ "image_url": "/img/x.jpg" }))
        .expect_failure()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_leads_views_and_notes() {
    let app = spawn();
    let token = admin_token(&app.store).await;
    let contact = app
        .store
        .insert_lead(NewLead {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            phone: None,
            message: "Hello".into(),
            notes: None,
        })
        .await
        .unwrap();
    let sell = app
        .store
        .insert_lead(NewLead {
            name: "Sam Seller".into(),
            email: "sam@example.com".into(),
            phone: Some("5195550111".into()),
            message: "Sell Your Car Request: 2016 Mazda 3".into(),
            notes: Some(r#"{"make":"Mazda"}"#.into()),
        })
        .await
        .unwrap();

    let leads: Vec<Value> = app.server.get("/api/admin/leads").authorization_bearer(&token).await.json();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0]["id"], contact.id.to_string());
    assert_eq!(leads[0]["kind"], "contact");

    let sells: Vec<Value> = app.server.get("/api/admin/sell-requests").authorization_bearer(&token).await.json();
    assert_eq!(sells.len(), 1);
    assert_eq!(sells[0]["kind"], "sell-request");

    let updated: Value = app
        .server
        .patch(&format!("/api/admin/leads/{}", sell.id))
        .authorization_bearer(&token)
        .json(&json!({ "status": "contacted", "notes": "Offered $6k" }))
        .await
        .json();
    assert_eq!(updated["status"], "contacted");
    assert_eq!(updated["admin_notes"], "Offered $6k");

    let stored = app.store.lead(sell.id).await.unwrap().unwrap();
    let notes: Value = serde_json::from_str(stored.notes.as_deref().unwrap()).unwrap();
    assert_eq!(notes["make"], "Mazda");
    assert_eq!(notes["_adminNotes"], "Offered $6k");

    app.server
        .patch(&format!("/api/admin/leads/{}", Uuid::new_v4()))
        .authorization_bearer(&token)
        .json(&json!({ "status": "processed" }))
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_role_management() {
    let app = spawn();
    let token = admin_token(&app.store).await;
    let (member, _) = token_with_role(&app.store, None).await;

    app.server
        .put(&format!("/api/admin/users/{member}/roles/admin"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert!(app.store.has_role(member, Role::Admin).await.unwrap());

    let users: Vec<Value> = app.server.get("/api/admin/users").authorization_bearer(&token).await.json();
    let listed = users.iter().find(|u| u["id"] == member.to_string()).unwrap();
    assert_eq!(listed["roles"], json!(["admin"]));

    app.server
        .delete(&format!("/api/admin/users/{member}/roles/admin"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .delete(&format!("/api/admin/users/{member}/roles/admin"))
        .authorization_bearer(&token)
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .put(&format!("/api/admin/users/{member}/roles/owner"))
        .authorization_bearer(&token)
        .expect_failure()
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_faq_crud() {
    let app = spawn();
    let token = admin_token(&app.store).await;

    let created = app
        .server
        .post("/api/admin/faqs")
        .authorization_bearer(&token)
        .json(&json!({ "question": "Do you take trades?", "answer": "Yes.", "is_active": false }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let id = created.json::<Value>()["id"].as_str().unwrap().to_string();

    let all: Vec<Value> = app.server.get("/api/admin/faqs").authorization_bearer(&token).await.json();
    assert_eq!(all.len(), 1);
    let public: Vec<Value> = app.server.get("/api/faqs").await.json();
    assert!(public.is_empty());

    let updated: Value = app
        .server
        .put(&format!("/api/admin/faqs/{id}"))
        .authorization_bearer(&token)
        .json(&json!({ "question": "Do you take trades?", "answer": "Always.", "is_active": true }))
        .await
        .json();
    assert_eq!(updated["answer"], "Always.");

    app.server
        .post("/api/admin/faqs")
        .authorization_bearer(&token)
        .json(&json!({ "question": " ", "answer": "x" }))
        .expect_failure()
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    app.server
        .delete(&format!("/api/admin/faqs/{id}"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .delete(&format!("/api/admin/faqs/{id}"))
        .authorization_bearer(&token)
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_expired_token_is_401() {
    let app = spawn();
    let (id, _) = token_with_role(&app.store, Some(Role::Admin)).await;
    let claims = carstreet::backend::auth::Claims {
        sub: id.to_string(),
        email: None,
        aud: "authenticated".to_string(),
        exp: 1_000_000,
        iat: 999_000,
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();

    app.server
        .get("/api/admin/users")
        .authorization_bearer(token)
        .expect_failure()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
