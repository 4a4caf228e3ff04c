//! Common test utilities and helpers
//!
//! Builds the full router on top of an in-process store, with templates
//! written into a temporary directory and a notifier that records what it
//! was asked to send.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use uuid::Uuid;

use carstreet::backend::auth::create_token;
use carstreet::backend::db::{MemoryStore, SiteStore};
use carstreet::backend::leads::{LeadEmail, LeadNotifier, NotifyError};
use carstreet::backend::routes::create_router;
use carstreet::backend::server::{AppState, RunMode, ServerConfig};
use carstreet::shared::{Role, Vehicle, VehicleCondition, VehicleInput, VehicleStatus};

pub const JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Shell with both markers, as the front-end build emits it
pub const SHELL: &str = "<!doctype html><html><head><!--helmet-meta--></head><body><div id=\"root\"><!--app-html--></div></body></html>";

/// Notifier that keeps every email instead of sending it
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<LeadEmail>>,
}

#[async_trait]
impl LeadNotifier for RecordingNotifier {
    async fn notify(&self, email: LeadEmail) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

impl RecordingNotifier {
    /// Wait for the background task to deliver `count` emails
    pub async fn wait_for(&self, count: usize) -> Vec<LeadEmail> {
        for _ in 0..100 {
            {
                let sent = self.sent.lock().unwrap();
                if sent.len() >= count {
                    return sent.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent.lock().unwrap().clone()
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub root: TempDir,
}

/// Configuration rooted at `root` with admin auth enabled
pub fn test_config(mode: RunMode, root: &Path) -> ServerConfig {
    let mut config = ServerConfig::for_root(mode, root);
    config.jwt_secret = Some(JWT_SECRET.to_string());
    config.indexnow_endpoint = "http://127.0.0.1:9/indexnow".to_string();
    config
}

pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

/// Build the router for `config`, letting the caller adjust state first
pub fn spawn_with(
    root: TempDir,
    config: ServerConfig,
    customize: impl FnOnce(&mut AppState),
) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::default());

    let mut state = AppState::new(config, store.clone());
    state.notifier = notifier.clone();
    customize(&mut state);

    let server = TestServer::new(create_router(state)).unwrap();
    TestApp { server, store, notifier, root }
}

/// Development app with the source template in place
pub fn spawn() -> TestApp {
    let root = TempDir::new().unwrap();
    write_file(root.path(), "src/index.html", SHELL);
    let config = test_config(RunMode::Development, root.path());
    spawn_with(root, config, |_| {})
}

pub fn vehicle_input(make: &str, model: &str, year: i32, price: f64) -> VehicleInput {
    VehicleInput {
        make: make.to_string(),
        model: model.to_string(),
        year,
        price,
        mileage: 85_000,
        vin: None,
        transmission: "Automatic".to_string(),
        fuel_type: "Gasoline".to_string(),
        drivetrain: "FWD".to_string(),
        engine: None,
        color: "Silver".to_string(),
        body_type: Some("Sedan".to_string()),
        condition: VehicleCondition::Good,
        status: VehicleStatus::Available,
        description: None,
        featured: false,
    }
}

pub async fn add_vehicle(store: &MemoryStore, make: &str, model: &str, year: i32, price: f64) -> Vehicle {
    store.create_vehicle(vehicle_input(make, model, year, price)).await.unwrap()
}

pub async fn add_vehicle_with_status(store: &MemoryStore, status: VehicleStatus) -> Vehicle {
    let mut input = vehicle_input("Ford", "Focus", 2015, 9_900.0);
    input.status = status;
    store.create_vehicle(input).await.unwrap()
}

/// Session token for a new profile holding `role`, if any
pub async fn token_with_role(store: &MemoryStore, role: Option<Role>) -> (Uuid, String) {
    let id = Uuid::new_v4();
    let email = format!("staff-{id}@carstreet.ca");
    store.add_profile(id, &email, Some("Staff Member")).await;
    if let Some(role) = role {
        store.grant_role(id, role).await.unwrap();
    }
    let token = create_token(JWT_SECRET, id, &email, 3600).unwrap();
    (id, token)
}

pub async fn admin_token(store: &MemoryStore) -> String {
    token_with_role(store, Some(Role::Admin)).await.1
}
