//! In-process store
//!
//! Keeps every table in memory behind a single `RwLock`. Used when no
//! `DATABASE_URL` is configured and by the test suite, which can also flip
//! the store into an unavailable state to exercise error paths.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{SiteStore, StoreError, StoreResult};
use crate::shared::{
    Faq, FaqInput, Lead, LeadStatus, NewLead, NewVehicleImage, Role, SitemapVehicle, UserWithRoles,
    Vehicle, VehicleImage, VehicleInput, VehicleStatus,
};

#[derive(Default)]
struct Tables {
    vehicles: Vec<Vehicle>,
    leads: Vec<Lead>,
    faqs: Vec<Faq>,
    profiles: Vec<(Uuid, Option<String>, Option<String>)>,
    roles: HashMap<Uuid, HashSet<Role>>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`]
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("memory store switched off".to_string()))
        } else {
            Ok(())
        }
    }

    /// Insert a fully-formed vehicle row, keeping its timestamps and images
    pub async fn insert_vehicle(&self, vehicle: Vehicle) {
        self.tables.write().await.vehicles.push(vehicle);
    }

    pub async fn add_profile(&self, id: Uuid, email: &str, full_name: Option<&str>) {
        self.tables
            .write()
            .await
            .profiles
            .push((id, Some(email.to_string()), full_name.map(str::to_string)));
    }

    fn sorted_newest_first(mut vehicles: Vec<Vehicle>) -> Vec<Vehicle> {
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        for vehicle in &mut vehicles {
            vehicle.images.sort_by_key(|image| image.display_order);
        }
        vehicles
    }

    fn apply_input(vehicle: &mut Vehicle, input: VehicleInput) {
        vehicle.make = input.make;
        vehicle.model = input.model;
        vehicle.year = input.year;
        vehicle.price = input.price;
        vehicle.mileage = input.mileage;
        vehicle.vin = input.vin;
        vehicle.transmission = input.transmission;
        vehicle.fuel_type = input.fuel_type;
        vehicle.drivetrain = input.drivetrain;
        vehicle.engine = input.engine;
        vehicle.color = input.color;
        vehicle.body_type = input.body_type;
        vehicle.condition = input.condition;
        vehicle.status = input.status;
        vehicle.description = input.description;
        vehicle.featured = input.featured;
    }
}

#[async_trait]
impl SiteStore for MemoryStore {
    async fn available_vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        self.check()?;
        let tables = self.tables.read().await;
        let vehicles = tables
            .vehicles
            .iter()
            .filter(|v| v.status == VehicleStatus::Available)
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(vehicles))
    }

    async fn featured_vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        Ok(self
            .available_vehicles()
            .await?
            .into_iter()
            .filter(|v| v.featured)
            .collect())
    }

    async fn all_vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        self.check()?;
        let vehicles = self.tables.read().await.vehicles.clone();
        Ok(Self::sorted_newest_first(vehicles))
    }

    async fn vehicle(&self, id: Uuid) -> StoreResult<Option<Vehicle>> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.vehicles.iter().find(|v| v.id == id).cloned().map(|mut v| {
            v.images.sort_by_key(|image| image.display_order);
            v
        }))
    }

    async fn sitemap_vehicles(&self) -> StoreResult<Vec<SitemapVehicle>> {
        self.check()?;
        let tables = self.tables.read().await;
        let mut rows: Vec<SitemapVehicle> = tables
            .vehicles
            .iter()
            .filter(|v| v.status == VehicleStatus::Available)
            .map(|v| SitemapVehicle { id: v.id, updated_at: v.updated_at })
            .collect();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(rows)
    }

    async fn create_vehicle(&self, input: VehicleInput) -> StoreResult<Vehicle> {
        self.check()?;
        let now = Utc::now();
        let mut vehicle = Vehicle {
            id: Uuid::new_v4(),
            make: String::new(),
            model: String::new(),
            year: 0,
            price: 0.0,
            mileage: 0,
            vin: None,
            transmission: String::new(),
            fuel_type: String::new(),
            drivetrain: String::new(),
            engine: None,
            color: String::new(),
            body_type: None,
            condition: input.condition,
            status: input.status,
            description: None,
            featured: false,
            created_at: now,
            updated_at: now,
            images: Vec::new(),
        };
        Self::apply_input(&mut vehicle, input);
        self.tables.write().await.vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update_vehicle(&self, id: Uuid, input: VehicleInput) -> StoreResult<Option<Vehicle>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(vehicle) = tables.vehicles.iter_mut().find(|v| v.id == id) else {
            return Ok(None);
        };
        Self::apply_input(vehicle, input);
        vehicle.updated_at = Utc::now();
        Ok(Some(vehicle.clone()))
    }

    async fn delete_vehicle(&self, id: Uuid) -> StoreResult<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.vehicles.len();
        tables.vehicles.retain(|v| v.id != id);
        Ok(tables.vehicles.len() != before)
    }

    async fn add_image(
        &self,
        vehicle_id: Uuid,
        image: NewVehicleImage,
    ) -> StoreResult<Option<VehicleImage>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(vehicle) = tables.vehicles.iter_mut().find(|v| v.id == vehicle_id) else {
            return Ok(None);
        };
        if image.is_primary {
            for existing in &mut vehicle.images {
                existing.is_primary = false;
            }
        }
        let display_order = vehicle.images.iter().map(|i| i.display_order + 1).max().unwrap_or(0);
        let image = VehicleImage {
            id: Uuid::new_v4(),
            vehicle_id,
            image_url: image.image_url.trim().to_string(),
            is_primary: image.is_primary,
            display_order,
        };
        vehicle.images.push(image.clone());
        Ok(Some(image))
    }

    async fn delete_image(&self, vehicle_id: Uuid, image_id: Uuid) -> StoreResult<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(vehicle) = tables.vehicles.iter_mut().find(|v| v.id == vehicle_id) else {
            return Ok(false);
        };
        let before = vehicle.images.len();
        vehicle.images.retain(|image| image.id != image_id);
        if vehicle.images.len() == before {
            return Ok(false);
        }
        vehicle.images.sort_by_key(|image| image.display_order);
        for (position, image) in vehicle.images.iter_mut().enumerate() {
            image.display_order = position as i32;
        }
        Ok(true)
    }

    async fn set_primary_image(&self, vehicle_id: Uuid, image_id: Uuid) -> StoreResult<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(vehicle) = tables.vehicles.iter_mut().find(|v| v.id == vehicle_id) else {
            return Ok(false);
        };
        if !vehicle.images.iter().any(|image| image.id == image_id) {
            return Ok(false);
        }
        for image in &mut vehicle.images {
            image.is_primary = image.id == image_id;
        }
        Ok(true)
    }

    async fn reorder_images(&self, vehicle_id: Uuid, ordered_ids: &[Uuid]) -> StoreResult<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(vehicle) = tables.vehicles.iter_mut().find(|v| v.id == vehicle_id) else {
            return Ok(false);
        };
        if !vehicle.is_image_permutation(ordered_ids) {
            return Ok(false);
        }
        for (position, id) in ordered_ids.iter().enumerate() {
            if let Some(image) = vehicle.images.iter_mut().find(|image| image.id == *id) {
                image.display_order = position as i32;
            }
        }
        Ok(true)
    }

    async fn insert_lead(&self, lead: NewLead) -> StoreResult<Lead> {
        self.check()?;
        let now = Utc::now();
        let lead = Lead {
            id: Uuid::new_v4(),
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            message: lead.message,
            notes: lead.notes,
            status: LeadStatus::New,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.leads.push(lead.clone());
        Ok(lead)
    }

    async fn leads(&self) -> StoreResult<Vec<Lead>> {
        self.check()?;
        let mut leads = self.tables.read().await.leads.clone();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }

    async fn lead(&self, id: Uuid) -> StoreResult<Option<Lead>> {
        self.check()?;
        Ok(self.tables.read().await.leads.iter().find(|l| l.id == id).cloned())
    }

    async fn update_lead(
        &self,
        id: Uuid,
        status: LeadStatus,
        notes: Option<String>,
    ) -> StoreResult<Option<Lead>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(lead) = tables.leads.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        lead.status = status;
        lead.notes = notes;
        lead.updated_at = Utc::now();
        Ok(Some(lead.clone()))
    }

    async fn faqs(&self, active_only: bool) -> StoreResult<Vec<Faq>> {
        self.check()?;
        let mut faqs: Vec<Faq> = self
            .tables
            .read()
            .await
            .faqs
            .iter()
            .filter(|f| !active_only || f.is_active)
            .cloned()
            .collect();
        faqs.sort_by_key(|f| f.display_order);
        Ok(faqs)
    }

    async fn create_faq(&self, input: FaqInput) -> StoreResult<Faq> {
        self.check()?;
        let faq = Faq {
            id: Uuid::new_v4(),
            question: input.question,
            answer: input.answer,
            display_order: input.display_order,
            is_active: input.is_active,
        };
        self.tables.write().await.faqs.push(faq.clone());
        Ok(faq)
    }

    async fn update_faq(&self, id: Uuid, input: FaqInput) -> StoreResult<Option<Faq>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(faq) = tables.faqs.iter_mut().find(|f| f.id == id) else {
            return Ok(None);
        };
        faq.question = input.question;
        faq.answer = input.answer;
        faq.display_order = input.display_order;
        faq.is_active = input.is_active;
        Ok(Some(faq.clone()))
    }

    async fn delete_faq(&self, id: Uuid) -> StoreResult<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.faqs.len();
        tables.faqs.retain(|f| f.id != id);
        Ok(tables.faqs.len() != before)
    }

    async fn users(&self) -> StoreResult<Vec<UserWithRoles>> {
        self.check()?;
        let tables = self.tables.read().await;
        let mut users: Vec<UserWithRoles> = tables
            .profiles
            .iter()
            .map(|(id, email, full_name)| {
                let mut roles: Vec<Role> = tables
                    .roles
                    .get(id)
                    .map(|set| set.iter().copied().collect())
                    .unwrap_or_default();
                roles.sort_by_key(|role| role.as_str());
                UserWithRoles { id: *id, email: email.clone(), full_name: full_name.clone(), roles }
            })
            .collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    async fn has_role(&self, user_id: Uuid, role: Role) -> StoreResult<bool> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.roles.get(&user_id).is_some_and(|set| set.contains(&role)))
    }

    async fn grant_role(&self, user_id: Uuid, role: Role) -> StoreResult<()> {
        self.check()?;
        self.tables.write().await.roles.entry(user_id).or_default().insert(role);
        Ok(())
    }

    async fn revoke_role(&self, user_id: Uuid, role: Role) -> StoreResult<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        Ok(tables.roles.get_mut(&user_id).is_some_and(|set| set.remove(&role)))
    }
}
