/**
 * PostgreSQL Store
 *
 * This module implements [`SiteStore`] on top of a `sqlx` connection pool
 * pointed at the hosted database. The schema is owned by the hosting
 * service; this crate runs no migrations.
 *
 * # Column Types
 *
 * `user_roles.role` is the `app_role` enum: it is read back with a `::text`
 * cast and bound with an explicit `::app_role` cast, since Postgres has no
 * assignment cast from `text` to an enum. Vehicle `status`/`condition` and
 * lead `status` are `text` columns with check constraints and bind as
 * plain strings. All of them map onto the domain enums through
 * `TryFrom<String>`. Money is read as `float8`.
 */

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use super::{SiteStore, StoreResult};
use crate::shared::vehicle::is_permutation_of;
use crate::shared::{
    Faq, FaqInput, Lead, LeadStatus, NewLead, NewVehicleImage, Role, SitemapVehicle, UserWithRoles,
    Vehicle, VehicleImage, VehicleInput,
};

const HAS_ROLE_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM user_roles WHERE user_id = $1 AND role = $2::app_role)";

const GRANT_ROLE_SQL: &str = "INSERT INTO user_roles (user_id, role) VALUES ($1, $2::app_role) \
     ON CONFLICT (user_id, role) DO NOTHING";

const REVOKE_ROLE_SQL: &str = "DELETE FROM user_roles WHERE user_id = $1 AND role = $2::app_role";

const IMAGE_COLUMNS: &str = "id, vehicle_id, image_url, is_primary, display_order";

const VEHICLE_COLUMNS: &str = "id, make, model, year, price::float8 AS price, mileage, vin, \
     transmission, fuel_type, drivetrain, engine, color, body_type, condition, status, description, \
     featured, created_at, updated_at";

const LEAD_COLUMNS: &str =
    "id, name, email, phone, message, notes, status, created_at, updated_at";

const FAQ_COLUMNS: &str = "id, question, answer, display_order, is_active";

/// [`SiteStore`] backed by the hosted PostgreSQL database
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url`
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Attach images to each vehicle with a single query
    async fn with_images(&self, mut vehicles: Vec<Vehicle>) -> StoreResult<Vec<Vehicle>> {
        if vehicles.is_empty() {
            return Ok(vehicles);
        }
        let ids: Vec<Uuid> = vehicles.iter().map(|v| v.id).collect();
        let sql = format!(
            "SELECT {IMAGE_COLUMNS} FROM vehicle_images WHERE vehicle_id = ANY($1) ORDER BY display_order ASC"
        );
        let images = sqlx::query_as::<_, VehicleImage>(&sql)
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;

        let mut by_vehicle: HashMap<Uuid, Vec<VehicleImage>> = HashMap::new();
        for image in images {
            by_vehicle.entry(image.vehicle_id).or_default().push(image);
        }
        for vehicle in &mut vehicles {
            vehicle.images = by_vehicle.remove(&vehicle.id).unwrap_or_default();
        }
        Ok(vehicles)
    }

    async fn vehicles_where(&self, clause: &str) -> StoreResult<Vec<Vehicle>> {
        let sql = format!("SELECT {VEHICLE_COLUMNS} FROM vehicles {clause} ORDER BY created_at DESC");
        let vehicles = sqlx::query_as::<_, Vehicle>(&sql).fetch_all(&self.pool).await?;
        self.with_images(vehicles).await
    }
}

#[async_trait]
impl SiteStore for PgStore {
    async fn available_vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        self.vehicles_where("WHERE status = 'available'").await
    }

    async fn featured_vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        self.vehicles_where("WHERE status = 'available' AND featured = true").await
    }

    async fn all_vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        self.vehicles_where("").await
    }

    async fn vehicle(&self, id: Uuid) -> StoreResult<Option<Vehicle>> {
        let sql = format!("SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1");
        let vehicle = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match vehicle {
            Some(vehicle) => Ok(self.with_images(vec![vehicle]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn sitemap_vehicles(&self) -> StoreResult<Vec<SitemapVehicle>> {
        let rows = sqlx::query_as::<_, SitemapVehicle>(
            r#"
            SELECT id, updated_at
            FROM vehicles
            WHERE status = 'available'
            ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_vehicle(&self, input: VehicleInput) -> StoreResult<Vehicle> {
        let sql = format!(
            r#"
            INSERT INTO vehicles (make, model, year, price, mileage, vin, transmission, fuel_type,
                                  drivetrain, engine, color, body_type, condition, status,
                                  description, featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {VEHICLE_COLUMNS}
            "#
        );
        let vehicle = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(&input.make)
            .bind(&input.model)
            .bind(input.year)
            .bind(input.price)
            .bind(input.mileage)
            .bind(&input.vin)
            .bind(&input.transmission)
            .bind(&input.fuel_type)
            .bind(&input.drivetrain)
            .bind(&input.engine)
            .bind(&input.color)
            .bind(&input.body_type)
            .bind(input.condition.as_str())
            .bind(input.status.as_str())
            .bind(&input.description)
            .bind(input.featured)
            .fetch_one(&self.pool)
            .await?;
        Ok(vehicle)
    }

    async fn update_vehicle(&self, id: Uuid, input: VehicleInput) -> StoreResult<Option<Vehicle>> {
        let sql = format!(
            r#"
            UPDATE vehicles
            SET make = $1, model = $2, year = $3, price = $4, mileage = $5, vin = $6,
                transmission = $7, fuel_type = $8, drivetrain = $9, engine = $10, color = $11,
                body_type = $12, condition = $13, status = $14, description = $15,
                featured = $16, updated_at = NOW()
            WHERE id = $17
            RETURNING {VEHICLE_COLUMNS}
            "#
        );
        let vehicle = sqlx::query_as::<_, Vehicle>(&sql)
            .bind(&input.make)
            .bind(&input.model)
            .bind(input.year)
            .bind(input.price)
            .bind(input.mileage)
            .bind(&input.vin)
            .bind(&input.transmission)
            .bind(&input.fuel_type)
            .bind(&input.drivetrain)
            .bind(&input.engine)
            .bind(&input.color)
            .bind(&input.body_type)
            .bind(input.condition.as_str())
            .bind(input.status.as_str())
            .bind(&input.description)
            .bind(input.featured)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match vehicle {
            Some(vehicle) => Ok(self.with_images(vec![vehicle]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn delete_vehicle(&self, id: Uuid) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM vehicle_images WHERE vehicle_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_image(
        &self,
        vehicle_id: Uuid,
        image: NewVehicleImage,
    ) -> StoreResult<Option<VehicleImage>> {
        let mut tx = self.pool.begin().await?;
        // Lock the vehicle row so concurrent uploads get distinct positions
        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(vehicle_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }
        if image.is_primary {
            sqlx::query("UPDATE vehicle_images SET is_primary = false WHERE vehicle_id = $1")
                .bind(vehicle_id)
                .execute(&mut *tx)
                .await?;
        }
        let sql = format!(
            r#"
            INSERT INTO vehicle_images (vehicle_id, image_url, is_primary, display_order)
            SELECT $1, $2, $3, COALESCE(MAX(display_order) + 1, 0)
            FROM vehicle_images
            WHERE vehicle_id = $1
            RETURNING {IMAGE_COLUMNS}
            "#
        );
        let image = sqlx::query_as::<_, VehicleImage>(&sql)
            .bind(vehicle_id)
            .bind(image.image_url.trim())
            .bind(image.is_primary)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(image))
    }

    async fn delete_image(&self, vehicle_id: Uuid, image_id: Uuid) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM vehicle_images WHERE id = $1 AND vehicle_id = $2")
            .bind(image_id)
            .bind(vehicle_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }
        sqlx::query(
            r#"
            UPDATE vehicle_images AS vi
            SET display_order = ranked.position
            FROM (
                SELECT id, (ROW_NUMBER() OVER (ORDER BY display_order, id) - 1)::int4 AS position
                FROM vehicle_images
                WHERE vehicle_id = $1
            ) AS ranked
            WHERE vi.id = ranked.id
            "#,
        )
        .bind(vehicle_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn set_primary_image(&self, vehicle_id: Uuid, image_id: Uuid) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE vehicle_images SET is_primary = false WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query(
            "UPDATE vehicle_images SET is_primary = true WHERE id = $1 AND vehicle_id = $2",
        )
        .bind(image_id)
        .bind(vehicle_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 1 {
            tx.commit().await?;
            Ok(true)
        } else {
            tx.rollback().await?;
            Ok(false)
        }
    }

    async fn reorder_images(&self, vehicle_id: Uuid, ordered_ids: &[Uuid]) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let current: Vec<Uuid> = sqlx::query_scalar(
            "SELECT id FROM vehicle_images WHERE vehicle_id = $1 FOR UPDATE",
        )
        .bind(vehicle_id)
        .fetch_all(&mut *tx)
        .await?;
        if !is_permutation_of(ordered_ids, &current) {
            tx.rollback().await?;
            return Ok(false);
        }
        for (position, image_id) in ordered_ids.iter().enumerate() {
            let result = sqlx::query(
                "UPDATE vehicle_images SET display_order = $1 WHERE id = $2 AND vehicle_id = $3",
            )
            .bind(position as i32)
            .bind(image_id)
            .bind(vehicle_id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() != 1 {
                tx.rollback().await?;
                return Ok(false);
            }
        }
        tx.commit().await?;
        Ok(true)
    }

    async fn insert_lead(&self, lead: NewLead) -> StoreResult<Lead> {
        let sql = format!(
            r#"
            INSERT INTO contact_submissions (name, email, phone, message, notes, status)
            VALUES ($1, $2, $3, $4, $5, 'new')
            RETURNING {LEAD_COLUMNS}
            "#
        );
        let lead = sqlx::query_as::<_, Lead>(&sql)
            .bind(&lead.name)
            .bind(&lead.email)
            .bind(&lead.phone)
            .bind(&lead.message)
            .bind(&lead.notes)
            .fetch_one(&self.pool)
            .await?;
        Ok(lead)
    }

    async fn leads(&self) -> StoreResult<Vec<Lead>> {
        let sql = format!("SELECT {LEAD_COLUMNS} FROM contact_submissions ORDER BY created_at DESC");
        let leads = sqlx::query_as::<_, Lead>(&sql).fetch_all(&self.pool).await?;
        Ok(leads)
    }

    async fn lead(&self, id: Uuid) -> StoreResult<Option<Lead>> {
        let sql = format!("SELECT {LEAD_COLUMNS} FROM contact_submissions WHERE id = $1");
        let lead = sqlx::query_as::<_, Lead>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(lead)
    }

    async fn update_lead(
        &self,
        id: Uuid,
        status: LeadStatus,
        notes: Option<String>,
    ) -> StoreResult<Option<Lead>> {
        let sql = format!(
            r#"
            UPDATE contact_submissions
            SET status = $1, notes = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING {LEAD_COLUMNS}
            "#
        );
        let lead = sqlx::query_as::<_, Lead>(&sql)
            .bind(status.as_str())
            .bind(&notes)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(lead)
    }

    async fn faqs(&self, active_only: bool) -> StoreResult<Vec<Faq>> {
        let sql = if active_only {
            format!("SELECT {FAQ_COLUMNS} FROM faqs WHERE is_active = true ORDER BY display_order ASC")
        } else {
            format!("SELECT {FAQ_COLUMNS} FROM faqs ORDER BY display_order ASC")
        };
        let faqs = sqlx::query_as::<_, Faq>(&sql).fetch_all(&self.pool).await?;
        Ok(faqs)
    }

    async fn create_faq(&self, input: FaqInput) -> StoreResult<Faq> {
        let sql = format!(
            r#"
            INSERT INTO faqs (question, answer, display_order, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING {FAQ_COLUMNS}
            "#
        );
        let faq = sqlx::query_as::<_, Faq>(&sql)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_one(&self.pool)
            .await?;
        Ok(faq)
    }

    async fn update_faq(&self, id: Uuid, input: FaqInput) -> StoreResult<Option<Faq>> {
        let sql = format!(
            r#"
            UPDATE faqs
            SET question = $1, answer = $2, display_order = $3, is_active = $4
            WHERE id = $5
            RETURNING {FAQ_COLUMNS}
            "#
        );
        let faq = sqlx::query_as::<_, Faq>(&sql)
            .bind(&input.question)
            .bind(&input.answer)
            .bind(input.display_order)
            .bind(input.is_active)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(faq)
    }

    async fn delete_faq(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM faqs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn users(&self) -> StoreResult<Vec<UserWithRoles>> {
        #[derive(sqlx::FromRow)]
        struct ProfileRow {
            id: Uuid,
            email: Option<String>,
            full_name: Option<String>,
        }

        #[derive(sqlx::FromRow)]
        struct RoleRow {
            user_id: Uuid,
            role: String,
        }

        let profiles = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, email, full_name FROM profiles ORDER BY email ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let roles = sqlx::query_as::<_, RoleRow>("SELECT user_id, role::text AS role FROM user_roles")
            .fetch_all(&self.pool)
            .await?;

        let mut by_user: HashMap<Uuid, Vec<Role>> = HashMap::new();
        for row in roles {
            match Role::try_from(row.role) {
                Ok(role) => by_user.entry(row.user_id).or_default().push(role),
                Err(e) => tracing::warn!("Skipping unknown role for {}: {}", row.user_id, e),
            }
        }

        Ok(profiles
            .into_iter()
            .map(|p| UserWithRoles {
                roles: by_user.remove(&p.id).unwrap_or_default(),
                id: p.id,
                email: p.email,
                full_name: p.full_name,
            })
            .collect())
    }

    async fn has_role(&self, user_id: Uuid, role: Role) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar(HAS_ROLE_SQL)
            .bind(user_id)
            .bind(role.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn grant_role(&self, user_id: Uuid, role: Role) -> StoreResult<()> {
        sqlx::query(GRANT_ROLE_SQL)
            .bind(user_id)
            .bind(role.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn revoke_role(&self, user_id: Uuid, role: Role) -> StoreResult<bool> {
        let result = sqlx::query(REVOKE_ROLE_SQL)
            .bind(user_id)
            .bind(role.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parameters_are_cast_to_enum() {
        for sql in [HAS_ROLE_SQL, GRANT_ROLE_SQL, REVOKE_ROLE_SQL] {
            assert!(sql.contains("$2::app_role"), "{sql}");
            assert!(!sql.contains("role::text"), "{sql}");
        }
    }

    #[test]
    fn test_text_columns_are_selected_without_casts() {
        assert!(!VEHICLE_COLUMNS.contains("::text"));
        assert!(!LEAD_COLUMNS.contains("::text"));
    }
}
