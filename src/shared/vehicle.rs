//! Vehicle catalog types
//!
//! Vehicles and their images as stored in the hosted `vehicles` and
//! `vehicle_images` tables, plus the inventory filter used by both the
//! inventory page and the public catalog API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Listing status of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    Pending,
    Sold,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Sold => "sold",
        }
    }

    /// schema.org availability URL used in structured data
    pub fn schema_availability(&self) -> &'static str {
        match self {
            Self::Available => "https://schema.org/InStock",
            Self::Pending => "https://schema.org/PreOrder",
            Self::Sold => "https://schema.org/OutOfStock",
        }
    }
}

impl TryFrom<String> for VehicleStatus {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "available" => Ok(Self::Available),
            "pending" => Ok(Self::Pending),
            "sold" => Ok(Self::Sold),
            _ => Err(SharedError::invalid_value("vehicle status", value)),
        }
    }
}

/// Mechanical/cosmetic condition grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCondition {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl VehicleCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsWork => "needs_work",
        }
    }

    /// schema.org item condition URL used in structured data
    pub fn schema_condition(&self) -> &'static str {
        match self {
            Self::Excellent => "https://schema.org/NewCondition",
            Self::Good | Self::Fair => "https://schema.org/UsedCondition",
            Self::NeedsWork => "https://schema.org/DamagedCondition",
        }
    }
}

impl TryFrom<String> for VehicleCondition {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "needs_work" => Ok(Self::NeedsWork),
            _ => Err(SharedError::invalid_value("vehicle condition", value)),
        }
    }
}

/// A photo attached to a vehicle listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VehicleImage {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub image_url: String,
    pub is_primary: bool,
    pub display_order: i32,
}

/// An image an admin attaches to a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVehicleImage {
    pub image_url: String,
    #[serde(default)]
    pub is_primary: bool,
}

impl NewVehicleImage {
    /// The URL must be absolute `http(s)` or a site-relative path
    pub fn validate(&self) -> Result<(), SharedError> {
        let image_url = self.image_url.trim();
        let valid = image_url.starts_with('/')
            || url::Url::parse(image_url).is_ok_and(|u| matches!(u.scheme(), "http" | "https"));
        if valid {
            Ok(())
        } else {
            Err(SharedError::validation("image_url", "Image URL must be an http(s) URL or a path"))
        }
    }
}

/// A vehicle in the dealership inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    /// Odometer reading in kilometres
    pub mileage: i32,
    pub vin: Option<String>,
    pub transmission: String,
    pub fuel_type: String,
    pub drivetrain: String,
    pub engine: Option<String>,
    pub color: String,
    pub body_type: Option<String>,
    #[sqlx(try_from = "String")]
    pub condition: VehicleCondition,
    #[sqlx(try_from = "String")]
    pub status: VehicleStatus,
    pub description: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Images ordered by `display_order`; loaded separately from the row
    #[sqlx(skip)]
    #[serde(default)]
    pub images: Vec<VehicleImage>,
}

impl Vehicle {
    /// "2019 Honda Civic"
    pub fn title(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }

    /// The image flagged as primary, falling back to the first by display order
    pub fn primary_image(&self) -> Option<&VehicleImage> {
        self.images
            .iter()
            .find(|image| image.is_primary)
            .or_else(|| self.images.iter().min_by_key(|image| image.display_order))
    }

    /// True when `ids` names every image of this vehicle exactly once
    pub fn is_image_permutation(&self, ids: &[Uuid]) -> bool {
        let own: Vec<Uuid> = self.images.iter().map(|image| image.id).collect();
        is_permutation_of(ids, &own)
    }
}

/// True when `ordered` lists every id in `current` exactly once
pub fn is_permutation_of(ordered: &[Uuid], current: &[Uuid]) -> bool {
    let mut ordered_sorted = ordered.to_vec();
    ordered_sorted.sort();
    ordered_sorted.dedup();
    let mut current = current.to_vec();
    current.sort();
    ordered_sorted.len() == ordered.len() && ordered_sorted == current
}

/// Fields accepted when an admin creates or edits a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInput {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: i32,
    #[serde(default)]
    pub vin: Option<String>,
    pub transmission: String,
    pub fuel_type: String,
    pub drivetrain: String,
    #[serde(default)]
    pub engine: Option<String>,
    pub color: String,
    #[serde(default)]
    pub body_type: Option<String>,
    pub condition: VehicleCondition,
    pub status: VehicleStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl VehicleInput {
    /// Reject inputs the listing pages cannot display sensibly
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.make.trim().is_empty() {
            return Err(SharedError::validation("make", "Make is required"));
        }
        if self.model.trim().is_empty() {
            return Err(SharedError::validation("model", "Model is required"));
        }
        if !(1900..=2100).contains(&self.year) {
            return Err(SharedError::validation("year", "Year is out of range"));
        }
        if self.price < 0.0 || !self.price.is_finite() {
            return Err(SharedError::validation("price", "Price must be a positive amount"));
        }
        if self.mileage < 0 {
            return Err(SharedError::validation("mileage", "Mileage cannot be negative"));
        }
        if let Some(vin) = &self.vin {
            if !vin.is_empty() && vin.len() != 17 {
                return Err(SharedError::validation("vin", "VIN must be 17 characters"));
            }
        }
        Ok(())
    }
}

/// Price bucket offered by the inventory filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBand {
    Under20k,
    From20kTo30k,
    Over30k,
}

impl PriceBand {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "under20k" => Some(Self::Under20k),
            "20to30k" => Some(Self::From20kTo30k),
            "over30k" => Some(Self::Over30k),
            _ => None,
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        match self {
            Self::Under20k => price < 20_000.0,
            Self::From20kTo30k => (20_000.0..30_000.0).contains(&price),
            Self::Over30k => price >= 30_000.0,
        }
    }
}

/// Inventory search criteria
///
/// Every criterion is optional; an empty filter matches every vehicle.
/// Query-string values of `"all"` (what the inventory page's selects
/// submit for "no filter") are treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryFilter {
    pub search: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price: Option<PriceBand>,
    pub max_price: Option<f64>,
}

impl InventoryFilter {
    /// Build a filter from decoded query-string pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
    {
        let mut filter = Self::default();
        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() || value == "all" {
                continue;
            }
            match key.as_ref() {
                "q" | "search" => filter.search = Some(value.to_string()),
                "make" => filter.make = Some(value.to_string()),
                "model" => filter.model = Some(value.to_string()),
                "year" => filter.year = value.parse().ok(),
                "price" => filter.price = PriceBand::parse(value),
                "maxPrice" => filter.max_price = value.parse().ok(),
                _ => {}
            }
        }
        filter
    }

    /// Parse a raw query string (`make=Honda&price=under20k`)
    pub fn from_query(query: &str) -> Self {
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = vehicle.make.to_lowercase().contains(&needle)
                || vehicle.model.to_lowercase().contains(&needle)
                || vehicle.year.to_string().contains(search.as_str());
            if !hit {
                return false;
            }
        }
        if self.make.as_deref().is_some_and(|make| make != vehicle.make) {
            return false;
        }
        if self.model.as_deref().is_some_and(|model| model != vehicle.model) {
            return false;
        }
        if self.year.is_some_and(|year| year != vehicle.year) {
            return false;
        }
        if self.price.is_some_and(|band| !band.contains(vehicle.price)) {
            return false;
        }
        if self.max_price.is_some_and(|max| vehicle.price > max) {
            return false;
        }
        true
    }

    pub fn apply(&self, vehicles: Vec<Vehicle>) -> Vec<Vehicle> {
        vehicles.into_iter().filter(|v| self.matches(v)).collect()
    }
}

/// Distinct values offered by the inventory filter selects
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryFacets {
    pub makes: Vec<String>,
    pub models: Vec<String>,
    /// Newest first
    pub years: Vec<i32>,
}

impl InventoryFacets {
    pub fn collect(vehicles: &[Vehicle]) -> Self {
        let mut makes: Vec<String> = vehicles.iter().map(|v| v.make.clone()).collect();
        makes.sort();
        makes.dedup();
        let mut models: Vec<String> = vehicles.iter().map(|v| v.model.clone()).collect();
        models.sort();
        models.dedup();
        let mut years: Vec<i32> = vehicles.iter().map(|v| v.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        Self { makes, models, years }
    }
}

/// The slice of a vehicle a sitemap needs
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SitemapVehicle {
    pub id: Uuid,
    pub updated_at: DateTime<Utc>,
}


#[cfg(test)]
mod tests {
    use super::fixtures::vehicle;
    use super::*;

    #[test]
    fn test_status_round_trip_from_database_text() {
        assert_eq!(VehicleStatus::try_from("sold".to_string()).unwrap(), VehicleStatus::Sold);
        assert!(VehicleStatus::try_from("scrapped".to_string()).is_err());
    }

    #[test]
    fn test_price_bands_are_half_open() {
        assert!(PriceBand::Under20k.contains(19_999.99));
        assert!(!PriceBand::Under20k.contains(20_000.0));
        assert!(PriceBand::From20kTo30k.contains(20_000.0));
        assert!(!PriceBand::From20kTo30k.contains(30_000.0));
        assert!(PriceBand::Over30k.contains(30_000.0));
    }

    #[test]
    fn test_filter_from_query_ignores_all() {
        let filter = InventoryFilter::from_query("make=all&model=Civic&price=under20k&maxPrice=15000");
        assert_eq!(filter.make, None);
        assert_eq!(filter.model.as_deref(), Some("Civic"));
        assert_eq!(filter.price, Some(PriceBand::Under20k));
        assert_eq!(filter.max_price, Some(15_000.0));
    }

    #[test]
    fn test_search_matches_make_model_or_year() {
        let civic = vehicle("Honda", "Civic", 2019, 18_500.0);
        let filter = InventoryFilter { search: Some("hon".into()), ..Default::default() };
        assert!(filter.matches(&civic));
        let filter = InventoryFilter { search: Some("2019".into()), ..Default::default() };
        assert!(filter.matches(&civic));
        let filter = InventoryFilter { search: Some("ford".into()), ..Default::default() };
        assert!(!filter.matches(&civic));
    }

    #[test]
    fn test_max_price_is_inclusive() {
        let civic = vehicle("Honda", "Civic", 2019, 18_500.0);
        let filter = InventoryFilter { max_price: Some(18_500.0), ..Default::default() };
        assert!(filter.matches(&civic));
        let filter = InventoryFilter { max_price: Some(18_000.0), ..Default::default() };
        assert!(!filter.matches(&civic));
    }

    #[test]
    fn test_facets_are_sorted_and_unique() {
        let vehicles = vec![
            vehicle("Toyota", "Corolla", 2018, 16_000.0),
            vehicle("Honda", "Civic", 2021, 24_000.0),
            vehicle("Honda", "Accord", 2018, 21_000.0),
        ];
        let facets = InventoryFacets::collect(&vehicles);
        assert_eq!(facets.makes, vec!["Honda", "Toyota"]);
        assert_eq!(facets.models, vec!["Accord", "Civic", "Corolla"]);
        assert_eq!(facets.years, vec![2021, 2018]);
    }

    #[test]
    fn test_primary_image_falls_back_to_first_in_order() {
        let mut civic = vehicle("Honda", "Civic", 2019, 18_500.0);
        let image = |order: i32, primary: bool| VehicleImage {
            id: Uuid::new_v4(),
            vehicle_id: civic.id,
            image_url: format!("https://cdn.example/{order}.jpg"),
            is_primary: primary,
            display_order: order,
        };
        civic.images = vec![image(2, false), image(1, false)];
        assert_eq!(civic.primary_image().unwrap().display_order, 1);
        civic.images.push(image(3, true));
        assert_eq!(civic.primary_image().unwrap().display_order, 3);
    }

    #[test]
    fn test_image_permutation_needs_every_image_once() {
        let mut civic = vehicle("Honda", "Civic", 2019, 18_500.0);
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        civic.images = ids
            .iter()
            .enumerate()
            .map(|(order, id)| VehicleImage {
                id: *id,
                vehicle_id: civic.id,
                image_url: format!("/img/{order}.jpg"),
                is_primary: false,
                display_order: order as i32,
            })
            .collect();
        let (a, b, c) = (ids[0], ids[1], ids[2]);

        assert!(civic.is_image_permutation(&[c, a, b]));
        assert!(!civic.is_image_permutation(&[c]));
        assert!(!civic.is_image_permutation(&[a, a, c]));
        assert!(!civic.is_image_permutation(&[a, b, c, c]));
        assert!(!civic.is_image_permutation(&[a, b, Uuid::new_v4()]));
    }

    #[test]
    fn test_new_image_url_validation() {
        let image = |url: &str| NewVehicleImage { image_url: url.to_string(), is_primary: false };
        assert!(image("https://cdn.example/car.jpg").validate().is_ok());
        assert!(image("/img/car.jpg").validate().is_ok());
        assert!(image("").validate().is_err());
        assert!(image("javascript:alert(1)").validate().is_err());
        assert!(image("car.jpg").validate().is_err());
    }

    #[test]
    fn test_vin_must_be_seventeen_chars() {
        let civic = vehicle("Honda", "Civic", 2019, 18_500.0);
        let mut input = VehicleInput {
            make: civic.make,
            model: civic.model,
            year: civic.year,
            price: civic.price,
            mileage: civic.mileage,
            vin: Some("SHORT".into()),
            transmission: civic.transmission,
            fuel_type: civic.fuel_type,
            drivetrain: civic.drivetrain,
            engine: None,
            color: civic.color,
            body_type: None,
            condition: civic.condition,
            status: civic.status,
            description: None,
            featured: false,
        };
        assert!(input.validate().is_err());
        input.vin = Some("1HGCM82633A004352".into());
        assert!(input.validate().is_ok());
    }
}
