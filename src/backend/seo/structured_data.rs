/**
 * Structured Data
 *
 * schema.org JSON-LD for vehicle detail pages: a combined Vehicle/Product
 * offer sold by the dealership, and the Home > Inventory > Vehicle
 * breadcrumb trail.
 */

use serde_json::{json, Value};

use crate::shared::Vehicle;

pub const DEALER_NAME: &str = "Car Street";
pub const DEALER_STREET: &str = "17 Queen St";
pub const DEALER_LOCALITY: &str = "Langton";
pub const DEALER_REGION: &str = "ON";
pub const DEALER_POSTAL_CODE: &str = "N0E 1G0";
pub const DEALER_COUNTRY: &str = "CA";
pub const DEALER_TELEPHONE: &str = "+16398990000";

pub fn vehicle_schema(vehicle: &Vehicle, site_url: &str) -> Value {
    let url = format!("{site_url}/vehicle/{}", vehicle.id);
    let image = vehicle
        .primary_image()
        .map(|image| image.image_url.clone())
        .unwrap_or_else(|| format!("{site_url}/placeholder.svg"));
    let description = vehicle.description.clone().unwrap_or_else(|| {
        format!("{} - {}", vehicle.title(), crate::backend::render::html::format_km(vehicle.mileage))
    });

    json!({
        "@context": "https://schema.org",
        "@type": ["Vehicle", "Product"],
        "name": vehicle.title(),
        "description": description,
        "vehicleIdentificationNumber": vehicle.vin,
        "brand": { "@type": "Brand", "name": vehicle.make },
        "model": vehicle.model,
        "productionDate": vehicle.year.to_string(),
        "mileageFromOdometer": {
            "@type": "QuantitativeValue",
            "value": vehicle.mileage,
            "unitCode": "KMT",
        },
        "vehicleTransmission": vehicle.transmission,
        "fuelType": vehicle.fuel_type,
        "driveWheelConfiguration": vehicle.drivetrain,
        "vehicleEngine": {
            "@type": "EngineSpecification",
            "name": vehicle.engine.as_deref().unwrap_or("Not specified"),
        },
        "color": vehicle.color,
        "itemCondition": vehicle.condition.schema_condition(),
        "offers": {
            "@type": "Offer",
            "price": vehicle.price,
            "priceCurrency": "CAD",
            "availability": vehicle.status.schema_availability(),
            "url": url,
            "seller": {
                "@type": "AutoDealer",
                "name": DEALER_NAME,
                "address": {
                    "@type": "PostalAddress",
                    "streetAddress": DEALER_STREET,
                    "addressLocality": DEALER_LOCALITY,
                    "addressRegion": DEALER_REGION,
                    "postalCode": DEALER_POSTAL_CODE,
                    "addressCountry": DEALER_COUNTRY,
                },
                "telephone": DEALER_TELEPHONE,
            },
        },
        "image": image,
        "url": url,
    })
}

pub fn breadcrumb_schema(vehicle: &Vehicle, site_url: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": [
            { "@type": "ListItem", "position": 1, "name": "Home", "item": site_url },
            { "@type": "ListItem", "position": 2, "name": "Inventory", "item": format!("{site_url}/inventory") },
            {
                "@type": "ListItem",
                "position": 3,
                "name": vehicle.title(),
                "item": format!("{site_url}/vehicle/{}", vehicle.id),
            },
        ],
    })
}

/// Serialize for embedding inside a `<script>` element
///
/// `</` is written as `<\/` so a value containing `</script>` cannot close
/// the element early; the JSON meaning is unchanged.
pub fn script_safe_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}
