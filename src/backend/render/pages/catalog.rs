/**
 * Catalog Pages
 *
 * Home, inventory and vehicle detail. These are the pages that read from
 * the store; the data is fetched by the caller and passed in, so every
 * function here is a pure transformation into a [`RenderedPage`].
 */

use crate::backend::render::html::{escape_html, format_km, format_price};
use crate::backend::render::pages::layout::{layout, page_head, page_head_of_type, vehicle_card, SITE_NAME};
use crate::backend::render::head::HeadMetadata;
use crate::backend::render::renderer::RenderedPage;
use crate::backend::seo::structured_data::{breadcrumb_schema, script_safe_json, vehicle_schema};
use crate::shared::vehicle::PriceBand;
use crate::shared::{InventoryFacets, InventoryFilter, Vehicle};

const HOME_TITLE: &str = "Car Street | Used Car Dealership in Langton, Ontario | Financing Available";
const HOME_DESCRIPTION: &str = "Serving Langton, Brampton, Mississauga, and the GTA. Car Street offers certified used vehicles, transparent pricing, and instant financing for all credit types.";
const INVENTORY_TITLE: &str = "Inventory | Browse Used Cars, Trucks & SUVs";
const INVENTORY_DESCRIPTION: &str = "Browse our selection of quality pre-owned vehicles at Car Street. Find the perfect used car with competitive pricing and flexible financing options.";

const SELLING_POINTS: [(&str, &str); 4] = [
    ("Special Financing Offers", "Flexible financing for every credit situation."),
    ("Transparent Pricing", "No hidden fees. The price you see is the price you pay."),
    ("Buy Smart, Sell Right", "Fair trade-in values and instant offers on your vehicle."),
    ("Quality Guaranteed", "Every vehicle is inspected before it reaches the lot."),
];

pub fn home(site_url: &str, featured: &[Vehicle]) -> RenderedPage {
    let cards: String = featured.iter().map(vehicle_card).collect();
    let featured_section = if featured.is_empty() {
        r#"<p class="empty">New arrivals are on the way. <a href="/inventory">Browse the full inventory</a>.</p>"#.to_string()
    } else {
        format!(r#"<div class="vehicle-grid">{cards}</div>"#)
    };
    let points: String = SELLING_POINTS
        .iter()
        .map(|(title, body)| format!("<li><h3>{title}</h3><p>{body}</p></li>"))
        .collect();

    let main = format!(
        r#"<section class="hero"><h1>Quality Pre-Owned Vehicles in Langton</h1><p>Financing available for all credit types.</p><a class="button" href="/inventory">View Inventory</a> <a class="button outline" href="/pre-approval">Get Pre-Approved</a></section><section class="featured"><h2>Featured Vehicles</h2><p>Check out our hand-picked selection of quality vehicles</p>{featured_section}</section><section class="why-us"><h2>Why Choose {SITE_NAME}</h2><ul>{points}</ul></section>"#
    );

    RenderedPage {
        html: layout(&main),
        head: page_head(site_url, "/", HOME_TITLE, HOME_DESCRIPTION),
    }
}

fn select(name: &str, label: &str, options: &[(String, String)], selected: Option<&str>) -> String {
    let mut html = format!(
        r#"<label>{label}<select name="{name}"><option value="all">All</option>"#
    );
    for (value, text) in options {
        let marker = if selected == Some(value.as_str()) { " selected" } else { "" };
        html.push_str(&format!(
            r#"<option value="{}"{marker}>{}</option>"#,
            escape_html(value),
            escape_html(text)
        ));
    }
    html.push_str("</select></label>");
    html
}

fn filter_form(filter: &InventoryFilter, facets: &InventoryFacets) -> String {
    let makes: Vec<(String, String)> = facets.makes.iter().map(|m| (m.clone(), m.clone())).collect();
    let models: Vec<(String, String)> = facets.models.iter().map(|m| (m.clone(), m.clone())).collect();
    let years: Vec<(String, String)> = facets.years.iter().map(|y| (y.to_string(), y.to_string())).collect();
    let prices: Vec<(String, String)> = [
        ("under20k", "Under $20,000"),
        ("20to30k", "$20,000 - $30,000"),
        ("over30k", "Over $30,000"),
    ]
    .iter()
    .map(|(v, t)| (v.to_string(), t.to_string()))
    .collect();
    let selected_price = filter.price.map(|band| match band {
        PriceBand::Under20k => "under20k",
        PriceBand::From20kTo30k => "20to30k",
        PriceBand::Over30k => "over30k",
    });
    let year = filter.year.map(|y| y.to_string());

    format!(
        r#"<form class="filters" method="get" action="/inventory"><input type="search" name="q" placeholder="Search make, model or year" value="{search}" />{make}{model}{year}{price}<button type="submit">Filter</button></form>"#,
        search = escape_html(filter.search.as_deref().unwrap_or("")),
        make = select("make", "Make", &makes, filter.make.as_deref()),
        model = select("model", "Model", &models, filter.model.as_deref()),
        year = select("year", "Year", &years, year.as_deref()),
        price = select("price", "Price", &prices, selected_price),
    )
}

/// `available` is the whole available inventory; facets come from it, results from the filter
pub fn inventory(site_url: &str, available: Vec<Vehicle>, filter: &InventoryFilter) -> RenderedPage {
    let facets = InventoryFacets::collect(&available);
    let results = filter.apply(available);
    let count = match results.len() {
        1 => "1 vehicle found".to_string(),
        n => format!("{n} vehicles found"),
    };
    let listing = if results.is_empty() {
        r#"<p class="empty">No vehicles match your filters. <a href="/inventory">Clear filters</a></p>"#.to_string()
    } else {
        let cards: String = results.iter().map(vehicle_card).collect();
        format!(r#"<div class="vehicle-grid">{cards}</div>"#)
    };

    let main = format!(
        r#"<section class="inventory"><h1>Our Inventory</h1><p>Browse our selection of quality pre-owned vehicles</p>{form}<p class="result-count">{count}</p>{listing}</section>"#,
        form = filter_form(filter, &facets),
    );

    RenderedPage {
        html: layout(&main),
        head: page_head(site_url, "/inventory", INVENTORY_TITLE, INVENTORY_DESCRIPTION)
            .with_meta(
                "keywords",
                "used cars for sale, pre-owned vehicles, car inventory, used car dealership Langton Ontario",
            ),
    }
}

pub fn vehicle_detail(site_url: &str, vehicle: &Vehicle) -> RenderedPage {
    let title = vehicle.title();
    let path = format!("/vehicle/{}", vehicle.id);
    let description = format!(
        "{title} for sale at {SITE_NAME} - {}, {}. Financing available.",
        format_price(vehicle.price),
        format_km(vehicle.mileage)
    );

    let gallery: String = vehicle
        .images
        .iter()
        .map(|image| {
            format!(
                r#"<img src="{}" alt="{}" />"#,
                escape_html(&image.image_url),
                escape_html(&title)
            )
        })
        .collect();

    let optional = |label: &str, value: &Option<String>| match value.as_deref() {
        Some(v) if !v.is_empty() => format!("<dt>{label}</dt><dd>{}</dd>", escape_html(v)),
        _ => String::new(),
    };
    let specs = format!(
        "<dl class=\"specs\"><dt>Year</dt><dd>{year}</dd><dt>Mileage</dt><dd>{km}</dd><dt>Transmission</dt><dd>{transmission}</dd><dt>Fuel Type</dt><dd>{fuel}</dd><dt>Drivetrain</dt><dd>{drivetrain}</dd>{engine}<dt>Color</dt><dd>{color}</dd>{body}{vin}<dt>Condition</dt><dd>{condition}</dd><dt>Status</dt><dd>{status}</dd></dl>",
        year = vehicle.year,
        km = format_km(vehicle.mileage),
        transmission = escape_html(&vehicle.transmission),
        fuel = escape_html(&vehicle.fuel_type),
        drivetrain = escape_html(&vehicle.drivetrain),
        engine = optional("Engine", &vehicle.engine),
        color = escape_html(&vehicle.color),
        body = optional("Body Type", &vehicle.body_type),
        vin = optional("VIN", &vehicle.vin),
        condition = vehicle.condition.as_str().replace('_', " "),
        status = vehicle.status.as_str(),
    );
    let about = vehicle
        .description
        .as_deref()
        .map(|d| format!("<section class=\"description\"><h2>Description</h2><p>{}</p></section>", escape_html(d)))
        .unwrap_or_default();

    let main = format!(
        r#"<nav class="breadcrumb"><a href="/">Home</a> / <a href="/inventory">Inventory</a> / <span>{heading}</span></nav><article class="vehicle-detail"><div class="gallery">{gallery}</div><h1>{heading}</h1><p class="price">{price}</p>{specs}{about}<a class="button" href="/pre-approval">Get Pre-Approved</a> <a class="button outline" href="/contact">Contact Us</a></article>"#,
        heading = escape_html(&title),
        price = format_price(vehicle.price),
    );

    let mut head = page_head_of_type(
        site_url,
        &path,
        &format!("{title} | {SITE_NAME}"),
        &description,
        "product",
    );
    if let Some(image) = vehicle.primary_image() {
        head = head
            .with_image_preload(&image.image_url)
            .with_property("og:image", &image.image_url);
    }
    head = head
        .with_json_ld(&script_safe_json(&vehicle_schema(vehicle, site_url)))
        .with_json_ld(&script_safe_json(&breadcrumb_schema(vehicle, site_url)));

    RenderedPage { html: layout(&main), head }
}

pub fn vehicle_not_found() -> RenderedPage {
    let main = r#"<section class="not-found"><h1>Vehicle Not Found</h1><p>This vehicle may have been sold or removed from our inventory.</p><a class="button" href="/inventory">Back to Inventory</a></section>"#;
    RenderedPage {
        html: layout(main),
        head: HeadMetadata::new().with_title(&format!("Vehicle Not Found | {SITE_NAME}")).noindex(),
    }
}
